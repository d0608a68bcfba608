//! In-memory integration tests for the trash view.

use super::helpers::{Engine, engine, owner};
use rstest::rstest;
use std::collections::HashSet;
use todo_keeper::todo::services::{TodoServiceError, TrashPageRequest};

#[rstest]
#[case(1)]
#[case(4)]
#[case(5)]
#[case(100)]
#[tokio::test(flavor = "multi_thread")]
async fn concatenated_pages_list_every_trashed_todo_once(
    engine: Engine,
    #[case] page_size: i64,
) -> Result<(), eyre::Report> {
    let u1 = owner("U1")?;
    for index in 0..10 {
        engine
            .trashed_days_ago(&u1, &format!("todo {index}"), index)
            .await?;
    }

    let first = engine
        .trash
        .list_trash(&u1, TrashPageRequest::new(1, page_size))
        .await?;
    let total_pages = first.meta.total_pages;
    eyre::ensure!(first.meta.total == 10, "total counts every trashed todo");
    eyre::ensure!(
        total_pages == first.meta.total.div_ceil(first.meta.page_size.into()),
        "total pages is the ceiling of total over page size"
    );

    let mut seen = HashSet::new();
    for page in 1..=total_pages {
        let listing = engine
            .trash
            .list_trash(&u1, TrashPageRequest::new(i64::try_from(page)?, page_size))
            .await?;
        for item in listing.items {
            eyre::ensure!(seen.insert(item.todo.id()), "todo listed twice");
        }
    }
    eyre::ensure!(seen.len() == 10, "pages should cover the whole trash");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn purge_one_succeeds_only_after_the_window(engine: Engine) -> Result<(), eyre::Report> {
    let u1 = owner("U1")?;
    let fresh = engine.trashed_days_ago(&u1, "fresh", 29).await?;
    let expired = engine.trashed_days_ago(&u1, "expired", 30).await?;

    let refused = engine.trash.purge_one(&u1, fresh.id()).await;
    engine.trash.purge_one(&u1, expired.id()).await?;
    let listing = engine
        .trash
        .list_trash(&u1, TrashPageRequest::default())
        .await?;

    eyre::ensure!(
        matches!(refused, Err(TodoServiceError::NotFound(_))),
        "fresh deletions are reported as not found"
    );
    eyre::ensure!(listing.meta.total == 1, "only the fresh todo remains");
    Ok(())
}

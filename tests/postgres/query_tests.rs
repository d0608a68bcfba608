//! Filtering, ordering, and paging through `PostgreSQL` queries.

use super::helpers::{PgEngine, owner, titles};
use chrono::Duration;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use todo_keeper::todo::{
    domain::TodoPriority,
    query::{ListTodosOptions, SortDirection, SortField},
    services::{CreateTodoRequest, TrashPageRequest},
};

#[rstest]
#[case::ascending(SortDirection::Asc, ["soon", "later", "undated"])]
#[case::descending(SortDirection::Desc, ["undated", "later", "soon"])]
fn due_date_sort_places_missing_dates_like_the_memory_store(
    shared_test_cluster: &'static TestCluster,
    #[case] direction: SortDirection,
    #[case] expected: [&str; 3],
) -> eyre::Result<()> {
    let engine = PgEngine::start(shared_test_cluster)?;
    let u1 = owner("U1")?;

    engine.block_on(async {
        engine
            .lifecycle
            .create(&u1, CreateTodoRequest::new("undated"))
            .await?;
        engine
            .lifecycle
            .create(&u1, CreateTodoRequest::new("later").with_due_date("2026-03-25"))
            .await?;
        engine
            .lifecycle
            .create(&u1, CreateTodoRequest::new("soon").with_due_date("2026-03-20"))
            .await?;

        let listed = engine
            .lifecycle
            .list(
                &u1,
                &ListTodosOptions::new().sorted_by(SortField::DueDate, direction),
            )
            .await?;
        eyre::ensure!(titles(&listed) == expected, "got {:?}", titles(&listed));
        Ok(())
    })
}

#[rstest]
#[case::descending(SortDirection::Desc, ["high", "normal", "low"])]
#[case::ascending(SortDirection::Asc, ["low", "normal", "high"])]
fn priority_sorts_by_rank_not_by_name(
    shared_test_cluster: &'static TestCluster,
    #[case] direction: SortDirection,
    #[case] expected: [&str; 3],
) -> eyre::Result<()> {
    let engine = PgEngine::start(shared_test_cluster)?;
    let u1 = owner("U1")?;

    engine.block_on(async {
        for (title, priority) in [
            ("normal", TodoPriority::Normal),
            ("high", TodoPriority::High),
            ("low", TodoPriority::Low),
        ] {
            engine
                .lifecycle
                .create(&u1, CreateTodoRequest::new(title).with_priority(priority))
                .await?;
        }

        let listed = engine
            .lifecycle
            .list(
                &u1,
                &ListTodosOptions::new().sorted_by(SortField::Priority, direction),
            )
            .await?;
        eyre::ensure!(titles(&listed) == expected, "got {:?}", titles(&listed));
        Ok(())
    })
}

#[rstest]
#[case::percent("100%", "100% juice")]
#[case::underscore("e_c", "snake_case notes")]
#[case::backslash(r"a\b", r"path a\b")]
#[case::case_insensitive("JUICE", "100% juice")]
fn search_terms_match_literally(
    shared_test_cluster: &'static TestCluster,
    #[case] term: &str,
    #[case] expected: &str,
) -> eyre::Result<()> {
    let engine = PgEngine::start(shared_test_cluster)?;
    let u1 = owner("U1")?;

    engine.block_on(async {
        for title in [
            "100% juice",
            "1000 grapes",
            "snake_case notes",
            "snakeXcase notes",
            r"path a\b",
            "path ab",
        ] {
            engine
                .lifecycle
                .create(&u1, CreateTodoRequest::new(title))
                .await?;
        }

        let listed = engine
            .lifecycle
            .list(&u1, &ListTodosOptions::new().with_search(term))
            .await?;
        eyre::ensure!(
            titles(&listed) == [expected],
            "search {term:?} matched {:?}",
            titles(&listed)
        );
        Ok(())
    })
}

#[rstest]
fn search_also_reads_descriptions(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let engine = PgEngine::start(shared_test_cluster)?;
    let u1 = owner("U1")?;

    engine.block_on(async {
        engine
            .lifecycle
            .create(
                &u1,
                CreateTodoRequest::new("Groceries").with_description("use the 50% coupon"),
            )
            .await?;
        engine
            .lifecycle
            .create(&u1, CreateTodoRequest::new("Laundry"))
            .await?;

        let listed = engine
            .lifecycle
            .list(&u1, &ListTodosOptions::new().with_search("50%"))
            .await?;
        eyre::ensure!(titles(&listed) == ["Groceries"], "got {:?}", titles(&listed));
        Ok(())
    })
}

#[rstest]
fn trash_pages_report_totals_newest_deletion_first(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let engine = PgEngine::start(shared_test_cluster)?;
    let u1 = owner("U1")?;

    engine.block_on(async {
        for title in ["t1", "t2", "t3", "t4", "t5"] {
            let created = engine
                .lifecycle
                .create(&u1, CreateTodoRequest::new(title))
                .await?;
            engine.clock.advance(Duration::minutes(1));
            engine.lifecycle.delete(&u1, created.id()).await?;
        }
        engine
            .lifecycle
            .create(&u1, CreateTodoRequest::new("live"))
            .await?;

        let first = engine
            .trash
            .list_trash(&u1, TrashPageRequest::new(1, 2))
            .await?;
        let first_titles: Vec<_> = first.items.iter().map(|item| item.todo.clone()).collect();
        eyre::ensure!(titles(&first_titles) == ["t5", "t4"], "got {:?}", titles(&first_titles));
        eyre::ensure!(first.meta.total == 5, "total counts only trashed todos");
        eyre::ensure!(first.meta.total_pages == 3, "five items make three pages");

        let last = engine
            .trash
            .list_trash(&u1, TrashPageRequest::new(3, 2))
            .await?;
        let last_titles: Vec<_> = last.items.iter().map(|item| item.todo.clone()).collect();
        eyre::ensure!(titles(&last_titles) == ["t1"], "got {:?}", titles(&last_titles));
        eyre::ensure!(
            last.items
                .iter()
                .all(|item| item.purgeable_at.is_some()),
            "trash items carry a purge time"
        );
        Ok(())
    })
}

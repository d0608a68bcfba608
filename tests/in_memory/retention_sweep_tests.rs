//! In-memory integration tests for the retention sweep.

use super::helpers::{Engine, engine, owner};
use rstest::rstest;
use todo_keeper::todo::services::TrashPageRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_purges_expired_and_keeps_recent(engine: Engine) -> Result<(), eyre::Report> {
    let u1 = owner("U1")?;
    let u2 = owner("U2")?;
    engine.trashed_days_ago(&u1, "expired a", 31).await?;
    engine.trashed_days_ago(&u1, "expired b", 40).await?;
    engine.trashed_days_ago(&u2, "expired c", 60).await?;
    engine.trashed_days_ago(&u1, "recent a", 2).await?;
    engine.trashed_days_ago(&u1, "recent b", 29).await?;

    let report = engine.sweeper.run_once().await;
    let trash = engine
        .trash
        .list_trash(&u1, TrashPageRequest::default())
        .await?;

    eyre::ensure!(report.success, "sweep should succeed: {report:?}");
    eyre::ensure!(report.deleted_count == 3, "three todos had expired");
    eyre::ensure!(trash.meta.total == 2, "recent deletions stay in the trash");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_and_purge_one_race_without_errors(engine: Engine) -> Result<(), eyre::Report> {
    let u1 = owner("U1")?;
    let expired = engine.trashed_days_ago(&u1, "expired", 45).await?;

    let (report, purge) = tokio::join!(
        engine.sweeper.run_once(),
        engine.trash.purge_one(&u1, expired.id())
    );

    eyre::ensure!(report.success, "sweep should not fail");
    let purged_by_item = purge.is_ok();
    eyre::ensure!(
        report.deleted_count + u64::from(purged_by_item) == 1,
        "exactly one path removes the todo"
    );
    let second = engine.sweeper.run_once().await;
    eyre::ensure!(second.deleted_count == 0, "repeat sweeps are idempotent");
    Ok(())
}

/**
 * Revocation Ledger Cleanup Scheduler
 *
 * Recurring task that prunes naturally expired tokens from the
 * revocation ledger so the table does not grow without bound.
 *
 * # Scheduling
 *
 * Runs on a fixed `tokio::time::interval` (default one hour). The loop
 * body completes before the next tick is awaited, so runs never
 * overlap; a tick that fires while a run is in progress is delayed.
 */

use std::time::Duration;

use chrono::Utc;
use sqlx::SqlitePool;
use tokio::time::MissedTickBehavior;

use crate::auth::revoked::delete_expired;

/// Delete every revoked token whose expiry has passed.
///
/// Runs in its own transaction; the row count is logged.
pub async fn cleanup_expired_tokens(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let removed = delete_expired(&mut tx, Utc::now()).await?;
    tx.commit().await?;

    if removed > 0 {
        tracing::info!("Cleanup removed {} expired revoked tokens", removed);
    } else {
        tracing::debug!("Cleanup found no expired revoked tokens");
    }

    Ok(removed)
}

/// Spawn the cleanup scheduler on its own task.
///
/// The first tick fires immediately; subsequent runs happen every
/// `period`. Failures are logged and the schedule keeps going.
pub fn spawn_cleanup_scheduler(pool: SqlitePool, period: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if let Err(e) = cleanup_expired_tokens(&pool).await {
                tracing::error!("Revoked-token cleanup failed: {:?}", e);
            }
        }
    })
}

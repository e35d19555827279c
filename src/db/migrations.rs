use std::collections::HashSet;

use color_eyre::{eyre::WrapErr, Result};
use sqlx::SqlitePool;

/// Schema steps in application order. Versions are never renumbered.
const MIGRATIONS: &[(&str, &str)] = &[("V1", include_str!("../../migrations/V1__init.sql"))];

pub async fn run(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
        )",
    )
    .execute(pool)
    .await?;

    let applied: HashSet<String> = sqlx::query_scalar("SELECT version FROM schema_migrations")
        .fetch_all(pool)
        .await?
        .into_iter()
        .collect();

    let pending = MIGRATIONS
        .iter()
        .filter(|(version, _)| !applied.contains(*version));

    for (version, sql) in pending {
        // schema change and bookkeeping commit together
        let mut tx = pool.begin().await?;
        sqlx::raw_sql(sql)
            .execute(&mut *tx)
            .await
            .wrap_err_with(|| format!("migration {version} failed"))?;
        sqlx::query("INSERT INTO schema_migrations (version) VALUES (?)")
            .bind(*version)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(version, "applied database migration");
    }

    Ok(())
}

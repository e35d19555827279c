use color_eyre::Result;

use super::models::StatusRow;
use super::Db;
use crate::models::TestStatus;

impl Db {
    pub async fn status(&self, user_id: i64) -> Result<Option<TestStatus>> {
        let row = sqlx::query_as::<_, StatusRow>(
            "SELECT classic_done, trait_done FROM test_status WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TestStatus::from))
    }

    // Flags are only ever raised here; nothing resets them.

    pub async fn mark_classic_done(&self, user_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO test_status (user_id, classic_done) VALUES (?, 1)
            ON CONFLICT(user_id) DO UPDATE SET classic_done = 1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        tracing::info!("classic test marked done for user={user_id}");
        Ok(())
    }

    pub async fn mark_trait_done(&self, user_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO test_status (user_id, trait_done) VALUES (?, 1)
            ON CONFLICT(user_id) DO UPDATE SET trait_done = 1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        tracing::info!("trait test marked done for user={user_id}");
        Ok(())
    }
}

use color_eyre::Result;

use super::models::{ClassicRow, TraitRow};
use super::Db;
use crate::models::{ClassicResult, TraitResult};

impl Db {
    pub async fn insert_classic_result(&self, full_name: &str, result: &ClassicResult) -> Result<()> {
        sqlx::query(
            "INSERT INTO test_results_classic (full_name, a_pct, b_pct, c_pct, d_pct) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(full_name)
        .bind(result.a_pct)
        .bind(result.b_pct)
        .bind(result.c_pct)
        .bind(result.d_pct)
        .execute(&self.pool)
        .await?;

        tracing::info!("classic result stored for {full_name:?}: {result:?}");
        Ok(())
    }

    pub async fn insert_trait_result(&self, full_name: &str, result: &TraitResult) -> Result<()> {
        let strong = serde_json::to_string(&result.strong)?;
        let weak = serde_json::to_string(&result.weak)?;

        sqlx::query("INSERT INTO test_results_trait (full_name, strong, weak) VALUES (?, ?, ?)")
            .bind(full_name)
            .bind(strong)
            .bind(weak)
            .execute(&self.pool)
            .await?;

        tracing::info!(
            "trait result stored for {full_name:?}: {} strong, {} weak",
            result.strong.len(),
            result.weak.len()
        );
        Ok(())
    }

    /// Most recent classic result recorded under this name.
    pub async fn latest_classic_result(&self, full_name: &str) -> Result<Option<ClassicResult>> {
        let row = sqlx::query_as::<_, ClassicRow>(
            r#"
            SELECT a_pct, b_pct, c_pct, d_pct FROM test_results_classic
            WHERE full_name = ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(full_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ClassicResult::from))
    }

    /// Most recent trait result recorded under this name.
    pub async fn latest_trait_result(&self, full_name: &str) -> Result<Option<TraitResult>> {
        let row = sqlx::query_as::<_, TraitRow>(
            r#"
            SELECT strong, weak FROM test_results_trait
            WHERE full_name = ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(full_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TraitResult::from))
    }
}

use color_eyre::Result;

use super::models::QuestionRow;
use super::Db;
use crate::models::{NewQuestion, Pool, Question};

impl Db {
    pub async fn insert_question(&self, pool: Pool, question: &NewQuestion) -> Result<i64> {
        let sql = format!(
            "INSERT INTO {} (question, option_a, option_b, option_c, option_d) \
             VALUES (?, ?, ?, ?, ?) RETURNING id",
            pool.table()
        );

        let id: i64 = sqlx::query_scalar(&sql)
            .bind(&question.question)
            .bind(&question.options.a)
            .bind(&question.options.b)
            .bind(&question.options.c)
            .bind(&question.options.d)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!("question {id} added to {}", pool.table());
        Ok(id)
    }

    /// All questions of a pool in their authoritative order: oldest first.
    pub async fn questions(&self, pool: Pool) -> Result<Vec<Question>> {
        let sql = format!(
            "SELECT id, question, option_a, option_b, option_c, option_d, created_at \
             FROM {} ORDER BY created_at ASC, id ASC",
            pool.table()
        );

        let rows = sqlx::query_as::<_, QuestionRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Question::from).collect())
    }

    pub async fn count_questions(&self, pool: Pool) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", pool.table());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }
}

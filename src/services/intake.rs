use color_eyre::Result;

use crate::db::Db;
use crate::intake::{self, IntakeError};
use crate::models::{Letter, NewQuestion, Pool};

// ---------------------------------------------------------------------------
// QuestionRepository trait
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait QuestionRepository: Send + Sync {
    fn insert_question(
        &self,
        pool: Pool,
        question: &NewQuestion,
    ) -> impl std::future::Future<Output = Result<i64>> + Send;

    fn count_questions(&self, pool: Pool) -> impl std::future::Future<Output = Result<i64>> + Send;
}

impl QuestionRepository for Db {
    fn insert_question(
        &self,
        pool: Pool,
        question: &NewQuestion,
    ) -> impl std::future::Future<Output = Result<i64>> + Send {
        Db::insert_question(self, pool, question)
    }

    fn count_questions(&self, pool: Pool) -> impl std::future::Future<Output = Result<i64>> + Send {
        Db::count_questions(self, pool)
    }
}

pub enum IntakeOutcome {
    /// Question stored under this id.
    Saved(i64),
    MissingQuestion,
    MissingOption(Letter),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolSizes {
    pub classic: i64,
    pub traits: i64,
}

pub struct IntakeService<R: QuestionRepository = Db> {
    repo: R,
}

impl<R: QuestionRepository + Clone> Clone for IntakeService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R: QuestionRepository> IntakeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Parse the pasted options and store the question in `pool`.
    pub async fn submit(&self, pool: Pool, question: &str, raw_options: &str) -> Result<IntakeOutcome> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(IntakeOutcome::MissingQuestion);
        }

        let options = match intake::parse_options(raw_options) {
            Ok(options) => options,
            Err(IntakeError::MissingOption(letter)) => {
                tracing::debug!("rejected question with missing option {letter}");
                return Ok(IntakeOutcome::MissingOption(letter));
            }
        };

        let id = self
            .repo
            .insert_question(
                pool,
                &NewQuestion {
                    question: question.to_string(),
                    options,
                },
            )
            .await?;

        Ok(IntakeOutcome::Saved(id))
    }

    pub async fn pool_sizes(&self) -> Result<PoolSizes> {
        Ok(PoolSizes {
            classic: self.repo.count_questions(Pool::Classic).await?,
            traits: self.repo.count_questions(Pool::Trait).await?,
        })
    }
}

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use color_eyre::{eyre::WrapErr, Result};

use crate::db::Db;
use crate::flow::{self, Event, QuizFlow, Resume, Step, Transition};
use crate::models::{ClassicResult, Letter, Pool, Question, TestStatus, TraitResult};
use crate::names;

// ---------------------------------------------------------------------------
// QuizRepository trait
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait QuizRepository: Send + Sync {
    fn status(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<TestStatus>>> + Send;

    fn questions(&self, pool: Pool) -> impl std::future::Future<Output = Result<Vec<Question>>> + Send;

    fn insert_classic_result(
        &self,
        full_name: &str,
        result: &ClassicResult,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn insert_trait_result(
        &self,
        full_name: &str,
        result: &TraitResult,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn mark_classic_done(&self, user_id: i64) -> impl std::future::Future<Output = Result<()>> + Send;

    fn mark_trait_done(&self, user_id: i64) -> impl std::future::Future<Output = Result<()>> + Send;
}

impl QuizRepository for Db {
    fn status(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Option<TestStatus>>> + Send {
        Db::status(self, user_id)
    }

    fn questions(&self, pool: Pool) -> impl std::future::Future<Output = Result<Vec<Question>>> + Send {
        Db::questions(self, pool)
    }

    fn insert_classic_result(
        &self,
        full_name: &str,
        result: &ClassicResult,
    ) -> impl std::future::Future<Output = Result<()>> + Send {
        Db::insert_classic_result(self, full_name, result)
    }

    fn insert_trait_result(
        &self,
        full_name: &str,
        result: &TraitResult,
    ) -> impl std::future::Future<Output = Result<()>> + Send {
        Db::insert_trait_result(self, full_name, result)
    }

    fn mark_classic_done(&self, user_id: i64) -> impl std::future::Future<Output = Result<()>> + Send {
        Db::mark_classic_done(self, user_id)
    }

    fn mark_trait_done(&self, user_id: i64) -> impl std::future::Future<Output = Result<()>> + Send {
        Db::mark_trait_done(self, user_id)
    }
}

// ---------------------------------------------------------------------------
// Per-user flow storage
// ---------------------------------------------------------------------------

/// In-progress flows keyed by user id. The lock is never held across an await.
///
/// Only registered users get an entry, at most one each; registering again
/// drops the old one.
#[derive(Clone, Default)]
pub struct FlowStore {
    flows: Arc<Mutex<HashMap<i64, QuizFlow>>>,
}

impl FlowStore {
    fn get(&self, user_id: i64) -> Option<QuizFlow> {
        self.flows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .cloned()
    }

    fn put(&self, user_id: i64, flow: QuizFlow) {
        self.flows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id, flow);
    }

    fn remove(&self, user_id: i64) {
        self.flows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&user_id);
    }
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionScreen {
    pub step: Step,
    pub question: Question,
    pub index: usize,
    pub total: usize,
    pub selected: Option<Letter>,
    pub can_go_back: bool,
}

/// What the user should see after an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Question(QuestionScreen),
    /// Pool of the given step has no questions yet.
    EmptyPool(Step),
    Transition,
    /// Both tests are complete; continue to the results page.
    Results,
}

impl Screen {
    fn of(flow: &QuizFlow) -> Self {
        match flow.step() {
            Step::Classic | Step::Trait => match flow.current() {
                Some(question) => Screen::Question(QuestionScreen {
                    step: flow.step(),
                    question: question.clone(),
                    index: flow.cursor(),
                    total: flow.questions().len(),
                    selected: flow.selected(),
                    can_go_back: flow.can_go_back(),
                }),
                None => Screen::EmptyPool(flow.step()),
            },
            Step::Transition => Screen::Transition,
            Step::Done => Screen::Results,
        }
    }
}

// ---------------------------------------------------------------------------
// QuizService
// ---------------------------------------------------------------------------

pub struct QuizService<R: QuizRepository = Db> {
    repo: R,
    flows: FlowStore,
}

impl<R: QuizRepository + Clone> Clone for QuizService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            flows: self.flows.clone(),
        }
    }
}

impl<R: QuizRepository> QuizService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            flows: FlowStore::default(),
        }
    }

    /// Start (or restart) the flow from the user's persisted status.
    pub async fn enter(&self, user_id: i64) -> Result<Screen> {
        let status = self.repo.status(user_id).await?;

        let flow = match flow::resume(status) {
            Resume::Classic => QuizFlow::classic(self.load(Pool::Classic).await?),
            Resume::Transition => QuizFlow::transition(),
            Resume::Finished => {
                self.flows.remove(user_id);
                return Ok(Screen::Results);
            }
        };

        tracing::debug!("user={user_id} entering {:?}", flow.step());
        let screen = Screen::of(&flow);
        self.flows.put(user_id, flow);
        Ok(screen)
    }

    pub async fn select(&self, user_id: i64, full_name: &str, letter: Letter) -> Result<Screen> {
        self.advance(user_id, full_name, Event::Select(letter)).await
    }

    pub async fn back(&self, user_id: i64, full_name: &str) -> Result<Screen> {
        self.advance(user_id, full_name, Event::Back).await
    }

    /// Discard any in-progress flow, so the next visit resumes from the stored status.
    pub fn forget(&self, user_id: i64) {
        self.flows.remove(user_id);
    }

    /// Leave the transition screen: load the trait pool and show its first question.
    pub async fn start_trait(&self, user_id: i64, full_name: &str) -> Result<Screen> {
        match self.flows.get(user_id) {
            Some(flow) if flow.step() == Step::Transition => {}
            Some(flow) => return Ok(Screen::of(&flow)),
            None => return self.enter(user_id).await,
        }

        let questions = self.load(Pool::Trait).await?;
        if questions.len() != names::TRAIT_POOL_SIZE {
            tracing::warn!(
                "trait pool holds {} questions, expected {}",
                questions.len(),
                names::TRAIT_POOL_SIZE
            );
        }

        self.advance(user_id, full_name, Event::StartTrait(questions))
            .await
    }

    /// Apply one event to the user's flow, persisting whatever a completed
    /// step produced before the new flow replaces the old one.
    async fn advance(&self, user_id: i64, full_name: &str, event: Event) -> Result<Screen> {
        let Some(flow) = self.flows.get(user_id) else {
            tracing::info!("no flow in progress for user={user_id}, re-entering");
            return self.enter(user_id).await;
        };

        let transition = match flow.apply(event) {
            Ok(transition) => transition,
            Err(e) => {
                tracing::warn!("ignored event for user={user_id}: {e}");
                return Ok(Screen::of(&flow));
            }
        };

        match &transition {
            Transition::Moved(_) => {}
            Transition::ClassicFinished { result, .. } => {
                self.repo.insert_classic_result(full_name, result).await?;
                self.repo.mark_classic_done(user_id).await?;
            }
            Transition::TraitFinished { result, .. } => {
                self.repo.insert_trait_result(full_name, result).await?;
                self.repo.mark_trait_done(user_id).await?;
            }
        }

        let next = transition.flow();
        let screen = Screen::of(next);
        if next.step() == Step::Done {
            self.flows.remove(user_id);
        } else {
            self.flows.put(user_id, next.clone());
        }
        Ok(screen)
    }

    async fn load(&self, pool: Pool) -> Result<Vec<Question>> {
        self.repo
            .questions(pool)
            .await
            .wrap_err("questions could not be loaded")
    }
}

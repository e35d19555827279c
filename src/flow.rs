//! Quiz progression as an immutable value.
//!
//! A [`QuizFlow`] is never mutated in place: [`QuizFlow::apply`] consumes an
//! [`Event`] and returns the next flow, together with any result that must be
//! persisted before the next flow is shown.

use std::{collections::HashMap, sync::Arc};

use crate::{
    models::{ClassicResult, Letter, Question, TestStatus, TraitResult},
    scoring,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Classic,
    Transition,
    Trait,
    Done,
}

/// Where a returning user continues, derived from their persisted status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    Classic,
    Transition,
    Finished,
}

pub fn resume(status: Option<TestStatus>) -> Resume {
    match status {
        Some(TestStatus {
            classic_done: true,
            trait_done: true,
        }) => Resume::Finished,
        Some(TestStatus {
            classic_done: true,
            trait_done: false,
        }) => Resume::Transition,
        _ => Resume::Classic,
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    Select(Letter),
    Back,
    StartTrait(Vec<Question>),
}

impl Event {
    fn name(&self) -> &'static str {
        match self {
            Event::Select(_) => "select",
            Event::Back => "back",
            Event::StartTrait(_) => "start-trait",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("cannot {event} while in step {step:?}")]
    UnexpectedEvent { step: Step, event: &'static str },
    #[error("the question pool is empty")]
    EmptyPool,
}

#[derive(Debug, Clone)]
pub enum Transition {
    Moved(QuizFlow),
    ClassicFinished {
        next: QuizFlow,
        result: ClassicResult,
    },
    TraitFinished {
        next: QuizFlow,
        result: TraitResult,
    },
}

impl Transition {
    pub fn flow(&self) -> &QuizFlow {
        match self {
            Transition::Moved(flow) => flow,
            Transition::ClassicFinished { next, .. } | Transition::TraitFinished { next, .. } => {
                next
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuizFlow {
    step: Step,
    questions: Arc<[Question]>,
    cursor: usize,
    answers: HashMap<i64, Letter>,
}

impl QuizFlow {
    pub fn classic(questions: Vec<Question>) -> Self {
        Self::at(Step::Classic, questions)
    }

    pub fn transition() -> Self {
        Self::at(Step::Transition, Vec::new())
    }

    fn at(step: Step, questions: Vec<Question>) -> Self {
        Self {
            step,
            questions: questions.into(),
            cursor: 0,
            answers: HashMap::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &HashMap<i64, Letter> {
        &self.answers
    }

    pub fn current(&self) -> Option<&Question> {
        match self.step {
            Step::Classic | Step::Trait => self.questions.get(self.cursor),
            Step::Transition | Step::Done => None,
        }
    }

    /// The answer already recorded for the current question, if any.
    pub fn selected(&self) -> Option<Letter> {
        self.current()
            .and_then(|question| self.answers.get(&question.id))
            .copied()
    }

    pub fn can_go_back(&self) -> bool {
        self.current().is_some() && self.cursor > 0
    }

    pub fn apply(&self, event: Event) -> Result<Transition, FlowError> {
        match (self.step, event) {
            (Step::Classic | Step::Trait, Event::Select(letter)) => self.select(letter),
            (Step::Classic | Step::Trait, Event::Back) => Ok(Transition::Moved(Self {
                cursor: self.cursor.saturating_sub(1),
                ..self.clone()
            })),
            (Step::Transition, Event::StartTrait(questions)) => {
                Ok(Transition::Moved(Self::at(Step::Trait, questions)))
            }
            (step, event) => Err(FlowError::UnexpectedEvent {
                step,
                event: event.name(),
            }),
        }
    }

    fn select(&self, letter: Letter) -> Result<Transition, FlowError> {
        let question = self.current().ok_or(FlowError::EmptyPool)?;

        let mut answers = self.answers.clone();
        answers.insert(question.id, letter);

        if self.cursor + 1 < self.questions.len() {
            return Ok(Transition::Moved(Self {
                step: self.step,
                questions: Arc::clone(&self.questions),
                cursor: self.cursor + 1,
                answers,
            }));
        }

        if self.step == Step::Classic {
            let result = scoring::classic_percentages(&answers);
            Ok(Transition::ClassicFinished {
                next: Self::transition(),
                result,
            })
        } else {
            let result = scoring::trait_lists(&self.questions, &answers);
            Ok(Transition::TraitFinished {
                next: Self {
                    step: Step::Done,
                    questions: Arc::clone(&self.questions),
                    cursor: self.cursor,
                    answers,
                },
                result,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Options;

    fn pool(n: i64) -> Vec<Question> {
        (1..=n)
            .map(|id| Question {
                id,
                question: format!("Q{id}"),
                options: Options {
                    a: format!("a{id}"),
                    b: format!("b{id}"),
                    c: format!("c{id}"),
                    d: format!("d{id}"),
                },
                created_at: format!("2024-01-01 00:00:{id:02}"),
            })
            .collect()
    }

    fn moved(transition: Transition) -> QuizFlow {
        match transition {
            Transition::Moved(flow) => flow,
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn resume_follows_status_flags() {
        assert_eq!(resume(None), Resume::Classic);
        assert_eq!(resume(Some(TestStatus::default())), Resume::Classic);
        assert_eq!(
            resume(Some(TestStatus {
                classic_done: false,
                trait_done: true
            })),
            Resume::Classic
        );
        assert_eq!(
            resume(Some(TestStatus {
                classic_done: true,
                trait_done: false
            })),
            Resume::Transition
        );
        assert_eq!(
            resume(Some(TestStatus {
                classic_done: true,
                trait_done: true
            })),
            Resume::Finished
        );
    }

    #[test]
    fn selecting_advances_and_records() {
        let flow = QuizFlow::classic(pool(3));
        let flow = moved(flow.apply(Event::Select(Letter::C)).unwrap());

        assert_eq!(flow.cursor(), 1);
        assert_eq!(flow.answers().get(&1), Some(&Letter::C));
        assert_eq!(flow.selected(), None);
    }

    #[test]
    fn apply_leaves_the_source_flow_untouched() {
        let flow = QuizFlow::classic(pool(3));
        let _ = flow.apply(Event::Select(Letter::A)).unwrap();

        assert_eq!(flow.cursor(), 0);
        assert!(flow.answers().is_empty());
    }

    #[test]
    fn back_keeps_the_recorded_answer() {
        let flow = QuizFlow::classic(pool(3));
        let flow = moved(flow.apply(Event::Select(Letter::D)).unwrap());
        let flow = moved(flow.apply(Event::Back).unwrap());

        assert_eq!(flow.cursor(), 0);
        assert_eq!(flow.selected(), Some(Letter::D));
        assert!(!flow.can_go_back());
    }

    #[test]
    fn back_on_first_question_stays_put() {
        let flow = QuizFlow::classic(pool(2));
        let flow = moved(flow.apply(Event::Back).unwrap());
        assert_eq!(flow.cursor(), 0);
    }

    #[test]
    fn reanswering_after_back_overwrites() {
        let flow = QuizFlow::classic(pool(2));
        let flow = moved(flow.apply(Event::Select(Letter::A)).unwrap());
        let flow = moved(flow.apply(Event::Back).unwrap());
        let flow = moved(flow.apply(Event::Select(Letter::B)).unwrap());

        assert_eq!(flow.answers().len(), 1);
        assert_eq!(flow.answers().get(&1), Some(&Letter::B));
    }

    #[test]
    fn last_classic_answer_finishes_into_transition() {
        let mut flow = QuizFlow::classic(pool(4));
        for _ in 0..3 {
            flow = moved(flow.apply(Event::Select(Letter::B)).unwrap());
        }

        match flow.apply(Event::Select(Letter::B)).unwrap() {
            Transition::ClassicFinished { next, result } => {
                assert_eq!(next.step(), Step::Transition);
                assert_eq!(result.b_pct, 100);
                assert_eq!(result.a_pct + result.c_pct + result.d_pct, 0);
            }
            other => panic!("expected classic completion, got {other:?}"),
        }
    }

    #[test]
    fn transition_only_accepts_start_trait() {
        let flow = QuizFlow::transition();
        assert_eq!(
            flow.apply(Event::Select(Letter::A)).unwrap_err(),
            FlowError::UnexpectedEvent {
                step: Step::Transition,
                event: "select"
            }
        );

        let flow = moved(flow.apply(Event::StartTrait(pool(40))).unwrap());
        assert_eq!(flow.step(), Step::Trait);
        assert_eq!(flow.cursor(), 0);
        assert_eq!(flow.questions().len(), 40);
    }

    #[test]
    fn trait_completion_splits_strong_and_weak() {
        let mut flow = moved(QuizFlow::transition().apply(Event::StartTrait(pool(40))).unwrap());
        for _ in 0..39 {
            flow = moved(flow.apply(Event::Select(Letter::A)).unwrap());
        }

        match flow.apply(Event::Select(Letter::D)).unwrap() {
            Transition::TraitFinished { next, result } => {
                assert_eq!(next.step(), Step::Done);
                assert_eq!(result.strong.len(), 20);
                assert_eq!(result.strong[0], "a1");
                assert_eq!(result.weak.len(), 20);
                assert_eq!(result.weak[19], "d40");
            }
            other => panic!("expected trait completion, got {other:?}"),
        }
    }

    #[test]
    fn selecting_in_an_empty_pool_fails() {
        let flow = QuizFlow::classic(Vec::new());
        assert_eq!(
            flow.apply(Event::Select(Letter::A)).unwrap_err(),
            FlowError::EmptyPool
        );
    }

    #[test]
    fn transition_rejects_back() {
        let flow = QuizFlow::classic(pool(1));
        let transition = match flow.apply(Event::Select(Letter::A)).unwrap() {
            Transition::ClassicFinished { next, .. } => next,
            other => panic!("unexpected {other:?}"),
        };
        assert!(transition.apply(Event::Back).is_err());
    }
}

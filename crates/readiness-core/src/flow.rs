//! Quiz flow controller.
//!
//! Steps a session through the ordered question list one question at a time:
//! question -> question -> results. A value is staged with
//! [`QuizFlow::select_answer`] and only committed to the answer record by
//! [`QuizFlow::advance`]. Going back restores the recorded answer.

use tracing::{debug, error, info};

use crate::model::{AnswerRecord, Likert, Question};
use crate::outcome::ResultsContext;
use crate::scoring::score;
use crate::traits::{fetch_questions, RecordStore};

/// Where a flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// No questions to ask; blocks all advancement.
    Unavailable,
    InProgress,
    Completed,
}

/// What a call to [`QuizFlow::advance`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// The flow has no questions.
    Unavailable,
    /// Nothing staged for the current question; nothing changed.
    NothingSelected,
    /// Moved on to the question at this zero-based index.
    Moved(usize),
    /// The last question was answered; the session is scored.
    Completed(ResultsContext),
    /// The flow already completed earlier; nothing changed.
    AlreadyCompleted,
}

/// One quiz session.
#[derive(Debug, Clone)]
pub struct QuizFlow {
    questions: Vec<Question>,
    index: usize,
    answers: AnswerRecord,
    staged: Option<Likert>,
    outcome: Option<ResultsContext>,
}

impl QuizFlow {
    /// Start a session over `questions`, ordered ascending by ordering key.
    pub fn new(mut questions: Vec<Question>) -> Self {
        // Stable: equal keys keep fetch order.
        questions.sort_by_key(Question::order);
        Self {
            questions,
            index: 0,
            answers: AnswerRecord::new(),
            staged: None,
            outcome: None,
        }
    }

    /// Fetch the question list once and start a session.
    ///
    /// A failed fetch is logged and yields the same unavailable flow as an
    /// empty collection. There is no retry.
    pub async fn load(store: &dyn RecordStore) -> Self {
        match fetch_questions(store).await {
            Ok(questions) => {
                info!(store = store.name(), count = questions.len(), "loaded questions");
                Self::new(questions)
            }
            Err(e) => {
                error!("error loading questions from '{}': {e:#}", store.name());
                Self::new(Vec::new())
            }
        }
    }

    pub fn state(&self) -> FlowState {
        if self.outcome.is_some() {
            FlowState::Completed
        } else if self.questions.is_empty() {
            FlowState::Unavailable
        } else {
            FlowState::InProgress
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Zero-based index of the current question.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// "Question N of M".
    pub fn progress_label(&self) -> String {
        format!("Question {} of {}", self.index + 1, self.total())
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        !self.questions.is_empty() && self.index == self.questions.len() - 1
    }

    pub fn staged(&self) -> Option<Likert> {
        self.staged
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    /// The handoff produced on completion, if the flow has completed.
    pub fn outcome(&self) -> Option<&ResultsContext> {
        self.outcome.as_ref()
    }

    /// Stage a value for the current question without recording it.
    ///
    /// Returns `false` (and does nothing) when there is no question to
    /// answer or the flow has completed.
    pub fn select_answer(&mut self, value: Likert) -> bool {
        if self.state() != FlowState::InProgress {
            return false;
        }
        self.staged = Some(value);
        true
    }

    /// Commit the staged value and move forward, scoring after the last question.
    pub fn advance(&mut self) -> Advance {
        match self.state() {
            FlowState::Unavailable => return Advance::Unavailable,
            FlowState::Completed => return Advance::AlreadyCompleted,
            FlowState::InProgress => {}
        }
        let Some(value) = self.staged else {
            return Advance::NothingSelected;
        };
        let question_id = self.questions[self.index].id.clone();
        self.answers.record(question_id, value);

        if !self.is_last() {
            self.index += 1;
            self.staged = self.answers.get(&self.questions[self.index].id);
            debug!(position = self.index, "advanced");
            return Advance::Moved(self.index);
        }

        let card = score(&self.questions, &self.answers);
        info!(
            category = %card.category,
            mindset_score = card.mindset_score,
            "quiz completed"
        );
        let context = ResultsContext::new(card, self.answers.clone());
        self.outcome = Some(context.clone());
        Advance::Completed(context)
    }

    /// Step back one question, restoring its recorded answer as the staged value.
    ///
    /// Returns `false` on the first question, when unavailable, or after completion.
    pub fn retreat(&mut self) -> bool {
        if self.state() != FlowState::InProgress || self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.staged = self.answers.get(&self.questions[self.index].id);
        debug!(position = self.index, "went back");
        true
    }
}

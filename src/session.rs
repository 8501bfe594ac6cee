//! The quiz session state machine.
//!
//! [`SessionEngine`] owns everything about one attempt: which questions are
//! in play, their presentation order, the cursor, the score, and the
//! missed-answer review list. The renderer never mutates any of it; it polls
//! the snapshot views ([`SessionEngine::current_question`],
//! [`SessionEngine::progress`], [`SessionEngine::results`]) after each call.
//!
//! Precondition violations (submit without a selection, select after the
//! question is answered, advance before an answer) are silent no-ops, never
//! panics: they are caller-discipline bugs, not user-facing errors.

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::i18n;
use crate::models::QuestionRecord;

/// Phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No session has been started yet.
    NotStarted,
    /// Questions are being presented.
    InProgress,
    /// The cursor moved past the last question. Terminal until a restart.
    Completed,
}

/// The configurable rule turning a score into a pass/fail verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassPolicy {
    /// Pass when `correct / total` reaches the given fraction.
    FractionAtLeast(f64),
    /// Pass when the absolute number of correct answers reaches the threshold.
    CorrectAtLeast(usize),
}

impl Default for PassPolicy {
    fn default() -> Self {
        PassPolicy::FractionAtLeast(0.5)
    }
}

impl PassPolicy {
    /// Apply the rule. An empty session passes: there was nothing to fail.
    pub fn passed(&self, correct: usize, total: usize) -> bool {
        if total == 0 {
            return true;
        }
        match *self {
            PassPolicy::FractionAtLeast(fraction) => correct as f64 >= fraction * total as f64,
            PassPolicy::CorrectAtLeast(threshold) => correct >= threshold,
        }
    }
}

/// Frozen snapshot of an incorrect answer, captured at submission time in
/// the language active at that moment. A later language switch re-renders
/// the rest of the UI but never rewrites these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissedRecord {
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
}

/// How an option should be marked once the answer is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMark {
    Correct,
    Incorrect,
}

/// One option row of the current question, in presentation order.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub text: String,
    /// Index into the record's original options array.
    pub original_index: usize,
    pub is_selected: bool,
    /// Set only after submission; `None` for unmarked options.
    pub mark: Option<AnswerMark>,
}

/// Snapshot of the current question for the renderer.
#[derive(Debug, Clone)]
pub struct QuestionView {
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub answered: bool,
    pub can_submit: bool,
}

/// 1-based progress for display. Internally the cursor is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

impl Progress {
    /// Fill ratio for the progress bar; defined as 0 for an empty session.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.position as f64 / self.total as f64
        }
    }
}

/// Final score with the verdict of the configured pass policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub correct: usize,
    pub total: usize,
    pub passed: bool,
}

/// Snapshot of the finished session for the result screen.
#[derive(Debug, Clone)]
pub struct ResultView {
    pub summary: ScoreSummary,
    pub missed: Vec<MissedRecord>,
}

/// A question selected into the running session.
#[derive(Debug, Clone)]
struct SessionQuestion {
    bank_index: usize,
    /// Permutation of option indices, generated once per session so the
    /// display order survives language switches and re-renders.
    order: Vec<usize>,
}

/// The session engine. Owns the full question bank and all mutable state of
/// the current attempt; see the module docs for the contract.
pub struct SessionEngine {
    bank: Vec<QuestionRecord>,
    lang: String,
    policy: PassPolicy,
    selected: Vec<SessionQuestion>,
    cursor: usize,
    score: usize,
    /// Pending (not yet submitted) choice, in original-index space.
    pending: Option<usize>,
    /// Whether the current question has been submitted this turn.
    answered: bool,
    missed: Vec<MissedRecord>,
    /// Bumped by every `start_session`; guards stale scheduled advances.
    generation: u64,
    phase: Phase,
}

impl SessionEngine {
    pub fn new(bank: Vec<QuestionRecord>, lang: impl Into<String>, policy: PassPolicy) -> Self {
        Self {
            bank,
            lang: lang.into(),
            policy,
            selected: Vec::new(),
            cursor: 0,
            score: 0,
            pending: None,
            answered: false,
            missed: Vec::new(),
            generation: 0,
            phase: Phase::NotStarted,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn bank_size(&self) -> usize {
        self.bank.len()
    }

    pub fn language(&self) -> &str {
        &self.lang
    }

    /// Switch the display language. Presentation orders and recorded missed
    /// answers are untouched; only live text resolution changes.
    pub fn set_language(&mut self, lang: impl Into<String>) {
        self.lang = lang.into();
    }

    /// Token identifying the current session for scheduled callbacks.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the current question has already been submitted.
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    /// Start a fresh session, discarding any prior one.
    ///
    /// Draws `min(sample_size, bank size)` distinct questions via an
    /// unbiased Fisher-Yates shuffle of the bank indices and gives each a
    /// fresh presentation order. An empty bank completes immediately with a
    /// 0/0 score.
    pub fn start_session<R: Rng>(&mut self, sample_size: usize, rng: &mut R) {
        let mut indices: Vec<usize> = (0..self.bank.len()).collect();
        indices.shuffle(rng);
        indices.truncate(sample_size.min(self.bank.len()));

        self.selected = indices
            .into_iter()
            .map(|bank_index| {
                let mut order: Vec<usize> = (0..self.bank[bank_index].option_count()).collect();
                order.shuffle(rng);
                SessionQuestion { bank_index, order }
            })
            .collect();

        self.cursor = 0;
        self.score = 0;
        self.pending = None;
        self.answered = false;
        self.missed.clear();
        self.generation = self.generation.wrapping_add(1);
        self.phase = if self.selected.is_empty() {
            Phase::Completed
        } else {
            Phase::InProgress
        };
        info!(
            "session {} started: {} of {} questions",
            self.generation,
            self.selected.len(),
            self.bank.len()
        );
    }

    /// Record a pending choice for the current question. Overwrites any
    /// earlier choice; a no-op once the question is answered, after
    /// completion, or for an out-of-range index.
    pub fn select_option(&mut self, option_index: usize) {
        if self.phase != Phase::InProgress || self.answered {
            return;
        }
        let Some(record) = self.current_record() else {
            return;
        };
        if option_index >= record.option_count() {
            return;
        }
        self.pending = Some(option_index);
    }

    /// Score the pending choice against the correct answer, both resolved in
    /// the active language. A no-op without a pending choice or when the
    /// question was already answered.
    pub fn submit_answer(&mut self) {
        if self.phase != Phase::InProgress || self.answered {
            return;
        }
        let Some(selected) = self.pending else {
            return;
        };
        let Some(record) = self.current_record() else {
            return;
        };

        let options = i18n::options(record, &self.lang);
        let correct = i18n::answer(record, &self.lang);
        let picked = options[selected];
        let miss = if picked == correct {
            None
        } else {
            Some(MissedRecord {
                question: i18n::question(record, &self.lang).to_string(),
                your_answer: picked.to_string(),
                correct_answer: correct.to_string(),
            })
        };

        match miss {
            None => self.score += 1,
            Some(record) => self.missed.push(record),
        }
        self.answered = true;
    }

    /// Move to the next question, or complete the session past the last one.
    /// Only meaningful after the current question was answered.
    pub fn advance(&mut self) {
        if self.phase != Phase::InProgress || !self.answered {
            return;
        }
        self.cursor += 1;
        self.pending = None;
        self.answered = false;
        if self.cursor >= self.selected.len() {
            self.phase = Phase::Completed;
            info!("session {} completed: {}/{}", self.generation, self.score, self.selected.len());
        }
    }

    /// Advance only if the session that scheduled the callback is still the
    /// live one. A restart during the delay window bumps the generation and
    /// turns the stale callback into a no-op.
    pub fn advance_if_generation(&mut self, token: u64) {
        if token == self.generation {
            self.advance();
        }
    }

    /// Snapshot of the current question, or `None` outside `InProgress`.
    pub fn current_question(&self) -> Option<QuestionView> {
        if self.phase != Phase::InProgress {
            return None;
        }
        let session_question = self.selected.get(self.cursor)?;
        let record = self.bank.get(session_question.bank_index)?;
        let texts = i18n::options(record, &self.lang);
        let correct = i18n::answer(record, &self.lang);

        let options = session_question
            .order
            .iter()
            .map(|&original_index| {
                let text = texts[original_index];
                let mark = if !self.answered {
                    None
                } else if text == correct {
                    Some(AnswerMark::Correct)
                } else if self.pending == Some(original_index) {
                    Some(AnswerMark::Incorrect)
                } else {
                    None
                };
                OptionView {
                    text: text.to_string(),
                    original_index,
                    is_selected: self.pending == Some(original_index),
                    mark,
                }
            })
            .collect();

        Some(QuestionView {
            prompt: i18n::question(record, &self.lang).to_string(),
            options,
            answered: self.answered,
            can_submit: self.pending.is_some() && !self.answered,
        })
    }

    /// 1-based progress: `cursor + 1` capped at the total while in progress,
    /// pinned to the total once completed, 0/0 before the first start.
    pub fn progress(&self) -> Progress {
        let total = self.selected.len();
        let position = match self.phase {
            Phase::NotStarted => 0,
            Phase::InProgress => (self.cursor + 1).min(total),
            Phase::Completed => total,
        };
        Progress { position, total }
    }

    pub fn score_summary(&self) -> ScoreSummary {
        let total = self.selected.len();
        ScoreSummary {
            correct: self.score,
            total,
            passed: self.policy.passed(self.score, total),
        }
    }

    pub fn results(&self) -> ResultView {
        ResultView {
            summary: self.score_summary(),
            missed: self.missed.clone(),
        }
    }

    pub fn missed(&self) -> &[MissedRecord] {
        &self.missed
    }

    fn current_record(&self) -> Option<&QuestionRecord> {
        let session_question = self.selected.get(self.cursor)?;
        self.bank.get(session_question.bank_index)
    }
}

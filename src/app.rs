//! Application glue between the session engine and the terminal renderer.
//!
//! Owns the engine, the configured languages, the submit-to-advance delay
//! bookkeeping and the result-list scroll position. Input handlers in
//! `lib.rs` call into this; the `ui` module only reads.

use std::time::{Duration, Instant};

use rand::thread_rng;

use crate::i18n::Translations;
use crate::models::QuestionRecord;
use crate::session::{PassPolicy, Phase, SessionEngine};

/// Delay between submitting an answer and advancing to the next question,
/// during which the correct/incorrect reveal stays on screen.
pub const REVEAL_DELAY: Duration = Duration::from_millis(1500);

/// Which screen is on display. Derived from the engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Quiz,
    Result,
}

pub struct App {
    engine: SessionEngine,
    translations: Translations,
    languages: Vec<String>,
    sample_size: usize,
    /// Deadline and session token of the scheduled advance, if one is open.
    pending_advance: Option<(Instant, u64)>,
    result_scroll: usize,
}

impl App {
    pub fn new(
        bank: Vec<QuestionRecord>,
        translations: Translations,
        languages: Vec<String>,
        start_lang: String,
        sample_size: usize,
        policy: PassPolicy,
    ) -> Self {
        Self {
            engine: SessionEngine::new(bank, start_lang, policy),
            translations,
            languages,
            sample_size,
            pending_advance: None,
            result_scroll: 0,
        }
    }

    pub fn engine(&self) -> &SessionEngine {
        &self.engine
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    pub fn language(&self) -> &str {
        self.engine.language()
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn screen(&self) -> Screen {
        match self.engine.phase() {
            Phase::NotStarted => Screen::Welcome,
            Phase::InProgress => Screen::Quiz,
            Phase::Completed => Screen::Result,
        }
    }

    /// Start (or restart) a session. Supersedes any open delay window: the
    /// engine generation moves on, so a stale advance can no longer fire.
    pub fn start(&mut self) {
        self.engine.start_session(self.sample_size, &mut thread_rng());
        self.pending_advance = None;
        self.result_scroll = 0;
    }

    /// Move the highlight down the displayed option list, wrapping around.
    pub fn select_next_option(&mut self) {
        self.move_selection(1);
    }

    /// Move the highlight up the displayed option list, wrapping around.
    pub fn select_previous_option(&mut self) {
        self.move_selection(-1);
    }

    fn move_selection(&mut self, step: isize) {
        if self.pending_advance.is_some() {
            return;
        }
        let Some(view) = self.engine.current_question() else {
            return;
        };
        if view.answered || view.options.is_empty() {
            return;
        }
        let count = view.options.len() as isize;
        let position = view.options.iter().position(|option| option.is_selected);
        let next = match position {
            Some(p) => (p as isize + step).rem_euclid(count) as usize,
            None if step > 0 => 0,
            None => (count - 1) as usize,
        };
        self.engine.select_option(view.options[next].original_index);
    }

    /// Submit the pending choice and open the delay window. Without a
    /// pending choice the engine no-ops and no window opens.
    pub fn submit(&mut self) {
        if self.pending_advance.is_some() {
            return;
        }
        self.engine.submit_answer();
        if self.engine.is_answered() {
            self.pending_advance = Some((Instant::now() + REVEAL_DELAY, self.engine.generation()));
        }
    }

    /// Fire the scheduled advance once its deadline passes. Called by the
    /// event loop on every iteration.
    pub fn tick(&mut self, now: Instant) {
        if let Some((fire_at, token)) = self.pending_advance {
            if now >= fire_at {
                self.pending_advance = None;
                self.engine.advance_if_generation(token);
            }
        }
    }

    /// Deadline the event loop should wake up at, if a window is open.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_advance.map(|(fire_at, _)| fire_at)
    }

    /// Cycle to the next configured display language.
    pub fn cycle_language(&mut self) {
        if self.languages.len() < 2 {
            return;
        }
        let position = self
            .languages
            .iter()
            .position(|lang| lang == self.engine.language())
            .unwrap_or(0);
        let next = self.languages[(position + 1) % self.languages.len()].clone();
        self.engine.set_language(next);
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.engine.missed().len().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::parse_questions;

    fn app(bank_json: &str) -> App {
        App::new(
            parse_questions(bank_json).unwrap(),
            Translations::default(),
            vec!["de".into(), "al".into()],
            "de".into(),
            33,
            PassPolicy::default(),
        )
    }

    fn two_question_app() -> App {
        app(r#"[
            {"question": "q1", "options": ["a", "b"], "answer": "a"},
            {"question": "q2", "options": ["a", "b"], "answer": "b"}
        ]"#)
    }

    #[test]
    fn screen_follows_the_engine_phase() {
        let mut app = two_question_app();
        assert_eq!(app.screen(), Screen::Welcome);

        app.start();
        assert_eq!(app.screen(), Screen::Quiz);
    }

    #[test]
    fn submit_opens_the_delay_window_and_tick_advances() {
        let mut app = two_question_app();
        app.start();

        app.select_next_option();
        app.submit();
        let deadline = app.next_deadline().expect("delay window should be open");

        // Before the deadline nothing moves.
        app.tick(deadline - Duration::from_millis(1));
        assert_eq!(app.engine().progress().position, 1);

        app.tick(deadline);
        assert!(app.next_deadline().is_none());
        assert_eq!(app.engine().progress().position, 2);
    }

    #[test]
    fn submit_without_selection_opens_no_window() {
        let mut app = two_question_app();
        app.start();

        app.submit();
        assert!(app.next_deadline().is_none());
        assert_eq!(app.engine().progress().position, 1);
    }

    #[test]
    fn inputs_are_ignored_while_the_window_is_open() {
        let mut app = two_question_app();
        app.start();

        app.select_next_option();
        let selected_before: Vec<usize> = app
            .engine()
            .current_question()
            .unwrap()
            .options
            .iter()
            .filter(|o| o.is_selected)
            .map(|o| o.original_index)
            .collect();
        app.submit();

        app.select_next_option();
        app.submit();

        let selected_after: Vec<usize> = app
            .engine()
            .current_question()
            .unwrap()
            .options
            .iter()
            .filter(|o| o.is_selected)
            .map(|o| o.original_index)
            .collect();
        assert_eq!(selected_before, selected_after);
    }

    #[test]
    fn restart_during_the_window_defuses_the_stale_advance() {
        let mut app = two_question_app();
        app.start();

        app.select_next_option();
        app.submit();
        let deadline = app.next_deadline().unwrap();
        let stale_token = app.engine().generation();

        app.start();
        assert!(app.next_deadline().is_none());

        // Simulate the old callback firing anyway.
        app.engine.advance_if_generation(stale_token);
        app.tick(deadline + REVEAL_DELAY);

        assert_eq!(app.engine().progress().position, 1);
        assert!(!app.engine().is_answered());
    }

    #[test]
    fn language_cycles_through_the_configured_list() {
        let mut app = two_question_app();
        assert_eq!(app.language(), "de");
        app.cycle_language();
        assert_eq!(app.language(), "al");
        app.cycle_language();
        assert_eq!(app.language(), "de");
    }

    #[test]
    fn selection_wraps_in_presentation_order() {
        let mut app = two_question_app();
        app.start();

        app.select_previous_option();
        let view = app.engine().current_question().unwrap();
        assert!(view.options.last().unwrap().is_selected);

        app.select_next_option();
        let view = app.engine().current_question().unwrap();
        assert!(view.options.first().unwrap().is_selected);
    }
}

//! # exam-quiz
//!
//! A terminal runner for multiple-choice exams with localized content.
//!
//! Questions are drawn from a JSON bank, shuffled and sampled per attempt,
//! presented one at a time, scored against a configurable pass policy and
//! reviewed at the end. All session logic lives in [`session::SessionEngine`];
//! the terminal UI only reads its snapshot views.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use exam_quiz::{App, PassPolicy, Quiz, QuizError, Translations};
//!
//! fn main() -> Result<(), QuizError> {
//!     let bank = exam_quiz::load_questions("questions.json")?;
//!     let app = App::new(
//!         bank,
//!         Translations::default(),
//!         vec!["de".into(), "al".into()],
//!         "de".into(),
//!         33,
//!         PassPolicy::default(),
//!     );
//!     Quiz::new(app).run()
//! }
//! ```

mod app;
mod data;
mod i18n;
mod models;
pub mod session;
pub mod terminal;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use app::{App, Screen, REVEAL_DELAY};
pub use data::{load_questions, load_translations, parse_questions, LoadError};
pub use i18n::Translations;
pub use models::QuestionRecord;
pub use session::{MissedRecord, PassPolicy, Phase, ScoreSummary, SessionEngine};

/// How often the loop wakes up when no advance is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Error loading content files.
    Load(LoadError),
    /// IO error during quiz execution.
    Io(io::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Load(e) => write!(f, "failed to load content: {}", e),
            QuizError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Load(e) => Some(e),
            QuizError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for QuizError {
    fn from(err: LoadError) -> Self {
        QuizError::Load(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal, drives the UI until the user quits, and
    /// restores the terminal before returning.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| ui::render(frame, app))?;

        // Wake up in time for a scheduled advance even without input.
        let timeout = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);

        if !event::poll(timeout)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.screen() {
        Screen::Welcome => handle_welcome_input(app, key),
        Screen::Quiz => handle_quiz_input(app, key),
        Screen::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start();
            false
        }
        KeyCode::Char('l') | KeyCode::Char('L') => {
            app.cycle_language();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            false
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.submit();
            false
        }
        KeyCode::Char('l') | KeyCode::Char('L') => {
            app.cycle_language();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.start();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('l') | KeyCode::Char('L') => {
            app.cycle_language();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.start();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

mod loader;

pub use loader::{load_questions, load_translations, parse_questions, LoadError};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::i18n::Translations;
use crate::models::QuestionRecord;

/// Error loading content files.
///
/// A load is all-or-nothing: on any failure the caller holds no questions
/// and the session cannot start. There is no retry.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io(PathBuf, io::Error),
    /// The file was read but is not valid JSON of the expected shape.
    Parse(PathBuf, serde_json::Error),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(path, e) => write!(f, "failed to read {}: {}", path.display(), e),
            LoadError::Parse(path, e) => write!(f, "failed to parse {}: {}", path.display(), e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(_, e) => Some(e),
            LoadError::Parse(_, e) => Some(e),
        }
    }
}

/// Load the question bank from a JSON file.
pub fn load_questions<P: AsRef<Path>>(path: P) -> Result<Vec<QuestionRecord>, LoadError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    let questions =
        parse_questions(&json).map_err(|e| LoadError::Parse(path.to_path_buf(), e))?;
    info!("loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// Parse a question bank from a JSON string.
pub fn parse_questions(json: &str) -> Result<Vec<QuestionRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Load the optional UI label table from a JSON file.
pub fn load_translations<P: AsRef<Path>>(path: P) -> Result<Translations, LoadError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    let table: Translations =
        serde_json::from_str(&json).map_err(|e| LoadError::Parse(path.to_path_buf(), e))?;
    info!("loaded translations from {}", path.display());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANK: &str = r#"[
        {
            "question": "Capital of Germany?",
            "question_de": "Hauptstadt von Deutschland?",
            "options": ["Berlin", "Bonn", "Munich", "Hamburg"],
            "answer": "Berlin"
        },
        {
            "question": "2 + 2?",
            "options": ["3", "4"],
            "answer": "4"
        }
    ]"#;

    #[test]
    fn parses_question_bank() {
        let questions = parse_questions(BANK).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].option_count(), 4);
        assert_eq!(questions[0].answer, "Berlin");
        assert!(questions[0].localized.contains_key("question_de"));
    }

    #[test]
    fn rejects_malformed_bank() {
        assert!(parse_questions(r#"{"not": "a list"}"#).is_err());
        assert!(parse_questions(r#"[{"question": "missing options"}]"#).is_err());
    }

    #[test]
    fn empty_bank_is_not_a_parse_error() {
        assert!(parse_questions("[]").unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_questions("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io(_, _)));
        assert!(err.to_string().contains("not/here.json"));
    }
}

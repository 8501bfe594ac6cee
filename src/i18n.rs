//! Language resolution for localized content.
//!
//! Question files name per-language variants with a `_<lang>` suffix
//! (`question_de`, `options_al`, ...) and fall back to the unsuffixed field.
//! All suffix handling is isolated here; the engine only ever asks for the
//! resolved text of a field in the active language.

use std::collections::HashMap;

use serde::Deserialize;

use crate::models::QuestionRecord;

/// Resolved question prompt for the given language.
pub fn question<'a>(record: &'a QuestionRecord, lang: &str) -> &'a str {
    localized_str(record, "question", lang).unwrap_or(&record.question)
}

/// Resolved correct-answer text for the given language.
pub fn answer<'a>(record: &'a QuestionRecord, lang: &str) -> &'a str {
    localized_str(record, "answer", lang).unwrap_or(&record.answer)
}

/// Resolved option texts for the given language, in original index order.
///
/// Falls back to the default array when the localized one is missing,
/// malformed, or has a mismatched length, so the result always has exactly
/// [`QuestionRecord::option_count`] entries.
pub fn options<'a>(record: &'a QuestionRecord, lang: &str) -> Vec<&'a str> {
    if let Some(localized) = localized_options(record, lang) {
        if localized.len() == record.options.len() {
            return localized;
        }
    }
    record.options.iter().map(String::as_str).collect()
}

fn localized_str<'a>(record: &'a QuestionRecord, field: &str, lang: &str) -> Option<&'a str> {
    record
        .localized
        .get(&format!("{field}_{lang}"))
        .and_then(|value| value.as_str())
}

fn localized_options<'a>(record: &'a QuestionRecord, lang: &str) -> Option<Vec<&'a str>> {
    let values = record.localized.get(&format!("options_{lang}"))?.as_array()?;
    values.iter().map(|value| value.as_str()).collect()
}

/// UI label table loaded from the optional translations file.
///
/// Maps a label key to per-language display strings. Missing keys or
/// languages degrade to built-in English defaults; the quiz never fails to
/// render because a label is absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Translations {
    entries: HashMap<String, HashMap<String, String>>,
}

impl Translations {
    /// Look up a label in the given language, falling back to the built-in
    /// default string for the key.
    pub fn label<'a>(&'a self, key: &str, lang: &str) -> &'a str {
        self.entries
            .get(key)
            .and_then(|by_lang| by_lang.get(lang))
            .map(String::as_str)
            .unwrap_or_else(|| default_label(key))
    }
}

fn default_label(key: &str) -> &'static str {
    match key {
        "question_prefix" => "Question",
        "of_separator" => "of",
        "your_score" => "Your score",
        "you_passed" => "You passed",
        "you_failed" => "You failed",
        "your_answer" => "Your answer",
        "correct_answer" => "Correct answer",
        "no_incorrect_answers" => "No incorrect answers",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> QuestionRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn resolves_suffixed_fields() {
        let q = record(
            r#"{
                "question": "Capital of Germany?",
                "question_de": "Hauptstadt von Deutschland?",
                "options": ["Berlin", "Bonn"],
                "options_de": ["Berlin", "Bonn"],
                "answer": "Berlin",
                "answer_de": "Berlin"
            }"#,
        );

        assert_eq!(question(&q, "de"), "Hauptstadt von Deutschland?");
        assert_eq!(answer(&q, "de"), "Berlin");
        assert_eq!(options(&q, "de"), vec!["Berlin", "Bonn"]);
    }

    #[test]
    fn falls_back_to_bare_field() {
        let q = record(
            r#"{
                "question": "Capital of Germany?",
                "options": ["Berlin", "Bonn"],
                "answer": "Berlin"
            }"#,
        );

        assert_eq!(question(&q, "al"), "Capital of Germany?");
        assert_eq!(answer(&q, "al"), "Berlin");
        assert_eq!(options(&q, "al"), vec!["Berlin", "Bonn"]);
    }

    #[test]
    fn mismatched_localized_options_fall_back() {
        let q = record(
            r#"{
                "question": "Pick one",
                "options": ["a", "b", "c"],
                "options_de": ["a", "b"],
                "answer": "a"
            }"#,
        );

        assert_eq!(options(&q, "de"), vec!["a", "b", "c"]);
    }

    #[test]
    fn translations_fall_back_to_defaults() {
        let table: Translations = serde_json::from_str(
            r#"{ "you_passed": { "de": "Bestanden", "al": "Kaluat" } }"#,
        )
        .unwrap();

        assert_eq!(table.label("you_passed", "de"), "Bestanden");
        assert_eq!(table.label("you_passed", "fr"), "You passed");
        assert_eq!(table.label("your_score", "de"), "Your score");
        assert_eq!(Translations::default().label("of_separator", "de"), "of");
    }
}

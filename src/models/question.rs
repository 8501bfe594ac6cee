use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// A single multiple-choice question as it appears in the content file.
///
/// The unsuffixed fields hold the default-language text. Localized variants
/// use the `question_<lang>` / `options_<lang>` / `answer_<lang>` key
/// convention and land in the flattened map; resolution lives in
/// [`crate::i18n`] so adding a language is a content-file change only.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    #[serde(flatten)]
    pub localized: HashMap<String, Value>,
}

impl QuestionRecord {
    /// Number of answer options. Localized option arrays with a different
    /// length are ignored at resolution time, so this count is authoritative.
    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

//! Domain models: the generation request and the validated question record.

use serde::{Deserialize, Serialize};

/// Number of options every question carries (labels A through D).
pub const OPTION_COUNT: usize = 4;

/// Column order handed to the spreadsheet collaborator. This is a hard
/// contract: it never varies by record content.
pub const COLUMN_ORDER: [&str; 8] = [
    "S. No.",
    "Question",
    "First Option",
    "Second Option",
    "Third Option",
    "Fourth Option",
    "Right Answer No.",
    "Explanation",
];

/// The five parameters of one generation request. Immutable once built;
/// consumed exactly once by the prompt builder.
#[derive(Clone, Debug, Deserialize)]
pub struct GenerationRequest {
    pub board: String,
    pub class_name: String,
    pub subject: String,
    pub chapter: String,
    pub difficulty: String,
}

impl GenerationRequest {
    /// Names of fields that are empty (after trimming). Validation of the
    /// request happens at the pipeline boundary, not inside the builder.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.board.trim().is_empty() {
            missing.push("board");
        }
        if self.class_name.trim().is_empty() {
            missing.push("class");
        }
        if self.subject.trim().is_empty() {
            missing.push("subject");
        }
        if self.chapter.trim().is_empty() {
            missing.push("chapter");
        }
        if self.difficulty.trim().is_empty() {
            missing.push("difficulty");
        }
        missing
    }
}

/// One fully validated multiple-choice question. Only constructed after the
/// parser has checked every field; no partially valid record ever exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    /// Taken verbatim from the source numbering. Gaps and duplicates in the
    /// generated text are preserved, not renumbered.
    pub sequence_number: u32,
    pub question_text: String,
    /// Positional: index 0 = label A … index 3 = label D.
    pub options: [String; OPTION_COUNT],
    /// 1-based: A→1 … D→4.
    pub correct_answer_index: u8,
    /// May be empty.
    pub explanation: String,
}

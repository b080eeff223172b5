//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::GenerationRequest;

/// Form fields posted by the front-end. `class` is the wire name; internally
/// we call it `class_name`.
#[derive(Debug, Deserialize)]
pub struct GenerateIn {
    #[serde(default)]
    pub board: String,
    #[serde(default, rename = "class")]
    pub class_name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub chapter: String,
    #[serde(default)]
    pub difficulty: String,
}

impl From<GenerateIn> for GenerationRequest {
    fn from(form: GenerateIn) -> Self {
        GenerationRequest {
            board: form.board,
            class_name: form.class_name,
            subject: form.subject,
            chapter: form.chapter,
            difficulty: form.difficulty,
        }
    }
}

/// JSON body for request-level failures.
#[derive(Serialize)]
pub struct ErrorOut {
    pub error: &'static str,
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

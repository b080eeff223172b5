//! Loading app configuration (prompt template overrides) from TOML.
//!
//! See `AppConfig` and `Prompts` for the expected schema.

use serde::Deserialize;
use tracing::{info, error};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompt text used when talking to the generation service. The default
/// encodes the exact output grammar the parser expects; override it in TOML
/// only if you keep that grammar intact.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  /// Template for the MCQ generation instruction. Placeholders:
  /// `{board}`, `{class}`, `{subject}`, `{chapter}`, `{difficulty}`.
  pub mcq_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      mcq_template: "\
Generate exactly 20 multiple choice questions for the following specifications:
- Board of Education: {board}
- Class: {class}
- Subject: {subject}
- Chapter: {chapter}
- Difficulty Level: {difficulty}

IMPORTANT: Make sure the correct answers are distributed randomly across options A, B, C, and D. \
Do NOT put all correct answers in the same option position. Mix them up naturally - some questions \
should have A as correct, some B, some C, some D.

Format each question exactly as follows:

1. [Question text here]
A) [First option]
B) [Second option]
C) [Third option]
D) [Fourth option]
Correct Answer: [A/B/C/D]
Explanation: [Brief explanation of why this answer is correct]

2. [Next question...]

Requirements:
- Make sure each question is relevant to the chapter topic and appropriate for the class level and difficulty specified
- Provide clear, unambiguous questions with one definitively correct answer
- Distribute correct answers randomly: roughly 5 questions each should have A, B, C, or D as the correct answer
- Ensure all incorrect options are plausible but clearly wrong
- Vary the question types (definition, application, analysis, etc.)
"
      .into(),
    }
  }
}

/// Attempt to load `AppConfig` from MCQGEN_CONFIG_PATH. On any parsing/IO
/// error, returns None and the compiled-in defaults are used.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("MCQGEN_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "mcqgen_backend", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "mcqgen_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "mcqgen_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

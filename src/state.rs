//! Application state: prompt templates, the compiled parser, and the
//! optional generation client.
//!
//! Everything here is immutable after construction, so the state is shared
//! behind an `Arc` with no locking. Each request operates on its own
//! input/output values.

use tracing::{info, instrument};

use crate::config::{load_app_config_from_env, Prompts};
use crate::genai::Gemini;
use crate::parser::ResponseParser;

pub struct AppState {
    pub prompts: Prompts,
    pub parser: ResponseParser,
    pub genai: Option<Gemini>,
}

impl AppState {
    /// Build state from env: load config, compile parser patterns, init the
    /// generation client.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let prompts = load_app_config_from_env()
            .map(|c| c.prompts)
            .unwrap_or_default();
        info!(target: "mcqgen_backend", template_len = prompts.mcq_template.len(), "Prompt template ready");

        let genai = Gemini::from_env();
        if let Some(g) = &genai {
            info!(target: "mcqgen_backend", base_url = %g.base_url, model = %g.model, "Generation client enabled.");
        } else {
            info!(target: "mcqgen_backend", "Generation client disabled (no GOOGLE_AI_API_KEY). Generate requests will fail upstream.");
        }

        Self {
            prompts,
            parser: ResponseParser::new(),
            genai,
        }
    }
}

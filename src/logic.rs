//! The generation pipeline shared by the HTTP handlers.
//!
//! Order is fixed: validate request -> build prompt -> call the generation
//! service -> parse/validate the raw text -> serialize the workbook. Only
//! request-level failures surface; per-block parse failures stay inside the
//! parser as diagnostics.

use chrono::Local;
use tracing::{debug, info, instrument, warn};

use crate::domain::GenerationRequest;
use crate::error::PipelineError;
use crate::export;
use crate::prompt::build_prompt;
use crate::state::AppState;
use crate::util::trunc_for_log;

/// Run the whole pipeline for one request. Returns the download filename and
/// the workbook bytes.
#[instrument(level = "info", skip(state, req), fields(subject = %req.subject, chapter = %req.chapter, difficulty = %req.difficulty))]
pub async fn generate_workbook(
  state: &AppState,
  req: &GenerationRequest,
) -> Result<(String, Vec<u8>), PipelineError> {
  let missing = req.missing_fields();
  if !missing.is_empty() {
    return Err(PipelineError::RequestInvalid(missing));
  }

  let genai = state
    .genai
    .as_ref()
    .ok_or_else(|| PipelineError::GenerationUnavailable("no API key configured".into()))?;

  let prompt = build_prompt(&state.prompts, req);
  let raw = genai
    .generate_text(&prompt)
    .await
    .map_err(PipelineError::GenerationUnavailable)?;
  if raw.trim().is_empty() {
    return Err(PipelineError::GenerationUnavailable("empty response text".into()));
  }
  debug!(target: "mcq", raw_preview = %trunc_for_log(&raw, 300), "Raw generation text");

  let records = state.parser.parse(&raw);
  if records.is_empty() {
    warn!(target: "mcq", raw_len = raw.len(), "Generation text produced no valid questions");
    return Err(PipelineError::NoValidQuestions);
  }
  info!(target: "mcq", accepted = records.len(), "Parsed question batch");

  let bytes =
    export::write_workbook(&records).map_err(|e| PipelineError::ExportFailed(e.to_string()))?;
  let filename = export::export_filename(&req.chapter, &req.class_name, Local::now());
  Ok((filename, bytes))
}

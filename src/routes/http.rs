//! HTTP endpoint handlers. Thin wrappers that forward to the pipeline in
//! `logic` and translate its outcome into responses.

use std::sync::Arc;

use axum::{
  extract::{Form, State},
  http::header,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{error, info, instrument};

use crate::domain::GenerationRequest;
use crate::export::XLSX_MIME;
use crate::logic::generate_workbook;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

/// Run the full pipeline and respond with an XLSX attachment, or a JSON
/// error body for request-level failures.
#[instrument(level = "info", skip(state, form), fields(board = %form.board, class = %form.class_name, subject = %form.subject, chapter = %form.chapter, difficulty = %form.difficulty))]
pub async fn http_post_generate(
  State(state): State<Arc<AppState>>,
  Form(form): Form<GenerateIn>,
) -> Response {
  let req: GenerationRequest = form.into();
  match generate_workbook(&state, &req).await {
    Ok((filename, bytes)) => {
      info!(target: "mcq", %filename, bytes = bytes.len(), "Workbook served");
      (
        [
          (header::CONTENT_TYPE, XLSX_MIME.to_string()),
          (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
          ),
        ],
        bytes,
      )
        .into_response()
    }
    Err(e) => {
      error!(target: "mcq", code = e.code(), error = %e, "Generate request failed");
      (
        e.status(),
        Json(ErrorOut { error: e.code(), message: e.to_string() }),
      )
        .into_response()
    }
  }
}

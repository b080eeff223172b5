//! Request-level error taxonomy for the generation pipeline.
//!
//! Only these errors interrupt a request and reach the user. Per-block parse
//! failures are absorbed inside the parser and surface as diagnostics only.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// One or more generation parameters are missing or empty.
    #[error("missing required fields: {}", .0.join(", "))]
    RequestInvalid(Vec<&'static str>),

    /// The external generation service failed or returned nothing.
    #[error("generation service unavailable: {0}")]
    GenerationUnavailable(String),

    /// Generation succeeded but no block survived validation. Distinct from
    /// `GenerationUnavailable`: the upstream call worked, the text did not.
    #[error("no valid questions could be parsed from the generated text")]
    NoValidQuestions,

    /// Workbook serialization failed.
    #[error("spreadsheet export failed: {0}")]
    ExportFailed(String),
}

impl PipelineError {
    /// Stable machine-readable code for the JSON error body.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::RequestInvalid(_) => "request_invalid",
            PipelineError::GenerationUnavailable(_) => "generation_unavailable",
            PipelineError::NoValidQuestions => "no_valid_questions",
            PipelineError::ExportFailed(_) => "export_failed",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            PipelineError::RequestInvalid(_) => StatusCode::BAD_REQUEST,
            PipelineError::GenerationUnavailable(_) => StatusCode::BAD_GATEWAY,
            PipelineError::NoValidQuestions => StatusCode::BAD_GATEWAY,
            PipelineError::ExportFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_invalid_lists_missing_fields() {
        let err = PipelineError::RequestInvalid(vec!["board", "chapter"]);
        assert_eq!(err.to_string(), "missing required fields: board, chapter");
        assert_eq!(err.code(), "request_invalid");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failures_map_to_bad_gateway_with_distinct_codes() {
        let unavailable = PipelineError::GenerationUnavailable("timeout".into());
        let empty = PipelineError::NoValidQuestions;
        assert_eq!(unavailable.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(empty.status(), StatusCode::BAD_GATEWAY);
        assert_ne!(unavailable.code(), empty.code());
    }
}

//! MCQ Generator Backend
//!
//! - Axum HTTP API + static form page
//! - Gemini (Generative Language API) integration via environment variables
//! - Parses loosely formatted generated text into validated question records
//!   and serves them as a downloadable XLSX workbook
//!
//! Important env variables:
//!   PORT               : u16 (default 3000)
//!   GOOGLE_AI_API_KEY  : enables the generation client if present
//!   GEMINI_BASE_URL    : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL       : default "gemini-1.5-flash"
//!   MCQGEN_CONFIG_PATH : path to TOML config (prompt template override)
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod error;
mod config;
mod prompt;
mod parser;
mod genai;
mod export;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (prompts, parser, generation client).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "mcqgen_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}

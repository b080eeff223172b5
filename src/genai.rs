//! Minimal Google Generative Language client for our one use-case.
//!
//! We only call models.generateContent and request plain text. Calls are
//! instrumented and log model names, latencies, and response sizes (not
//! contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{instrument, info, error};

#[derive(Clone)]
pub struct Gemini {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl Gemini {
  /// Construct the client if we find GOOGLE_AI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("GOOGLE_AI_API_KEY").ok()?;
    let base_url = std::env::var("GEMINI_BASE_URL")
      .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into());
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(90))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model })
  }

  /// Plain-text content generation. Returns the concatenated text parts of
  /// the first candidate; an empty string means the model produced nothing.
  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  pub async fn generate_text(&self, prompt: &str) -> Result<String, String> {
    let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
    let req = GenerateContentRequest {
      contents: vec![ContentReq { parts: vec![PartReq { text: prompt.to_string() }] }],
    };

    let start = std::time::Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "mcqgen-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header("x-goog-api-key", self.api_key.as_str())
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_genai_error(&body).unwrap_or_else(|| body);
      error!(target: "mcqgen_backend", %status, error = %msg, "Generation request failed");
      return Err(format!("Gemini HTTP {}: {}", status, msg));
    }

    let body: GenerateContentResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage_metadata {
      info!(
        target: "mcqgen_backend",
        prompt_tokens = ?usage.prompt_token_count,
        candidate_tokens = ?usage.candidates_token_count,
        total_tokens = ?usage.total_token_count,
        "Gemini usage"
      );
    }

    let text = body.candidates.first()
      .and_then(|c| c.content.as_ref())
      .map(|c| {
        c.parts.iter().map(|p| p.text.as_str()).collect::<Vec<_>>().join("")
      })
      .unwrap_or_default().trim().to_string();

    let elapsed = start.elapsed();
    info!(target: "mcqgen_backend", ?elapsed, response_len = text.len(), "Generation response received");
    Ok(text)
  }
}

// --- generateContent DTOs ---

#[derive(Serialize)]
struct GenerateContentRequest {
  contents: Vec<ContentReq>,
}
#[derive(Serialize)]
struct ContentReq { parts: Vec<PartReq> }
#[derive(Serialize)]
struct PartReq { text: String }

#[derive(Deserialize)]
struct GenerateContentResponse {
  #[serde(default)] candidates: Vec<Candidate>,
  #[serde(default, rename = "usageMetadata")] usage_metadata: Option<UsageMetadata>,
}
#[derive(Deserialize)]
struct Candidate { content: Option<ContentResp> }
#[derive(Deserialize)]
struct ContentResp {
  #[serde(default)] parts: Vec<PartResp>,
}
#[derive(Deserialize)]
struct PartResp {
  #[serde(default)] text: String,
}
#[derive(Deserialize)]
struct UsageMetadata {
  #[serde(default, rename = "promptTokenCount")] prompt_token_count: Option<u32>,
  #[serde(default, rename = "candidatesTokenCount")] candidates_token_count: Option<u32>,
  #[serde(default, rename = "totalTokenCount")] total_token_count: Option<u32>,
}

/// Try to extract a clean error message from a Google API error body.
fn extract_genai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}

//! Optional caption assist backed by the Gemini `generateContent` API.
//!
//! The assist is best-effort. A missing key, a transport error, or an empty
//! answer all degrade to a deterministic caption naming the location.

use std::time::Duration;

use quillt_core::caption::{CaptionFallback, fallback_caption};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{error, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct CaptionConfig {
  /// `None` disables the assist entirely.
  pub api_key:  Option<String>,
  pub model:    String,
  pub base_url: String,
}

impl Default for CaptionConfig {
  fn default() -> Self {
    Self {
      api_key:  None,
      model:    DEFAULT_MODEL.to_owned(),
      base_url: DEFAULT_BASE_URL.to_owned(),
    }
  }
}

/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct Captioner {
  /// Present only when an API key is configured.
  client: Option<(Client, String)>,
  config: CaptionConfig,
}

impl Captioner {
  pub fn new(config: CaptionConfig) -> Result<Self, reqwest::Error> {
    let client = match config.api_key.clone().filter(|k| !k.trim().is_empty()) {
      Some(key) => {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;
        Some((client, key))
      }
      None => None,
    };
    Ok(Self { client, config })
  }

  /// A captioner that always answers with the fallback.
  pub fn disabled() -> Self {
    Self {
      client: None,
      config: CaptionConfig::default(),
    }
  }

  /// A short caption for a trip to `location`. Never fails.
  pub async fn caption(&self, location: &str) -> String {
    let Some((client, key)) = &self.client else {
      warn!("no caption API key configured, using fallback");
      return fallback_caption(location, CaptionFallback::Unconfigured);
    };

    match self.generate(client, key, location).await {
      Ok(Some(text)) => text,
      Ok(None) => fallback_caption(location, CaptionFallback::EmptyResponse),
      Err(e) => {
        error!(error = %e, "caption request failed");
        fallback_caption(location, CaptionFallback::Failed)
      }
    }
  }

  async fn generate(
    &self,
    client: &Client,
    key: &str,
    location: &str,
  ) -> Result<Option<String>, reqwest::Error> {
    let url = format!(
      "{}/models/{}:generateContent",
      self.config.base_url.trim_end_matches('/'),
      self.config.model
    );
    let body = json!({
      "contents": [{
        "role": "user",
        "parts": [{ "text": prompt(location) }]
      }],
      "generationConfig": {
        "thinkingConfig": { "thinkingBudget": 0 }
      }
    });

    let resp: Value = client
      .post(&url)
      .header("x-goog-api-key", key)
      .json(&body)
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;

    Ok(extract_text(&resp))
  }
}

fn prompt(location: &str) -> String {
  format!("Write a short, fun, 6-word social media caption for a trip to {location}. No hashtags.")
}

/// Concatenated, trimmed text of the first candidate; `None` if blank.
fn extract_text(resp: &Value) -> Option<String> {
  let parts = resp["candidates"].get(0)?["content"]["parts"].as_array()?;
  let text: String = parts
    .iter()
    .filter_map(|p| p.get("text").and_then(Value::as_str))
    .collect();
  let text = text.trim();
  (!text.is_empty()).then(|| text.to_owned())
}

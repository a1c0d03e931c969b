//! Live [`GenerativeBridge`] implementation backed by an OpenAI-compatible
//! chat-completions API.
//!
//! Fails closed: without `OPENAI_API_KEY` the bridge is simply not
//! constructed and the engine degrades to its static fallback. Any transport
//! error, non-success status, or malformed body becomes a [`BridgeError`]
//! that the engine recovers from locally; the user never sees it verbatim.

use folio_core::{BridgeError, GenerativeBridge};
use std::time::Duration;

const ENV_API_KEY: &str = "OPENAI_API_KEY";

/// Fixed persona instruction sent with every request.
const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant for a personal portfolio website. \
     Provide concise, accurate answers to general questions. Keep responses under 150 words.";

/// One request per turn, no retry: a slow backend fails the turn instead of
/// blocking other reply computations.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const MAX_TOKENS: u32 = 200;
const TEMPERATURE: f32 = 0.7;

/// Bridge to a hosted chat-completions backend.
pub struct OpenAiBridge {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiBridge {
    /// Constructs the bridge from an explicit credential.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, BridgeError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(BridgeError::Unavailable);
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BridgeError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    /// Reads `OPENAI_API_KEY`; `None` when absent or empty. Absence is a
    /// capability downgrade, not an error.
    pub fn from_env(base_url: &str, model: &str) -> Option<Self> {
        let api_key = std::env::var(ENV_API_KEY).ok()?;
        match Self::new(api_key, base_url, model) {
            Ok(bridge) => Some(bridge),
            Err(e) => {
                tracing::warn!(target: "folio::bridge", error = %e, "bridge not constructed");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl GenerativeBridge for OpenAiBridge {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, input: &str) -> Result<String, BridgeError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_INSTRUCTION },
                { "role": "user", "content": input },
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        });

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| BridgeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::Status(status.as_u16()));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BridgeError::MalformedBody(e.to_string()))?;
        extract_reply(&payload)
    }
}

/// Pulls `choices[0].message.content` out of a chat-completions response.
fn extract_reply(payload: &serde_json::Value) -> Result<String, BridgeError> {
    payload
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| BridgeError::MalformedBody("missing choices[0].message.content".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_reply_reads_first_choice() {
        let payload = serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  hello there  " } }
            ]
        });
        assert_eq!(extract_reply(&payload).unwrap(), "hello there");
    }

    #[test]
    fn extract_reply_rejects_empty_and_missing_content() {
        let empty = serde_json::json!({
            "choices": [ { "message": { "content": "   " } } ]
        });
        assert!(matches!(
            extract_reply(&empty),
            Err(BridgeError::MalformedBody(_))
        ));
        let missing = serde_json::json!({ "choices": [] });
        assert!(matches!(
            extract_reply(&missing),
            Err(BridgeError::MalformedBody(_))
        ));
    }

    #[test]
    fn blank_credential_is_unavailable() {
        let err = OpenAiBridge::new("   ", "https://api.openai.com/v1", "gpt-3.5-turbo");
        assert!(matches!(err, Err(BridgeError::Unavailable)));
    }

    #[test]
    fn explicit_credential_constructs() {
        let bridge =
            OpenAiBridge::new("sk-test", "https://api.openai.com/v1", "gpt-3.5-turbo").unwrap();
        assert_eq!(bridge.name(), "openai");
    }
}

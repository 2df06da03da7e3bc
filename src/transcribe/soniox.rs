//! Soniox async transcription API client (submit / poll / fetch / delete).

use crate::error::{Result, SonosubError};
use crate::transcribe::{Transcriber, Transcript};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Soniox API base URL.
pub const SONIOX_API_BASE: &str = "https://api.soniox.com";

/// Transcription model requested on submit.
const TRANSCRIPTION_MODEL: &str = "stt-async-preview";

/// Delay between status polls.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Soniox API client. Holds the bearer-token session for the whole
/// process; construct once from config and pass by reference.
pub struct SonioxClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    language_hints: Vec<String>,
}

impl SonioxClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_base: SONIOX_API_BASE.to_string(),
            language_hints: vec!["en".to_string(), "es".to_string()],
        }
    }

    /// Override the API base URL (useful for tests and proxies).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the language hints sent on submit.
    pub fn with_language_hints(mut self, hints: Vec<String>) -> Self {
        self.language_hints = hints;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Read a response body, turning non-2xx statuses into API errors.
    async fn check(response: reqwest::Response, context: &str) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(SonosubError::Api(format!(
                "{} ({}): {}",
                context, status, body
            )))
        }
    }
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    audio_url: &'a str,
    model: &'static str,
    language_hints: &'a [String],
}

#[derive(Deserialize)]
struct SubmitResponse {
    id: String,
}

#[derive(Deserialize)]
struct StatusResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[async_trait]
impl Transcriber for SonioxClient {
    async fn submit(&self, audio_url: &str) -> Result<String> {
        let request = SubmitRequest {
            audio_url,
            model: TRANSCRIPTION_MODEL,
            language_hints: &self.language_hints,
        };

        let response = self
            .client
            .post(self.url("/v1/transcriptions"))
            .header("Authorization", self.auth_header())
            .json(&request)
            .send()
            .await?;

        let body = Self::check(response, "Transcription submit failed").await?;
        let parsed: SubmitResponse = serde_json::from_str(&body)?;

        debug!("Submitted transcription {}", parsed.id);
        Ok(parsed.id)
    }

    async fn poll_until_complete(&self, id: &str) -> Result<()> {
        loop {
            let response = self
                .client
                .get(self.url(&format!("/v1/transcriptions/{}", id)))
                .header("Authorization", self.auth_header())
                .send()
                .await?;

            let body = Self::check(response, "Transcription status failed").await?;
            let parsed: StatusResponse = serde_json::from_str(&body)?;

            match parsed.status.as_str() {
                "completed" => return Ok(()),
                "error" => {
                    return Err(SonosubError::Transcription(
                        parsed
                            .error_message
                            .unwrap_or_else(|| "Unknown error".to_string()),
                    ))
                }
                other => {
                    debug!("Transcription {} status: {}", id, other);
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
            }
        }
    }

    async fn fetch_transcript(&self, id: &str) -> Result<Transcript> {
        let response = self
            .client
            .get(self.url(&format!("/v1/transcriptions/{}/transcript", id)))
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let body = Self::check(response, "Transcript fetch failed").await?;
        let transcript: Transcript = serde_json::from_str(&body)
            .map_err(|e| SonosubError::MalformedInput(format!("transcript response: {}", e)))?;
        Ok(transcript)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/v1/transcriptions/{}", id)))
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        Self::check(response, "Transcription delete failed").await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Soniox"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SonioxClient::new("test-key".to_string());
        assert_eq!(client.name(), "Soniox");
        assert_eq!(client.api_base, SONIOX_API_BASE);
    }

    #[test]
    fn test_with_api_base() {
        let client =
            SonioxClient::new("test-key".to_string()).with_api_base("http://localhost:9999");
        assert_eq!(client.url("/v1/transcriptions"), "http://localhost:9999/v1/transcriptions");
    }

    #[test]
    fn test_with_language_hints() {
        let client = SonioxClient::new("test-key".to_string())
            .with_language_hints(vec!["de".to_string()]);
        assert_eq!(client.language_hints, vec!["de".to_string()]);
    }

    #[test]
    fn test_status_response_parsing() {
        let parsed: StatusResponse =
            serde_json::from_str(r#"{"status":"error","error_message":"bad audio"}"#).unwrap();
        assert_eq!(parsed.status, "error");
        assert_eq!(parsed.error_message.as_deref(), Some("bad audio"));
    }
}

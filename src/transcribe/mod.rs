pub mod soniox;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use soniox::SonioxClient;

/// A raw speech token from the transcription provider. Tokens may be
/// sub-word fragments; a leading space in `text` marks a word boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

/// A completed transcript: the provider's full text plus the token stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    #[serde(default)]
    pub tokens: Vec<Token>,
}

impl Transcript {
    /// The provider's full-text field, unmodified.
    pub fn plain_text(&self) -> &str {
        &self.text
    }
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Submit an audio URL for transcription, returning the remote job id.
    async fn submit(&self, audio_url: &str) -> Result<String>;

    /// Block until the remote job reports `completed`, or fail on `error`.
    async fn poll_until_complete(&self, id: &str) -> Result<()>;

    /// Fetch the finished transcript.
    async fn fetch_transcript(&self, id: &str) -> Result<Transcript>;

    /// Delete the remote transcription record.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Fetch the transcript, then delete the remote record on every exit
    /// path. Cleanup failures are swallowed; the remote side expires
    /// records on its own eventually.
    async fn retrieve(&self, id: &str) -> Result<Transcript> {
        let transcript = self.fetch_transcript(id).await;
        if let Err(e) = self.delete(id).await {
            debug!("Cleanup of remote transcription {} failed: {}", id, e);
        }
        transcript
    }

    fn name(&self) -> &'static str;
}

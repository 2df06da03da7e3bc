pub mod chunked;
pub mod gemini;

pub use chunked::{translate_subtitle_document, DEFAULT_CHUNK_LINE_THRESHOLD};
pub use gemini::GeminiTranslator;

use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate a batch of numbered lines (`"1. <line>\n2. <line>..."`),
    /// returning text in the same numbered format.
    async fn translate_batch(&self, numbered_text: &str, target_lang: &str) -> Result<String>;

    fn name(&self) -> &'static str;
}

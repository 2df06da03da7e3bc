//! Gemini-based line-batch translation using the Generative AI API.

use crate::error::{Result, SonosubError};
use crate::translate::Translator;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Translator using the Google Gemini API.
pub struct GeminiTranslator {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiTranslator {
    /// Create a new Gemini translator with the given API key.
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: "gemini-2.0-flash".to_string(),
        }
    }

    /// Set a different model (e.g., "gemini-1.5-pro").
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Build the translation prompt around a numbered batch.
    fn build_prompt(&self, numbered_text: &str, target_lang: &str) -> String {
        let lang_name = language_code_to_name(target_lang);

        format!(
            r#"Translate each of the following numbered lines to {lang_name}.
Return ONLY the translations, one per line, keeping the same "n. " numbering.
Do not merge, split, or reorder lines.

Lines to translate:
{numbered_text}"#
        )
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Deserialize, Debug)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Deserialize, Debug)]
struct GeminiResponseContent {
    parts: Option<Vec<GeminiResponsePart>>,
}

#[derive(Deserialize, Debug)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GeminiError {
    message: String,
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn translate_batch(&self, numbered_text: &str, target_lang: &str) -> Result<String> {
        debug!("Translating batch to {}", target_lang);

        let prompt = self.build_prompt(numbered_text, target_lang);

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SonosubError::Api(format!("Translation request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SonosubError::Api(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(SonosubError::Api(format!(
                "Translation API error ({}): {}",
                status, body
            )));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            SonosubError::Api(format!("Failed to parse translation response: {}", e))
        })?;

        if let Some(error) = gemini_response.error {
            return Err(SonosubError::Api(format!(
                "Gemini error: {}",
                error.message
            )));
        }

        let translated = gemini_response
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|p| p.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default();

        Ok(translated.trim().to_string())
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

/// Convert a language code to a human-readable name for better prompting.
fn language_code_to_name(code: &str) -> &'static str {
    let lowercase = code.to_lowercase();
    match lowercase.as_str() {
        "en" => "English",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "it" => "Italian",
        "pt" => "Portuguese",
        "ru" => "Russian",
        "ja" => "Japanese",
        "ko" => "Korean",
        "zh" => "Chinese",
        "ar" => "Arabic",
        "hi" => "Hindi",
        "nl" => "Dutch",
        "pl" => "Polish",
        "tr" => "Turkish",
        "uk" => "Ukrainian",
        "sv" => "Swedish",
        "da" => "Danish",
        "fi" => "Finnish",
        "no" => "Norwegian",
        "el" => "Greek",
        "cs" => "Czech",
        _ => "the target language",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_translator_creation() {
        let translator = GeminiTranslator::new("test-key".to_string());
        assert_eq!(translator.name(), "gemini");
        assert_eq!(translator.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_with_model() {
        let translator = GeminiTranslator::new("test-key".to_string()).with_model("gemini-1.5-pro");
        assert_eq!(translator.model, "gemini-1.5-pro");
    }

    #[test]
    fn test_build_prompt() {
        let translator = GeminiTranslator::new("test-key".to_string());
        let prompt = translator.build_prompt("1. Hello\n2. Goodbye", "ja");
        assert!(prompt.contains("Japanese"));
        assert!(prompt.contains("1. Hello"));
        assert!(prompt.contains("2. Goodbye"));
    }

    #[test]
    fn test_language_code_to_name() {
        assert_eq!(language_code_to_name("en"), "English");
        assert_eq!(language_code_to_name("ES"), "Spanish");
        assert_eq!(language_code_to_name("xyz"), "the target language");
    }
}

//! Mock transcriber tests
//!
//! These tests validate the fetch-then-cleanup contract and the staged
//! pipeline flow without hitting real endpoints.

use async_trait::async_trait;
use sonosub::error::{Result, SonosubError};
use sonosub::pipeline::{run_pipeline, PipelineConfig};
use sonosub::store::TranscriptStore;
use sonosub::transcribe::{Token, Transcriber, Transcript};
use sonosub::translate::Translator;
use std::sync::Mutex;

/// Transcriber that answers from fixed data and records delete calls.
struct ScriptedTranscriber {
    transcript: Transcript,
    fail_fetch: bool,
    fail_delete: bool,
    deleted: Mutex<Vec<String>>,
}

impl ScriptedTranscriber {
    fn new(transcript: Transcript) -> Self {
        Self {
            transcript,
            fail_fetch: false,
            fail_delete: false,
            deleted: Mutex::new(Vec::new()),
        }
    }

    fn with_failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    fn with_failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    fn deleted_ids(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transcriber for ScriptedTranscriber {
    async fn submit(&self, _audio_url: &str) -> Result<String> {
        Ok("job-1".to_string())
    }

    async fn poll_until_complete(&self, _id: &str) -> Result<()> {
        Ok(())
    }

    async fn fetch_transcript(&self, _id: &str) -> Result<Transcript> {
        if self.fail_fetch {
            Err(SonosubError::Api("fetch refused".to_string()))
        } else {
            Ok(self.transcript.clone())
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.deleted.lock().unwrap().push(id.to_string());
        if self.fail_delete {
            Err(SonosubError::Api("delete refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Translator that uppercases every line, keeping the numbering.
struct UppercaseTranslator;

#[async_trait]
impl Translator for UppercaseTranslator {
    async fn translate_batch(&self, numbered_text: &str, _target_lang: &str) -> Result<String> {
        Ok(numbered_text.to_uppercase())
    }

    fn name(&self) -> &'static str {
        "uppercase"
    }
}

fn sample_transcript() -> Transcript {
    Transcript {
        text: "Hi there".to_string(),
        tokens: vec![
            Token {
                text: "H".to_string(),
                start_ms: 0,
                end_ms: 100,
            },
            Token {
                text: "i".to_string(),
                start_ms: 100,
                end_ms: 200,
            },
            Token {
                text: " there".to_string(),
                start_ms: 200,
                end_ms: 400,
            },
        ],
    }
}

fn quiet_config() -> PipelineConfig {
    PipelineConfig {
        show_progress: false,
        ..PipelineConfig::default()
    }
}

// ============================================================================
// Retrieve Cleanup Tests
// ============================================================================

mod retrieve_tests {
    use super::*;

    #[tokio::test]
    async fn test_retrieve_fetches_then_deletes() {
        let transcriber = ScriptedTranscriber::new(sample_transcript());

        let transcript = transcriber.retrieve("job-1").await.unwrap();
        assert_eq!(transcript.text, "Hi there");
        assert_eq!(transcriber.deleted_ids(), vec!["job-1"]);
    }

    #[tokio::test]
    async fn test_retrieve_succeeds_when_delete_fails() {
        let transcriber = ScriptedTranscriber::new(sample_transcript()).with_failing_delete();

        let result = transcriber.retrieve("job-1").await;

        // Cleanup failures are swallowed; the transcript still comes back.
        assert!(result.is_ok());
        assert_eq!(result.unwrap().text, "Hi there");
        assert_eq!(transcriber.deleted_ids(), vec!["job-1"]);
    }

    #[tokio::test]
    async fn test_retrieve_deletes_even_when_fetch_fails() {
        let transcriber = ScriptedTranscriber::new(sample_transcript()).with_failing_fetch();

        let result = transcriber.retrieve("job-1").await;

        assert!(result.is_err());
        assert_eq!(transcriber.deleted_ids(), vec!["job-1"]);
    }
}

// ============================================================================
// Pipeline Flow Tests
// ============================================================================

mod pipeline_tests {
    use super::*;

    #[tokio::test]
    async fn test_pipeline_produces_and_stores_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path());
        let transcriber = ScriptedTranscriber::new(sample_transcript());

        let result = run_pipeline(
            "https://example.com/audio.mp3",
            &transcriber,
            None,
            &store,
            &quiet_config(),
        )
        .await
        .unwrap();

        assert_eq!(result.record.id, "job-1");
        assert_eq!(result.record.text, "Hi there");
        assert_eq!(
            result.record.vtt,
            "WEBVTT\n\n00:00:00.000 --> 00:00:00.400\nHi there\n"
        );
        assert!(result.record.translations.is_empty());

        // The remote record was cleaned up and the local one persisted.
        assert_eq!(transcriber.deleted_ids(), vec!["job-1"]);
        let loaded = store.load("job-1").unwrap();
        assert_eq!(loaded.vtt, result.record.vtt);
    }

    #[tokio::test]
    async fn test_pipeline_translates_requested_languages() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path());
        let transcriber = ScriptedTranscriber::new(sample_transcript());
        let translator = UppercaseTranslator;

        let config = PipelineConfig {
            translate_to: vec!["fr".to_string()],
            ..quiet_config()
        };

        let result = run_pipeline(
            "https://example.com/audio.mp3",
            &transcriber,
            Some(&translator),
            &store,
            &config,
        )
        .await
        .unwrap();

        let translated = result.record.translations.get("fr").unwrap();
        assert!(translated.contains("HI THERE"));
        // Header and timestamps are untouched by translation.
        assert!(translated.starts_with("WEBVTT\n"));
        assert!(translated.contains("00:00:00.000 --> 00:00:00.400"));
    }

    #[tokio::test]
    async fn test_pipeline_skips_translation_without_translator() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path());
        let transcriber = ScriptedTranscriber::new(sample_transcript());

        let config = PipelineConfig {
            translate_to: vec!["fr".to_string()],
            ..quiet_config()
        };

        let result = run_pipeline(
            "https://example.com/audio.mp3",
            &transcriber,
            None,
            &store,
            &config,
        )
        .await
        .unwrap();

        assert!(result.record.translations.is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_fails_when_fetch_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(dir.path());
        let transcriber = ScriptedTranscriber::new(sample_transcript()).with_failing_fetch();

        let result = run_pipeline(
            "https://example.com/audio.mp3",
            &transcriber,
            None,
            &store,
            &quiet_config(),
        )
        .await;

        assert!(result.is_err());
        assert!(store.load("job-1").is_err());
    }
}

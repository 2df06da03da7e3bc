//! Transcript persistence as one JSON file per record.
//!
//! Records are serialized and parsed with the same serde model, so text
//! containing quotes or other special characters survives the round trip.

use crate::error::{Result, SonosubError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A persisted transcription result, keyed by the remote job id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub id: String,
    /// Plain-text transcript.
    pub text: String,
    /// WebVTT subtitle document.
    pub vtt: String,
    /// Translated subtitle documents, keyed by target language code.
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

/// File-backed store of transcript records.
pub struct TranscriptStore {
    dir: PathBuf,
}

impl TranscriptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    pub fn save(&self, record: &TranscriptRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.record_path(&record.id);
        let contents = serde_json::to_string_pretty(record)?;
        fs::write(&path, contents)?;
        debug!("Saved transcript record to {:?}", path);
        Ok(path)
    }

    pub fn load(&self, id: &str) -> Result<TranscriptRecord> {
        let path = self.record_path(id);
        if !path.exists() {
            return Err(SonosubError::NotFound(id.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let record = serde_json::from_str(&contents)?;
        Ok(record)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

//! End-to-end flow: submit audio, poll, retrieve tokens, synthesize the
//! transcript and subtitle document, then translate and persist.

use crate::error::Result;
use crate::store::{TranscriptRecord, TranscriptStore};
use crate::subtitle::{subtitle_document_from_words, words_from_tokens, DEFAULT_WORDS_PER_CUE};
use crate::transcribe::Transcriber;
use crate::translate::{translate_subtitle_document, Translator, DEFAULT_CHUNK_LINE_THRESHOLD};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Target languages for subtitle translation.
    pub translate_to: Vec<String>,
    /// Words aggregated into one subtitle cue.
    pub words_per_cue: usize,
    /// Maximum translatable lines per translation chunk.
    pub chunk_line_threshold: usize,
    /// Show a spinner while waiting on the remote job.
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            translate_to: Vec::new(),
            words_per_cue: DEFAULT_WORDS_PER_CUE,
            chunk_line_threshold: DEFAULT_CHUNK_LINE_THRESHOLD,
            show_progress: true,
        }
    }
}

/// Result of a pipeline run.
#[derive(Debug)]
pub struct PipelineResult {
    pub record: TranscriptRecord,
    /// Total wall-clock time for the run.
    pub total_time: Duration,
}

/// Transcribe `audio_url` and persist the resulting record.
///
/// `translator` is only consulted when `config.translate_to` is
/// non-empty; a translation failure degrades to the original-language
/// document for the affected chunks rather than failing the run.
pub async fn run_pipeline(
    audio_url: &str,
    transcriber: &dyn Transcriber,
    translator: Option<&dyn Translator>,
    store: &TranscriptStore,
    config: &PipelineConfig,
) -> Result<PipelineResult> {
    let start_time = Instant::now();

    info!("Submitting {} to {}", audio_url, transcriber.name());
    let id = transcriber.submit(audio_url).await?;
    info!("Transcription id: {}", id);

    let spinner = if config.show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message("Waiting for transcription...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let poll_result = transcriber.poll_until_complete(&id).await;

    if let Some(pb) = spinner {
        match &poll_result {
            Ok(()) => pb.finish_with_message("✓ Transcription complete"),
            Err(_) => pb.finish_with_message("✗ Transcription failed"),
        }
    }
    poll_result?;

    // Fetch with best-effort cleanup of the remote record.
    let transcript = transcriber.retrieve(&id).await?;

    let words = words_from_tokens(&transcript.tokens);
    let vtt = subtitle_document_from_words(&words, config.words_per_cue);
    info!(
        "Reconstructed {} word(s) from {} token(s)",
        words.len(),
        transcript.tokens.len()
    );

    let mut record = TranscriptRecord {
        id,
        text: transcript.plain_text().to_string(),
        vtt,
        translations: Default::default(),
    };

    for lang in &config.translate_to {
        match translator {
            Some(translator) => {
                info!("Translating subtitles to {}", lang);
                let translated = translate_subtitle_document(
                    &record.vtt,
                    lang,
                    translator,
                    config.chunk_line_threshold,
                )
                .await;
                record.translations.insert(lang.clone(), translated);
            }
            None => {
                warn!("No translator configured, skipping translation to {}", lang);
            }
        }
    }

    store.save(&record)?;
    info!("Stored record {} under {:?}", record.id, store.dir());

    Ok(PipelineResult {
        record,
        total_time: start_time.elapsed(),
    })
}

/// Print a short summary of the run.
pub fn print_summary(result: &PipelineResult) {
    println!();
    println!("  Record:       {}", result.record.id);
    println!("  Transcript:   {} chars", result.record.text.len());
    println!("  Subtitles:    {} chars", result.record.vtt.len());
    for (lang, vtt) in &result.record.translations {
        println!("  Translation:  {} ({} chars)", lang, vtt.len());
    }
    println!(
        "  Total:        {:.2}s",
        result.total_time.as_secs_f64()
    );
    println!();
}

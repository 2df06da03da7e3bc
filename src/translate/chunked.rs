//! Chunked translation of a subtitle document.
//!
//! Translatable lines are batched into bounded chunks, each chunk is sent
//! through the translator once, and the results are spliced back into the
//! original line positions. Non-text lines are never touched, so the
//! output document is structurally valid no matter how many chunks fail.

use crate::subtitle::{parse_document, DocumentLine};
use crate::translate::Translator;
use tracing::{debug, warn};

/// Default maximum number of translatable lines per chunk.
pub const DEFAULT_CHUNK_LINE_THRESHOLD: usize = 40;

/// A batch of translatable lines paired with their absolute document
/// positions. `lines[i]` lives at document line `positions[i]`.
#[derive(Debug, Default)]
struct TranslationChunk {
    lines: Vec<String>,
    positions: Vec<usize>,
}

/// Greedily accumulate translatable lines into chunks, flushing before
/// the line that would exceed the threshold.
fn build_chunks(lines: &[DocumentLine], threshold: usize) -> Vec<TranslationChunk> {
    let threshold = threshold.max(1);
    let mut chunks = Vec::new();
    let mut current = TranslationChunk::default();

    for (position, line) in lines.iter().enumerate() {
        if !line.is_translatable() {
            continue;
        }
        if current.lines.len() >= threshold {
            chunks.push(std::mem::take(&mut current));
        }
        current.lines.push(line.text.clone());
        current.positions.push(position);
    }

    if !current.lines.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Render a chunk's lines as a 1-based numbered batch.
fn render_numbered(lines: &[String]) -> String {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}. {}", i + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip a leading `"<n>. "` numbering token, if present.
fn strip_numbering(line: &str) -> &str {
    let digits = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits > 0 && line[digits..].starts_with(". ") {
        &line[digits + 2..]
    } else {
        line
    }
}

/// Translate every text line of a subtitle document to `target_lang`.
///
/// Chunks are translated one at a time in document order. A failed chunk
/// keeps its original text and processing continues; a chunk whose
/// response comes back short leaves the unmatched trailing lines
/// untranslated. Returned lines map to positions by parallel index, not
/// by the numbering tokens the translator echoes back.
pub async fn translate_subtitle_document(
    document: &str,
    target_lang: &str,
    translator: &dyn Translator,
    chunk_line_threshold: usize,
) -> String {
    let mut lines = parse_document(document);
    let chunks = build_chunks(&lines, chunk_line_threshold);

    debug!(
        "Translating {} line(s) in {} chunk(s) to {}",
        chunks.iter().map(|c| c.lines.len()).sum::<usize>(),
        chunks.len(),
        target_lang
    );

    for chunk in &chunks {
        let batch = render_numbered(&chunk.lines);

        match translator.translate_batch(&batch, target_lang).await {
            Ok(translated) => {
                let returned: Vec<&str> = translated.lines().map(strip_numbering).collect();
                if returned.len() < chunk.lines.len() {
                    warn!(
                        "Translator returned {} of {} lines; keeping originals for the rest",
                        returned.len(),
                        chunk.lines.len()
                    );
                }
                for (i, &position) in chunk.positions.iter().enumerate() {
                    if let Some(text) = returned.get(i) {
                        lines[position].text = text.to_string();
                    }
                }
            }
            Err(e) => {
                warn!(
                    "Translation of a {}-line chunk failed, keeping original text: {}",
                    chunk.lines.len(),
                    e
                );
            }
        }
    }

    lines
        .into_iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}

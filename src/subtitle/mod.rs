pub mod parse;
pub mod vtt;
pub mod words;

pub use parse::{parse_document, DocumentLine, LineRole};
pub use vtt::{cues_from_words, subtitle_document_from_words, Cue, DEFAULT_WORDS_PER_CUE, VTT_HEADER};
pub use words::words_from_tokens;

/// A reconstructed word with the timing of its constituent tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

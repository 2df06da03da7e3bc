// WebVTT cue segmentation and rendering
use crate::subtitle::Word;

/// The fixed WebVTT header line.
pub const VTT_HEADER: &str = "WEBVTT";

/// Default number of words aggregated into one cue.
pub const DEFAULT_WORDS_PER_CUE: usize = 6;

/// One subtitle cue: a time range and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

/// Partition words into consecutive cues of at most `words_per_cue` words.
/// The cue spans from its first word's start to its last word's end; the
/// text joins the words with single spaces in original order.
pub fn cues_from_words(words: &[Word], words_per_cue: usize) -> Vec<Cue> {
    words
        .chunks(words_per_cue.max(1))
        .map(|group| Cue {
            start_ms: group[0].start_ms,
            end_ms: group[group.len() - 1].end_ms,
            text: group
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        })
        .collect()
}

/// Render words as a complete WebVTT document.
///
/// The document is the header line followed, per cue, by a blank line, a
/// timestamp line and one text line. An empty word list yields a
/// header-only document.
pub fn subtitle_document_from_words(words: &[Word], words_per_cue: usize) -> String {
    let mut output = String::from(VTT_HEADER);
    output.push('\n');

    for cue in cues_from_words(words, words_per_cue) {
        output.push_str(&format!(
            "\n{} --> {}\n{}\n",
            format_timestamp(cue.start_ms),
            format_timestamp(cue.end_ms),
            cue.text
        ));
    }

    output
}

/// Format milliseconds as `HH:MM:SS.mmm`. Hours are not capped at 24.
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

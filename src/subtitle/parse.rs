//! Parses a WebVTT document back into role-annotated lines.

use crate::subtitle::vtt::VTT_HEADER;

/// Role of one physical line in a subtitle document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Header,
    Blank,
    Timestamp,
    Text,
}

/// One physical line with its role. The line's absolute index in the
/// document is its position in the parsed vector; that index is the join
/// key between an original document and its translation.
#[derive(Debug, Clone)]
pub struct DocumentLine {
    pub text: String,
    pub role: LineRole,
}

impl DocumentLine {
    /// Text lines are the translatable ones; header, blank and timestamp
    /// lines pass through translation untouched.
    pub fn is_translatable(&self) -> bool {
        self.role == LineRole::Text
    }
}

/// Split a subtitle document into lines and classify each one.
///
/// A line containing `-->` is a timestamp, an empty-after-trim line is
/// blank, the literal header token is the header, and everything else is
/// text. Each text line is classified independently even when it is part
/// of a multi-line cue.
///
/// Rejoining the parsed lines with `\n` reproduces the document exactly.
pub fn parse_document(document: &str) -> Vec<DocumentLine> {
    document
        .split('\n')
        .map(|line| {
            let role = if line.contains("-->") {
                LineRole::Timestamp
            } else if line.trim().is_empty() {
                LineRole::Blank
            } else if line == VTT_HEADER {
                LineRole::Header
            } else {
                LineRole::Text
            };
            DocumentLine {
                text: line.to_string(),
                role,
            }
        })
        .collect()
}

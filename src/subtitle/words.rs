//! Word reconstruction from the provider's token stream.

use crate::subtitle::Word;
use crate::transcribe::Token;

/// Merge raw speech tokens into whole words.
///
/// Tokens may be sub-word fragments; a token whose text starts with a
/// whitespace character opens a new word, and anything else extends the
/// word currently being accumulated. Timing spans from the first
/// fragment's start to the last fragment's end.
///
/// A token that is pure whitespace still opens a word: it carries timing,
/// so it is kept as an empty-text word rather than dropped. That is the
/// literal merge rule, degenerate as it looks.
pub fn words_from_tokens(tokens: &[Token]) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Option<Word> = None;

    for token in tokens {
        let opens_word = token.text.starts_with(char::is_whitespace);

        if opens_word || current.is_none() {
            if let Some(word) = current.take() {
                words.push(word);
            }
            current = Some(Word {
                text: token.text.trim().to_string(),
                start_ms: token.start_ms,
                end_ms: token.end_ms,
            });
        } else if let Some(word) = current.as_mut() {
            word.text.push_str(&token.text);
            word.end_ms = token.end_ms;
        }
    }

    if let Some(word) = current {
        words.push(word);
    }

    words
}

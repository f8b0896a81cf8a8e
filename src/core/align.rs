//! Alignment of a token sequence with the text it came from.
//!
//! Tokens are located by a greedy left-to-right search: each token is matched
//! at its first occurrence at or after the end of the previous match. A
//! match is never revisited, so a token found too early or too late is not
//! corrected later.
//!
//! Offsets count characters (Unicode scalar values), not bytes, and are
//! inclusive on both ends.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A token that could not be found in the unscanned tail of the text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not align token {token:?} (index {index})")]
pub struct AlignmentFailed {
    /// Position of the token in the input sequence.
    pub index: usize,
    pub token: String,
}

/// Inclusive `(onset, offset)` character positions of one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlignmentSpan {
    pub onset: usize,
    pub offset: usize,
}

impl AlignmentSpan {
    pub const fn new(onset: usize, offset: usize) -> Self {
        Self { onset, offset }
    }

    /// Number of characters covered; zero if `offset` precedes `onset`.
    pub const fn char_len(&self) -> usize {
        (self.offset + 1).saturating_sub(self.onset)
    }

    /// The substring of `text` this span covers, if it lies within `text`.
    ///
    /// Returns `None` for a span whose `offset` precedes its `onset`.
    pub fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        let width = self.offset.checked_sub(self.onset)?;
        let mut boundaries = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()));
        let start = boundaries.nth(self.onset)?;
        let end = boundaries.nth(width)?;
        Some(&text[start..end])
    }
}

impl From<AlignmentSpan> for (usize, usize) {
    fn from(span: AlignmentSpan) -> Self {
        (span.onset, span.offset)
    }
}

/// Aligns texts with their tokenizations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aligner;

impl Aligner {
    pub fn new() -> Self {
        Self
    }

    /// Locate each token of `tokens` in `text`, in order.
    ///
    /// Returns one span per token. Fails on the first token that does not
    /// occur in the remaining text; no partial result is returned.
    ///
    /// An empty token has no inclusive span and always fails. It is not
    /// placed at the cursor as a zero-width `(cursor, cursor - 1)` pair,
    /// which could not be represented at offset zero.
    pub fn align<S: AsRef<str>>(
        &self,
        text: &str,
        tokens: &[S],
    ) -> Result<Vec<AlignmentSpan>, AlignmentFailed> {
        let mut spans = Vec::with_capacity(tokens.len());
        let mut byte_cursor = 0;
        let mut char_cursor = 0;

        for (index, token) in tokens.iter().enumerate() {
            let token = token.as_ref();
            let found = if token.is_empty() {
                None
            } else {
                text[byte_cursor..].find(token)
            };
            let Some(skip) = found else {
                debug!("alignment failed at token {index} ({token:?}), cursor {char_cursor}");
                return Err(AlignmentFailed {
                    index,
                    token: token.to_owned(),
                });
            };

            let onset = char_cursor + text[byte_cursor..byte_cursor + skip].chars().count();
            let offset = onset + token.chars().count() - 1;
            spans.push(AlignmentSpan::new(onset, offset));

            byte_cursor += skip + token.len();
            char_cursor = offset + 1;
        }

        Ok(spans)
    }
}

/// Align `tokens` with `text` using a default [`Aligner`].
pub fn align<S: AsRef<str>>(text: &str, tokens: &[S]) -> Result<Vec<AlignmentSpan>, AlignmentFailed> {
    Aligner.align(text, tokens)
}

//! Core tokenization engine for twokenize.
//!
//! # Architecture
//!
//! - [`PatternCatalog`]: the compiled protected-span alternation and the
//!   auxiliary whitespace, edge-punctuation and all-punctuation patterns,
//!   built once and shared by reference
//! - [`Tokenizer`]: normalizes text, finds protected spans and whitespace-splits
//!   everything between them
//! - [`Aligner`]: recovers per-token character offsets from a token sequence
//!
//! The tokenizer and the aligner are independent; alignment runs on tokens
//! the caller already has.

mod align;
pub mod patterns;
mod tokenizer;

pub use align::{align, Aligner, AlignmentFailed, AlignmentSpan};
pub use patterns::{CatalogError, PatternCatalog, Span};
pub use tokenizer::{tokenize, Tokenizer, TokenizerConfig, TokenizerError};

pub mod core;
#[cfg(feature = "python")]
mod python;

pub use crate::core::{
    align, tokenize, Aligner, AlignmentFailed, AlignmentSpan, CatalogError, PatternCatalog, Span,
    Tokenizer, TokenizerConfig, TokenizerError,
};

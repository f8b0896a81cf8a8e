use std::sync::Arc;

use log::trace;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::patterns::{is_space, CatalogError, PatternCatalog, Span};

#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("Pattern catalog error: {0}")]
    CatalogError(#[from] CatalogError),
}

/// Options fixed when a [`Tokenizer`] is built.
///
/// Deserializes from partial tables; missing fields take their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Lowercase the text before tokenizing.
    pub casefold: bool,
    /// Drop tokens made up entirely of punctuation.
    pub elim_punct: bool,
}

impl TokenizerConfig {
    pub fn casefold(mut self, casefold: bool) -> Self {
        self.casefold = casefold;
        self
    }

    pub fn elim_punct(mut self, elim_punct: bool) -> Self {
        self.elim_punct = elim_punct;
        self
    }
}

/// Twitter and web aware English tokenizer.
///
/// Splits text into word-like tokens while keeping URLs, email addresses,
/// emoticons, hashtags, @-mentions, abbreviations, decorated numbers and
/// contractions intact.
///
/// # Algorithm
///
/// 1. Optionally lowercase the text
/// 2. Collapse every whitespace run to a single space
/// 3. Split quote/bracket runs off the edges of words
/// 4. Find protected spans with the catalog's alternation
/// 5. Whitespace-split the text between protected spans
/// 6. Interleave both in left-to-right order
/// 7. Drop empty tokens, and all-punctuation tokens if configured
///
/// Tokenizers are cheap: they hold their config and an `Arc` of a compiled
/// [`PatternCatalog`], by default the process-wide shared one.
///
/// ```ignore
/// let tokenizer = Tokenizer::new(TokenizerConfig::default());
/// let tokens = tokenizer.tokenize("great day #sunny @joe :-)");
/// assert_eq!(tokens, ["great", "day", "#sunny", "@joe", ":-)"]);
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer {
    config: TokenizerConfig,
    catalog: Arc<PatternCatalog>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}

impl Tokenizer {
    /// Create a tokenizer backed by the shared pattern catalog.
    pub fn new(config: TokenizerConfig) -> Self {
        Self::with_catalog(config, PatternCatalog::shared())
    }

    /// Create a tokenizer backed by the given catalog.
    pub fn with_catalog(config: TokenizerConfig, catalog: Arc<PatternCatalog>) -> Self {
        Self { config, catalog }
    }

    /// Create a tokenizer with a private catalog, choosing whether to try JIT
    /// compilation of its patterns.
    ///
    /// # Errors
    /// Returns an error if the catalog fails to compile.
    pub fn with_jit(config: TokenizerConfig, use_jit: bool) -> Result<Self, TokenizerError> {
        let catalog = PatternCatalog::with_jit(use_jit)?;
        Ok(Self::with_catalog(config, Arc::new(catalog)))
    }

    pub fn config(&self) -> TokenizerConfig {
        self.config
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Rewrite `text` into the form the protected-span scan runs over:
    /// casefolded (if configured), whitespace collapsed, edge punctuation
    /// split off.
    ///
    /// Token boundaries in the result are single spaces, so the original
    /// spacing cannot be recovered from it.
    pub fn normalize(&self, text: &str) -> String {
        let text = if self.config.casefold {
            self.catalog.collapse_whitespace(&text.to_lowercase())
        } else {
            self.catalog.collapse_whitespace(text)
        };
        self.catalog.split_edge_punct(&text)
    }

    /// Tokenize text.
    ///
    /// Never fails; empty input yields no tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = self.normalize(text);
        let protected = self.catalog.protected_spans(&text);

        let mut tokens = Vec::with_capacity(protected.len() * 2 + 8);
        let mut last = 0;
        for &Span { begin, end } in &protected {
            tokens.extend(split_words(&text[last..begin]));
            tokens.push(text[begin..end].to_owned());
            last = end;
        }
        tokens.extend(split_words(&text[last..]));

        let tokens = self.postprocess(tokens);
        trace!(
            "tokenized {} bytes: {} protected spans, {} tokens",
            text.len(),
            protected.len(),
            tokens.len()
        );
        tokens
    }

    /// Tokenize multiple texts in parallel.
    pub fn tokenize_batch(&self, texts: &[String]) -> Vec<Vec<String>> {
        texts.par_iter().map(|text| self.tokenize(text)).collect()
    }

    fn postprocess(&self, mut tokens: Vec<String>) -> Vec<String> {
        tokens.retain(|token| {
            !token.is_empty() && !(self.config.elim_punct && self.catalog.is_all_punct(token))
        });
        tokens
    }
}

fn split_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(is_space)
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
}

/// Tokenize `text` with the default configuration.
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::default().tokenize(text)
}

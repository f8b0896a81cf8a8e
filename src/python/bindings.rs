//! Python bindings for the twokenize tokenizer and aligner.
//!
//! # Example
//!
//! ```python
//! from twokenize import Tokenizer, Aligner, AlignmentFailed
//!
//! tokenizer = Tokenizer(casefold=False, elim_punct=False)
//! tokens = tokenizer.tokenize("great day #sunny @joe :-)")
//!
//! spans = Aligner().align("great day #sunny @joe :-)", tokens)
//! ```

use pyo3::create_exception;
use pyo3::exceptions::PyException;
use pyo3::prelude::*;

use crate::core::{Aligner, Tokenizer, TokenizerConfig};

create_exception!(
    _core,
    AlignmentFailed,
    PyException,
    "Raised when a token cannot be located in the text being aligned."
);

/// Python wrapper for the Rust Tokenizer.
#[pyclass(name = "Tokenizer")]
pub struct PyTokenizer {
    inner: Tokenizer,
}

#[pymethods]
impl PyTokenizer {
    /// Create a tokenizer.
    ///
    /// Args:
    ///     casefold: Lowercase text prior to tokenization (default: False)
    ///     elim_punct: Omit punctuation-only tokens (default: False)
    #[new]
    #[pyo3(signature = (casefold=false, elim_punct=false))]
    fn new(casefold: bool, elim_punct: bool) -> Self {
        let config = TokenizerConfig {
            casefold,
            elim_punct,
        };
        Self {
            inner: Tokenizer::new(config),
        }
    }

    /// Tokenize text.
    ///
    /// Args:
    ///     text: Text to be tokenized
    ///
    /// Returns:
    ///     List of tokens
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.inner.tokenize(text)
    }

    /// Tokenize multiple texts in parallel.
    ///
    /// Uses Rayon to parallelize across texts.
    ///
    /// Args:
    ///     texts: List of texts to tokenize
    ///
    /// Returns:
    ///     List of token lists
    fn tokenize_batch(&self, texts: Vec<String>) -> Vec<Vec<String>> {
        self.inner.tokenize_batch(&texts)
    }

    /// Return the text the protected-span scan runs over: casefolded if
    /// enabled, whitespace collapsed, edge punctuation split off.
    fn normalize(&self, text: &str) -> String {
        self.inner.normalize(text)
    }

    #[getter]
    fn casefold(&self) -> bool {
        self.inner.config().casefold
    }

    #[getter]
    fn elim_punct(&self) -> bool {
        self.inner.config().elim_punct
    }

    fn __repr__(&self) -> String {
        let config = self.inner.config();
        format!(
            "Tokenizer(casefold={}, elim_punct={})",
            py_bool(config.casefold),
            py_bool(config.elim_punct)
        )
    }
}

/// Python wrapper for the Rust Aligner.
#[pyclass(name = "Aligner")]
pub struct PyAligner {
    inner: Aligner,
}

#[pymethods]
impl PyAligner {
    #[new]
    fn new() -> Self {
        Self {
            inner: Aligner::new(),
        }
    }

    /// Align text with its tokenization.
    ///
    /// Args:
    ///     text: Text
    ///     tokens: Tokenization of text
    ///
    /// Returns:
    ///     List of (onset, offset) pairs, inclusive character offsets of each
    ///     token relative to the beginning of text (0-indexed)
    ///
    /// Raises:
    ///     AlignmentFailed: If a token cannot be located
    fn align(&self, text: &str, tokens: Vec<String>) -> PyResult<Vec<(usize, usize)>> {
        let spans = self
            .inner
            .align(text, &tokens)
            .map_err(|err| AlignmentFailed::new_err(err.token))?;
        Ok(spans.into_iter().map(Into::into).collect())
    }

    fn __repr__(&self) -> String {
        "Aligner()".to_string()
    }
}

fn py_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

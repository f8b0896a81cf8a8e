//! Pattern catalog for protected sequences.
//!
//! The tokenizer never splits inside a *protected* span: URLs, email
//! addresses, emoticons, hashtags, @-mentions, abbreviations, decorated
//! numerals and words with embedded apostrophes. Each idiom is a named
//! sub-pattern; the sub-patterns are joined into a single ordered alternation
//! and compiled once with PCRE2.
//!
//! # Regex Engine
//!
//! PCRE2 runs in UTF + UCP mode, which gives:
//! - Leftmost-first ordered alternation with backtracking
//! - Lookahead and (fixed-length per branch) lookbehind
//! - Unicode general categories (`\p{Pi}`, `\p{Pe}`, ...)
//! - Unicode-aware `\b`, `\s`, `\d`
//!
//! Code points are written as `\x{HHHH}`, the PCRE2 spelling.
//!
//! # Auxiliary Patterns
//!
//! Besides the protected alternation the catalog compiles a whitespace-run
//! pattern, left/right edge-punctuation patterns and an all-punctuation check.

use std::fmt;
use std::ops::Range;
use std::sync::{Arc, LazyLock};

use log::{debug, warn};
use pcre2::bytes::{Regex, RegexBuilder};
use thiserror::Error;

/// Errors that can occur when compiling a pattern catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Regex compilation error (PCRE2) in {name} pattern: {source}")]
    Compile {
        name: &'static str,
        #[source]
        source: pcre2::Error,
    },
}

// =============================================================================
// Combinators
// =============================================================================

/// Join alternatives into one non-capturing group.
pub fn regex_or(items: &[&str]) -> String {
    format!("(?:{})", items.join("|"))
}

pub fn pos_lookahead(r: &str) -> String {
    format!("(?={r})")
}

pub fn pos_lookbehind(r: &str) -> String {
    format!("(?<={r})")
}

pub fn neg_lookbehind(r: &str) -> String {
    format!("(?<!{r})")
}

/// Optional capturing group.
pub fn optional(r: &str) -> String {
    format!("({r})?")
}

// =============================================================================
// Literal catalog
// =============================================================================

/// Generic top-level domains accepted by the bare-domain URL opener.
pub const COMMON_TLDS: &[&str] = &[
    "com", r"co\.uk", "org", "edu", "gov", "net", "mil", "aero", "asia", "biz", "cat", "coop",
    "info", "int", "jobs", "mobi", "museum", "name", "pro", "tel", "travel", "xxx", "ca",
];

/// Two-letter country-code top-level domains.
pub const COMMON_CC_TLDS: &[&str] = &[
    "ac", "ad", "ae", "af", "ag", "ai", "al", "am", "an", "ao", "aq", "ar", "as", "at", "au", "aw",
    "ax", "az", "ba", "bb", "bd", "be", "bf", "bg", "bh", "bi", "bj", "bm", "bn", "bo", "br", "bs",
    "bt", "bv", "bw", "by", "bz", "ca", "cc", "cd", "cf", "cg", "ch", "ci", "ck", "cl", "cm", "cn",
    "co", "cr", "cs", "cu", "cv", "cx", "cy", "cz", "dd", "de", "dj", "dk", "dm", "do", "dz", "ec",
    "ee", "eg", "eh", "er", "es", "et", "eu", "fi", "fj", "fk", "fm", "fo", "fr", "ga", "gb", "gd",
    "ge", "gf", "gg", "gh", "gi", "gl", "gm", "gn", "gp", "gq", "gr", "gs", "gt", "gu", "gw", "gy",
    "hk", "hm", "hn", "hr", "ht", "hu", "id", "ie", "il", "im", "in", "io", "iq", "ir", "is", "it",
    "je", "jm", "jo", "jp", "ke", "kg", "kh", "ki", "km", "kn", "kp", "kr", "kw", "ky", "kz", "la",
    "lb", "lc", "li", "lk", "lr", "ls", "lt", "lu", "lv", "ly", "ma", "mc", "md", "me", "mg", "mh",
    "mk", "ml", "mm", "mn", "mo", "mp", "mq", "mr", "ms", "mt", "mu", "mv", "mw", "mx", "my", "mz",
    "na", "nc", "ne", "nf", "ng", "ni", "nl", "no", "np", "nr", "nu", "nz", "om", "pa", "pe", "pf",
    "pg", "ph", "pk", "pl", "pm", "pn", "pr", "ps", "pt", "pw", "py", "qa", "re", "ro", "rs", "ru",
    "rw", "sa", "sb", "sc", "sd", "se", "sg", "sh", "si", "sj", "sk", "sl", "sm", "sn", "so", "sr",
    "ss", "st", "su", "sv", "sy", "sz", "tc", "td", "tf", "tg", "th", "tj", "tk", "tl", "tm", "tn",
    "to", "tp", "tr", "tt", "tv", "tw", "tz", "ua", "ug", "uk", "us", "uy", "uz", "va", "vc", "ve",
    "vg", "vi", "vn", "vu", "wf", "ws", "ye", "yt", "za", "zm", "zw",
];

/// Personal titles and degrees.
pub const TITLES: &[&str] = &[
    "mr.", "messrs.", "mrs.", "mmes.", "ms.", "dr.", "drs.", "prof.", "rev.", "hon.", "st.", "sr.",
    "jr.", "ph.d.", "m.d.", "b.a.", "m.a.", "d.d.s", "gen.", "rep.", "sem.",
];

/// Street suffixes.
pub const STREETS: &[&str] = &["st.", "dr.", "ave.", "blvd.", "cir.", "crt.", "ct."];

pub const OTHER_ABBREVS: &[&str] = &[
    "a.m.", "p.m.", "u.s.", "u.s.a.", "i.e.", "e.g.", "a.d.", "c.e.", "b.c.", "b.c.e.", "d.c.",
    "no.",
];

// =============================================================================
// Sub-patterns
// =============================================================================

/// Single punctuation character that may trail a URL.
pub const PUNCT_CHARS: &str = r#"['"“”‘’.。?!…,:;]"#;

/// Runs of quotes, terminal punctuation, or colons/semicolons.
pub const PUNCT_SEQ: &str = r#"['"“”‘’]+|[.。?!,…]+|[:;]+"#;

/// HTML character entities.
pub const ENTITY: &str = "&(?:amp|lt|gt|quot);";

pub const HASHTAG: &str = "#[a-zA-Z0-9_]+";
pub const AT_MENTION: &str = "[@＠][a-zA-Z0-9_]+";

pub const NORMAL_EYES: &str = "[:=]";
pub const WINK: &str = "[;]";
pub const NOSE_AREA: &str = "(?:|-|[^a-zA-Z0-9 ])";
pub const HAPPY_MOUTHS: &str = r"[D\)\]\}]";
pub const SAD_MOUTHS: &str = r"[\(\[\{]";
pub const TONGUE: &str = "[pPd3]+";
pub const OTHER_MOUTHS: &str = r"(?:[oO]+|[/\\]+|[vV]+|[Ss]+|[|]+)";

pub const HEARTS: &str = "(?:<+/?3+)+";
pub const ARROWS: &str = "(?:<*[-―—=]*>+|<+[-―—=]*>*)";

pub const TIMELIKE: &str = r"\d+(?::\d+){1,2}";
pub const NUM_NUM: &str = r"\d+\.\d+";

/// Whitespace class body: `\s` plus the ASCII information separators
/// (U+001C..U+001F), which also separate words.
pub const SPACE_CHARS: &str = r"\s\x{1c}-\x{1f}";

/// Characters that end an ordinary word.
pub const THINGS_THAT_SPLIT_WORDS: &str = r#"[^\s\x{1c}-\x{1f}\.,?"]"#;

pub const WHITESPACE: &str = r"[\s\x{1c}-\x{1f}]+";

/// Whether `c` separates words: Unicode whitespace or an ASCII information
/// separator.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Quote- and bracket-class punctuation that is split off the edge of a word.
pub const EDGE_PUNCT: &str = r#"['"\p{Pi}\p{Pf}\p{Ps}\p{Pe}]"#;

/// Content characters.
pub const NOT_EDGE_PUNCT: &str = "[a-zA-Z0-9]";

/// Context on the far side of edge punctuation.
pub const OFF_EDGE: &str = r"(^|$|:|;|\s|\.|,)";

/// Any punctuation character, including other (`\p{Po}`) punctuation.
pub const PUNCT_CLASS: &str = r#"['"\p{Pi}\p{Pf}\p{Ps}\p{Pe}\p{Po}]"#;

/// Dash-like and other symbol runs.
pub const MORE_PUNCT: &str = r"[\-+―—~–=|_^]+";

fn url_start2() -> String {
    let cc_tlds = regex_or(COMMON_CC_TLDS);
    format!(
        r"\b[A-Za-z\d-]+(?:\.[A-Za-z0-9]+){{0,3}}\.{}(?:\.{})?{}",
        regex_or(&[regex_or(COMMON_TLDS).as_str(), cc_tlds.as_str()]),
        cc_tlds,
        pos_lookahead(r"\W|$"),
    )
}

pub fn url() -> String {
    let start1 = regex_or(&["https?://", r"\bwww\."]);
    let body = format!(r"([^\.{SPACE_CHARS}<>][^{SPACE_CHARS}<>]*)?");
    let extra_crap_before_end = format!("{}+?", regex_or(&[PUNCT_CHARS, ENTITY]));
    let space = format!("[{SPACE_CHARS}]");
    let end = regex_or(&[r"\.\.+", "[<>]", space.as_str(), "$"]);
    format!(
        "{}{}{}",
        regex_or(&[start1.as_str(), url_start2().as_str()]),
        body,
        pos_lookahead(&format!("{}{}", optional(&extra_crap_before_end), end)),
    )
}

pub fn email() -> String {
    // Lookbehind branches must each have a fixed length.
    format!(
        r"{}[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{{2,4}}{}",
        pos_lookbehind(r"\W|^|$"),
        pos_lookahead(r"\W|^|$"),
    )
}

pub fn num_with_commas() -> String {
    format!(
        r"(?:{}\d{{1,3}},)+?\d{{3}}{}",
        neg_lookbehind(r"\d"),
        pos_lookahead(&regex_or(&[r"[^,\d]", "$"])),
    )
}

pub fn num_comb() -> String {
    let currency = regex_or(&["[$£¥ƒ]", r"[\x{20A0}-\x{20CF}]"]);
    format!(r"{currency}?\d+(?:\.\d+)+%?")
}

pub fn emoticon() -> String {
    format!(
        "{}{}{}",
        regex_or(&[NORMAL_EYES, WINK]),
        NOSE_AREA,
        regex_or(&[TONGUE, OTHER_MOUTHS, SAD_MOUTHS, HAPPY_MOUTHS]),
    )
}

pub fn decorations() -> String {
    regex_or(&[
        "[♫♪]+",
        "[★☆]+",
        "[♥❤♡]+",
        r"[\x{2639}-\x{263b}]+",
        r"[\x{e001}-\x{ebbb}]+",
    ])
}

/// Expand an abbreviation into an explicit case-insensitive pattern, anchored
/// at a word boundary: `dr.` becomes `\b[dD][rR]\.`.
pub fn regexify_abbrev(abbrev: &str) -> String {
    let mut pattern = String::from(r"\b");
    for c in abbrev.chars() {
        if c == '.' {
            pattern.push_str(r"\.");
        } else {
            pattern.push('[');
            pattern.push(c);
            pattern.extend(c.to_uppercase());
            pattern.push(']');
        }
    }
    pattern
}

pub fn abbrevs() -> String {
    let expanded: Vec<String> = TITLES
        .iter()
        .chain(STREETS)
        .chain(OTHER_ABBREVS)
        .map(|abbrev| regexify_abbrev(abbrev))
        .collect();
    let refs: Vec<&str> = expanded.iter().map(String::as_str).collect();
    regex_or(&refs)
}

pub fn arbitrary_abbrev() -> String {
    let boundary_not_dot = pos_lookahead(&regex_or(&["$", r"\s", r#"[“"?!,:;]"#, ENTITY]));
    let aa1 = format!(r"(?:[A-Za-z]\.){{2,}}{boundary_not_dot}");
    let aa2 = format!(r"(?:[A-Za-z]\.){{1,}}[A-Za-z]{boundary_not_dot}");
    regex_or(&[aa1.as_str(), aa2.as_str()])
}

pub fn separators() -> String {
    regex_or(&["--+", "―", "—", "~", "–", "="])
}

pub fn embedded_apostrophe() -> String {
    format!("{THINGS_THAT_SPLIT_WORDS}+['’′]{THINGS_THAT_SPLIT_WORDS}*")
}

/// The protected-span alternation, in catalog order.
pub fn protected_pattern() -> String {
    let parts = [
        HEARTS.to_string(),
        url(),
        email(),
        TIMELIKE.to_string(),
        NUM_NUM.to_string(),
        num_with_commas(),
        num_comb(),
        emoticon(),
        ARROWS.to_string(),
        ENTITY.to_string(),
        PUNCT_SEQ.to_string(),
        abbrevs(),
        arbitrary_abbrev(),
        separators(),
        decorations(),
        embedded_apostrophe(),
        HASHTAG.to_string(),
        AT_MENTION.to_string(),
    ];
    let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
    regex_or(&refs)
}

pub fn edge_punct_left() -> String {
    format!("{OFF_EDGE}({EDGE_PUNCT}+)({NOT_EDGE_PUNCT})")
}

pub fn edge_punct_right() -> String {
    format!("({NOT_EDGE_PUNCT})({EDGE_PUNCT}+){OFF_EDGE}")
}

pub fn all_punct_seq() -> String {
    let punct_run = format!("{PUNCT_CLASS}+");
    format!("^{}$", regex_or(&[PUNCT_SEQ, punct_run.as_str(), MORE_PUNCT]))
}

// =============================================================================
// Compiled catalog
// =============================================================================

/// A half-open `[begin, end)` byte range into a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    pub const fn as_range(&self) -> Range<usize> {
        self.begin..self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.begin
    }

    pub const fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// JIT stack limit per match context. Long runs of a repeated idiom
/// (`<3<3<3...`, `a.b.c....`) need stack in proportion to their length; the
/// 32 KiB default overflows within a few KiB of input.
const MAX_JIT_STACK_SIZE: usize = 8 << 20;

static SHARED: LazyLock<Arc<PatternCatalog>> = LazyLock::new(|| {
    Arc::new(PatternCatalog::new().expect("built-in pattern catalog must compile"))
});

/// Precompiled protected-span and auxiliary patterns.
///
/// Building a catalog parses and (when available) JIT-compiles five patterns,
/// so it is done once and shared. [`PatternCatalog::shared`] returns the
/// process-wide instance.
pub struct PatternCatalog {
    protected: Regex,
    whitespace: Regex,
    left_edge_punct: Regex,
    right_edge_punct: Regex,
    all_punct_seq: Regex,
    /// Non-JIT copy of `protected`, used when a JIT match fails.
    interpreted: Option<Regex>,
    use_jit: bool,
}

impl PatternCatalog {
    /// Compile the catalog with JIT enabled when the platform supports it.
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_jit(true)
    }

    /// Compile the catalog, choosing whether to try JIT compilation.
    pub fn with_jit(use_jit: bool) -> Result<Self, CatalogError> {
        let protected = protected_pattern();
        let interpreted = if use_jit {
            Some(compile("protected", &protected, false)?)
        } else {
            None
        };
        let catalog = Self {
            protected: compile("protected", &protected, use_jit)?,
            whitespace: compile("whitespace", WHITESPACE, use_jit)?,
            left_edge_punct: compile("left edge punctuation", &edge_punct_left(), use_jit)?,
            right_edge_punct: compile("right edge punctuation", &edge_punct_right(), use_jit)?,
            all_punct_seq: compile("all punctuation", &all_punct_seq(), use_jit)?,
            interpreted,
            use_jit,
        };
        debug!("compiled pattern catalog (jit: {use_jit})");
        Ok(catalog)
    }

    /// The process-wide catalog, compiled on first use.
    pub fn shared() -> Arc<PatternCatalog> {
        Arc::clone(&SHARED)
    }

    pub fn use_jit(&self) -> bool {
        self.use_jit
    }

    /// Source of the protected-span alternation.
    pub fn protected_source(&self) -> &str {
        self.protected.as_str()
    }

    /// Find every non-overlapping protected span, left to right.
    ///
    /// A match that fails inside PCRE2 (JIT stack or match limit) does not
    /// abort the scan: the rest of the text is rescanned one space-delimited
    /// word at a time, retrying each failed word without JIT. A word that
    /// still fails yields no protected spans.
    pub fn protected_spans(&self, text: &str) -> Vec<Span> {
        let subject = text.as_bytes();
        let mut spans = Vec::new();
        let mut start = 0;
        while start <= subject.len() {
            match self.protected.find_at(subject, start) {
                Ok(Some(m)) => start = push_span(&mut spans, text, m.start(), m.end()),
                Ok(None) => break,
                Err(err) => {
                    debug!("protected scan failed at byte {start}, rescanning by word: {err}");
                    self.protected_spans_by_word(text, start, &mut spans);
                    break;
                }
            }
        }
        spans
    }

    /// Scan `text[from..]` one space-delimited word at a time.
    ///
    /// Protected spans never contain a space, and every lookahead in the
    /// alternation accepts end of subject wherever it accepts a space, so
    /// ending the subject at the word boundary finds the same matches.
    fn protected_spans_by_word(&self, text: &str, from: usize, spans: &mut Vec<Span>) {
        let mut word_start = from;
        while word_start < text.len() {
            let word_end = text[word_start..]
                .find(' ')
                .map_or(text.len(), |i| word_start + i);
            let window = &text.as_bytes()[..word_end];
            let mut start = word_start;
            while start < word_end {
                let found = self.protected.find_at(window, start).or_else(|err| {
                    match &self.interpreted {
                        Some(fallback) => {
                            debug!("retrying protected match at byte {start} without jit: {err}");
                            fallback.find_at(window, start)
                        }
                        None => Err(err),
                    }
                });
                match found {
                    Ok(Some(m)) => start = push_span(spans, text, m.start(), m.end()),
                    Ok(None) => break,
                    Err(err) => {
                        warn!("protected pattern failed to match at byte {start}: {err}");
                        break;
                    }
                }
            }
            word_start = word_end + 1;
        }
    }

    /// Replace every whitespace run with a single ASCII space.
    pub fn collapse_whitespace(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in self.whitespace.find_iter(text.as_bytes()) {
            match m {
                Ok(m) => {
                    out.push_str(&text[last..m.start()]);
                    out.push(' ');
                    last = m.end();
                }
                Err(err) => {
                    warn!("whitespace pattern failed to match: {err}");
                    break;
                }
            }
        }
        out.push_str(&text[last..]);
        out
    }

    /// Insert a space between content characters and adjoining quote or
    /// bracket runs, first on the left edge of words and then on the right.
    pub fn split_edge_punct(&self, text: &str) -> String {
        let text = substitute(&self.left_edge_punct, text, |out, groups| {
            out.push_str(groups[0]);
            out.push_str(groups[1]);
            out.push(' ');
            out.push_str(groups[2]);
        });
        substitute(&self.right_edge_punct, &text, |out, groups| {
            out.push_str(groups[0]);
            out.push(' ');
            out.push_str(groups[1]);
            out.push_str(groups[2]);
        })
    }

    /// Whether `token` consists solely of punctuation.
    pub fn is_all_punct(&self, token: &str) -> bool {
        self.all_punct_seq
            .is_match(token.as_bytes())
            .unwrap_or_else(|err| {
                warn!("all-punctuation pattern failed to match: {err}");
                false
            })
    }
}

impl fmt::Debug for PatternCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternCatalog")
            .field("protected", &self.protected.as_str())
            .field("use_jit", &self.use_jit)
            .finish_non_exhaustive()
    }
}

fn compile(name: &'static str, pattern: &str, use_jit: bool) -> Result<Regex, CatalogError> {
    let mut builder = RegexBuilder::new();
    if use_jit {
        builder.jit_if_available(true);
        builder.max_jit_stack_size(Some(MAX_JIT_STACK_SIZE));
    }
    builder.utf(true);
    builder.ucp(true);
    builder
        .build(pattern)
        .map_err(|source| CatalogError::Compile { name, source })
}

/// Record a protected match and return where the next search starts.
///
/// Empty matches are skipped, stepping over one character.
fn push_span(spans: &mut Vec<Span>, text: &str, begin: usize, end: usize) -> usize {
    if begin < end {
        spans.push(Span::new(begin, end));
        return end;
    }
    end + text[end..].chars().next().map_or(1, char::len_utf8)
}

/// Rewrite every match of a three-group pattern, keeping unmatched text.
fn substitute<F>(regex: &Regex, text: &str, mut replace: F) -> String
where
    F: FnMut(&mut String, [&str; 3]),
{
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for caps in regex.captures_iter(text.as_bytes()) {
        let caps = match caps {
            Ok(caps) => caps,
            Err(err) => {
                warn!("edge punctuation pattern failed to match: {err}");
                break;
            }
        };
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let group = |i: usize| caps.get(i).map_or("", |m| &text[m.start()..m.end()]);
        out.push_str(&text[last..whole.start()]);
        replace(&mut out, [group(1), group(2), group(3)]);
        last = whole.end();
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Arc<PatternCatalog> {
        PatternCatalog::shared()
    }

    fn protected(text: &str) -> Vec<&str> {
        catalog()
            .protected_spans(text)
            .into_iter()
            .map(|span| &text[span.as_range()])
            .collect()
    }

    #[test]
    fn test_catalog_compiles_with_and_without_jit() {
        assert!(PatternCatalog::with_jit(true).unwrap().use_jit());
        assert!(!PatternCatalog::with_jit(false).unwrap().use_jit());
    }

    #[test]
    fn test_regexify_abbrev() {
        assert_eq!(regexify_abbrev("dr."), r"\b[dD][rR]\.");
        assert_eq!(regexify_abbrev("d.d.s"), r"\b[dD]\.[dD]\.[sS]");
    }

    #[test]
    fn test_regex_or() {
        assert_eq!(regex_or(&["a", "b"]), "(?:a|b)");
        assert_eq!(optional("x"), "(x)?");
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        let source = protected_pattern();
        let hearts = source.find(HEARTS).unwrap();
        let hashtag = source.find(HASHTAG).unwrap();
        let mention = source.find(AT_MENTION).unwrap();
        assert!(hearts < hashtag);
        assert!(hashtag < mention);
        assert_eq!(catalog().protected_source(), source);
    }

    #[test]
    fn test_hearts() {
        assert_eq!(protected("i <3 u"), vec!["<3"]);
        assert_eq!(protected("ugh </333"), vec!["</333"]);
    }

    #[test]
    fn test_urls() {
        assert_eq!(protected("see http://t.co/abc now"), vec!["http://t.co/abc"]);
        assert_eq!(protected("at www.cmu.edu today"), vec!["www.cmu.edu"]);
        assert_eq!(protected("go to example.com/path now"), vec!["example.com/path"]);
        assert_eq!(protected("bbc.co.uk rocks"), vec!["bbc.co.uk"]);
    }

    #[test]
    fn test_email() {
        assert_eq!(protected("mail me@example.org now"), vec!["me@example.org"]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(protected("at 10:30"), vec!["10:30"]);
        assert_eq!(protected("pi 3.14"), vec!["3.14"]);
        assert_eq!(protected("pop 1,234,567 people"), vec!["1,234,567"]);
        assert_eq!(protected("costs $4.99"), vec!["$4.99"]);
        assert_eq!(protected("rate ¥100.50%"), vec!["¥100.50%"]);
    }

    #[test]
    fn test_emoticons_and_arrows() {
        assert_eq!(protected("yay :-)"), vec![":-)"]);
        assert_eq!(protected("meh ;p"), vec![";p"]);
        assert_eq!(protected("sad =("), vec!["=("]);
        assert_eq!(protected("go -->"), vec!["-->"]);
    }

    #[test]
    fn test_entities_and_punct_runs() {
        assert_eq!(protected("a &amp; b"), vec!["&amp;"]);
        assert_eq!(protected("what?!?"), vec!["?!?"]);
        assert_eq!(protected("wait..."), vec!["..."]);
    }

    #[test]
    fn test_abbreviations() {
        assert_eq!(protected("Dr. Who"), vec!["Dr."]);
        assert_eq!(protected("MR. T"), vec!["MR."]);
        assert_eq!(protected("at 5 p.m. sharp"), vec!["p.m."]);
        assert_eq!(protected("the N.F.L rules"), vec!["N.F.L"]);
    }

    #[test]
    fn test_separators_and_decorations() {
        assert_eq!(protected("a -- b"), vec!["--"]);
        assert_eq!(protected("love ♥♥♥"), vec!["♥♥♥"]);
        assert_eq!(protected("stars ★☆"), vec!["★☆"]);
        assert_eq!(protected("face ☺"), vec!["☺"]);
    }

    #[test]
    fn test_embedded_apostrophe() {
        assert_eq!(protected("don't"), vec!["don't"]);
        assert_eq!(protected("John’s car"), vec!["John’s"]);
    }

    #[test]
    fn test_hashtag_and_mention() {
        assert_eq!(protected("#rust and @ferris"), vec!["#rust", "@ferris"]);
        assert_eq!(protected("＠user"), vec!["＠user"]);
    }

    #[test]
    fn test_plain_words_are_unprotected() {
        assert!(protected("just some words").is_empty());
        assert!(protected("").is_empty());
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(catalog().collapse_whitespace("a \t\n b  c"), "a b c");
        assert_eq!(catalog().collapse_whitespace("\u{3000}x"), " x");
        assert_eq!(catalog().collapse_whitespace(""), "");
        assert_eq!(catalog().collapse_whitespace("a\x1c\x1d b"), "a b");
    }

    #[test]
    fn test_split_edge_punct() {
        assert_eq!(catalog().split_edge_punct("\"hello\""), "\" hello \"");
        assert_eq!(catalog().split_edge_punct("(see this)"), "( see this )");
        assert_eq!(catalog().split_edge_punct("don't"), "don't");
        assert_eq!(catalog().split_edge_punct("Dr. Smith"), "Dr. Smith");
    }

    #[test]
    fn test_is_all_punct() {
        let catalog = catalog();
        for token in ["!!!", "?", "...", "\"", "((", "--", "|", ":;"] {
            assert!(catalog.is_all_punct(token), "{token:?}");
        }
        for token in ["Wow", "a!", ":-)", "#tag", ""] {
            assert!(!catalog.is_all_punct(token), "{token:?}");
        }
    }

    #[test]
    fn test_word_rescan_finds_the_same_spans() {
        let catalog = catalog();
        let text = "RT @joe: see http://t.co/x! now, Dr. Who at 10:30 :-) \
                    mail me@example.org or 1,234 &amp; a.b.c <3 #tag";
        let mut by_word = Vec::new();
        catalog.protected_spans_by_word(text, 0, &mut by_word);
        assert_eq!(by_word, catalog.protected_spans(text));

        let mut from_middle = Vec::new();
        catalog.protected_spans_by_word("x don't y", 3, &mut from_middle);
        assert_eq!(from_middle, vec![Span::new(3, 7)]);
    }

    #[test]
    fn test_long_heart_run_is_one_span() {
        let text = "<3".repeat(5000);
        for catalog in [catalog(), Arc::new(PatternCatalog::with_jit(false).unwrap())] {
            assert_eq!(catalog.protected_spans(&text), vec![Span::new(0, text.len())]);
        }
    }

    #[test]
    fn test_is_space() {
        assert!(is_space(' '));
        assert!(is_space('\u{3000}'));
        assert!(is_space('\x1f'));
        assert!(!is_space('a'));
        assert!(!is_space('\x1b'));
    }

    #[test]
    fn test_span() {
        let span = Span::from(2..5);
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());
        assert_eq!(span.as_range(), 2..5);
    }
}

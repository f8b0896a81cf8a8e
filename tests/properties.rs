//! Property tests for tokenization and alignment.

use std::sync::LazyLock;

use proptest::prelude::*;
use twokenize::{align, Tokenizer, TokenizerConfig};

static TOKENIZER: LazyLock<Tokenizer> = LazyLock::new(Tokenizer::default);

static FOLDING: LazyLock<Tokenizer> = LazyLock::new(|| {
    Tokenizer::new(TokenizerConfig::default().casefold(true).elim_punct(true))
});

fn element() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        "[A-Z][a-z]{0,6}",
        Just("#tag".to_string()),
        Just("@user".to_string()),
        Just(":-)".to_string()),
        Just("http://example.com/x".to_string()),
        Just("Dr.".to_string()),
        Just("don't".to_string()),
        Just("!!!".to_string()),
        Just("\"".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("3.14".to_string()),
    ]
}

proptest! {
    #[test]
    fn tokens_align_onto_raw_text(text in r#"[a-zA-Z0-9 .,!?'"@#:;()<>/&=~*\t\n-]{0,80}"#) {
        let tokens = TOKENIZER.tokenize(&text);
        let spans = align(&text, &tokens).unwrap();
        for (token, span) in tokens.iter().zip(&spans) {
            prop_assert_eq!(span.extract(&text), Some(token.as_str()));
        }
    }

    #[test]
    fn tokens_align_onto_any_text(text in any::<String>()) {
        let tokens = TOKENIZER.tokenize(&text);
        prop_assert!(tokens.iter().all(|token| !token.is_empty()));
        prop_assert!(align(&text, &tokens).is_ok());
    }

    #[test]
    fn folded_tokens_align_onto_normalized_text(text in any::<String>()) {
        let normalized = FOLDING.normalize(&text);
        let tokens = FOLDING.tokenize(&text);
        let spans = align(&normalized, &tokens).unwrap();
        for (token, span) in tokens.iter().zip(&spans) {
            prop_assert_eq!(span.extract(&normalized), Some(token.as_str()));
        }
    }

    #[test]
    fn retokenizing_is_idempotent(elements in prop::collection::vec(element(), 0..12)) {
        let text = elements.join(" ");
        let tokens = TOKENIZER.tokenize(&text);
        let again = TOKENIZER.tokenize(&tokens.join(" "));
        prop_assert_eq!(again, tokens);
    }
}

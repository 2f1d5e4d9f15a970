//! Whole-word, case-insensitive matching of words inside player input.
//!
//! A word is a maximal run of alphanumeric characters or `_`. A phrase such
//! as `"chave dourada"` matches when its words appear contiguously in the
//! input. There is no stemming and no fuzzy matching, so `"chaves"` does not
//! match `"chave"`.

/// Split text into lowercase words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Player input tokenized once for repeated queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    words: Vec<String>,
}

impl Tokens {
    /// Tokenize `text`.
    pub fn new(text: &str) -> Self {
        Self {
            words: tokenize(text),
        }
    }

    /// Whether the input contained no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `phrase` appears as a contiguous run of whole words.
    ///
    /// A phrase with no words never matches.
    pub fn contains(&self, phrase: &str) -> bool {
        let needle = tokenize(phrase);
        if needle.is_empty() || needle.len() > self.words.len() {
            return false;
        }
        self.words
            .windows(needle.len())
            .any(|window| window == needle.as_slice())
    }

    /// Whether any of `phrases` matches.
    pub fn contains_any<S: AsRef<str>>(&self, phrases: &[S]) -> bool {
        phrases.iter().any(|p| self.contains(p.as_ref()))
    }
}

/// Whether `word` appears in `text` as a whole word, ignoring case.
pub fn matches(word: &str, text: &str) -> bool {
    Tokens::new(text).contains(word)
}

/// Whether any of `words` appears in `text`.
pub fn matches_any<S: AsRef<str>>(words: &[S], text: &str) -> bool {
    Tokens::new(text).contains_any(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_word_only() {
        assert!(matches("porta", "abrir a porta"));
        assert!(!matches("porta", "abrir o portal"));
        assert!(!matches("chave", "pegar chaves"));
    }

    #[test]
    fn case_insensitive_and_unicode() {
        assert!(matches("Inventário", "ver INVENTÁRIO agora"));
        assert!(matches("maçã", "comer a MAÇÃ"));
        assert!(!matches("inventario", "inventário"));
    }

    #[test]
    fn punctuation_separates_words() {
        assert!(matches("porta", "abrir a porta!"));
        assert!(matches("vela", "pegar: vela, fósforo"));
        assert!(matches("obj_x", "usar obj_x"));
    }

    #[test]
    fn multi_word_phrases_are_contiguous() {
        assert!(matches("chave dourada", "usar a chave  dourada"));
        assert!(!matches("chave dourada", "a chave não é dourada"));
    }

    #[test]
    fn blank_word_never_matches() {
        assert!(!matches("", "qualquer coisa"));
        assert!(!matches("   ", "qualquer coisa"));
        assert!(!matches("!!", "!!"));
    }

    #[test]
    fn free_word_order() {
        let tokens = Tokens::new("com a chave, abrir a porta");
        assert!(tokens.contains("abrir"));
        assert!(tokens.contains("porta"));
        assert!(tokens.contains_any(&["fechar", "chave"]));
        assert!(!tokens.contains_any::<&str>(&[]));
    }

    #[test]
    fn matches_any_words() {
        assert!(matches_any(&["i", "inventario"], "i"));
        assert!(!matches_any(&["olhar", "x"], "xis"));
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn word_matches_when_surrounded(
                before in "[a-z ]{0,20}",
                word in "[a-z]{1,10}",
                after in "[a-z ]{0,20}",
            ) {
                let text = format!("{before} {word} {after}");
                prop_assert!(matches(&word, &text));
                prop_assert!(matches(&word.to_uppercase(), &text));
            }

            #[test]
            fn word_never_matches_inside_longer_word(
                word in "[a-z]{1,8}",
                suffix in "[a-z]{1,4}",
            ) {
                let text = format!("abrir {word}{suffix}");
                prop_assert!(!matches(&word, &text) || word == "abrir");
            }

            #[test]
            fn tokens_are_lowercase_words(text in "[A-Za-z0-9_ ,.!?-]{0,40}") {
                for word in tokenize(&text) {
                    prop_assert!(!word.is_empty());
                    prop_assert!(word.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
                }
            }
        }
    }
}

//! Word validation with morphological back-off.
//!
//! A token is valid when it is in the dictionary, or when stripping one of a
//! fixed set of suffixes (`s`, `ing`, `ed`, `er`, `ly`, `ness`) yields a
//! dictionary word.

use crate::dictionary::Dictionary;
use crate::text::char_len;

/// Minimum length before suffix rules are tried.
const MIN_DERIVED_LEN: usize = 3;

/// Decides whether tokens are known words.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    dictionary: &'a Dictionary,
}

impl<'a> Validator<'a> {
    /// Validate against `dictionary`.
    pub const fn new(dictionary: &'a Dictionary) -> Self {
        Self { dictionary }
    }

    /// Whether `token` is a known word or a regular derivation of one.
    pub fn is_valid(&self, token: &str) -> bool {
        let word = token.to_lowercase();
        self.dictionary.contains(&word) || self.is_derived(&word)
    }

    fn is_derived(&self, word: &str) -> bool {
        if char_len(word) < MIN_DERIVED_LEN {
            return false;
        }
        let known = |base: &str| self.dictionary.contains(base);

        if let Some(base) = word.strip_suffix('s')
            && known(base)
        {
            return true;
        }

        // making -> make
        if let Some(base) = word.strip_suffix("ing")
            && (known(base) || known(&format!("{base}e")))
        {
            return true;
        }

        // worked -> work, loved -> love
        if let Some(base) = word.strip_suffix("ed")
            && (known(base) || known(&word[..word.len() - 1]))
        {
            return true;
        }

        ["er", "ly", "ness"]
            .iter()
            .any(|suffix| word.strip_suffix(suffix).is_some_and(known))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> Dictionary {
        Dictionary::from_words([
            "the", "jump", "make", "work", "love", "cat", "build", "quick", "kind", "go",
        ])
    }

    #[test]
    fn exact_match() {
        let d = dict();
        let v = Validator::new(&d);
        assert!(v.is_valid("the"));
        assert!(v.is_valid("The"));
        assert!(!v.is_valid("xyz"));
    }

    #[test]
    fn plural_s() {
        let d = dict();
        let v = Validator::new(&d);
        assert!(v.is_valid("cats"));
        assert!(!v.is_valid("dogs"));
    }

    #[test]
    fn ing_with_and_without_silent_e() {
        let d = dict();
        let v = Validator::new(&d);
        assert!(v.is_valid("jumping"));
        assert!(v.is_valid("making"));
        assert!(!v.is_valid("running"));
    }

    #[test]
    fn ed_strips_one_or_two() {
        let d = dict();
        let v = Validator::new(&d);
        assert!(v.is_valid("worked"));
        assert!(v.is_valid("loved"));
        assert!(v.is_valid("jumped"));
        assert!(!v.is_valid("jumpped"));
    }

    #[test]
    fn er_ly_ness() {
        let d = dict();
        let v = Validator::new(&d);
        assert!(v.is_valid("builder"));
        assert!(v.is_valid("quickly"));
        assert!(v.is_valid("kindness"));
    }

    #[test]
    fn short_tokens_only_match_exactly() {
        let d = dict();
        let v = Validator::new(&d);
        assert!(v.is_valid("go"));
        // "gs" would strip to "g", but two-letter tokens never use suffix rules.
        assert!(!v.is_valid("gs"));
    }

    #[test]
    fn doubled_consonant_misspelling_is_not_derived() {
        // Neither "jumpp" nor "jumppe" is known.
        let d = dict();
        let v = Validator::new(&d);
        assert!(v.is_valid("jumping"));
        assert!(!v.is_valid("jumpping"));
    }
}

use std::fmt;
use zeroize::Zeroizing;

/// A wallet mnemonic phrase, trimmed of surrounding whitespace.
///
/// The buffer is zeroed on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic(Zeroizing<String>);

impl Mnemonic {
    /// Wrap a phrase, returning `None` when it is blank.
    pub fn new(phrase: impl Into<String>) -> Option<Self> {
        let raw = Zeroizing::new(phrase.into());
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(Zeroizing::new(trimmed.to_string())))
    }

    pub fn phrase(&self) -> &str {
        &self.0
    }

    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic([REDACTED; {} words])", self.word_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        let mnemonic = Mnemonic::new("  test test junk\n").unwrap();
        assert_eq!(mnemonic.phrase(), "test test junk");
        assert_eq!(mnemonic.word_count(), 3);
    }

    #[test]
    fn test_blank_is_rejected() {
        assert!(Mnemonic::new("").is_none());
        assert!(Mnemonic::new(" \n\t ").is_none());
    }

    #[test]
    fn test_debug_is_redacted() {
        let mnemonic = Mnemonic::new("secret words here").unwrap();
        let debug = format!("{mnemonic:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("3 words"));
    }
}

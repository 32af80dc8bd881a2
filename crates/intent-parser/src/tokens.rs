//! Token streams produced once per utterance

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Ordered, immutable sequence of lowercase words
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStream {
    tokens: Vec<String>,
}

fn word_pattern() -> Option<&'static Regex> {
    static WORD_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    WORD_REGEX
        .get_or_init(|| Regex::new(r"[\p{L}\p{N}']+").ok())
        .as_ref()
}

impl TokenStream {
    /// Build a stream from tokens that are already split and lowercased
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Lowercase a transcript and split it into words, dropping punctuation
    pub fn from_transcript(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let tokens = match word_pattern() {
            Some(re) => re
                .find_iter(&lowered)
                .map(|m| m.as_str().to_string())
                .collect(),
            None => lowered.split_whitespace().map(str::to_string).collect(),
        };
        Self { tokens }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TokenStream {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_normalisation() {
        let stream = TokenStream::from_transcript("  Pick RED,   then place-it!  ");
        let words: Vec<&str> = stream.iter().collect();
        assert_eq!(words, vec!["pick", "red", "then", "place", "it"]);
    }

    #[test]
    fn test_empty_transcript() {
        assert!(TokenStream::from_transcript("   ").is_empty());
        assert_eq!(TokenStream::from_transcript("...").len(), 0);
    }

    #[test]
    fn test_new_keeps_tokens_verbatim() {
        let stream: TokenStream = ["pick", "red"].into_iter().collect();
        assert_eq!(stream.len(), 2);
        assert_eq!(stream, TokenStream::new(vec!["pick".to_string(), "red".to_string()]));
    }
}

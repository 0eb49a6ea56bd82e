//! Tokenizer for the built-in field index

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// How indexed text is split into terms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenMode {
    /// Whole words only
    #[default]
    Strict,
    /// Whole words plus every leading prefix, for prefix matching
    Forward,
}

/// Resolved options of one field index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOptions {
    /// Term expansion mode
    #[serde(default)]
    pub tokenize: TokenMode,
    /// Keep letter case when indexing and querying
    #[serde(default)]
    pub case_sensitive: bool,
}

/// Splits text into terms
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    options: IndexOptions,
}

impl Tokenizer {
    /// Creates a tokenizer for the given options
    pub fn new(options: IndexOptions) -> Self {
        Self { options }
    }

    /// Unique words of `text`, in order of first occurrence
    pub fn words(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();

        text.split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(|word| {
                if self.options.case_sensitive {
                    word.to_string()
                } else {
                    word.to_lowercase()
                }
            })
            .filter(|word| seen.insert(word.clone()))
            .collect()
    }

    /// Terms to index for `text`.
    ///
    /// In forward mode every prefix of a word is a term as well.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let words = self.words(text);

        if self.options.tokenize == TokenMode::Strict {
            return words;
        }

        let mut seen = HashSet::new();
        let mut terms = Vec::new();

        for word in words {
            let ends = word
                .char_indices()
                .map(|(i, c)| i + c.len_utf8());

            for end in ends {
                let prefix = &word[..end];
                if seen.insert(prefix.to_string()) {
                    terms.push(prefix.to_string());
                }
            }
        }

        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_lowercase_and_unique() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokenizer.words("Hello, world! hello-World"),
            vec!["hello", "world"]
        );
    }

    #[test]
    fn test_case_sensitive() {
        let tokenizer = Tokenizer::new(IndexOptions {
            case_sensitive: true,
            ..IndexOptions::default()
        });
        assert_eq!(tokenizer.words("Rust rust"), vec!["Rust", "rust"]);
    }

    #[test]
    fn test_forward_prefixes() {
        let tokenizer = Tokenizer::new(IndexOptions {
            tokenize: TokenMode::Forward,
            ..IndexOptions::default()
        });
        assert_eq!(tokenizer.terms("abc ab"), vec!["a", "ab", "abc"]);
    }

    #[test]
    fn test_forward_multibyte() {
        let tokenizer = Tokenizer::new(IndexOptions {
            tokenize: TokenMode::Forward,
            ..IndexOptions::default()
        });
        assert_eq!(tokenizer.terms("über"), vec!["ü", "üb", "übe", "über"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(Tokenizer::default().terms("  ,, ").is_empty());
    }
}

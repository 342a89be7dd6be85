//! Keyword extraction
//!
//! Case-folds a corpus, keeps runs of lowercase ASCII letters at least
//! `min_token_length` long, drops stop words, and ranks the survivors by
//! frequency. Ties keep first-encountered order.

use crate::config::KeywordConfig;
use crate::error::ConfigError;
use indexmap::IndexMap;
use insight_model::KeywordEntry;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Common English function words excluded by default
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "about", "after", "also", "an", "and", "are", "as", "at", "be", "been", "but", "by",
    "can", "could", "did", "do", "does", "for", "from", "had", "has", "have", "he", "her", "his",
    "i", "in", "into", "is", "it", "its", "just", "may", "might", "more", "of", "on", "or", "our",
    "she", "should", "so", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "those", "to", "was", "we", "were", "what", "when", "which", "will", "with",
    "would", "you", "your",
];

/// Owned copy of [`DEFAULT_STOP_WORDS`]
#[must_use]
pub fn default_stop_words() -> Vec<String> {
    DEFAULT_STOP_WORDS.iter().map(|w| (*w).to_string()).collect()
}

/// Runs of at least `min_len` ASCII letters between ASCII word boundaries
///
/// Non-ASCII letters count as separators, so `"zürich"` yields `"rich"`.
fn token_pattern(min_len: usize) -> String {
    format!(r"(?-u:\b)[a-z]{{{min_len},}}(?-u:\b)")
}

static DEFAULT_EXTRACTOR: Lazy<KeywordExtractor> = Lazy::new(|| KeywordExtractor {
    pattern: Regex::new(&token_pattern(4)).expect("static keyword pattern"),
    stop_words: DEFAULT_STOP_WORDS.iter().map(|w| (*w).to_string()).collect(),
});

/// Frequency-ranked keyword extractor
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    pattern: Regex,
    stop_words: HashSet<String>,
}

impl KeywordExtractor {
    /// Build an extractor from configuration
    ///
    /// Stop words are case-folded so they match the lowercased corpus.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the minimum token length is zero or the
    /// token pattern cannot be compiled.
    pub fn new(config: &KeywordConfig) -> Result<Self, ConfigError> {
        if config.min_token_length == 0 {
            return Err(ConfigError::InvalidTokenLength {
                value: 0,
                max: crate::config::MAX_TOKEN_LENGTH,
            });
        }
        let pattern = Regex::new(&token_pattern(config.min_token_length))
            .map_err(|e| ConfigError::Pattern(e.to_string()))?;
        let stop_words = config
            .stop_words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .collect();

        Ok(Self {
            pattern,
            stop_words,
        })
    }

    /// Shared extractor with the default settings
    #[must_use]
    pub fn default_ref() -> &'static Self {
        &DEFAULT_EXTRACTOR
    }

    /// Whether `word` is filtered out
    #[inline]
    #[must_use]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Count every surviving token, in first-encountered order
    pub fn count<I, S>(&self, texts: I) -> IndexMap<String, usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for text in texts {
            let lowered = text.as_ref().to_lowercase();
            for token in self.pattern.find_iter(&lowered) {
                let word = token.as_str();
                if self.is_stop_word(word) {
                    continue;
                }
                if let Some(count) = counts.get_mut(word) {
                    *count += 1;
                } else {
                    counts.insert(word.to_string(), 1);
                }
            }
        }
        counts
    }

    /// Top `top_n` keywords across `texts`
    ///
    /// An empty corpus yields an empty list.
    pub fn extract<I, S>(&self, texts: I, top_n: usize) -> Vec<KeywordEntry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<KeywordEntry> = self
            .count(texts)
            .into_iter()
            .map(|(word, frequency)| KeywordEntry { word, frequency })
            .collect();
        // stable: equal frequencies keep first-encountered order
        entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        entries.truncate(top_n);
        entries
    }
}

/// Extract keywords with the default stop words and a four-letter minimum
pub fn extract_keywords<I, S>(texts: I, top_n: usize) -> Vec<KeywordEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    KeywordExtractor::default_ref().extract(texts, top_n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stop_words_are_filtered() {
        let keywords = extract_keywords(["The community and the elders share the stories"], 10);
        assert_eq!(
            keywords,
            vec![
                KeywordEntry::new("community", 1),
                KeywordEntry::new("elders", 1),
                KeywordEntry::new("share", 1),
                KeywordEntry::new("stories", 1),
            ]
        );
    }

    #[test]
    fn ranks_by_frequency_then_first_seen() {
        let keywords = extract_keywords(
            ["river fishing river", "Fishing camp on the RIVER", "camp songs"],
            3,
        );
        assert_eq!(
            keywords,
            vec![
                KeywordEntry::new("river", 3),
                KeywordEntry::new("fishing", 2),
                KeywordEntry::new("camp", 2),
            ]
        );
    }

    #[test]
    fn short_and_alphanumeric_tokens_discarded() {
        let keywords = extract_keywords(["art day 2024 covid19 abc1234 well-being"], 10);
        let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
        assert_eq!(words, vec!["well", "being"]);
    }

    #[test]
    fn non_ascii_letters_split_tokens() {
        let keywords = extract_keywords(["Zürich café naïve"], 5);
        assert_eq!(keywords, vec![KeywordEntry::new("rich", 1)]);

        let custom = KeywordExtractor::new(&KeywordConfig::default()).unwrap();
        assert_eq!(custom.extract(["Zürich"], 5), vec![KeywordEntry::new("rich", 1)]);
    }

    #[test]
    fn empty_corpus_is_empty() {
        assert!(extract_keywords(Vec::<String>::new(), 5).is_empty());
        assert!(extract_keywords([""], 5).is_empty());
    }

    #[test]
    fn custom_stop_words_and_length() {
        let config = KeywordConfig {
            min_token_length: 3,
            stop_words: vec!["Art".to_string()],
        };
        let extractor = KeywordExtractor::new(&config).unwrap();
        let keywords = extractor.extract(["art day art fun"], 10);
        assert_eq!(
            keywords,
            vec![KeywordEntry::new("day", 1), KeywordEntry::new("fun", 1)]
        );
    }

    #[test]
    fn zero_top_n_returns_nothing() {
        assert!(extract_keywords(["community stories"], 0).is_empty());
    }

    #[test]
    fn default_list_is_around_sixty_words() {
        assert!((55..=70).contains(&DEFAULT_STOP_WORDS.len()));
        let unique: HashSet<_> = DEFAULT_STOP_WORDS.iter().collect();
        assert_eq!(unique.len(), DEFAULT_STOP_WORDS.len());
    }
}

//! Keyword extraction strategies for requirement matching.
//!
//! A requirement rule is free-form prose; its leading word tokens serve as a
//! cheap detector for the clause's presence in a draft. The strategy is a
//! trait so a smarter matcher (stemming, synonym sets) can replace it
//! without touching the validator's control flow.

use std::sync::LazyLock;

use regex::Regex;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+(?:-\w+)*").unwrap());

/// Extracts detection keywords from a requirement rule's text.
pub trait KeywordExtractor: Send + Sync {
    fn keywords(&self, rule_text: &str) -> Vec<String>;
}

/// The first N word tokens of the rule text, lowercased.
///
/// Hyphenated terms ("at-will", "non-compete") count as a single token so
/// the legal term of art survives tokenization. Short rule texts degrade to
/// fewer than N keywords.
pub struct LeadingWords {
    limit: usize,
}

impl LeadingWords {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Default for LeadingWords {
    fn default() -> Self {
        Self::new(5)
    }
}

impl KeywordExtractor for LeadingWords {
    fn keywords(&self, rule_text: &str) -> Vec<String> {
        WORD.find_iter(rule_text)
            .take(self.limit)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }
}

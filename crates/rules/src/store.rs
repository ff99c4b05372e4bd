//! Rule store: the authoritative requirement list per (document type, jurisdiction).
//!
//! Lookups never fail. A miss on the exact key falls back to the default key
//! (`other` / `US Federal`); a miss there yields the empty rule set. Key
//! strings are arbitrary and never validated against an enum; unknown values
//! are expected and resolved through the fallback chain.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Document type consulted when no rule set matches the requested key.
pub const FALLBACK_DOCUMENT_TYPE: &str = "other";

/// Jurisdiction consulted when no rule set matches the requested key.
pub const FALLBACK_JURISDICTION: &str = "US Federal";

/// A single mandatory-clause description for one (document type, jurisdiction) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementRule {
    pub text: String,
}

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid rule set: {0}")]
    Invalid(String),
}

/// YAML file shape: document type -> jurisdiction -> list of requirement texts.
type RawRuleFile = IndexMap<String, IndexMap<String, Vec<String>>>;

/// Seed rule set covering a handful of jurisdiction/type pairs.
///
/// Deliberately partial: there is no comprehensive rule database, and the
/// absence of rules for a key is a valid, silent outcome.
const SEED_RULES: &[(&str, &str, &[&str])] = &[
    (
        "nda",
        "California",
        &[
            "Must include a specific clause protecting the disclosure of information related to sexual harassment or assault (Civil Code § 1670.11).",
            "Must clearly state that the agreement does not prohibit the employee from discussing wages, hours, or working conditions.",
        ],
    ),
    (
        "nda",
        "New York",
        &[
            "Must include a carve-out for disclosures to law enforcement, government agencies, or an attorney.",
            "Cannot be used to conceal claims of discrimination, harassment, or retaliation.",
        ],
    ),
    (
        "employment",
        "Texas",
        &[
            "Must state the \"at-will\" employment relationship, meaning it can be terminated by either party for any reason.",
            "Must include language regarding non-compete clauses if applicable, outlining scope, duration, and geographic limitations.",
        ],
    ),
    (
        "employment",
        "US Federal",
        &[
            "Must include an Equal Opportunity Employer (EOE) statement.",
            "Must comply with the Fair Labor Standards Act (FLSA) regarding wage and hour provisions.",
        ],
    ),
    (
        "other",
        "US Federal",
        &[
            "Must include a severability clause, stating that if one part of the contract is found unenforceable, the rest of the contract remains valid.",
        ],
    ),
];

/// Immutable table of requirement rules, keyed by document type then
/// jurisdiction. Built once at startup; no runtime mutation path.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    table: IndexMap<String, IndexMap<String, Vec<RequirementRule>>>,
}

impl RuleStore {
    /// The compiled-in seed rule set.
    pub fn builtin() -> Self {
        let mut table: IndexMap<String, IndexMap<String, Vec<RequirementRule>>> = IndexMap::new();
        for (document_type, jurisdiction, texts) in SEED_RULES {
            let rules = texts
                .iter()
                .map(|text| RequirementRule { text: (*text).to_string() })
                .collect();
            table
                .entry((*document_type).to_string())
                .or_default()
                .insert((*jurisdiction).to_string(), rules);
        }
        Self { table }
    }

    /// Parse a YAML rule file. Shape errors and empty requirement texts are
    /// rejected eagerly; after construction the store is read-only.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RuleError> {
        let raw: RawRuleFile = serde_yaml::from_str(yaml)?;

        let mut table: IndexMap<String, IndexMap<String, Vec<RequirementRule>>> = IndexMap::new();
        for (document_type, jurisdictions) in raw {
            let mut sub: IndexMap<String, Vec<RequirementRule>> = IndexMap::new();
            for (jurisdiction, texts) in jurisdictions {
                for text in &texts {
                    if text.trim().is_empty() {
                        return Err(RuleError::Invalid(format!(
                            "empty requirement text under '{}/{}'",
                            document_type, jurisdiction
                        )));
                    }
                }
                let rules = texts.into_iter().map(|text| RequirementRule { text }).collect();
                sub.insert(jurisdiction, rules);
            }
            table.insert(document_type, sub);
        }

        Ok(Self { table })
    }

    /// Load a YAML rule file from disk.
    pub fn from_path(path: &Path) -> Result<Self, RuleError> {
        let yaml = std::fs::read_to_string(path)?;
        let store = Self::from_yaml_str(&yaml)?;
        info!("Loaded {} rule sets from {}", store.len(), path.display());
        Ok(store)
    }

    /// Resolve the rule set for a key through the fallback chain:
    /// exact (type, jurisdiction) -> default key -> empty. Never fails.
    pub fn requirements(&self, document_type: &str, jurisdiction: &str) -> &[RequirementRule] {
        if let Some(rules) = self.table.get(document_type).and_then(|sub| sub.get(jurisdiction)) {
            return rules;
        }
        self.table
            .get(FALLBACK_DOCUMENT_TYPE)
            .and_then(|sub| sub.get(FALLBACK_JURISDICTION))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All rule sets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[RequirementRule])> + '_ {
        self.table.iter().flat_map(|(document_type, sub)| {
            sub.iter().map(move |(jurisdiction, rules)| {
                (document_type.as_str(), jurisdiction.as_str(), rules.as_slice())
            })
        })
    }

    /// Number of (document type, jurisdiction) rule sets.
    pub fn len(&self) -> usize {
        self.table.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_texas_employment_has_two_rules_in_order() {
        let store = RuleStore::builtin();
        let rules = store.requirements("employment", "Texas");
        assert_eq!(rules.len(), 2);
        assert!(rules[0].text.contains("at-will"));
        assert!(rules[1].text.contains("non-compete"));
    }

    #[test]
    fn unknown_document_type_falls_back_to_default_key() {
        let store = RuleStore::builtin();
        let fallback = store.requirements(FALLBACK_DOCUMENT_TYPE, FALLBACK_JURISDICTION);
        assert!(!fallback.is_empty());
        assert_eq!(store.requirements("spaceship-lease", "Mars"), fallback);
        assert_eq!(store.requirements("spaceship-lease", "Texas"), fallback);
    }

    #[test]
    fn unknown_jurisdiction_within_known_type_falls_back() {
        let store = RuleStore::builtin();
        let fallback = store.requirements(FALLBACK_DOCUMENT_TYPE, FALLBACK_JURISDICTION);
        assert_eq!(store.requirements("nda", "Atlantis"), fallback);
    }

    #[test]
    fn missing_default_key_yields_empty() {
        let yaml = "nda:\n  California:\n    - Must include a clause.\n";
        let store = RuleStore::from_yaml_str(yaml).unwrap();
        assert!(store.requirements("employment", "Texas").is_empty());
        assert_eq!(store.requirements("nda", "California").len(), 1);
    }

    #[test]
    fn empty_store_resolves_everything_to_empty() {
        let store = RuleStore::default();
        assert!(store.requirements("nda", "California").is_empty());
    }

    #[test]
    fn yaml_parse_error_is_reported() {
        let err = RuleStore::from_yaml_str("nda: [not, a, mapping").unwrap_err();
        assert!(matches!(err, RuleError::Parse(_)));
    }

    #[test]
    fn empty_requirement_text_is_rejected() {
        let yaml = "nda:\n  California:\n    - \"  \"\n";
        let err = RuleStore::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, RuleError::Invalid(_)));
    }

    #[test]
    fn iter_preserves_insertion_order() {
        let store = RuleStore::builtin();
        let keys: Vec<(String, String)> = store
            .iter()
            .map(|(t, j, _)| (t.to_string(), j.to_string()))
            .collect();
        assert_eq!(keys[0], ("nda".to_string(), "California".to_string()));
        assert_eq!(
            keys.last().unwrap(),
            &("other".to_string(), "US Federal".to_string())
        );
        assert_eq!(store.len(), 5);
    }
}

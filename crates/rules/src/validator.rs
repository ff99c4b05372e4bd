//! Keyword-presence compliance validation for generated drafts.
//!
//! The upstream generator is a natural-language model with no guaranteed
//! output structure, so the validator cannot parse clauses. Instead each
//! requirement is considered present if any of its extracted keywords occurs
//! anywhere in the draft, case-insensitively. A single keyword hit passes a
//! requirement; the heuristic favors fewer, higher-confidence misses over
//! exhaustive semantic verification.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::keywords::{KeywordExtractor, LeadingWords};
use crate::store::RuleStore;

/// Result of checking one draft against its jurisdiction's rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub compliant: bool,
    /// Full rule texts of undetected requirements, in rule-set order.
    pub missing_requirements: Vec<String>,
}

impl ComplianceReport {
    /// Build a report from the missing rule texts, keeping the
    /// `compliant == missing_requirements.is_empty()` invariant.
    pub fn from_missing(missing_requirements: Vec<String>) -> Self {
        Self {
            compliant: missing_requirements.is_empty(),
            missing_requirements,
        }
    }
}

pub struct ComplianceValidator {
    store: Arc<RuleStore>,
    extractor: Box<dyn KeywordExtractor>,
}

impl ComplianceValidator {
    pub fn new(store: Arc<RuleStore>) -> Self {
        Self::with_extractor(store, Box::new(LeadingWords::default()))
    }

    pub fn with_extractor(store: Arc<RuleStore>, extractor: Box<dyn KeywordExtractor>) -> Self {
        Self { store, extractor }
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    /// Decide which of the jurisdiction's mandatory requirements are
    /// detectably present in the draft. Never fails: an empty rule set is
    /// trivially compliant, an empty draft misses every requirement.
    pub fn validate(
        &self,
        draft_text: &str,
        jurisdiction: &str,
        document_type: &str,
    ) -> ComplianceReport {
        let requirements = self.store.requirements(document_type, jurisdiction);
        if requirements.is_empty() {
            return ComplianceReport::from_missing(Vec::new());
        }

        let draft_lower = draft_text.to_lowercase();
        let missing = requirements
            .iter()
            .filter(|rule| {
                let keywords = self.extractor.keywords(&rule.text);
                !keywords.iter().any(|k| draft_lower.contains(k.as_str()))
            })
            .map(|rule| rule.text.clone())
            .collect();

        ComplianceReport::from_missing(missing)
    }
}

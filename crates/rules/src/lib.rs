//! Jurisdiction rule store and compliance validation for generated legal drafts.
//!
//! This crate provides:
//! - An immutable rule table mapping (document type, jurisdiction) to
//!   mandatory-clause descriptions, with a YAML file format for overrides
//! - A keyword-presence validator with a pluggable extraction strategy
//!
//! Validation here is a heuristic completeness check over AI-generated text,
//! not legal-compliance verification.

pub mod keywords;
pub mod store;
pub mod validator;

pub use keywords::{KeywordExtractor, LeadingWords};
pub use store::{
    RequirementRule, RuleError, RuleStore, FALLBACK_DOCUMENT_TYPE, FALLBACK_JURISDICTION,
};
pub use validator::{ComplianceReport, ComplianceValidator};

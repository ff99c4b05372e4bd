//! Drafting pipeline for legal documents.
//!
//! Wraps the text-generation collaborator with everything that turns a raw
//! model response into a deliverable draft:
//! - prompt construction (formatting contract + jurisdiction instructions)
//! - markdown cleanup of the generated text
//! - document-type inference
//! - compliance validation with a bounded regeneration loop
//! - AI review of an existing draft

pub mod classify;
pub mod cleanup;
pub mod controller;
pub mod prompt;
pub mod review;

pub use classify::classify_document_type;
pub use cleanup::clean_draft;
pub use controller::{
    revise_and_regenerate, revise_prompt, DraftError, DraftOutcome, DraftService,
    RegenerationPolicy, REVISION_INSTRUCTION,
};
pub use review::{ComplianceCheck, DraftReview, ReviewIssue};

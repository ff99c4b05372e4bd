//! Document-type inference from generated text.

use lexi_rules::FALLBACK_DOCUMENT_TYPE;

/// Infer the document category from the draft text when the request did not
/// pin one. Deliberately coarse: the rule table only distinguishes a few
/// categories, and anything unrecognized routes to the fallback key.
pub fn classify_document_type(draft: &str) -> &'static str {
    let lower = draft.to_lowercase();
    if lower.contains("employment agreement") {
        "employment"
    } else if lower.contains("nda") || lower.contains("non-disclosure") {
        "nda"
    } else {
        FALLBACK_DOCUMENT_TYPE
    }
}

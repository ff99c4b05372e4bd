//! Prompt construction for the drafting call.

use lexi_core::DraftRequest;

/// Formatting contract for generated documents. The cleanup pass in
/// [`crate::cleanup`] assumes output shaped this way.
pub const DRAFTING_SYSTEM_PROMPT: &str = "\
You are an expert legal document drafter. Generate a complete, professionally formatted legal document.

FORMATTING INSTRUCTIONS:
1. The first line is the document type in ALL CAPS, with no quotation marks.
2. Major sections are numbered headings in ALL CAPS (e.g. 1. DEFINITIONS).
3. Sub-headings use decimal numbering in title case (e.g. 1.1 Confidential Information).
4. Body text is complete sentences in proper legal language, with one blank line between paragraphs.
5. Recitals, when applicable, each start with WHEREAS under a RECITALS heading.
6. End with an IN WITNESS WHEREOF section and signature blocks.

Do NOT use quotation marks anywhere in the document except within actual quoted text.";

/// Build the jurisdiction-aware drafting instruction for one request.
pub fn drafting_user_prompt(request: &DraftRequest) -> String {
    let jurisdiction = &request.jurisdiction;
    format!(
        "DRAFTING REQUEST: {prompt}\n\
         \n\
         JURISDICTION: {jurisdiction}\n\
         \n\
         JURISDICTION-SPECIFIC REQUIREMENTS:\n\
         Generate this legal document in accordance with the actual laws, regulations, and legal practices of {jurisdiction}:\n\
         1. Apply the statutory laws of {jurisdiction} and include every clause its law makes mandatory.\n\
         2. Add required notices, disclosures, or warnings specific to {jurisdiction}, plus governing-law and dispute-resolution clauses appropriate for it.\n\
         3. Adapt the document structure and terminology to {jurisdiction}'s legal system and drafting conventions.\n\
         4. Ensure every term is enforceable under {jurisdiction}'s laws, avoid clauses that would be void there, and include an appropriate severability clause.\n\
         \n\
         This document must be legally valid and enforceable in {jurisdiction}. Do NOT use a generic template.\n\
         \n\
         Generate the complete legal document following the formatting rules exactly.",
        prompt = request.prompt,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_carries_request_and_jurisdiction() {
        let request = DraftRequest {
            prompt: "An NDA between two startups".to_string(),
            jurisdiction: "California".to_string(),
            document_type: None,
        };
        let prompt = drafting_user_prompt(&request);
        assert!(prompt.starts_with("DRAFTING REQUEST: An NDA between two startups"));
        assert!(prompt.contains("JURISDICTION: California"));
        assert!(prompt.contains("enforceable in California"));
    }
}

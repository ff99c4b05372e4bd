//! AI review of an existing draft.
//!
//! The generator is asked for a JSON verdict: overall risk, concrete issues,
//! missing clauses, a compliance check, and an improved version of the text.
//! Models routinely wrap the object in markdown fences or prose, so the JSON
//! payload is extracted before deserialization.

use serde::{Deserialize, Serialize};
use tracing::debug;

use lexi_llm::{GenerationParams, Message, TextGenerator};

use crate::controller::DraftError;

fn review_system_prompt(jurisdiction: &str) -> String {
    format!(
        "You are a legal document reviewer. Analyze the provided draft and:\n\
         \n\
         1. Identify potential legal risks or missing clauses\n\
         2. Check compliance with {jurisdiction} law\n\
         3. Suggest improvements for clarity and enforceability\n\
         \n\
         Return a JSON object with:\n\
         {{\n\
           \"overallRisk\": \"low|medium|high\",\n\
           \"issues\": [{{\"severity\": \"high|medium|low\", \"issue\": \"description\", \"suggestion\": \"fix\"}}],\n\
           \"missingClauses\": [\"clause1\", \"clause2\"],\n\
           \"complianceCheck\": {{\"passed\": true/false, \"details\": \"explanation\"}},\n\
           \"improvedDraft\": \"full improved text here\"\n\
         }}"
    )
}

/// Structured review verdict for one draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftReview {
    pub overall_risk: String,
    #[serde(default)]
    pub issues: Vec<ReviewIssue>,
    #[serde(default)]
    pub missing_clauses: Vec<String>,
    pub compliance_check: ComplianceCheck,
    #[serde(default)]
    pub improved_draft: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewIssue {
    pub severity: String,
    pub issue: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub passed: bool,
    pub details: String,
}

pub(crate) async fn review_draft(
    generator: &dyn TextGenerator,
    params: &GenerationParams,
    draft: &str,
    jurisdiction: &str,
) -> Result<DraftReview, DraftError> {
    let response = generator
        .generate(
            vec![
                Message::system(review_system_prompt(jurisdiction)),
                Message::user(format!("DRAFT TO REVIEW:\n\n{draft}")),
            ],
            params,
        )
        .await?;

    debug!("Review response: {} chars", response.len());

    let json_str = extract_json(&response);
    serde_json::from_str(json_str).map_err(|e| DraftError::MalformedReview {
        reason: e.to_string(),
        raw_response: response.clone(),
    })
}

/// Extract the JSON payload from a generator response, tolerating markdown
/// code fences and prose around the object.
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    // ```json ... ``` fences
    if let Some(start) = trimmed.find("```json") {
        let rest = &trimmed[start + 7..];
        if let Some(end) = rest.find("```") {
            return rest[..end].trim();
        }
    }

    // Bare ``` ... ``` fences, skipping a language tag on the opening line
    if let Some(start) = trimmed.find("```") {
        let rest = &trimmed[start + 3..];
        let content_start = rest.find('\n').map_or(0, |n| n + 1);
        if let Some(end) = rest[content_start..].find("```") {
            return rest[content_start..content_start + end].trim();
        }
    }

    // Raw object, possibly surrounded by prose
    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            if end > start {
                return &trimmed[start..=end];
            }
        }
    }

    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use lexi_llm::GenerationError;

    struct CannedGenerator(String);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(
            &self,
            _parts: Vec<Message>,
            _params: &GenerationParams,
        ) -> Result<String, GenerationError> {
            Ok(self.0.clone())
        }
    }

    const REVIEW_JSON: &str = r#"{
        "overallRisk": "medium",
        "issues": [{"severity": "high", "issue": "No severability clause", "suggestion": "Add one"}],
        "missingClauses": ["severability"],
        "complianceCheck": {"passed": false, "details": "Missing mandatory clause"},
        "improvedDraft": "FULL TEXT"
    }"#;

    #[test]
    fn extract_json_handles_raw_objects() {
        assert_eq!(extract_json(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn extract_json_handles_json_fences() {
        let input = "Here you go:\n```json\n{\"a\": 1}\n```\nDone.";
        assert_eq!(extract_json(input), r#"{"a": 1}"#);
    }

    #[test]
    fn extract_json_handles_bare_fences_with_language_tag() {
        let input = "```javascript\n{\"a\": 1}\n```";
        assert_eq!(extract_json(input), r#"{"a": 1}"#);
    }

    #[test]
    fn extract_json_handles_surrounding_prose() {
        let input = "Sure! Here's the verdict: {\"a\": 1} Hope that helps.";
        assert_eq!(extract_json(input), r#"{"a": 1}"#);
    }

    #[tokio::test]
    async fn review_parses_fenced_json_response() {
        let generator = CannedGenerator(format!("```json\n{REVIEW_JSON}\n```"));
        let review = review_draft(
            &generator,
            &GenerationParams::default(),
            "SOME DRAFT",
            "US Federal",
        )
        .await
        .unwrap();

        assert_eq!(review.overall_risk, "medium");
        assert_eq!(review.issues.len(), 1);
        assert_eq!(review.missing_clauses, vec!["severability"]);
        assert!(!review.compliance_check.passed);
        assert_eq!(review.improved_draft.as_deref(), Some("FULL TEXT"));
    }

    #[tokio::test]
    async fn malformed_review_keeps_the_raw_response() {
        let generator = CannedGenerator("I cannot review this document.".to_string());
        let err = review_draft(
            &generator,
            &GenerationParams::default(),
            "SOME DRAFT",
            "US Federal",
        )
        .await
        .unwrap_err();

        match err {
            DraftError::MalformedReview { raw_response, .. } => {
                assert_eq!(raw_response, "I cannot review this document.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

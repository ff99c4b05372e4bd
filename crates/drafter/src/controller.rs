//! Regeneration control.
//!
//! When a draft fails compliance validation, the drafting instruction is
//! augmented with the missing-requirement list and the generator is invoked
//! again, bounded by a configurable attempt budget (default: one extra
//! pass). The best-available draft is always returned together with its
//! compliance report; a non-compliant result never blocks the caller.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use lexi_core::config::Config;
use lexi_core::{DraftMetadata, DraftRequest};
use lexi_llm::{create_generator, GenerationError, GenerationParams, Message, TextGenerator};
use lexi_rules::{ComplianceReport, ComplianceValidator};

use crate::classify::classify_document_type;
use crate::cleanup::clean_draft;
use crate::prompt::{drafting_user_prompt, DRAFTING_SYSTEM_PROMPT};
use crate::review::{self, DraftReview};

/// Instruction inserted between the original prompt and the
/// missing-requirement list on regeneration.
pub const REVISION_INSTRUCTION: &str =
    "\n\nIMPORTANT: The document MUST include the following jurisdiction-specific requirements:\n";

/// How many extra generation passes a non-compliant draft is allowed.
#[derive(Debug, Clone, Copy)]
pub struct RegenerationPolicy {
    pub max_attempts: u32,
}

impl Default for RegenerationPolicy {
    fn default() -> Self {
        Self { max_attempts: 1 }
    }
}

/// Append the missing requirements to the original drafting instruction.
pub fn revise_prompt(original_prompt: &str, report: &ComplianceReport) -> String {
    let missing = report.missing_requirements.join("\n");
    let mut prompt =
        String::with_capacity(original_prompt.len() + REVISION_INSTRUCTION.len() + missing.len());
    prompt.push_str(original_prompt);
    prompt.push_str(REVISION_INSTRUCTION);
    prompt.push_str(&missing);
    prompt
}

/// Build the augmented prompt for a non-compliant draft and invoke the
/// generator exactly once, returning its result verbatim. Only meaningful
/// for reports with missing requirements; the caller applies the usual
/// cleanup before re-validating or presenting the text.
pub async fn revise_and_regenerate(
    generator: &dyn TextGenerator,
    params: &GenerationParams,
    original_prompt: &str,
    report: &ComplianceReport,
) -> Result<String, GenerationError> {
    let augmented = revise_prompt(original_prompt, report);
    generator
        .generate(
            vec![Message::system(DRAFTING_SYSTEM_PROMPT), Message::user(augmented)],
            params,
        )
        .await
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("review response was not valid JSON: {reason}")]
    MalformedReview { reason: String, raw_response: String },
}

/// Everything the caller gets back for one drafting request.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DraftOutcome {
    pub draft: String,
    pub compliance: ComplianceReport,
    pub regeneration_attempts: u32,
    pub metadata: DraftMetadata,
}

pub struct DraftService {
    generator: Box<dyn TextGenerator>,
    validator: Arc<ComplianceValidator>,
    params: GenerationParams,
    policy: RegenerationPolicy,
    model: String,
}

impl DraftService {
    pub fn new(
        generator: Box<dyn TextGenerator>,
        validator: Arc<ComplianceValidator>,
        params: GenerationParams,
        policy: RegenerationPolicy,
        model: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            validator,
            params,
            policy,
            model: model.into(),
        }
    }

    /// Build from config, creating the configured generator backend.
    pub fn from_config(
        config: &Config,
        validator: Arc<ComplianceValidator>,
    ) -> Result<Self, GenerationError> {
        let generator = create_generator(&config.llm)?;
        Ok(Self::new(
            generator,
            validator,
            GenerationParams::from_config(&config.llm),
            RegenerationPolicy {
                max_attempts: config.drafter.max_regeneration_attempts,
            },
            config.llm.model_name(),
        ))
    }

    /// Generate a draft, validate it, and regenerate while requirements are
    /// still missing and the attempt budget lasts.
    ///
    /// A failed regeneration pass keeps the best draft produced so far
    /// instead of failing the whole request; only the initial generation is
    /// fatal.
    pub async fn generate_draft(&self, request: &DraftRequest) -> Result<DraftOutcome, DraftError> {
        let user_prompt = drafting_user_prompt(request);

        info!("Generating draft for jurisdiction '{}'", request.jurisdiction);
        let raw = self
            .generator
            .generate(
                vec![
                    Message::system(DRAFTING_SYSTEM_PROMPT),
                    Message::user(user_prompt.clone()),
                ],
                &self.params,
            )
            .await?;
        let mut draft = clean_draft(&raw);

        let document_type = request
            .document_type
            .clone()
            .unwrap_or_else(|| classify_document_type(&draft).to_string());

        let mut report = self
            .validator
            .validate(&draft, &request.jurisdiction, &document_type);

        let mut attempts = 0;
        while !report.compliant && attempts < self.policy.max_attempts {
            attempts += 1;
            info!(
                "Draft missing {} requirement(s), regenerating (attempt {}/{})",
                report.missing_requirements.len(),
                attempts,
                self.policy.max_attempts
            );
            match revise_and_regenerate(self.generator.as_ref(), &self.params, &user_prompt, &report)
                .await
            {
                Ok(raw) => {
                    draft = clean_draft(&raw);
                    report = self
                        .validator
                        .validate(&draft, &request.jurisdiction, &document_type);
                }
                Err(e) => {
                    warn!("Regeneration attempt {} failed: {}", attempts, e);
                    break;
                }
            }
        }

        if !report.compliant {
            warn!(
                "Draft still missing {} requirement(s) after {} regeneration attempt(s)",
                report.missing_requirements.len(),
                attempts
            );
        }

        Ok(DraftOutcome {
            draft,
            compliance: report,
            regeneration_attempts: attempts,
            metadata: DraftMetadata {
                model: self.model.clone(),
                timestamp: Utc::now(),
                jurisdiction: request.jurisdiction.clone(),
                document_type,
            },
        })
    }

    /// Ask the generator to review an existing draft.
    pub async fn review_draft(
        &self,
        draft: &str,
        jurisdiction: &str,
    ) -> Result<DraftReview, DraftError> {
        review::review_draft(self.generator.as_ref(), &self.params, draft, jurisdiction).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use lexi_llm::Role;
    use lexi_rules::RuleStore;

    /// Test double that records every request and replays canned responses,
    /// erroring once the script runs out.
    struct ScriptedGenerator {
        responses: Mutex<Vec<String>>,
        calls: Mutex<Vec<Vec<Message>>>,
    }

    impl ScriptedGenerator {
        fn new(responses: &[&str]) -> Self {
            Self {
                responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            parts: Vec<Message>,
            _params: &GenerationParams,
        ) -> Result<String, GenerationError> {
            self.calls.lock().unwrap().push(parts);
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Err(GenerationError::Api {
                    status: 429,
                    body: "quota exceeded".into(),
                });
            }
            Ok(responses.remove(0))
        }
    }

    fn service(responses: &[&str], max_attempts: u32) -> DraftService {
        DraftService::new(
            Box::new(ScriptedGenerator::new(responses)),
            Arc::new(ComplianceValidator::new(Arc::new(RuleStore::builtin()))),
            GenerationParams::default(),
            RegenerationPolicy { max_attempts },
            "test-model",
        )
    }

    fn texas_employment_request() -> DraftRequest {
        DraftRequest {
            prompt: "An employment agreement for a software engineer".to_string(),
            jurisdiction: "Texas".to_string(),
            document_type: Some("employment".to_string()),
        }
    }

    #[test]
    fn revised_prompt_appends_missing_requirements() {
        let report =
            ComplianceReport::from_missing(vec!["Rule one.".to_string(), "Rule two.".to_string()]);
        let prompt = revise_prompt("Draft an NDA.", &report);
        assert_eq!(
            prompt,
            format!("Draft an NDA.{}Rule one.\nRule two.", REVISION_INSTRUCTION)
        );
    }

    #[tokio::test]
    async fn regeneration_invokes_the_generator_exactly_once() {
        let generator = ScriptedGenerator::new(&["NEW DRAFT"]);
        let report = ComplianceReport::from_missing(vec!["Must include X.".to_string()]);

        let text = revise_and_regenerate(
            &generator,
            &GenerationParams::default(),
            "Original instruction.",
            &report,
        )
        .await
        .unwrap();

        assert_eq!(text, "NEW DRAFT");
        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let user = calls[0].iter().find(|m| m.role == Role::User).unwrap();
        assert!(user.content.starts_with("Original instruction."));
        assert!(user.content.contains(REVISION_INSTRUCTION));
        assert!(user.content.ends_with("Must include X."));
    }

    #[tokio::test]
    async fn non_compliant_draft_is_regenerated_and_revalidated() {
        let service = service(
            &[
                "EMPLOYMENT AGREEMENT\n\nGeneric text only.",
                "EMPLOYMENT AGREEMENT\n\nEmployment is at-will. Any non-compete is limited in scope, duration, and geography.",
            ],
            1,
        );

        let outcome = service.generate_draft(&texas_employment_request()).await.unwrap();

        assert_eq!(outcome.regeneration_attempts, 1);
        assert!(outcome.compliance.compliant);
        assert!(outcome.draft.contains("at-will"));
    }

    #[tokio::test]
    async fn attempt_budget_of_zero_skips_regeneration() {
        let service = service(&["EMPLOYMENT AGREEMENT\n\nGeneric text only."], 0);

        let outcome = service.generate_draft(&texas_employment_request()).await.unwrap();

        assert_eq!(outcome.regeneration_attempts, 0);
        assert!(!outcome.compliance.compliant);
        assert!(outcome
            .compliance
            .missing_requirements
            .iter()
            .any(|text| text.contains("non-compete")));
    }

    #[tokio::test]
    async fn failed_regeneration_keeps_the_best_available_draft() {
        // One scripted response: the regeneration pass hits the quota error.
        let service = service(&["EMPLOYMENT AGREEMENT\n\nGeneric text only."], 2);

        let outcome = service.generate_draft(&texas_employment_request()).await.unwrap();

        assert_eq!(outcome.regeneration_attempts, 1);
        assert!(!outcome.compliance.compliant);
        assert_eq!(outcome.draft, "EMPLOYMENT AGREEMENT\n\nGeneric text only.");
    }

    #[tokio::test]
    async fn initial_generation_failure_is_propagated() {
        let service = service(&[], 1);

        let err = service.generate_draft(&texas_employment_request()).await.unwrap_err();

        assert!(matches!(
            err,
            DraftError::Generation(GenerationError::Api { status: 429, .. })
        ));
    }

    #[tokio::test]
    async fn document_type_is_inferred_when_unspecified() {
        let service = service(
            &["NON-DISCLOSURE AGREEMENT\n\nThe parties agree to protect all confidential information."],
            0,
        );
        let request = DraftRequest {
            prompt: "An NDA".to_string(),
            jurisdiction: "California".to_string(),
            document_type: None,
        };

        let outcome = service.generate_draft(&request).await.unwrap();

        assert_eq!(outcome.metadata.document_type, "nda");
        assert_eq!(outcome.metadata.model, "test-model");
    }

    #[tokio::test]
    async fn generated_draft_is_cleaned_before_validation() {
        let service = service(
            &["```markdown\n## EMPLOYMENT AGREEMENT\n\nEmployment is **at-will** and any non-compete is narrow.\n```"],
            0,
        );

        let outcome = service.generate_draft(&texas_employment_request()).await.unwrap();

        assert!(outcome.compliance.compliant);
        assert!(!outcome.draft.contains("```"));
        assert!(!outcome.draft.contains("**"));
    }
}

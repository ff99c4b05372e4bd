use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use lexi_core::{DraftMetadata, DraftRequest};
use lexi_drafter::{DraftReview, DraftService};
use lexi_rules::ComplianceReport;

use crate::state::AppState;

// ── Error shape ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: message.into(),
        }),
    )
}

/// Return 503 if no generator backend was configured at startup. Rule
/// lookup and validation keep working without one.
fn require_drafter(state: &AppState) -> Result<&Arc<DraftService>, ApiError> {
    state.drafter.as_ref().ok_or_else(|| {
        error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Text generator is not configured; draft endpoints are disabled",
        )
    })
}

// ── Health ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub generator_ready: bool,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        generator_ready: state.drafter.is_some(),
    })
}

// ── Rules ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RuleSetResponse {
    pub document_type: String,
    pub jurisdiction: String,
    pub requirements: Vec<String>,
}

pub async fn rules_list(State(state): State<Arc<AppState>>) -> Json<Vec<RuleSetResponse>> {
    let sets = state
        .store
        .iter()
        .map(|(document_type, jurisdiction, rules)| RuleSetResponse {
            document_type: document_type.to_string(),
            jurisdiction: jurisdiction.to_string(),
            requirements: rules.iter().map(|rule| rule.text.clone()).collect(),
        })
        .collect();
    Json(sets)
}

#[derive(Deserialize)]
pub struct RequirementsQuery {
    pub document_type: String,
    pub jurisdiction: String,
}

pub async fn rules_requirements(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RequirementsQuery>,
) -> Json<RuleSetResponse> {
    let requirements = state
        .store
        .requirements(&query.document_type, &query.jurisdiction)
        .iter()
        .map(|rule| rule.text.clone())
        .collect();
    Json(RuleSetResponse {
        document_type: query.document_type,
        jurisdiction: query.jurisdiction,
        requirements,
    })
}

// ── Compliance ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ValidateRequest {
    pub draft: String,
    pub jurisdiction: String,
    pub document_type: String,
}

pub async fn compliance_validate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ValidateRequest>,
) -> Json<ComplianceReport> {
    Json(state.validator.validate(
        &request.draft,
        &request.jurisdiction,
        &request.document_type,
    ))
}

// ── Drafting ──────────────────────────────────────────────────────

/// Jurisdiction values a web client serializes when nothing was picked.
fn is_placeholder_jurisdiction(jurisdiction: &str) -> bool {
    let trimmed = jurisdiction.trim();
    trimmed.is_empty() || trimmed == "undefined" || trimmed == "null"
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub draft: String,
    pub compliance: ComplianceReport,
    pub regeneration_attempts: u32,
    pub metadata: DraftMetadata,
}

pub async fn draft_generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DraftRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if request.prompt.trim().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Prompt is required"));
    }
    if is_placeholder_jurisdiction(&request.jurisdiction) {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "Please select a valid region/jurisdiction before generating the document",
        ));
    }

    let drafter = require_drafter(&state)?;
    let outcome = drafter.generate_draft(&request).await.map_err(|e| {
        tracing::error!("Draft generation error: {}", e);
        error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(GenerateResponse {
        success: true,
        draft: outcome.draft,
        compliance: outcome.compliance,
        regeneration_attempts: outcome.regeneration_attempts,
        metadata: outcome.metadata,
    }))
}

#[derive(Deserialize)]
pub struct ReviewRequest {
    pub draft: String,
    #[serde(default = "default_jurisdiction")]
    pub jurisdiction: String,
}

fn default_jurisdiction() -> String {
    lexi_rules::FALLBACK_JURISDICTION.to_string()
}

#[derive(Serialize)]
pub struct ReviewResponse {
    pub success: bool,
    pub review: DraftReview,
}

pub async fn draft_review(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    if request.draft.trim().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Draft document is required"));
    }

    let drafter = require_drafter(&state)?;
    let review = drafter
        .review_draft(&request.draft, &request.jurisdiction)
        .await
        .map_err(|e| {
            tracing::error!("Draft review error: {}", e);
            error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    Ok(Json(ReviewResponse {
        success: true,
        review,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_jurisdictions_are_rejected() {
        assert!(is_placeholder_jurisdiction(""));
        assert!(is_placeholder_jurisdiction("   "));
        assert!(is_placeholder_jurisdiction("undefined"));
        assert!(is_placeholder_jurisdiction("null"));
        assert!(!is_placeholder_jurisdiction("US Federal"));
        assert!(!is_placeholder_jurisdiction("Texas"));
    }
}

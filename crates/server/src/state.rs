use std::sync::Arc;

use lexi_drafter::DraftService;
use lexi_rules::{ComplianceValidator, RuleStore};

pub struct AppState {
    pub store: Arc<RuleStore>,
    pub validator: Arc<ComplianceValidator>,
    /// None when no generator backend is configured; draft endpoints return 503.
    pub drafter: Option<Arc<DraftService>>,
}

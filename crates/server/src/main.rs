mod api;
mod router;
mod state;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use lexi_drafter::DraftService;
use lexi_rules::{ComplianceValidator, RuleStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    lexi_core::config::load_dotenv();
    let config = lexi_core::Config::from_env();
    config.log_summary();

    let store = match &config.drafter.rules_path {
        Some(path) => Arc::new(
            RuleStore::from_path(path)
                .with_context(|| format!("failed to load rules from {}", path.display()))?,
        ),
        None => Arc::new(RuleStore::builtin()),
    };
    let validator = Arc::new(ComplianceValidator::new(store.clone()));

    let drafter = match DraftService::from_config(&config, validator.clone()) {
        Ok(service) => Some(Arc::new(service)),
        Err(e) => {
            warn!(
                "Text generator not available: {}; draft endpoints will be disabled",
                e
            );
            None
        }
    };

    let state = Arc::new(state::AppState {
        store,
        validator,
        drafter,
    });
    let app = router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("lexi server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

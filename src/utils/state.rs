use crate::core::powerbi::{AzureAdTokenProvider, EmbedService, PowerBiClient};
use crate::utils::Config;
use salvo::Depot;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub embed: Arc<EmbedService>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION"),
            ))
            .timeout(Duration::from_secs(30))
            .build()?;

        let auth = Arc::new(AzureAdTokenProvider::new(http.clone(), config.auth.clone()));
        let api = Arc::new(PowerBiClient::new(http, config.api_base_url.clone(), auth));
        let embed = Arc::new(EmbedService::new(
            api,
            config.workspace_id.clone(),
            config.report_id.clone(),
        ));

        Ok(AppState {
            config: Arc::new(config.clone()),
            embed,
        })
    }
}

/// Helper function to safely extract AppState from Depot
/// This prevents panics from unwrap() calls throughout the codebase
pub fn get_app_state(depot: &Depot) -> Result<&AppState, salvo::http::StatusError> {
    depot
        .obtain::<AppState>()
        .map_err(|_| salvo::http::StatusError::internal_server_error())
}

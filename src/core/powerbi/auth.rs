use async_trait::async_trait;
use serde::Deserialize;

use crate::utils::{AppError, AuthConfig, AuthenticationMode};

/// Issues bearer tokens for the Power BI REST API. Injected into the API
/// client so tests can substitute a canned token.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn get_access_token(&self) -> Result<String, AppError>;
}

/// Azure AD v2 token client covering the two modes the service supports:
/// client-credentials for a service principal and the password grant for a
/// master user account.
pub struct AzureAdTokenProvider {
    http: reqwest::Client,
    auth: AuthConfig,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl AzureAdTokenProvider {
    pub fn new(http: reqwest::Client, auth: AuthConfig) -> Self {
        Self { http, auth }
    }

    fn token_endpoint(&self) -> String {
        // Master-user sign-in goes through the organizations endpoint, the
        // service principal through its own tenant.
        let tenant = match self.auth.mode {
            AuthenticationMode::ServicePrincipal => self.auth.tenant_id.as_str(),
            AuthenticationMode::MasterUser => "organizations",
        };
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.auth.authority_url.trim_end_matches('/'),
            tenant
        )
    }

    fn grant_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![
            ("client_id", self.auth.client_id.as_str()),
            ("scope", self.auth.scope.as_str()),
        ];
        match self.auth.mode {
            AuthenticationMode::ServicePrincipal => {
                params.push(("grant_type", "client_credentials"));
                params.push(("client_secret", self.auth.client_secret.as_str()));
            }
            AuthenticationMode::MasterUser => {
                params.push(("grant_type", "password"));
                params.push(("username", self.auth.username.as_str()));
                params.push(("password", self.auth.password.as_str()));
            }
        }
        params
    }
}

#[async_trait]
impl AccessTokenProvider for AzureAdTokenProvider {
    async fn get_access_token(&self) -> Result<String, AppError> {
        let endpoint = self.token_endpoint();

        let response = self
            .http
            .post(&endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&self.grant_params())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("Token acquisition failed with status {}", status);
            return Err(AppError::Authentication(describe_token_error(&body)));
        }

        match serde_json::from_str::<TokenResponse>(&body) {
            Ok(token) => Ok(token.access_token),
            Err(_) => Err(AppError::Authentication(describe_token_error(&body))),
        }
    }
}

/// Azure AD failures carry an `error_description`; prefer it over the raw
/// body when present.
fn describe_token_error(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error_description")
                .and_then(|description| description.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

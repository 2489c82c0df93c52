use anyhow::Result;
use std::env;
use url::Url;
use uuid::Uuid;

const DEFAULT_API_URL: &str = "https://api.powerbi.com/v1.0/myorg";
const DEFAULT_AUTHORITY_URL: &str = "https://login.microsoftonline.com";
const DEFAULT_SCOPE: &str = "https://analysis.windows.net/powerbi/api/.default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationMode {
    MasterUser,
    ServicePrincipal,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub mode: AuthenticationMode,
    pub authority_url: String,
    pub scope: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub static_files_path: String,
    pub api_base_url: Url,
    pub workspace_id: String,
    pub report_id: String,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Check if we're in production mode
        let is_production = env::var("RUST_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
            == "production";

        let api_base_url =
            Url::parse(&env::var("POWERBI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()))?;

        let mode = parse_authentication_mode(
            &env::var("POWERBI_AUTH_MODE").unwrap_or_else(|_| "ServicePrincipal".to_string()),
        )?;

        Ok(Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| {
                if is_production {
                    "0.0.0.0:7600".to_string()
                } else {
                    "127.0.0.1:7600".to_string()
                }
            }),
            static_files_path: env::var("STATIC_FILES_PATH")
                .unwrap_or_else(|_| "./public".to_string()),
            api_base_url,
            workspace_id: env::var("POWERBI_WORKSPACE_ID")
                .expect("POWERBI_WORKSPACE_ID must be set"),
            report_id: env::var("POWERBI_REPORT_ID").expect("POWERBI_REPORT_ID must be set"),
            auth: AuthConfig {
                mode,
                authority_url: env::var("POWERBI_AUTHORITY_URL")
                    .unwrap_or_else(|_| DEFAULT_AUTHORITY_URL.to_string()),
                scope: env::var("POWERBI_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string()),
                tenant_id: env::var("POWERBI_TENANT_ID").unwrap_or_default(),
                client_id: env::var("POWERBI_CLIENT_ID").expect("POWERBI_CLIENT_ID must be set"),
                client_secret: env::var("POWERBI_CLIENT_SECRET").unwrap_or_default(),
                username: env::var("POWERBI_USERNAME").unwrap_or_default(),
                password: env::var("POWERBI_PASSWORD").unwrap_or_default(),
            },
        })
    }

    /// Validate the configuration once at startup so misconfiguration shows
    /// up as a clear message instead of a 401/404 from the API later.
    pub fn validate(&self) -> Result<()> {
        ensure_guid("POWERBI_WORKSPACE_ID", &self.workspace_id)?;
        ensure_guid("POWERBI_REPORT_ID", &self.report_id)?;
        ensure_guid("POWERBI_CLIENT_ID", &self.auth.client_id)?;

        match self.auth.mode {
            AuthenticationMode::MasterUser => {
                if self.auth.username.is_empty() {
                    anyhow::bail!("POWERBI_USERNAME must be set for MasterUser authentication");
                }
                if self.auth.password.is_empty() {
                    anyhow::bail!("POWERBI_PASSWORD must be set for MasterUser authentication");
                }
            }
            AuthenticationMode::ServicePrincipal => {
                if self.auth.client_secret.is_empty() {
                    anyhow::bail!(
                        "POWERBI_CLIENT_SECRET must be set for ServicePrincipal authentication"
                    );
                }
                ensure_guid("POWERBI_TENANT_ID", &self.auth.tenant_id)?;
            }
        }

        Ok(())
    }
}

fn parse_authentication_mode(raw: &str) -> Result<AuthenticationMode> {
    match raw.to_lowercase().as_str() {
        "masteruser" => Ok(AuthenticationMode::MasterUser),
        "serviceprincipal" => Ok(AuthenticationMode::ServicePrincipal),
        other => anyhow::bail!(
            "POWERBI_AUTH_MODE must be MasterUser or ServicePrincipal, got {:?}",
            other
        ),
    }
}

fn ensure_guid(name: &str, value: &str) -> Result<()> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| anyhow::anyhow!("{} must be a GUID, got {:?}", name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(mode: AuthenticationMode) -> Config {
        Config {
            server_address: "127.0.0.1:7600".to_string(),
            static_files_path: "./public".to_string(),
            api_base_url: Url::parse(DEFAULT_API_URL).unwrap(),
            workspace_id: "11111111-1111-1111-1111-111111111111".to_string(),
            report_id: "22222222-2222-2222-2222-222222222222".to_string(),
            auth: AuthConfig {
                mode,
                authority_url: DEFAULT_AUTHORITY_URL.to_string(),
                scope: DEFAULT_SCOPE.to_string(),
                tenant_id: "33333333-3333-3333-3333-333333333333".to_string(),
                client_id: "44444444-4444-4444-4444-444444444444".to_string(),
                client_secret: "secret".to_string(),
                username: "user@example.com".to_string(),
                password: "hunter2".to_string(),
            },
        }
    }

    #[test]
    fn authentication_mode_parses_case_insensitively() {
        assert_eq!(
            parse_authentication_mode("masterUser").unwrap(),
            AuthenticationMode::MasterUser
        );
        assert_eq!(
            parse_authentication_mode("SERVICEPRINCIPAL").unwrap(),
            AuthenticationMode::ServicePrincipal
        );
        assert!(parse_authentication_mode("managed-identity").is_err());
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(test_config(AuthenticationMode::ServicePrincipal)
            .validate()
            .is_ok());
        assert!(test_config(AuthenticationMode::MasterUser).validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_guid_ids() {
        let mut config = test_config(AuthenticationMode::ServicePrincipal);
        config.workspace_id = "not-a-guid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_requires_mode_specific_credentials() {
        let mut config = test_config(AuthenticationMode::ServicePrincipal);
        config.auth.client_secret.clear();
        assert!(config.validate().is_err());

        let mut config = test_config(AuthenticationMode::MasterUser);
        config.auth.password.clear();
        assert!(config.validate().is_err());
    }
}

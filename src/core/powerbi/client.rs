use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

use super::auth::AccessTokenProvider;
use super::tokens;
use crate::models::{Dataset, Datasource, EmbedToken, Report};
use crate::utils::{ApiError, AppError};

/// The Power BI REST operations the embed flow depends on. Discovery and
/// orchestration consume this trait so tests can run against canned data.
#[async_trait]
pub trait PowerBiApi: Send + Sync {
    async fn get_report(&self, workspace_id: &str, report_id: &str) -> Result<Report, AppError>;

    async fn get_datasets(&self, workspace_id: &str) -> Result<Vec<Dataset>, AppError>;

    async fn get_datasources(
        &self,
        workspace_id: &str,
        dataset_id: &str,
    ) -> Result<Vec<Datasource>, AppError>;

    async fn generate_embed_token(
        &self,
        report_id: &str,
        dataset_ids: &[String],
        target_workspace_id: Option<&str>,
    ) -> Result<EmbedToken, AppError>;
}

/// List endpoints wrap their results in a `value` array.
#[derive(Debug, Deserialize)]
struct ValueEnvelope<T> {
    value: Vec<T>,
}

pub struct PowerBiClient {
    http: reqwest::Client,
    base_url: String,
    auth: Arc<dyn AccessTokenProvider>,
}

impl PowerBiClient {
    pub fn new(http: reqwest::Client, base_url: Url, auth: Arc<dyn AccessTokenProvider>) -> Self {
        Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            auth,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// One bearer-authenticated call, no retry. Non-2xx responses become an
    /// `ApiError` carrying status, status text, body and the `RequestId`
    /// response header.
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, AppError> {
        let token = self.auth.get_access_token().await?;

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&token)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let request_id = response
                .headers()
                .get("requestid")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let body = response.text().await.unwrap_or_default();

            return Err(AppError::Api(ApiError {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body,
                request_id,
            }));
        }

        Ok(response.json().await?)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let json = self.request(Method::GET, url, None).await?;
        Ok(serde_json::from_value(json)?)
    }

    async fn post<T: DeserializeOwned>(&self, url: &str, body: &Value) -> Result<T, AppError> {
        let json = self.request(Method::POST, url, Some(body)).await?;
        Ok(serde_json::from_value(json)?)
    }
}

#[async_trait]
impl PowerBiApi for PowerBiClient {
    async fn get_report(&self, workspace_id: &str, report_id: &str) -> Result<Report, AppError> {
        let url = self.endpoint(&format!("groups/{}/reports/{}", workspace_id, report_id));
        self.get(&url).await
    }

    async fn get_datasets(&self, workspace_id: &str) -> Result<Vec<Dataset>, AppError> {
        let url = self.endpoint(&format!("groups/{}/datasets", workspace_id));
        let envelope: ValueEnvelope<Dataset> = self.get(&url).await?;
        Ok(envelope.value)
    }

    async fn get_datasources(
        &self,
        workspace_id: &str,
        dataset_id: &str,
    ) -> Result<Vec<Datasource>, AppError> {
        let url = self.endpoint(&format!(
            "groups/{}/datasets/{}/datasources",
            workspace_id, dataset_id
        ));
        let envelope: ValueEnvelope<Datasource> = self.get(&url).await?;
        Ok(envelope.value)
    }

    async fn generate_embed_token(
        &self,
        report_id: &str,
        dataset_ids: &[String],
        target_workspace_id: Option<&str>,
    ) -> Result<EmbedToken, AppError> {
        let body = serde_json::to_value(tokens::generate_token_request(
            report_id,
            dataset_ids,
            target_workspace_id,
        ))?;
        let url = self.endpoint("GenerateToken");
        self.post(&url, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticToken;

    #[async_trait]
    impl AccessTokenProvider for StaticToken {
        async fn get_access_token(&self) -> Result<String, AppError> {
            Ok("token".to_string())
        }
    }

    #[test]
    fn endpoints_are_rooted_at_the_api_base_url() {
        let client = PowerBiClient::new(
            reqwest::Client::new(),
            Url::parse("https://api.powerbi.com/v1.0/myorg").unwrap(),
            Arc::new(StaticToken),
        );

        assert_eq!(
            client.endpoint("groups/ws1/datasets"),
            "https://api.powerbi.com/v1.0/myorg/groups/ws1/datasets"
        );
        assert_eq!(
            client.endpoint("GenerateToken"),
            "https://api.powerbi.com/v1.0/myorg/GenerateToken"
        );
    }

    #[test]
    fn value_envelope_unwraps_list_responses() {
        let json = serde_json::json!({
            "value": [
                {"id": "d1", "name": "Sales"},
                {"id": "d2", "name": "HR"}
            ]
        });
        let envelope: ValueEnvelope<Dataset> = serde_json::from_value(json).unwrap();
        assert_eq!(envelope.value.len(), 2);
        assert_eq!(envelope.value[0].id, "d1");
    }
}

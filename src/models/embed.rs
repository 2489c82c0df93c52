use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::report::ReportDetails;

/// Short-lived embed token issued by the `GenerateToken` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedToken {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    pub expiration: DateTime<Utc>,
}

/// Embed configuration assembled for a single request and discarded after
/// the response is sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedConfig {
    pub reports_detail: Vec<ReportDetails>,
    pub embed_token: EmbedToken,
}

/// Success payload of the embed-info endpoint. The `embedUrl` field carries
/// the report details array, which is what the embedding widget consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedInfo {
    pub access_token: String,
    pub embed_url: Vec<ReportDetails>,
    pub expiry: DateTime<Utc>,
    pub status: u16,
}

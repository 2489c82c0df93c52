use serde::{Deserialize, Serialize};

/// Raw report metadata as returned by the `groups/{id}/reports/{id}` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub name: String,
    pub embed_url: String,
    pub dataset_id: String,
}

/// The per-report slice of an embed configuration handed to the front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetails {
    pub report_id: String,
    pub report_name: String,
    pub embed_url: String,
}

impl ReportDetails {
    pub fn new(report_id: String, report_name: String, embed_url: String) -> Self {
        Self {
            report_id,
            report_name,
            embed_url,
        }
    }
}

impl From<&Report> for ReportDetails {
    fn from(report: &Report) -> Self {
        Self::new(
            report.id.clone(),
            report.name.clone(),
            report.embed_url.clone(),
        )
    }
}

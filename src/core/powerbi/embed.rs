use std::sync::Arc;

use super::client::PowerBiApi;
use super::discovery::find_additional_dataset_ids;
use crate::models::{EmbedConfig, EmbedInfo, ReportDetails};
use crate::utils::AppError;

/// Ties report lookup, dataset discovery and token generation into the one
/// operation the embedding front-end consumes.
pub struct EmbedService {
    api: Arc<dyn PowerBiApi>,
    workspace_id: String,
    report_id: String,
}

impl EmbedService {
    pub fn new(api: Arc<dyn PowerBiApi>, workspace_id: String, report_id: String) -> Self {
        Self {
            api,
            workspace_id,
            report_id,
        }
    }

    pub async fn get_embed_info(&self) -> Result<EmbedInfo, AppError> {
        let embed_params = self
            .embed_params_for_report(&self.workspace_id, &self.report_id)
            .await?;

        Ok(EmbedInfo {
            access_token: embed_params.embed_token.token,
            embed_url: embed_params.reports_detail,
            expiry: embed_params.embed_token.expiration,
            status: 200,
        })
    }

    async fn embed_params_for_report(
        &self,
        workspace_id: &str,
        report_id: &str,
    ) -> Result<EmbedConfig, AppError> {
        let report = self.api.get_report(workspace_id, report_id).await?;
        let report_details = ReportDetails::from(&report);

        // Primary dataset first, then any discovered ones in discovery order.
        let mut dataset_ids = vec![report.dataset_id.clone()];
        let additional =
            find_additional_dataset_ids(self.api.as_ref(), workspace_id, &report.dataset_id).await;
        dataset_ids.extend(additional);

        let embed_token = self
            .api
            .generate_embed_token(report_id, &dataset_ids, Some(workspace_id))
            .await?;

        Ok(EmbedConfig {
            reports_detail: vec![report_details],
            embed_token,
        })
    }
}

use serde::Serialize;

/// All datasets in an embed token are read-only; embed tokens never grant
/// write access.
const XMLA_PERMISSIONS_READ_ONLY: &str = "ReadOnly";

#[derive(Debug, Serialize)]
pub struct TokenReport {
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDataset {
    pub id: String,
    pub xmla_permissions: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TokenWorkspace {
    pub id: String,
}

/// Request body for the `GenerateToken` endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTokenRequest {
    pub reports: Vec<TokenReport>,
    pub datasets: Vec<TokenDataset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_workspaces: Option<Vec<TokenWorkspace>>,
}

pub fn generate_token_request(
    report_id: &str,
    dataset_ids: &[String],
    target_workspace_id: Option<&str>,
) -> GenerateTokenRequest {
    GenerateTokenRequest {
        reports: vec![TokenReport {
            id: report_id.to_string(),
        }],
        datasets: dataset_ids
            .iter()
            .map(|id| TokenDataset {
                id: id.clone(),
                xmla_permissions: XMLA_PERMISSIONS_READ_ONLY,
            })
            .collect(),
        target_workspaces: target_workspace_id.map(|id| {
            vec![TokenWorkspace {
                id: id.to_string(),
            }]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_marks_every_dataset_read_only() {
        let request = generate_token_request(
            "r1",
            &["d1".to_string(), "d2".to_string()],
            Some("ws1"),
        );
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["reports"], serde_json::json!([{"id": "r1"}]));
        assert_eq!(
            json["datasets"],
            serde_json::json!([
                {"id": "d1", "xmlaPermissions": "ReadOnly"},
                {"id": "d2", "xmlaPermissions": "ReadOnly"}
            ])
        );
        assert_eq!(json["targetWorkspaces"], serde_json::json!([{"id": "ws1"}]));
    }

    #[test]
    fn target_workspaces_omitted_when_not_requested() {
        let request = generate_token_request("r1", &["d1".to_string()], None);
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("targetWorkspaces").is_none());
    }
}

use super::analysis_services::{extract_database_name, filter_analysis_services};
use super::client::PowerBiApi;
use super::datasets::find_by_name;
use crate::utils::AppError;

/// Find datasets that are likely referenced indirectly by the source dataset
/// through its Analysis-Services connections, matched by name similarity.
///
/// Discovery is best-effort: any failure inside it degrades to an empty list
/// and only narrows the dataset scope of the issued token, it never aborts
/// the embed operation.
pub async fn find_additional_dataset_ids(
    api: &dyn PowerBiApi,
    workspace_id: &str,
    source_dataset_id: &str,
) -> Vec<String> {
    match discover(api, workspace_id, source_dataset_id).await {
        Ok(ids) => ids,
        Err(err) => {
            tracing::error!("Error finding additional dataset ids: {}", err);
            Vec::new()
        }
    }
}

async fn discover(
    api: &dyn PowerBiApi,
    workspace_id: &str,
    source_dataset_id: &str,
) -> Result<Vec<String>, AppError> {
    let datasources = api.get_datasources(workspace_id, source_dataset_id).await?;

    let analysis_datasources = filter_analysis_services(&datasources);
    if analysis_datasources.is_empty() {
        tracing::info!(
            "No Analysis Services datasources found for dataset {}",
            source_dataset_id
        );
        return Ok(Vec::new());
    }

    tracing::info!(
        "Found {} Analysis Services datasource(s)",
        analysis_datasources.len()
    );

    // One dataset listing shared across all datasources of this call.
    let all_datasets = api.get_datasets(workspace_id).await?;

    let mut additional_dataset_ids: Vec<String> = Vec::new();

    for datasource in analysis_datasources {
        let Some(database_name) = extract_database_name(datasource) else {
            tracing::warn!("Could not extract database name from datasource");
            continue;
        };

        tracing::info!("Found Analysis Services database: {}", database_name);

        let matching = find_by_name(&all_datasets, database_name, &[source_dataset_id]);

        for dataset in matching {
            if !additional_dataset_ids.contains(&dataset.id) {
                additional_dataset_ids.push(dataset.id.clone());
                tracing::info!(
                    "Added matching dataset: {} (ID: {})",
                    dataset.name,
                    dataset.id
                );
            }
        }
    }

    tracing::info!(
        "Total additional datasets found: {}",
        additional_dataset_ids.len()
    );

    Ok(additional_dataset_ids)
}

use crate::models::Datasource;

/// Type marker the Power BI API uses for Analysis-Services connections.
/// The comparison is exact and case-sensitive.
pub const DATASOURCE_TYPE_ANALYSIS_SERVICES: &str = "AnalysisServices";

pub fn filter_analysis_services(datasources: &[Datasource]) -> Vec<&Datasource> {
    datasources
        .iter()
        .filter(|datasource| {
            datasource.datasource_type.as_deref() == Some(DATASOURCE_TYPE_ANALYSIS_SERVICES)
        })
        .collect()
}

/// The logical database name of an Analysis-Services connection lives in one
/// of three fields depending on how the connection was defined. Priority:
/// database, then path, then catalog. Empty strings count as absent.
pub fn extract_database_name(datasource: &Datasource) -> Option<&str> {
    let details = datasource.connection_details.as_ref()?;

    [&details.database, &details.path, &details.catalog]
        .into_iter()
        .find_map(|field| field.as_deref().filter(|value| !value.is_empty()))
}

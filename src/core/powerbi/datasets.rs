use std::collections::HashSet;

use crate::models::Dataset;

/// Case-insensitive name match used to guess which workspace datasets back an
/// Analysis-Services connection. A dataset qualifies when its lowercased name
/// equals, contains, or is contained by the lowercased target name. The rule
/// is deliberately loose in both directions; input order is preserved.
pub fn find_by_name<'a>(
    datasets: &'a [Dataset],
    name: &str,
    exclude_ids: &[&str],
) -> Vec<&'a Dataset> {
    let exclude: HashSet<&str> = exclude_ids.iter().copied().collect();
    let name_lower = name.to_lowercase();

    datasets
        .iter()
        .filter(|dataset| {
            if exclude.contains(dataset.id.as_str()) {
                return false;
            }

            let dataset_name_lower = dataset.name.to_lowercase();
            dataset_name_lower == name_lower
                || dataset_name_lower.contains(&name_lower)
                || name_lower.contains(&dataset_name_lower)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(id: &str, name: &str) -> Dataset {
        Dataset {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn matches_equality_and_containment_in_either_direction() {
        let datasets = vec![
            dataset("1", "Sales"),
            dataset("2", "Sales Data"),
            dataset("3", "HR"),
        ];

        let matched = find_by_name(&datasets, "Sales", &[]);
        let ids: Vec<&str> = matched.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        // Target containing the dataset name also qualifies.
        let matched = find_by_name(&datasets, "Sales Data Warehouse", &[]);
        let ids: Vec<&str> = matched.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let datasets = vec![dataset("1", "SALES"), dataset("2", "hr")];

        let matched = find_by_name(&datasets, "sales", &[]);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "1");
    }

    #[test]
    fn excluded_ids_never_match() {
        let datasets = vec![dataset("1", "Sales"), dataset("2", "Sales Data")];

        let matched = find_by_name(&datasets, "Sales", &["1"]);
        let ids: Vec<&str> = matched.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn preserves_input_order() {
        let datasets = vec![
            dataset("9", "Regional Sales"),
            dataset("4", "Sales"),
            dataset("7", "Sales Summary"),
        ];

        let matched = find_by_name(&datasets, "Sales", &[]);
        let ids: Vec<&str> = matched.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["9", "4", "7"]);
    }

    #[test]
    fn no_match_yields_empty() {
        let datasets = vec![dataset("1", "Finance")];
        assert!(find_by_name(&datasets, "Sales", &[]).is_empty());
    }
}

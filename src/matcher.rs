use crate::model::AppEntry;

/// Indices of entries whose display name contains `query`,
/// case-insensitively. The empty query matches everything. Matches
/// keep index order; there is no scoring.
pub fn filter_indices(entries: &[AppEntry], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..entries.len()).collect();
    }

    let needle = query.to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.display_name.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

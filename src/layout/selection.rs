use crate::model::AssociationTable;
use std::collections::HashMap;

/// Total association count per entity, in order of first appearance.
pub fn entity_totals(table: &AssociationTable) -> Vec<(String, u64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(String, u64)> = Vec::new();

    for row in table.rows() {
        match index.get(row.entity.as_str()) {
            Some(&i) => totals[i].1 = totals[i].1.saturating_add(row.count),
            None => {
                index.insert(row.entity.as_str(), totals.len());
                totals.push((row.entity.clone(), row.count));
            }
        }
    }

    totals
}

/// The `k` entities with the highest total count, heaviest first.
///
/// Ties keep the table's row order. Returns fewer than `k` entities when the
/// table does not contain that many; `k` itself is not validated.
pub fn select_top_entities(table: &AssociationTable, k: usize) -> Vec<String> {
    let mut totals = entity_totals(table);
    // sort_by is stable, so equal totals stay in first-appearance order
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals.into_iter().take(k).map(|(entity, _)| entity).collect()
}

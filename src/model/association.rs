use serde::{Deserialize, Serialize};

/// How often an attribute was mentioned together with an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub entity: String,
    pub attribute: String,
    pub count: u64,
}

impl Association {
    pub fn new(entity: impl Into<String>, attribute: impl Into<String>, count: u64) -> Self {
        Self {
            entity: entity.into(),
            attribute: attribute.into(),
            count,
        }
    }
}

/// Ordered association rows. Row order is significant: it breaks ties
/// during entity selection and fixes the order attribute nodes are created in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationTable {
    rows: Vec<Association>,
}

impl AssociationTable {
    pub fn new(rows: Vec<Association>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Association] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, row: Association) {
        self.rows.push(row);
    }

    /// Distinct entity labels in order of first appearance.
    pub fn distinct_entities(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .filter(|r| seen.insert(r.entity.as_str()))
            .map(|r| r.entity.as_str())
            .collect()
    }
}

impl FromIterator<Association> for AssociationTable {
    fn from_iter<I: IntoIterator<Item = Association>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<E, A> FromIterator<(E, A, u64)> for AssociationTable
where
    E: Into<String>,
    A: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (E, A, u64)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(e, a, c)| Association::new(e, a, c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_entities_keep_first_appearance() {
        let table: AssociationTable = [
            ("Staff", "friendly", 4),
            ("Coffee", "hot", 3),
            ("Staff", "slow", 2),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.distinct_entities(), vec!["Staff", "Coffee"]);
        assert_eq!(table.len(), 3);
    }
}

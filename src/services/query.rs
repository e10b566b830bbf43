//! Translates a normalized `ResourceFilter` into storage conditions.
//!
//! Conditions are an OR of branches, each branch an AND of predicates. A plain
//! filter produces one branch; a free-text `search` produces two (one matching
//! `name`, one matching `description`), both carrying the category/status
//! constraints. An empty single branch matches every row.

use crate::db::resources::ResourceColumn;
use crate::models::filter::{ResourceFilter, SortField, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Equals(ResourceColumn, String),
    Contains(ResourceColumn, String),
}

impl Predicate {
    fn sql(&self) -> String {
        match self {
            Predicate::Equals(col, _) => format!("{} = ?", col.as_str()),
            Predicate::Contains(col, _) => format!("{} LIKE ?", col.as_str()),
        }
    }

    fn bind_value(&self) -> String {
        match self {
            Predicate::Equals(_, v) => v.clone(),
            Predicate::Contains(_, v) => format!("%{v}%"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConditions {
    branches: Vec<Vec<Predicate>>,
}

impl QueryConditions {
    pub fn from_filter(filter: &ResourceFilter) -> Self {
        let mut base = Vec::new();
        if let Some(ref category) = filter.category {
            base.push(Predicate::Equals(ResourceColumn::Category, category.clone()));
        }
        if let Some(status) = filter.status {
            base.push(Predicate::Equals(ResourceColumn::Status, status.as_str().to_string()));
        }

        // `search` wins over `name`: the name filter is not applied at all.
        let branches = match (&filter.search, &filter.name) {
            (Some(search), _) => [ResourceColumn::Name, ResourceColumn::Description]
                .into_iter()
                .map(|col| {
                    let mut branch = base.clone();
                    branch.push(Predicate::Contains(col, search.clone()));
                    branch
                })
                .collect(),
            (None, Some(name)) => {
                base.push(Predicate::Contains(ResourceColumn::Name, name.clone()));
                vec![base]
            }
            (None, None) => vec![base],
        };

        Self { branches }
    }

    pub fn branches(&self) -> &[Vec<Predicate>] {
        &self.branches
    }

    /// True when no constraint applies.
    pub fn matches_all(&self) -> bool {
        self.branches.iter().any(|b| b.is_empty())
    }

    /// Render as a `WHERE` clause (empty when unconstrained) and the bind
    /// values in placeholder order.
    pub fn where_clause(&self) -> (String, Vec<String>) {
        if self.matches_all() {
            return (String::new(), Vec::new());
        }

        let binds = self
            .branches
            .iter()
            .flatten()
            .map(Predicate::bind_value)
            .collect();

        let render = |branch: &Vec<Predicate>| {
            branch.iter().map(Predicate::sql).collect::<Vec<_>>().join(" AND ")
        };
        let sql = match self.branches.as_slice() {
            [single] => format!("WHERE {}", render(single)),
            many => {
                let parts: Vec<String> = many.iter().map(|b| format!("({})", render(b))).collect();
                format!("WHERE {}", parts.join(" OR "))
            }
        };

        (sql, binds)
    }
}

/// `ORDER BY` clause for a list. `id` breaks ties so paging stays stable
/// when sort keys collide.
pub fn order_clause(sort_by: SortField, order: SortOrder) -> String {
    let column = ResourceColumn::from(sort_by);
    if column == ResourceColumn::Id {
        format!("ORDER BY id {}", order.as_sql())
    } else {
        format!("ORDER BY {} {}, id ASC", column.as_str(), order.as_sql())
    }
}

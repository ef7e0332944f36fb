//! Filter translation: turns a partially populated `ListFilter` into final SQL text
//! plus positional parameters. Caller-supplied values only ever travel as bound
//! parameters; the only identifiers appended to the text are the catalog's static
//! grouping column and an already validated `OrderBy`.

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use super::order::OrderBy;

pub const DEFAULT_SORT_FIELD: &str = "advertised_start_time";

fn default_sort_field() -> String { DEFAULT_SORT_FIELD.to_string() }

/// Caller-supplied list constraints. Every field is independently optional.
///
/// The grouping ids are accepted under the generic name as well as the
/// catalog-specific ones (`meetingIds` for races, `eventIds` for sports).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListFilter {
    #[serde(alias = "meetingIds", alias = "eventIds", alias = "grouping_ids", alias = "meeting_ids", alias = "event_ids")]
    pub grouping_ids: Vec<i64>,
    #[serde(alias = "only_visible")]
    pub only_visible: bool,
    #[serde(alias = "sort_by", alias = "orderBy")]
    pub sort_by: Option<SortSpec>,
}

impl ListFilter {
    pub fn grouping_ids<I: IntoIterator<Item = i64>>(mut self, ids: I) -> Self {
        self.grouping_ids = ids.into_iter().collect();
        self
    }

    pub fn only_visible(mut self) -> Self {
        self.only_visible = true;
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: impl Into<String>) -> Self {
        self.sort_by = Some(SortSpec { field: field.into(), direction: direction.into() });
        self
    }
}

/// Unvalidated sort request; both parts are free text until `order::resolve` accepts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    #[serde(default = "default_sort_field")]
    pub field: String,
    pub direction: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

pub fn translate(base: &str, grouping_column: &str, filter: Option<&ListFilter>, order: Option<&OrderBy>) -> TranslatedQuery {
    let mut sql = base.to_string();
    let mut params: Vec<Value> = Vec::new();

    let Some(filter) = filter else {
        return TranslatedQuery { sql, params };
    };

    let mut clauses: Vec<String> = Vec::new();

    if !filter.grouping_ids.is_empty() {
        let placeholders = vec!["?"; filter.grouping_ids.len()].join(", ");
        clauses.push(format!("{} IN ({})", grouping_column, placeholders));
        params.extend(filter.grouping_ids.iter().map(|id| Value::Integer(*id)));
    }

    if filter.only_visible {
        clauses.push("visible = ?".to_string());
        params.push(Value::Integer(1));
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    // Ordering goes after the WHERE clause is final.
    if let Some(order) = order {
        sql.push_str(&order.to_sql());
    }

    TranslatedQuery { sql, params }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod filter_tests;

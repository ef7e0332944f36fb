//! Order-by validation against a schema-derived allow-list.

use super::filter::SortSpec;
use crate::error::{CatalogError, CatalogResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Exact, case-sensitive match on `ASC` / `DESC`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ASC" => Some(SortDirection::Asc),
            "DESC" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A sort request that passed validation. Only `resolve` can build one, and the column
/// it carries is the schema's own spelling, never the caller's string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    column: String,
    direction: SortDirection,
}

impl OrderBy {
    pub fn column(&self) -> &str { &self.column }

    pub fn direction(&self) -> SortDirection { self.direction }

    pub fn to_sql(&self) -> String {
        format!(" ORDER BY {} {}", quote_ident(&self.column), self.direction.as_sql())
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn validate(sort: &SortSpec, known_columns: &[String]) -> bool {
    resolve(sort, known_columns).is_ok()
}

pub fn resolve(sort: &SortSpec, known_columns: &[String]) -> CatalogResult<OrderBy> {
    let invalid = || CatalogError::InvalidSort { field: sort.field.clone(), direction: sort.direction.clone() };
    let direction = SortDirection::parse(&sort.direction).ok_or_else(invalid)?;
    let column = known_columns.iter().find(|c| *c == &sort.field).ok_or_else(invalid)?;
    Ok(OrderBy { column: column.clone(), direction })
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod order_tests;

//! Query template store.
//!
//! Templates are keyed by a closed enum, so an unknown operation cannot be looked up.
//! All strings are built once per catalog from its static `TableDef` and never change.

use super::TableDef;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryTemplate {
    /// Select one row by primary key. One placeholder: the id.
    Get,
    /// Select every row. No placeholders; filter clauses are appended.
    List,
    /// Column names of a table in schema order. One placeholder: the table name.
    ListColumns,
}

pub const LIST_COLUMNS_SQL: &str = "SELECT name FROM pragma_table_info(?1) ORDER BY cid";

#[derive(Debug, Clone)]
pub struct Templates {
    get: String,
    list: String,
}

impl Templates {
    pub fn for_table(def: &TableDef) -> Self {
        let projection = def.columns.iter().map(|c| c.name).collect::<Vec<_>>().join(", ");
        let list = format!("SELECT {} FROM {}", projection, def.name);
        let get = format!("{} WHERE {} = ?1", list, def.columns[0].name);
        Self { get, list }
    }

    pub fn sql(&self, which: QueryTemplate) -> &str {
        match which {
            QueryTemplate::Get => &self.get,
            QueryTemplate::List => &self.list,
            QueryTemplate::ListColumns => LIST_COLUMNS_SQL,
        }
    }
}

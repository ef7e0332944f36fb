//! Schema introspection for sort validation. Results are never cached.

use rusqlite::Connection;

use super::template::LIST_COLUMNS_SQL;
use crate::error::{CatalogError, CatalogResult};

/// Column names of `table` in the order SQLite reports them.
///
/// SQLite answers an unknown table with an empty column set; that is reported
/// as `UnknownTable` so callers never validate against nothing.
pub fn columns(conn: &Connection, table: &str) -> CatalogResult<Vec<String>> {
    let mut stmt = conn.prepare(LIST_COLUMNS_SQL)?;
    let names = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    if names.is_empty() {
        return Err(CatalogError::UnknownTable { table: table.to_string() });
    }
    Ok(names)
}

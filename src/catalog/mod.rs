//!
//! eventcat catalog engine
//! -----------------------
//! One generic, table-parameterized repository shared by every catalog. A catalog
//! is described by a `CatalogEntry` implementation (table definition + row
//! constructor); `Catalog<E>` then provides the read operations:
//!
//! - `get(id)`: bind the id into the `Get` template, materialize, require one row.
//! - `list(filter)`: introspect + validate the sort request (if any), translate the
//!   filter into SQL with bound values, execute, materialize.
//!
//! Every call performs exactly one checkout from the store pool and one "now"
//! snapshot, shared by all rows of the response.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params_from_iter, Row};
use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::storage::{InitGuard, Store};

pub mod filter;
pub mod materialize;
pub mod order;
pub mod race;
pub mod schema;
pub mod sport;
pub mod template;

pub use filter::{ListFilter, SortSpec, TranslatedQuery};
pub use materialize::{EventHeader, Status};
pub use order::{OrderBy, SortDirection};
pub use race::Race;
pub use sport::Sport;
pub use template::{QueryTemplate, Templates};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColType {
    Integer,
    Boolean,
    Text,
    DateTime,
}

impl ColType {
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColType::Integer | ColType::Boolean => "INTEGER",
            ColType::Text => "TEXT",
            ColType::DateTime => "DATETIME",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub coltype: ColType,
}

/// Static description of a catalog table.
///
/// `columns` is the projection in scan order. The layout is fixed across catalogs:
/// position 0 is the integer primary key, position 1 the grouping id, the last two
/// positions are the visibility flag and the advertised start time. Everything in
/// between is catalog-specific and read by `CatalogEntry::from_row`.
#[derive(Clone, Copy, Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub grouping_column: &'static str,
    pub columns: &'static [ColumnDef],
}

impl TableDef {
    pub fn visible_index(&self) -> usize {
        self.columns.len() - 2
    }

    pub fn advertised_start_index(&self) -> usize {
        self.columns.len() - 1
    }

    pub fn advertised_start_column(&self) -> &'static str {
        self.columns[self.advertised_start_index()].name
    }
}

pub trait CatalogEntry: Sized + Send + 'static {
    const TABLE: TableDef;

    /// Build a record from a row whose shared fields were already scanned into `header`.
    fn from_row(row: &Row<'_>, header: EventHeader) -> rusqlite::Result<Self>;
}

pub struct Catalog<E> {
    store: Store,
    templates: Arc<Templates>,
    pub(crate) init: Arc<InitGuard>,
    _entry: PhantomData<fn() -> E>,
}

impl<E> Clone for Catalog<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            templates: self.templates.clone(),
            init: self.init.clone(),
            _entry: PhantomData,
        }
    }
}

impl<E: CatalogEntry> Catalog<E> {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            templates: Arc::new(Templates::for_table(&E::TABLE)),
            init: Arc::new(InitGuard::new()),
            _entry: PhantomData,
        }
    }

    pub fn table(&self) -> &'static str {
        E::TABLE.name
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Live column names of this catalog's table, in schema order.
    pub fn columns(&self) -> CatalogResult<Vec<String>> {
        let conn = self.store.conn()?;
        schema::columns(&conn, E::TABLE.name)
    }

    pub fn get(&self, id: i64) -> CatalogResult<E> {
        self.get_as_of(id, Utc::now())
    }

    pub fn get_as_of(&self, id: i64, now: DateTime<Utc>) -> CatalogResult<E> {
        let conn = self.store.conn()?;
        let sql = self.templates.sql(QueryTemplate::Get);
        debug!(table = E::TABLE.name, id, sql, "get");
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query([id])?;
        let mut records = materialize::materialize::<E>(rows, now)?;
        if records.len() != 1 {
            return Err(CatalogError::Cardinality { table: E::TABLE.name, id, found: records.len() });
        }
        Ok(records.remove(0))
    }

    pub fn list(&self, filter: Option<&ListFilter>) -> CatalogResult<Vec<E>> {
        self.list_as_of(filter, Utc::now())
    }

    pub fn list_as_of(&self, filter: Option<&ListFilter>, now: DateTime<Utc>) -> CatalogResult<Vec<E>> {
        let conn = self.store.conn()?;
        let order = match filter.and_then(|f| f.sort_by.as_ref()) {
            Some(sort) => {
                let known = schema::columns(&conn, E::TABLE.name)?;
                match order::resolve(sort, &known) {
                    Ok(order) => Some(order),
                    Err(e) => {
                        warn!(table = E::TABLE.name, field = %sort.field, direction = %sort.direction, "rejecting sort request");
                        return Err(e);
                    }
                }
            }
            None => None,
        };
        let query = filter::translate(self.templates.sql(QueryTemplate::List), E::TABLE.grouping_column, filter, order.as_ref());
        debug!(table = E::TABLE.name, sql = %query.sql, params = query.params.len(), "list");
        let mut stmt = conn.prepare(&query.sql)?;
        let rows = stmt.query(params_from_iter(query.params.iter()))?;
        materialize::materialize::<E>(rows, now)
    }
}

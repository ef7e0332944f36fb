use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{CatalogEntry, ColType, ColumnDef, EventHeader, Status, TableDef};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef { name: "id", coltype: ColType::Integer },
    ColumnDef { name: "meeting_id", coltype: ColType::Integer },
    ColumnDef { name: "name", coltype: ColType::Text },
    ColumnDef { name: "number", coltype: ColType::Integer },
    ColumnDef { name: "visible", coltype: ColType::Boolean },
    ColumnDef { name: "advertised_start_time", coltype: ColType::DateTime },
];

/// A race within a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub id: i64,
    pub meeting_id: i64,
    pub name: String,
    pub number: i64,
    pub visible: bool,
    pub advertised_start_time: DateTime<Utc>,
    pub status: Status,
}

impl CatalogEntry for Race {
    const TABLE: TableDef = TableDef { name: "races", grouping_column: "meeting_id", columns: COLUMNS };

    fn from_row(row: &Row<'_>, header: EventHeader) -> rusqlite::Result<Self> {
        Ok(Race {
            id: header.id,
            meeting_id: header.grouping_id,
            name: row.get(2)?,
            number: row.get(3)?,
            visible: header.visible,
            advertised_start_time: header.advertised_start_time,
            status: header.status,
        })
    }
}

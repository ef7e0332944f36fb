use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{CatalogEntry, ColType, ColumnDef, EventHeader, Status, TableDef};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef { name: "id", coltype: ColType::Integer },
    ColumnDef { name: "event_id", coltype: ColType::Integer },
    ColumnDef { name: "category", coltype: ColType::Text },
    ColumnDef { name: "team_1", coltype: ColType::Text },
    ColumnDef { name: "team_2", coltype: ColType::Text },
    ColumnDef { name: "visible", coltype: ColType::Boolean },
    ColumnDef { name: "advertised_start_time", coltype: ColType::DateTime },
];

/// A head-to-head sporting fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sport {
    pub id: i64,
    pub event_id: i64,
    pub category: String,
    pub team_1: String,
    pub team_2: String,
    pub visible: bool,
    pub advertised_start_time: DateTime<Utc>,
    pub status: Status,
}

impl CatalogEntry for Sport {
    const TABLE: TableDef = TableDef { name: "sports", grouping_column: "event_id", columns: COLUMNS };

    fn from_row(row: &Row<'_>, header: EventHeader) -> rusqlite::Result<Self> {
        Ok(Sport {
            id: header.id,
            event_id: header.grouping_id,
            category: row.get(2)?,
            team_1: row.get(3)?,
            team_2: row.get(4)?,
            visible: header.visible,
            advertised_start_time: header.advertised_start_time,
            status: header.status,
        })
    }
}

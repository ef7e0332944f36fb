use super::*;

fn known() -> Vec<String> {
    ["id", "event_id", "category", "team_1", "team_2", "visible", "advertised_start_time"].iter().map(|s| s.to_string()).collect()
}

fn spec(field: &str, direction: &str) -> SortSpec {
    SortSpec { field: field.to_string(), direction: direction.to_string() }
}

#[test]
fn accepts_every_known_column_in_both_directions() {
    let cols = known();
    for col in &cols {
        for dir in ["ASC", "DESC"] {
            assert!(validate(&spec(col, dir), &cols), "{} {} should be accepted", col, dir);
            let order = resolve(&spec(col, dir), &cols).unwrap();
            assert_eq!(order.column(), col);
            assert_eq!(order.direction().as_sql(), dir);
        }
    }
}

#[test]
fn rejects_directions_outside_allow_list() {
    let cols = known();
    for dir in ["asc", "Desc", "", " ASC", "ASC ", "DESC; DROP TABLE sports", "RANDOM()"] {
        assert!(!validate(&spec("id", dir), &cols), "direction {:?} should be rejected", dir);
        assert!(matches!(resolve(&spec("id", dir), &cols), Err(CatalogError::InvalidSort { .. })));
    }
}

#[test]
fn rejects_unknown_and_injected_fields() {
    let cols = known();
    for field in ["id; DROP TABLE x", "ID", "status", "", "advertised_start_time DESC, id", "\"id\"", "1"] {
        assert!(!validate(&spec(field, "ASC"), &cols), "field {:?} should be rejected", field);
        match resolve(&spec(field, "ASC"), &cols) {
            Err(CatalogError::InvalidSort { field: f, direction }) => {
                assert_eq!(f, field);
                assert_eq!(direction, "ASC");
            }
            other => panic!("expected InvalidSort, got {:?}", other),
        }
    }
}

#[test]
fn empty_column_set_rejects_everything() {
    assert!(!validate(&spec("id", "ASC"), &[]));
}

#[test]
fn order_sql_quotes_the_schema_column() {
    let order = resolve(&spec("team_1", "DESC"), &known()).unwrap();
    assert_eq!(order.to_sql(), " ORDER BY \"team_1\" DESC");
}

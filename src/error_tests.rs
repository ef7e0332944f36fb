use super::*;

#[test]
fn http_status_mapping() {
    assert_eq!(AppError::user("bad_input", "oops").http_status(), 400);
    assert_eq!(AppError::not_found("not_found", "missing").http_status(), 404);
    assert_eq!(AppError::exec("exec_error", "fail").http_status(), 500);
    assert_eq!(AppError::io("io", "io").http_status(), 503);
    assert_eq!(AppError::internal("internal", "panic").http_status(), 500);
}

#[test]
fn catalog_errors_classify_at_the_boundary() {
    let invalid = CatalogError::InvalidSort { field: "id; DROP TABLE races".into(), direction: "ASC".into() };
    assert!(invalid.is_invalid_filter());
    let app: AppError = invalid.into();
    assert_eq!(app.http_status(), 400);
    assert_eq!(app.code_str(), "invalid_sort");

    let missing = CatalogError::Cardinality { table: "races", id: 7, found: 0 };
    assert!(missing.is_not_found());
    let app: AppError = missing.into();
    assert_eq!(app.http_status(), 404);

    let dup = CatalogError::Cardinality { table: "races", id: 7, found: 2 };
    assert!(!dup.is_not_found());
    let app: AppError = dup.into();
    assert_eq!(app.code_str(), "cardinality");
    assert!(app.message().contains("expected exactly one record"));

    let bad_ts = CatalogError::Conversion { column: "advertised_start_time", value: "soon".into() };
    let app: AppError = bad_ts.into();
    assert_eq!(app.code_str(), "conversion_error");
}

#[test]
fn serializes_with_type_tag() {
    let v = serde_json::to_value(AppError::user("invalid_sort", "bad")).unwrap();
    assert_eq!(v["type"], "user_input");
    assert_eq!(v["code"], "invalid_sort");
    assert_eq!(v["message"], "bad");
}

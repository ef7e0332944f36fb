use super::*;
use crate::error::CatalogError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn location_parsing() {
    assert_eq!(Location::parse(":memory:"), Location::Memory);
    assert_eq!(Location::parse("  "), Location::Memory);
    assert_eq!(Location::parse("data/events.db"), Location::File(PathBuf::from("data/events.db")));
}

#[test]
fn memory_store_shares_one_database_across_checkouts() {
    let store = Store::in_memory().unwrap();
    {
        let conn = store.conn().unwrap();
        conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY); INSERT INTO t (id) VALUES (1);").unwrap();
    }
    let conn = store.conn().unwrap();
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0)).unwrap();
    assert_eq!(n, 1);
}

#[test]
fn file_store_is_visible_from_clones() {
    let tmp = tempfile::tempdir().unwrap();
    let store = Store::open(&StoreOptions::file(tmp.path().join("events.db"))).unwrap();
    store.conn().unwrap().execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY); INSERT INTO t VALUES (5);").unwrap();
    let other = store.clone();
    let id: i64 = other.conn().unwrap().query_row("SELECT id FROM t", [], |r| r.get(0)).unwrap();
    assert_eq!(id, 5);
}

#[test]
fn init_guard_runs_once_under_concurrent_first_calls() {
    let guard = Arc::new(InitGuard::new());
    let runs = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let guard = guard.clone();
            let runs = runs.clone();
            std::thread::spawn(move || {
                guard.ensure_initialized(|| {
                    runs.fetch_add(1, Ordering::SeqCst);
                    std::thread::sleep(std::time::Duration::from_millis(20));
                    Ok(())
                })
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(guard.is_initialized());
}

#[test]
fn init_guard_replays_first_failure() {
    let guard = InitGuard::new();
    let first = guard.ensure_initialized(|| Err(CatalogError::Init("disk full".into())));
    assert!(first.is_err());
    let mut ran_again = false;
    let second = guard.ensure_initialized(|| {
        ran_again = true;
        Ok(())
    });
    assert!(!ran_again);
    match second {
        Err(CatalogError::Init(msg)) => assert!(msg.contains("disk full")),
        other => panic!("expected replayed init error, got {:?}", other),
    }
    assert!(!guard.is_initialized());
}

mod common;

use chrono::{TimeZone, Utc};
use common::{other_draft, sample_draft};
use package_intake::core::{AuditStamp, PackageStore};
use package_intake::SqliteStore;
use std::time::Duration;
use tempfile::TempDir;

fn stamp(second: u32) -> AuditStamp {
    AuditStamp {
        at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, second).unwrap(),
        user_id: "user1234".to_string(),
        hub_id: 1,
    }
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("packages.db");
    let db_path = db_path.to_str().unwrap();

    {
        let store = SqliteStore::open(db_path, Duration::from_millis(500)).unwrap();
        store.insert(sample_draft(), stamp(0)).await.unwrap();
        store.insert(other_draft(), stamp(1)).await.unwrap();
    }

    let store = SqliteStore::open(db_path, Duration::from_millis(500)).unwrap();
    let packages = store.select_all().await.unwrap();
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0].id, 1);
    assert!(packages[0].matches_draft(&sample_draft()));
    assert_eq!(packages[0].created_at, stamp(0).at);
    assert!(packages[1].matches_draft(&other_draft()));
}

#[tokio::test]
async fn test_weight_is_stored_with_two_decimals() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut draft = sample_draft();
    draft.weight_in_kg = 7.456;

    store.insert(draft, stamp(0)).await.unwrap();
    let package = store.select_all().await.unwrap().remove(0);
    assert_eq!(package.weight_in_kg, Some(7.46));
}

#[tokio::test]
async fn test_very_large_weight_stays_finite() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut draft = sample_draft();
    draft.weight_in_kg = 5e307;

    store.insert(draft, stamp(0)).await.unwrap();
    let package = store.select_all().await.unwrap().remove(0);
    assert_eq!(package.weight_in_kg, Some(5e307));
    assert_eq!(package.to_json()["weightInKg"], 5e307);
}

#[tokio::test]
async fn test_update_keeps_created_at() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.insert(sample_draft(), stamp(0)).await.unwrap();

    let ack = store.update(1, other_draft(), stamp(30)).await.unwrap();
    assert_eq!(ack.rows_affected, 1);
    assert_eq!(ack.inserted_id, None);

    let package = store.select_all().await.unwrap().remove(0);
    assert_eq!(package.created_at, stamp(0).at);
    assert_eq!(package.updated_at, stamp(30).at);
}

#[tokio::test]
async fn test_concurrent_inserts_get_distinct_ids() {
    let store = SqliteStore::open_in_memory().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.insert(sample_draft(), stamp(i)).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        let ack = handle.await.unwrap().unwrap();
        ids.push(ack.inserted_id.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=8).collect::<Vec<i64>>());
    assert_eq!(store.select_all().await.unwrap().len(), 8);
}

#[tokio::test]
async fn test_schema_constraints_back_up_validation() {
    // The store enforces bounds even when called without the service.
    let store = SqliteStore::open_in_memory().unwrap();
    let mut draft = sample_draft();
    draft.sender.country_code = "PHLX".to_string();

    assert!(store.insert(draft, stamp(0)).await.is_err());
    assert!(store.select_all().await.unwrap().is_empty());
}

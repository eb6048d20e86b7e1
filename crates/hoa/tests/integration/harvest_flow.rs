//! Integration tests for the harvest handoff between calculator pages.

use std::sync::Arc;

use hoa::harvest::{HarvestEvent, MemoryStorage};
use serde_json::json;

use crate::common::{PREVIEW_PAGE, TestHarness, file_storage};

#[tokio::test]
async fn test_producer_to_harvest_page() {
    let harness = TestHarness::start().await;
    let (_dir, storage) = file_storage();

    let ec_page = harness.page_with_storage(PREVIEW_PAGE, storage.clone());
    assert!(ec_page.push_harvest(&json!({"calc": "ec", "target": 1.8})).is_complete());

    let ph_page = harness.page_with_storage("/acme/hoa/blob/main/calculators/ph/index.html", storage.clone());
    assert!(ph_page.push_harvest(&json!({"calc": "ph", "target": 6.0})).is_complete());

    let harvest_page = harness.page_with_storage("/acme/hoa/blob/main/calculators/harvest/index.html", storage);
    let payloads = harvest_page.harvest_payloads().into_value();
    assert_eq!(payloads.len(), 2);
    assert_eq!(payloads[0]["calc"], "ph");
    assert_eq!(payloads[1]["calc"], "ec");
}

#[tokio::test]
async fn test_capacity_holds_across_pages() {
    let harness = TestHarness::start().await;
    let storage = Arc::new(MemoryStorage::new());

    for n in 0..30 {
        let page = harness.page_with_storage(PREVIEW_PAGE, storage.clone());
        page.push_harvest(&json!({ "n": n }));
    }

    let page = harness.page_with_storage(PREVIEW_PAGE, storage);
    let payloads = page.harvest_payloads().into_value();
    assert_eq!(payloads.len(), 25);
    assert_eq!(payloads.first().unwrap()["n"], 29);
    assert_eq!(payloads.last().unwrap()["n"], 5);
}

#[tokio::test]
async fn test_harvest_page_clears_after_reading() {
    let harness = TestHarness::start().await;
    let page = harness.page(PREVIEW_PAGE);
    let mut events = page.harvest().subscribe();

    page.push_harvest(&json!("dehumidifier"));
    assert_eq!(events.recv().await.unwrap(), HarvestEvent::Updated);

    assert_eq!(page.harvest_payloads().into_value().len(), 1);
    assert!(page.harvest().clear().is_complete());
    assert_eq!(events.recv().await.unwrap(), HarvestEvent::Cleared);
    assert!(page.harvest_payloads().into_value().is_empty());
}

#[tokio::test]
async fn test_full_storage_does_not_break_producer() {
    let harness = TestHarness::start().await;
    let page = harness.page_with_storage(PREVIEW_PAGE, Arc::new(MemoryStorage::with_quota(16)));

    let outcome = page.push_harvest(&json!({"calc": "ventilation", "notes": "x".repeat(64)}));
    assert!(outcome.is_degraded());
    assert!(page.harvest_payloads().into_value().is_empty());
}

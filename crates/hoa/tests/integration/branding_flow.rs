//! Integration tests for report branding through a page session.

use hoa::branding::{DrawOp, PdfDocument, RecordingDocument};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{PREVIEW_PAGE, TestHarness, png};

async fn mount_assets(harness: &TestHarness, cactus_status: u16) {
    Mock::given(method("GET"))
        .and(path("/brand/logo.svg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            br#"<svg xmlns="http://www.w3.org/2000/svg"/>"#.to_vec(),
            "image/svg+xml",
        ))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/brand/nepenthes.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png(30, 60), "image/png"))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/brand/cactus.png"))
        .respond_with(ResponseTemplate::new(cactus_status).set_body_raw(png(60, 60), "image/png"))
        .expect(1)
        .mount(&harness.server)
        .await;
}

fn images_on(ops: &[DrawOp], page: usize) -> usize {
    ops.iter()
        .filter(|op| matches!(op, DrawOp::Image { page: p, .. } if *p == page))
        .count()
}

#[tokio::test]
async fn test_report_pages_are_branded() {
    let harness = TestHarness::start().await;
    mount_assets(&harness, 200).await;
    let page = harness.page(PREVIEW_PAGE);

    let outcome = page.decorate(RecordingDocument::a4()).await;
    assert!(outcome.is_complete());
    let decorated = outcome.into_value();
    assert_eq!(decorated.report.assets.logo.as_ref().map(|a| a.width), Some(1));
    assert_eq!(decorated.report.assets.cactus.as_ref().map(|a| a.width), Some(60));

    let mut doc = decorated.document;
    doc.text("Nutrient plan", 14.0, decorated.report.content_start);
    doc.add_page();

    let ops = doc.inner().ops();
    assert_eq!(images_on(ops, 1), 4);
    assert_eq!(images_on(ops, 2), 4);
    assert_eq!(
        doc.inner().texts(),
        vec!["Hydro Oasis", "Nutrient plan", "Hydro Oasis"]
    );
}

#[tokio::test]
async fn test_assets_fetched_once_per_page() {
    let harness = TestHarness::start().await;
    mount_assets(&harness, 200).await;
    let page = harness.page(PREVIEW_PAGE);

    let first = page.decorate(RecordingDocument::a4()).await;
    let second = page.decorate(RecordingDocument::a4()).await;

    assert!(first.is_complete());
    assert_eq!(first.value().report, second.value().report);
    assert_eq!(harness.requested_paths().await.len(), 3);
}

#[tokio::test]
async fn test_missing_watermark_asset_degrades() {
    let harness = TestHarness::start().await;
    mount_assets(&harness, 500).await;
    let page = harness.page(PREVIEW_PAGE);

    let outcome = page.decorate(RecordingDocument::a4().without_opacity()).await;
    assert_eq!(outcome.reason(), Some("brand assets unavailable: cactus"));

    let mut doc = outcome.into_value().document;
    doc.add_page();

    let ops = doc.inner().ops();
    // Logo and nepenthes only.
    assert_eq!(images_on(ops, 1), 2);
    assert_eq!(images_on(ops, 2), 2);
    assert!(!ops.iter().any(|op| matches!(op, DrawOp::SetOpacity { .. })));
}

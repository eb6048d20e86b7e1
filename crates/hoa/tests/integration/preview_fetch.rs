//! Integration tests for preview detection and mirrored fetching.

use hoa::core::{Error, PreviewContext};
use hoa::fetch::AssetPayload;
use hoa::{DataAsset, PageContext};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{PREVIEW_PAGE, TestHarness};

#[tokio::test]
async fn test_preview_page_detects_repository() {
    let harness = TestHarness::start().await;
    let page = harness.page(PREVIEW_PAGE);

    assert!(page.is_preview());
    assert!(page.session().detection().is_complete());
    assert_eq!(
        page.page_context(),
        &PageContext::Preview(PreviewContext::new("acme", "hoa", "main"))
    );
}

#[tokio::test]
async fn test_first_mirror_answers() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/acme/hoa/main/data/water_providers.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "Sydney Water"}])))
        .expect(1)
        .mount(&harness.server)
        .await;

    let page = harness.page(PREVIEW_PAGE);
    let payload = page.load_asset(DataAsset::WaterProviders).await.unwrap();

    assert!(matches!(payload, AssetPayload::Json(ref v) if v[0]["name"] == "Sydney Water"));
    assert_eq!(harness.requested_paths().await.len(), 1);
}

#[tokio::test]
async fn test_falls_back_to_second_mirror() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/cdn/acme/hoa@main/data/electricity_tariffs.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"peak": 0.42})))
        .mount(&harness.server)
        .await;

    let page = harness.page(PREVIEW_PAGE);
    let tariffs: Value = page
        .load_json(DataAsset::ElectricityTariffs.path())
        .await
        .unwrap();

    assert_eq!(tariffs["peak"], 0.42);
    assert_eq!(
        harness.requested_paths().await,
        vec![
            "/raw/acme/hoa/main/data/electricity_tariffs.json".to_string(),
            "/cdn/acme/hoa@main/data/electricity_tariffs.json".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_page_relative_path_is_last_resort() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/acme/hoa/blob/main/data/nutrient_presets.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"lettuce": 1.2})))
        .mount(&harness.server)
        .await;

    let page = harness.page(PREVIEW_PAGE);
    let presets: Value = page
        .load_json(DataAsset::NutrientPresets.path())
        .await
        .unwrap();

    assert_eq!(presets["lettuce"], 1.2);
    assert_eq!(harness.requested_paths().await.len(), 3);
}

#[tokio::test]
async fn test_exhausted_candidates_report_last_failure() {
    let harness = TestHarness::start().await;
    let page = harness.page(PREVIEW_PAGE);

    let err = page
        .load_json::<Value>(DataAsset::WaterProviders.path())
        .await
        .unwrap_err();

    assert!(
        matches!(err, Error::HttpStatus { ref target, status: 404 } if target == DataAsset::WaterProviders.path())
    );
    assert_eq!(harness.requested_paths().await.len(), 3);
}

#[tokio::test]
async fn test_nested_branch_skips_flat_only_mirror() {
    let harness = TestHarness::start().await;
    let page = harness.page("/acme/hoa/tree/feature/ph-drift/calculators/ph/index.html");

    assert_eq!(
        page.fetcher().candidates("../../data/x.json"),
        vec![
            harness.url("/raw/acme/hoa/feature/ph-drift/data/x.json"),
            "../../data/x.json".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_canonical_page_fetches_once() {
    let harness = TestHarness::start().await;
    let mut config = harness.config.clone();
    config.preview.host_patterns.clear();
    let page = harness.page_from(config, "/calculators/ec/index.html");

    assert!(!page.is_preview());
    assert!(page.load_text("../../data/missing.json").await.is_err());
    assert_eq!(harness.requested_paths().await, vec!["/data/missing.json".to_string()]);
}

#[tokio::test]
async fn test_recommendation_rendered_from_mirror() {
    let harness = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/raw/acme/hoa/main/Recommendations/ventilation.md"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("# Airflow\n- Inline fan\n- [Guide](https://hydro-oasis.com.au/vent)"),
        )
        .mount(&harness.server)
        .await;

    let page = harness.page(PREVIEW_PAGE);
    let html = page
        .load_recommendation(DataAsset::VentilationRecommendations)
        .await
        .unwrap();

    assert_eq!(
        html,
        "<h1>Airflow</h1><ul><li>Inline fan</li><li>\
         <a href=\"https://hydro-oasis.com.au/vent\" target=\"_blank\" rel=\"noopener\">Guide</a>\
         </li></ul>"
    );
}

#[tokio::test]
async fn test_json_asset_is_not_a_recommendation() {
    let harness = TestHarness::start().await;
    let page = harness.page(PREVIEW_PAGE);

    let err = page
        .load_recommendation(DataAsset::WaterProviders)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
    assert!(harness.requested_paths().await.is_empty());
}

//! Daft scraper walking a fake listing site.

mod helpers;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use helpers::spawn_server;
use housing_analyzer::analysis::{DEVELOPMENT_LAND_TAG, FIXER_UPPER_TAG};
use housing_analyzer::config::DaftConfig;
use housing_analyzer::models::SearchParams;
use housing_analyzer::scrapers::{DaftScraper, ListingSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const FIRST_PAGE: &str = r#"
<ul>
  <li data-testid="search-result-card_1"><a href="/for-sale/cottage/1">Cottage</a></li>
  <li data-testid="search-result-card_2"><a href="/for-sale/gone/2">Gone</a></li>
  <li data-testid="search-result-card_3"><a href="/for-sale/cottage/1">Cottage again</a></li>
</ul>
<a data-testid="next-button" aria-label="Next page" href="/results/2">Next</a>
"#;

const SECOND_PAGE: &str = r#"
<ul>
  <li data-testid="search-result-card_4"><a href="/for-sale/site/3">Site</a></li>
</ul>
"#;

const COTTAGE: &str = r#"
<h1 data-testid="title-block">Stone Cottage, Skibbereen</h1>
<strong data-testid="price">€150,000</strong>
<div data-testid="description"><p>In need of updating throughout.</p></div>
<p data-testid="property-type">Detached</p>
<span data-testid="ber-rating">F</span>
<div data-testid="features"><ul><li>Stove</li><li>Half acre</li></ul></div>
"#;

const SITE: &str = r#"
<h1 data-testid="title-block">0.8 Acre, Clonakilty</h1>
<strong data-testid="price">€90,000</strong>
<div data-testid="description"><p>Rural setting.</p></div>
<p data-testid="property-type">Site</p>
"#;

fn fake_daft() -> Router {
    Router::new()
        .route("/property-for-sale/cork", get(|| async { FIRST_PAGE }))
        .route("/results/2", get(|| async { SECOND_PAGE }))
        .route("/for-sale/cottage/1", get(|| async { COTTAGE }))
        .route("/for-sale/gone/2", get(|| async { StatusCode::NOT_FOUND }))
        .route("/for-sale/site/3", get(|| async { SITE }))
}

fn config(base_url: String, max_pages: u32) -> DaftConfig {
    DaftConfig {
        base_url,
        max_pages,
        page_delay_ms: 0,
        detail_delay_ms: 0,
        ..Default::default()
    }
}

fn cork() -> SearchParams {
    SearchParams {
        location: Some("Cork".to_string()),
        max_price: Some("200000".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn walks_pages_skipping_duplicates_and_failures() {
    let base = spawn_server(fake_daft()).await;
    let scraper = DaftScraper::new(config(base.clone(), 2)).unwrap();

    let properties = scraper.search(&cork()).await.unwrap();

    let titles: Vec<_> = properties.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Stone Cottage, Skibbereen", "0.8 Acre, Clonakilty"]);
    assert_eq!(properties[0].url, format!("{}/for-sale/cottage/1", base));
    assert_eq!(properties[0].price, "€150,000");
    assert_eq!(properties[0].analysis_tags, [FIXER_UPPER_TAG]);
    assert_eq!(properties[1].analysis_tags, [DEVELOPMENT_LAND_TAG]);
}

#[tokio::test]
async fn scraped_details_reach_the_listing() {
    let base = spawn_server(fake_daft()).await;
    let scraper = DaftScraper::new(config(base, 1)).unwrap();

    let properties = scraper.search(&cork()).await.unwrap();

    let cottage = &properties[0];
    assert_eq!(cottage.ber.as_deref(), Some("F"));
    assert_eq!(cottage.property_type.as_deref(), Some("Detached"));
    assert_eq!(cottage.features, ["Stove", "Half acre"]);
}

const REPEATED_CARD_PAGE: &str = r#"
<ul>
  <li data-testid="search-result-card_1"><a href="/for-sale/flaky/9">Flaky</a></li>
  <li data-testid="search-result-card_2"><a href="/for-sale/flaky/9">Flaky again</a></li>
</ul>
"#;

/// Fails the first detail request, then serves the cottage.
async fn flaky_listing(State(hits): State<Arc<AtomicUsize>>) -> Response {
    if hits.fetch_add(1, Ordering::SeqCst) == 0 {
        StatusCode::SERVICE_UNAVAILABLE.into_response()
    } else {
        COTTAGE.into_response()
    }
}

#[tokio::test]
async fn failed_listing_is_retried_by_a_later_card() {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/property-for-sale/cork", get(|| async { REPEATED_CARD_PAGE }))
        .route("/for-sale/flaky/9", get(flaky_listing))
        .with_state(hits.clone());
    let base = spawn_server(router).await;
    let scraper = DaftScraper::new(config(base, 1)).unwrap();

    let properties = scraper.search(&cork()).await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].title, "Stone Cottage, Skibbereen");
}

#[tokio::test]
async fn stops_at_max_pages() {
    let base = spawn_server(fake_daft()).await;
    let scraper = DaftScraper::new(config(base, 1)).unwrap();

    let properties = scraper.search(&cork()).await.unwrap();
    assert_eq!(properties.len(), 1);
}

#[tokio::test]
async fn unreachable_first_page_is_an_error() {
    let base = spawn_server(fake_daft()).await;
    let scraper = DaftScraper::new(config(base, 1)).unwrap();

    let params = SearchParams {
        location: Some("Leitrim".to_string()),
        ..Default::default()
    };
    assert!(scraper.search(&params).await.is_err());
}

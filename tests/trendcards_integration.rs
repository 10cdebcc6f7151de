//! trendcards Integration Tests
//!
//! Integration tests that verify the components work together:
//! 1. TrendingSource -> TrendingDashboard -> CardGrid flow
//! 2. TrendingDashboard -> ImageExporter export flow
//! 3. CoinGecko and logo adapters against a local HTTP server
//!
//! All tests are deterministic (no real network calls).

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trendcards::adapters::coingecko::CoinGeckoClient;
use trendcards::adapters::logo::ProxiedImageLoader;
use trendcards::application::TrendingDashboard;
use trendcards::domain::{palette, MarketRecord, Sparkline, TokenMarketData, TrendingCoin};
use trendcards::ports::mocks::{MockTrendingSource, SourceCall, StaticImageLoader};
use trendcards::ports::FetchError;
use trendcards::render::{CardGrid, CardRenderer, ExportOptions, FontSet, ImageExporter};

const SITE: &str = "https://www.coingecko.com";

// ============================================================================
// Test Fixtures
// ============================================================================

fn coin(id: &str, symbol: &str, rank: Option<u32>) -> TrendingCoin {
    TrendingCoin {
        id: id.to_string(),
        name: format!("{} Token", symbol.to_uppercase()),
        symbol: symbol.to_string(),
        market_cap_rank: rank,
        thumb: format!("https://assets.example.com/{}.png", id),
        price_btc: None,
    }
}

fn record(id: &str, price: f64, change: f64, series: Vec<f64>) -> MarketRecord {
    MarketRecord {
        id: id.to_string(),
        data: TokenMarketData {
            current_price: Some(price),
            price_change_percentage_24h: Some(change),
            sparkline_in_7d: Some(Sparkline { price: series }),
            market_cap: Some(price * 1_000_000.0),
            total_volume: Some(price * 10_000.0),
        },
    }
}

/// Three trending coins, the last one without a market record
fn trending_source() -> MockTrendingSource {
    MockTrendingSource::new()
        .with_coins(vec![
            coin("bitcoin", "btc", Some(1)),
            coin("pepe", "pepe", Some(42)),
            coin("fresh-launch", "new", None),
        ])
        .with_records(vec![
            record("pepe", 0.0000123, -4.2, vec![3.0, 2.0, 1.0]),
            record("bitcoin", 64_000.0, 1.5, vec![1.0, 2.0, 3.0]),
        ])
}

fn png_bytes(color: [u8; 4]) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba(color)));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

// ============================================================================
// Fetch -> Dashboard -> Cards
// ============================================================================

#[tokio::test]
async fn test_dashboard_to_card_grid() {
    let source = trending_source();
    let mut dashboard = TrendingDashboard::new(source.clone(), SITE);
    dashboard.load().await;

    assert_eq!(dashboard.state().name(), "ready");
    let ids: Vec<_> = dashboard.tokens().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["bitcoin", "pepe", "fresh-launch"]);

    // markets requested for exactly the trending ids, in order
    assert_eq!(
        source.get_calls(),
        vec![
            SourceCall::Trending,
            SourceCall::Markets(vec!["bitcoin".into(), "pepe".into(), "fresh-launch".into()]),
        ]
    );

    let renderer = CardRenderer::new(60, SITE).with_color(false);
    let out = CardGrid::new(renderer, 3).render(dashboard.tokens());

    assert!(out.starts_with("Trending Tokens on CoinGecko"));
    assert!(out.contains("│ BTC "));
    assert!(!out.contains("$BTC"));
    assert!(out.contains("$64000.00"));
    assert!(out.contains("▲ 1.50%"));
    assert!(out.contains("▼ 4.20%"));
    assert!(out.contains("no chart data"));
    assert!(out.contains("Rank: #-"));
    assert!(!out.contains("NaN"));
}

#[tokio::test]
async fn test_trending_failure_never_reaches_ready() {
    let source = MockTrendingSource::new()
        .failing_trending(FetchError::TrendingUnavailable { status: 500 });
    let mut dashboard = TrendingDashboard::new(source.clone(), SITE);

    dashboard.load().await;

    assert_eq!(
        dashboard.state().error(),
        Some("Error fetching data: Failed to fetch trending tokens")
    );
    assert!(dashboard.tokens().is_empty());
    // the markets request is never made
    assert_eq!(source.get_calls(), vec![SourceCall::Trending]);
}

#[tokio::test]
async fn test_markets_failure_is_terminal() {
    let source = trending_source().failing_markets(FetchError::PricesUnavailable { status: 429 });
    let mut dashboard = TrendingDashboard::new(source, SITE);

    dashboard.load().await;
    dashboard.load().await;

    assert_eq!(
        dashboard.state().error(),
        Some("Error fetching data: Failed to fetch token prices")
    );
}

// ============================================================================
// Dashboard -> Export
// ============================================================================

#[tokio::test]
async fn test_export_selected_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = TrendingDashboard::new(trending_source(), SITE);
    dashboard.load().await;

    let queries = vec!["BTC".to_string(), "fresh-launch".to_string(), "doge".to_string()];
    let (tokens, missing) = dashboard.select(&queries);
    assert_eq!(missing, vec!["doge"]);

    let loader = StaticImageLoader::solid(16, [0, 0, 255, 255]);
    let options = ExportOptions { output_dir: dir.path().to_path_buf(), ..Default::default() };
    let mut exporter = ImageExporter::new(loader.clone(), FontSet::empty(), options);

    let mut written = Vec::new();
    for token in tokens {
        written.push(exporter.export(token).await.unwrap());
    }

    let names: Vec<_> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["btc_info.png", "new_info.png"]);
    assert_eq!(loader.requested_urls().len(), 2);

    let btc = image::open(&written[0]).unwrap().to_rgba8();
    assert_eq!(btc.dimensions(), (1200, 630));
    // logo
    assert_eq!(btc.get_pixel(110, 110).0[..3], [0, 0, 255]);
    // rising chart ends at the top-right of the band
    let up = palette::UP;
    assert_eq!(btc.get_pixel(1140, 430).0[..3], [up.r, up.g, up.b]);
}

// ============================================================================
// HTTP adapters
// ============================================================================

#[tokio::test]
async fn test_coingecko_pipeline_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/trending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "coins": [
                { "item": { "id": "pepe", "name": "Pepe", "symbol": "pepe",
                            "market_cap_rank": 42, "thumb": format!("{}/logo/pepe.png", server.uri()) } },
                { "item": { "id": "unlisted", "name": "Unlisted", "symbol": "unl",
                            "market_cap_rank": null, "thumb": "" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/coins/markets"))
        .and(query_param("ids", "pepe,unlisted"))
        .and(query_param("sparkline", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "pepe", "current_price": 0.5, "price_change_percentage_24h": -0.01,
              "market_cap": 1234567.0, "total_volume": 890.0,
              "sparkline_in_7d": { "price": [1.0, 2.0, 3.0] } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/logo/pepe.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes([255, 0, 0, 255])))
        .mount(&server)
        .await;

    let client = CoinGeckoClient::new().unwrap().with_base_url(server.uri());
    let mut dashboard = TrendingDashboard::new(client, SITE);
    dashboard.load().await;

    let pepe = dashboard.find("PEPE").unwrap();
    assert_eq!(pepe.data.current_price, Some(0.5));
    assert_eq!(dashboard.profile_url(pepe), "https://www.coingecko.com/en/coins/pepe");
    assert!(dashboard.find("unlisted").unwrap().data.is_empty());

    let renderer = CardRenderer::new(60, SITE).with_color(false);
    let card = renderer.render(pepe).join("\n");
    assert!(card.contains("▼ 0.01%"));
    assert!(card.contains("Market Cap: $1,234,567"));

    let dir = tempfile::tempdir().unwrap();
    let loader = ProxiedImageLoader::new(std::time::Duration::from_secs(5)).unwrap();
    let options = ExportOptions { output_dir: dir.path().to_path_buf(), ..Default::default() };
    let mut exporter = ImageExporter::new(loader, FontSet::empty(), options);

    let path = exporter.export(pepe).await.unwrap();
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(110, 110).0[..3], [255, 0, 0]);
    let down = palette::DOWN;
    assert_eq!(img.get_pixel(60, 580).0[..3], [down.r, down.g, down.b]);

    // a coin with no logo still exports
    let unlisted = dashboard.find("unl").unwrap();
    assert!(exporter.export(unlisted).await.unwrap().ends_with("unl_info.png"));
}

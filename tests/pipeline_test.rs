mod common;

use chrono::NaiveDate;
use storeview::application::engine::DashboardEngine;
use storeview::domain::ports::TableSource;
use storeview::infrastructure::local::FileTableSource;
use storeview::interfaces::json::view_writer::ViewWriter;

const MAIN_ROWS: [[&str; 14]; 4] = [
    [
        "o1", "c1", "u1", "SP", "delivered", "5", "toys", "100.00",
        "2018-01-01 08:00:00", "2018-01-01 10:00:00", "", "", "", "",
    ],
    [
        "o2", "c2", "u2", "SP", "delivered", "4", "beds", "50.00",
        "2018-01-01 09:00:00", "2018-01-01 11:00:00", "", "", "", "",
    ],
    [
        "o3", "c3", "u3", "RJ", "shipped", "3", "art", "30.00",
        "2018-01-02 08:00:00", "2018-01-02 09:30:00", "", "", "", "",
    ],
    [
        "o4", "c4", "u4", "MG", "canceled", "1", "pets", "15.50",
        "2018-01-03 10:00:00", "", "", "", "", "",
    ],
];

const GEO_ROWS: [[&str; 3]; 3] = [
    ["u1", "-46.63", "-23.55"],
    ["u1", "-46.60", "-23.50"],
    ["u2", "-43.17", "-22.91"],
];

async fn engine_from_tempdir(dir: &tempfile::TempDir) -> DashboardEngine {
    let main_path = dir.path().join("main.csv");
    let geo_path = dir.path().join("geo.csv");
    common::write_main_csv(&main_path, &MAIN_ROWS).unwrap();
    common::write_geo_csv(&geo_path, &GEO_ROWS).unwrap();

    let source = FileTableSource::new(main_path, geo_path);
    DashboardEngine::new(
        source.fetch_transactions().await.unwrap(),
        source.fetch_geolocation().await.unwrap(),
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn serialize(engine: &DashboardEngine, range: Option<storeview::domain::aggregates::DateRange>) -> String {
    let view = engine.view(range, None);
    let mut buffer = Vec::new();
    ViewWriter::new(&mut buffer).write_view(&view).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[tokio::test]
async fn test_full_pipeline_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_from_tempdir(&dir).await;
    let range = engine.resolve_range(None, None);

    let first = serialize(&engine, range);
    let second = serialize(&engine, range);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_full_range_equals_explicit_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_from_tempdir(&dir).await;

    let defaulted = engine.resolve_range(None, None);
    let explicit = engine.resolve_range(Some(date(2018, 1, 1)), Some(date(2018, 1, 2)));
    assert_eq!(defaulted, explicit);
    assert_eq!(serialize(&engine, defaulted), serialize(&engine, explicit));
}

#[tokio::test]
async fn test_geo_points_are_deduplicated_into_the_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_from_tempdir(&dir).await;
    let view = engine.view(None, None);

    // u1 appears twice in geo.csv but once in the overlay.
    assert_eq!(view.map.points.len(), 2);
    assert_eq!(view.map.points[0].customer_unique_id, "u1");
    assert_eq!(view.map.points[0].lng, -46.63);
}

#[tokio::test]
async fn test_disjoint_window_degrades_to_placeholder_view() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine_from_tempdir(&dir).await;

    let range = engine.resolve_range(Some(date(2020, 1, 1)), Some(date(2020, 2, 1)));
    assert_eq!(range, None);

    let view = engine.view(range, None);
    assert!(view.daily_orders.series.is_empty());
    assert_eq!(view.daily_orders.total_orders, 0);
    assert_eq!(view.review_scores.mean_score, None);
    assert!(view.region_stats.states.is_empty());
    // The picker bounds still reflect the data.
    assert_eq!(view.date_window.min, Some(date(2018, 1, 1)));
    assert_eq!(view.date_window.max, Some(date(2018, 1, 2)));
}

#[tokio::test]
async fn test_empty_table_yields_empty_view_without_error() {
    let dir = tempfile::tempdir().unwrap();
    let main_path = dir.path().join("main.csv");
    let geo_path = dir.path().join("geo.csv");
    common::write_main_csv(&main_path, &[]).unwrap();
    common::write_geo_csv(&geo_path, &[]).unwrap();

    let source = FileTableSource::new(main_path, geo_path);
    let engine = DashboardEngine::new(
        source.fetch_transactions().await.unwrap(),
        source.fetch_geolocation().await.unwrap(),
    );

    assert_eq!(engine.bounds(), None);
    assert_eq!(engine.resolve_range(None, None), None);

    let view = engine.view(None, None);
    assert_eq!(view.date_window.min, None);
    assert!(view.daily_orders.series.is_empty());
    assert!(view.map.points.is_empty());
}

use chrono::NaiveDate;
use heatgrid_core::{
    DecodedEvents, DisplayLocale, EventFeed, EventRecord, FallbackPolicy, FeedError, FeedResult,
    GridSource, HeatmapService, GRID_CELLS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

struct StaticFeed(Vec<EventRecord>);

impl EventFeed for StaticFeed {
    fn source_name(&self) -> &'static str {
        "static"
    }

    async fn fetch_events(&self) -> FeedResult<DecodedEvents> {
        Ok(DecodedEvents {
            records: self.0.clone(),
            skipped: 0,
        })
    }
}

struct FailingFeed;

impl EventFeed for FailingFeed {
    fn source_name(&self) -> &'static str {
        "failing"
    }

    async fn fetch_events(&self) -> FeedResult<DecodedEvents> {
        Err(FeedError::Status {
            status: 503,
            body: "unavailable".to_string(),
        })
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
}

#[tokio::test]
async fn live_feed_builds_from_records() {
    let created_at = "2024-01-10T12:00:00Z".parse().unwrap();
    let feed = StaticFeed(vec![
        EventRecord::new("PushEvent", created_at),
        EventRecord::new("CommitStatusEvent", created_at),
    ]);
    let service = HeatmapService::new(feed, DisplayLocale::ZhCn, FallbackPolicy::Synthetic);

    let outcome = service.build(today()).await;
    assert!(outcome.source.is_live());
    assert_eq!(
        outcome.source,
        GridSource::Feed {
            feed: "static".to_string(),
            records: 2,
            skipped: 0,
        }
    );
    assert_eq!(outcome.grid.total(), 1);
}

#[tokio::test]
async fn synthetic_fallback_fills_trailing_year() {
    let service = HeatmapService::new(FailingFeed, DisplayLocale::Iso, FallbackPolicy::Synthetic);
    let outcome = service
        .build_with_rng(today(), &mut StdRng::seed_from_u64(3))
        .await;

    match &outcome.source {
        GridSource::Synthetic { reason } => assert!(reason.contains("503")),
        other => panic!("unexpected source: {other:?}"),
    }
    assert_eq!(outcome.grid.cells().count(), GRID_CELLS);
    assert!(outcome.grid.cells().all(|cell| cell.count < 5));

    let window_start = today() - chrono::Days::new(364);
    assert!(outcome
        .grid
        .cells()
        .filter(|cell| cell.date < window_start || cell.date > today())
        .all(|cell| cell.count == 0));
}

#[tokio::test]
async fn synthetic_fallback_is_repeatable_with_same_seed() {
    let service = HeatmapService::new(FailingFeed, DisplayLocale::Iso, FallbackPolicy::Synthetic);
    let first = service
        .build_with_rng(today(), &mut StdRng::seed_from_u64(11))
        .await;
    let second = service
        .build_with_rng(today(), &mut StdRng::seed_from_u64(11))
        .await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_fallback_yields_zero_grid() {
    let service = HeatmapService::new(FailingFeed, DisplayLocale::Iso, FallbackPolicy::Empty);
    let outcome = service.build(today()).await;

    assert!(matches!(outcome.source, GridSource::Empty { .. }));
    assert!(!outcome.source.is_live());
    assert_eq!(outcome.grid.total(), 0);
    assert_eq!(outcome.grid.cells().count(), GRID_CELLS);
}

#[tokio::test]
async fn outcome_serializes_source_tag() {
    let service = HeatmapService::new(FailingFeed, DisplayLocale::Iso, FallbackPolicy::Empty);
    let outcome = service.build(today()).await;
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["source"]["kind"], "empty");
    assert_eq!(json["grid"]["weeks"].as_array().unwrap().len(), 53);
}

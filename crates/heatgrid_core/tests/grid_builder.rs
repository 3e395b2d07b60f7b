use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use heatgrid_core::{
    build_grid, build_grid_from_map, clamp_anchor, grid_start, ContributionLevel,
    ContributionMap, DisplayLocale, EventRecord, DAYS_PER_WEEK, GRID_CELLS, GRID_WEEKS,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn event(kind: &str, created_at: &str) -> EventRecord {
    let created_at = DateTime::parse_from_rfc3339(created_at)
        .unwrap()
        .with_timezone(&Utc);
    EventRecord::new(kind, created_at)
}

fn worked_example_events() -> Vec<EventRecord> {
    vec![
        event("PushEvent", "2024-01-10T12:00:00Z"),
        event("PushEvent", "2024-01-10T18:00:00Z"),
        event("WatchEvent", "2024-01-11T00:00:00Z"),
    ]
}

#[test]
fn grid_always_has_53_sunday_first_columns() {
    for today in [date(2024, 1, 20), date(2024, 2, 29), date(2023, 12, 31)] {
        let grid = build_grid(&[], today, DisplayLocale::ZhCn);

        assert_eq!(grid.weeks().len(), GRID_WEEKS);
        assert_eq!(grid.cells().count(), GRID_CELLS);
        for week in grid.weeks() {
            assert_eq!(week.days().len(), DAYS_PER_WEEK);
            assert_eq!(week.first_date().weekday(), Weekday::Sun);
        }
        assert_eq!(grid.start().weekday(), Weekday::Sun);
        assert_eq!(grid.end().weekday(), Weekday::Sat);
        assert!(grid.contains(today));
        assert!(grid.contains(today - chrono::Days::new(364)));
    }
}

#[test]
fn cells_are_consecutive_days() {
    let grid = build_grid(&[], date(2024, 6, 15), DisplayLocale::Iso);
    let dates: Vec<NaiveDate> = grid.cells().map(|cell| cell.date).collect();

    assert_eq!(dates[0], date(2023, 6, 11));
    assert_eq!(dates[dates.len() - 1], date(2024, 6, 15));
    assert!(dates.windows(2).all(|pair| pair[0].succ_opt() == Some(pair[1])));
}

#[test]
fn worked_example_counts_land_on_their_cells() {
    let events = worked_example_events();
    let map = ContributionMap::from_events(&events);
    assert_eq!(
        serde_json::to_value(&map).unwrap(),
        serde_json::json!({"2024-01-10": 2, "2024-01-11": 1})
    );

    let grid = build_grid(&events, date(2024, 1, 20), DisplayLocale::ZhCn);
    assert_eq!(grid.cell(date(2024, 1, 10)).unwrap().count, 2);
    assert_eq!(grid.cell(date(2024, 1, 11)).unwrap().count, 1);
    assert_eq!(grid.total(), 3);
    assert_eq!(grid.active_days(), 2);
    assert_eq!(grid.cell(date(2024, 1, 10)).unwrap().display_date, "2024/1/10");
}

#[test]
fn only_allow_listed_kinds_are_counted() {
    let events = vec![
        event("ForkEvent", "2024-01-10T12:00:00Z"),
        event("CommitStatusEvent", "2024-01-10T12:00:00Z"),
        event("SponsorshipEvent", "2024-01-10T13:00:00Z"),
        event("GollumEvent", "2024-01-12T09:00:00Z"),
    ];
    let grid = build_grid(&events, date(2024, 1, 20), DisplayLocale::Iso);

    assert_eq!(grid.cell(date(2024, 1, 10)).unwrap().count, 1);
    assert_eq!(grid.cell(date(2024, 1, 12)).unwrap().count, 1);
    assert_eq!(grid.total(), 2);
}

#[test]
fn out_of_range_events_are_excluded_from_the_total() {
    let events = vec![
        event("PushEvent", "2023-01-14T23:59:59Z"),
        event("PushEvent", "2023-01-15T00:00:00Z"),
        event("PushEvent", "2024-01-20T23:59:59Z"),
        event("PushEvent", "2024-01-21T00:00:00Z"),
    ];
    let grid = build_grid(&events, date(2024, 1, 20), DisplayLocale::Iso);

    assert_eq!(grid.start(), date(2023, 1, 15));
    assert_eq!(grid.end(), date(2024, 1, 20));
    let in_range = events
        .iter()
        .filter(|event| grid.contains(event.utc_date()))
        .count() as u64;
    assert_eq!(in_range, 2);
    assert_eq!(grid.total(), in_range);
}

#[test]
fn trailing_padding_days_after_today_are_still_emitted() {
    let today = date(2024, 1, 17);
    let events = vec![event("PushEvent", "2024-01-19T08:00:00Z")];
    let grid = build_grid(&events, today, DisplayLocale::Iso);

    assert_eq!(grid.end(), date(2024, 1, 20));
    assert_eq!(grid.cells().count(), GRID_CELLS);
    assert_eq!(grid.cell(date(2024, 1, 19)).unwrap().count, 1);
}

#[test]
fn calendar_limit_anchors_still_build_full_grids() {
    for today in [NaiveDate::MIN, NaiveDate::MAX, NaiveDate::MAX.pred_opt().unwrap()] {
        let grid = build_grid(&[], today, DisplayLocale::ZhCn);
        assert_eq!(grid.cells().count(), GRID_CELLS);
        assert_eq!(grid.start().weekday(), Weekday::Sun);
        let dates: Vec<NaiveDate> = grid.cells().map(|cell| cell.date).collect();
        assert!(dates.windows(2).all(|pair| pair[0].succ_opt() == Some(pair[1])));
    }

    let anchor = clamp_anchor(NaiveDate::MAX);
    assert_eq!(
        build_grid(&[], NaiveDate::MAX, DisplayLocale::Iso),
        build_grid(&[], anchor, DisplayLocale::Iso)
    );
    assert!(grid_start(NaiveDate::MAX).is_none());
}

#[test]
fn building_twice_gives_identical_grids() {
    let events = worked_example_events();
    let today = date(2024, 1, 20);
    assert_eq!(
        build_grid(&events, today, DisplayLocale::ZhCn),
        build_grid(&events, today, DisplayLocale::ZhCn)
    );
}

#[test]
fn levels_follow_cell_counts() {
    let today = date(2024, 1, 20);
    let map: ContributionMap = [
        (date(2024, 1, 1), 0),
        (date(2024, 1, 2), 2),
        (date(2024, 1, 3), 4),
        (date(2024, 1, 4), 6),
        (date(2024, 1, 5), 10),
    ]
    .into_iter()
    .collect();
    let grid = build_grid_from_map(&map, today, DisplayLocale::Iso);

    let level = |d: u32| grid.cell(date(2024, 1, d)).unwrap().level();
    assert_eq!(level(1), ContributionLevel::Empty);
    assert_eq!(level(2), ContributionLevel::Low);
    assert_eq!(level(3), ContributionLevel::Medium);
    assert_eq!(level(4), ContributionLevel::High);
    assert_eq!(level(5), ContributionLevel::Max);
    assert_eq!(grid.max_count(), 10);
}

#[test]
fn grid_serializes_as_week_arrays_of_cells() {
    let grid = build_grid(&worked_example_events(), date(2024, 1, 20), DisplayLocale::ZhCn);
    let json = serde_json::to_value(&grid).unwrap();

    assert_eq!(json["start"], "2023-01-15");
    assert_eq!(json["end"], "2024-01-20");
    let weeks = json["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 53);
    assert_eq!(weeks[0].as_array().unwrap().len(), 7);
    assert_eq!(
        weeks[0][0],
        serde_json::json!({"date": "2023-01-15", "count": 0, "displayDate": "2023/1/15"})
    );
}

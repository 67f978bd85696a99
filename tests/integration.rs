// SPDX-License-Identifier: MPL-2.0
use iced_calendar::app::persisted_state::{FileStore, KeyValueStore};
use iced_calendar::app::persistence::{ZoomPersistence, UNIFIED_HEIGHT_KEY};
use iced_calendar::config::WeekStart;
use iced_calendar::domain::calendar::CalendarMonth;
use iced_calendar::ui::calendar::component::{Effect, Message, State};
use iced_calendar::ui::state::{DisplayMode, ScrollSample, UnifiedHeight};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn date(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn month(year: i32, month0: u32) -> CalendarMonth {
    CalendarMonth::new(year, month0).expect("valid month")
}

fn calendar_on(today: chrono::NaiveDate) -> State {
    let mut state = State::new(today, None, WeekStart::Sunday, true);
    state.handle_message(Message::ZoomLoaded(None));
    state
}

/// Runs one drag through the given offsets and returns the release effect.
fn drag(
    state: &mut State,
    offsets: &[f32],
    content_height: f32,
    viewport_height: f32,
    now: Instant,
) -> Effect {
    state.handle_message_at(Message::DragStarted, now);
    for &offset in offsets {
        state.handle_message_at(
            Message::ScrollSampled(ScrollSample::new(offset, content_height, viewport_height)),
            now,
        );
    }
    state.handle_message_at(Message::DragEnded, now).0
}

/// Feeds frame ticks until the settle spring stops, returning the persisted value.
fn settle(state: &mut State, start: Instant) -> Option<UnifiedHeight> {
    let mut now = start;
    for _ in 0..500 {
        if !state.needs_ticks() {
            break;
        }
        now += Duration::from_millis(16);
        if let (Effect::PersistZoom(height), _) = state.handle_message_at(Message::Tick(now), now) {
            return Some(height);
        }
    }
    None
}

#[test]
fn pinch_released_near_stacked_threshold_commits_64() {
    for released_at in [62.0, 66.0] {
        let start = Instant::now();
        let mut state = calendar_on(date(2024, 6, 9));

        state.handle_message_at(Message::PinchStarted, start);
        state.handle_message_at(Message::PinchChanged(released_at / 64.0), start);
        state.handle_message_at(Message::PinchEnded, start + Duration::from_millis(1));

        let committed = settle(&mut state, start).expect("settle should persist");
        assert_eq!(committed.value(), 64.0, "released at {released_at}");
        assert_eq!(state.display().mode, DisplayMode::Stacked);
    }
}

#[test]
fn pulling_past_top_in_january_pages_to_previous_december() {
    let now = Instant::now();
    let mut state = calendar_on(date(2025, 1, 20));

    let effect = drag(&mut state, &[0.0, -45.0, -90.0], 2000.0, 800.0, now);

    assert_eq!(effect, Effect::MonthChanged(month(2024, 11)));
    assert_eq!(state.calendar().selected(), date(2024, 12, 1));
}

#[test]
fn short_content_needs_full_threshold_for_next_month() {
    let now = Instant::now();
    let mut state = calendar_on(date(2024, 6, 9));

    let effect = drag(&mut state, &[0.0, 50.0], 400.0, 800.0, now);
    assert_eq!(effect, Effect::None);
    assert_eq!(state.calendar().visible(), month(2024, 5));

    let effect = drag(&mut state, &[0.0, 50.0, 90.0], 400.0, 800.0, now);
    assert_eq!(effect, Effect::MonthChanged(month(2024, 6)));
}

#[test]
fn second_overscroll_within_lock_window_is_ignored() {
    let start = Instant::now();
    let mut state = calendar_on(date(2024, 6, 9));

    let first = drag(&mut state, &[1300.0], 2000.0, 800.0, start);
    assert_eq!(first, Effect::MonthChanged(month(2024, 6)));

    let second = drag(
        &mut state,
        &[1300.0],
        2000.0,
        800.0,
        start + Duration::from_millis(400),
    );
    assert_eq!(second, Effect::None);
    assert_eq!(state.calendar().visible(), month(2024, 6));

    let later = start + Duration::from_millis(650);
    state.handle_message_at(Message::Tick(later), later);
    let third = drag(&mut state, &[1300.0], 2000.0, 800.0, later);
    assert_eq!(third, Effect::MonthChanged(month(2024, 7)));
}

#[test]
fn zoom_stays_live_during_month_transition() {
    let start = Instant::now();
    let mut state = calendar_on(date(2024, 6, 9));
    drag(&mut state, &[-100.0], 2000.0, 800.0, start);
    assert!(state.is_transition_locked(start));

    let (effect, _) = state.handle_message_at(Message::SelectMode(DisplayMode::Detailed), start);
    assert!(matches!(effect, Effect::ZoomReleased { mode_changed: true, .. }));
    assert_eq!(state.display().mode, DisplayMode::Detailed);
}

#[tokio::test]
async fn zoom_level_survives_restart() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("state.cbor");

    let mut persistence = ZoomPersistence::new(Arc::new(FileStore::at(&path)));
    assert_eq!(persistence.load().await, None);

    let job = persistence
        .save(UnifiedHeight::new(112.0))
        .expect("new value should be written");
    job.await;

    let reopened = ZoomPersistence::new(Arc::new(FileStore::at(&path)));
    let restored = reopened.load().await;
    assert_eq!(restored, Some(UnifiedHeight::new(112.0)));

    let mut state = State::new(date(2024, 6, 9), None, WeekStart::Monday, true);
    state.handle_message(Message::ZoomLoaded(restored));
    assert_eq!(state.display().mode, DisplayMode::Detailed);
}

#[tokio::test]
async fn out_of_range_stored_zoom_falls_back_to_default() {
    let dir = tempdir().expect("failed to create temp dir");
    let store = Arc::new(FileStore::at(dir.path().join("state.cbor")));
    store
        .set(UNIFIED_HEIGHT_KEY, "500".to_string())
        .await
        .expect("write should succeed");

    let persistence = ZoomPersistence::new(store);
    let restored = persistence.load().await;
    assert_eq!(restored, None);

    let mut state = State::new(date(2024, 6, 9), None, WeekStart::Sunday, true);
    state.handle_message(Message::ZoomLoaded(restored));
    assert_eq!(state.display().height.value(), 64.0);
}

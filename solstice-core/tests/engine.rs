//! End-to-end engine behavior with fake collaborators

use jiff::tz::{self, TimeZone};
use jiff::Timestamp;
use solstice_core::config::{Color, FaceConfig, SUNSHINE_BLUE, SUNSHINE_DARK_BLUE};
use solstice_core::layout::{DrawOp, Frame, Paint, TextRole};
use solstice_core::state::{FaceMode, TapKind};
use solstice_core::traits::{
    Clock, IconError, IconSource, ImageHandle, RenderError, RenderSink, Size, SyncChannel,
    TextMeasure,
};
use solstice_core::weather::{ConditionArt, LinkState};
use solstice_core::FaceEngine;
use solstice_protocol::{ChangeEvent, DataItem, DataPath, NodeId, PayloadKeys, SyncEvent};

const CANVAS: Size = Size::new(320, 320);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Connect,
    Disconnect,
    AddListener(String),
    RemoveListener(String),
    LocalNode,
    Fetch(String),
}

#[derive(Default)]
struct FakeSync {
    calls: Vec<Call>,
}

impl SyncChannel for FakeSync {
    fn connect(&mut self) {
        self.calls.push(Call::Connect);
    }
    fn disconnect(&mut self) {
        self.calls.push(Call::Disconnect);
    }
    fn add_listener(&mut self, path: &DataPath) {
        self.calls.push(Call::AddListener(path.as_str().into()));
    }
    fn remove_listener(&mut self, path: &DataPath) {
        self.calls.push(Call::RemoveListener(path.as_str().into()));
    }
    fn request_local_node(&mut self) {
        self.calls.push(Call::LocalNode);
    }
    fn fetch_current(&mut self, path: &DataPath) {
        self.calls.push(Call::Fetch(path.as_str().into()));
    }
}

#[derive(Default)]
struct FakeIcons {
    fail: bool,
    loads: usize,
}

impl IconSource for FakeIcons {
    fn load(&mut self, art: ConditionArt, size: u16) -> Result<ImageHandle, IconError> {
        self.loads += 1;
        if self.fail {
            return Err(IconError::Missing);
        }
        Ok(ImageHandle {
            art,
            width: size,
            height: size,
        })
    }
}

struct FakeClock {
    now_ms: i64,
    zone: TimeZone,
}

impl FakeClock {
    fn at(rfc3339: &str) -> Self {
        let ts: Timestamp = rfc3339.parse().unwrap();
        Self {
            now_ms: ts.as_millisecond(),
            zone: TimeZone::UTC,
        }
    }

    fn advance(&mut self, ms: i64) {
        self.now_ms += ms;
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millisecond(self.now_ms).unwrap()
    }

    fn time_zone(&self) -> TimeZone {
        self.zone.clone()
    }
}

/// Every character is `size / 2` wide
struct HalfEm;

impl TextMeasure for HalfEm {
    fn text_width(&self, text: &str, paint: &Paint) -> f32 {
        text.chars().count() as f32 * paint.size / 2.0
    }
}

#[derive(Default)]
struct RecordingSink {
    frames: Vec<Frame>,
}

impl RenderSink for RecordingSink {
    fn render(&mut self, frame: &Frame, _size: Size) -> Result<(), RenderError> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

type Engine = FaceEngine<FakeSync, FakeIcons, FakeClock>;

fn engine() -> Engine {
    FaceEngine::new(
        FaceConfig::default(),
        FakeSync::default(),
        FakeIcons::default(),
        FakeClock::at("2017-02-13T14:05:00.250Z"),
    )
}

fn weather_item(condition: i32, hi: &str, low: &str) -> DataItem {
    let map = PayloadKeys::default()
        .weather_map(condition, hi, low, "Clear", "F")
        .unwrap();
    DataItem::from_map(DataPath::new("/weather").unwrap(), &map).unwrap()
}

fn changed(condition: i32, hi: &str, low: &str) -> SyncEvent {
    SyncEvent::DataChanged(ChangeEvent::changed(weather_item(condition, hi, low)))
}

/// Visible, connected and local node resolved
fn connected_engine() -> Engine {
    let mut engine = engine();
    engine.on_visibility_changed(true);
    engine.on_sync_event(SyncEvent::Connected);
    engine.on_sync_event(SyncEvent::LocalNode(NodeId::try_from("watch").unwrap()));
    engine.take_redraw();
    engine
}

#[test]
fn test_becoming_visible_connects_and_arms_tick() {
    let mut engine = engine();
    engine.on_visibility_changed(true);

    assert_eq!(engine.sync().calls, [Call::Connect]);
    assert_eq!(engine.pipeline().link(), LinkState::Connecting);
    assert!(engine.take_redraw());

    let tick = engine.pending_tick().unwrap();
    assert_eq!(tick.due_at_ms % 1000, 0);
    assert_eq!(tick.due_at_ms - engine.clock().now_ms, 750);
}

#[test]
fn test_initial_fetch_sequence() {
    let mut engine = connected_engine();

    assert_eq!(
        engine.sync().calls,
        [
            Call::Connect,
            Call::AddListener("/weather".into()),
            Call::LocalNode,
            Call::Fetch("/weather".into()),
        ]
    );

    let before = engine.redraw_requests();
    engine.on_sync_event(SyncEvent::Fetched(Some(weather_item(800, "50", "34"))));

    let weather = engine.weather().unwrap();
    assert_eq!(weather.temperature_text().as_str(), "50 | 34");
    assert_eq!(weather.icon.map(|i| i.art), Some(ConditionArt::Clear));
    assert_eq!(engine.redraw_requests(), before + 1);
}

#[test]
fn test_no_item_yet_keeps_face_empty() {
    let mut engine = connected_engine();
    engine.on_sync_event(SyncEvent::Fetched(None));

    assert!(engine.weather().is_none());
    assert!(!engine.redraw_pending());
}

#[test]
fn test_last_write_wins_and_delete_keeps_snapshot() {
    let mut engine = connected_engine();

    engine.on_sync_event(changed(500, "50", "34"));
    engine.on_sync_event(changed(800, "61", "40"));
    engine.on_sync_event(SyncEvent::DataChanged(ChangeEvent::deleted(
        DataPath::new("/weather").unwrap(),
    )));

    let weather = engine.weather().unwrap();
    assert_eq!(weather.condition_id, 800);
    assert_eq!(weather.temperature_text().as_str(), "61 | 40");
}

#[test]
fn test_malformed_update_keeps_previous() {
    let mut engine = connected_engine();
    engine.on_sync_event(changed(800, "50", "34"));
    engine.take_redraw();

    let garbage = DataItem::new(DataPath::new("/weather").unwrap(), &[0xFF, 0xFF]).unwrap();
    engine.on_sync_event(SyncEvent::DataChanged(ChangeEvent::changed(garbage)));

    assert_eq!(engine.weather().unwrap().high.as_str(), "50");
    assert!(!engine.take_redraw());
}

#[test]
fn test_icon_failure_renders_text_only() {
    let mut engine = connected_engine();
    engine.icons_mut().fail = true;
    engine.on_sync_event(changed(800, "50", "34"));

    let frame = engine.compose(&HalfEm, CANVAS);
    assert_eq!(frame.text_of(TextRole::Temperature), Some("50 | 34"));
    assert!(frame.image().is_none());
}

#[test]
fn test_unknown_condition_skips_load() {
    let mut engine = connected_engine();
    engine.on_sync_event(changed(42, "50", "34"));

    assert_eq!(engine.weather().unwrap().icon, None);
    assert_eq!(engine.icons_mut().loads, 0);
}

#[test]
fn test_interactive_frame() {
    let mut engine = connected_engine();
    engine.on_sync_event(changed(800, "50", "34"));

    let frame = engine.compose(&HalfEm, CANVAS);
    assert_eq!(frame.background(), Some(SUNSHINE_BLUE));
    assert_eq!(frame.text_of(TextRole::Time), Some("14:05"));
    assert_eq!(frame.text_of(TextRole::Date), Some("MON, FEB 13, 2017"));
    assert_eq!(frame.text_of(TextRole::Temperature), Some("50 | 34"));

    let Some(DrawOp::Image { image, .. }) = frame.image() else {
        panic!("expected weather art");
    };
    assert_eq!(image.width, engine.config().icon_size);
}

#[test]
fn test_low_bit_ambient() {
    let mut engine = connected_engine();
    engine.on_sync_event(changed(800, "50", "34"));
    engine.on_properties_changed(true);
    engine.on_ambient_mode_changed(true);

    assert_eq!(engine.display().mode(), FaceMode::Ambient);
    assert!(engine.pending_tick().is_none());
    assert!(!engine.paints().time.anti_alias);
    assert!(!engine.paints().temperature.anti_alias);
    assert!(engine.paints().date.anti_alias);

    let frame = engine.compose(&HalfEm, CANVAS);
    assert_eq!(frame.background(), Some(Color::BLACK));
    assert_eq!(frame.text_of(TextRole::Temperature), None);
    assert!(frame.image().is_none());

    engine.on_ambient_mode_changed(false);
    assert!(engine.paints().time.anti_alias);
    assert!(engine.pending_tick().is_some());
}

#[test]
fn test_ambient_keeps_subscription() {
    let mut engine = connected_engine();
    engine.on_ambient_mode_changed(true);
    engine.on_ambient_mode_changed(false);

    assert_eq!(engine.pipeline().link(), LinkState::Connected);
    assert!(!engine.sync().calls.contains(&Call::Disconnect));
}

#[test]
fn test_hiding_closes_sync_and_stops_tick() {
    let mut engine = connected_engine();
    engine.on_visibility_changed(false);

    assert_eq!(
        engine.sync().calls[4..],
        [Call::RemoveListener("/weather".into()), Call::Disconnect]
    );
    assert!(engine.pending_tick().is_none());
    assert_eq!(engine.display().mode(), FaceMode::Inactive);

    // Late results are ignored
    engine.on_sync_event(changed(800, "50", "34"));
    assert!(engine.weather().is_none());
}

#[test]
fn test_ticks_stay_aligned() {
    let mut engine = engine();
    engine.on_visibility_changed(true);

    for _ in 0..10 {
        let tick = engine.pending_tick().unwrap();
        // Deliver late, as if rendering took a while
        let late = tick.due_at_ms - engine.clock().now_ms + 37;
        engine.clock_mut().advance(late);

        assert!(engine.on_tick(tick));
        let next = engine.pending_tick().unwrap();
        assert_eq!(next.due_at_ms, tick.due_at_ms + 1000);
    }
}

#[test]
fn test_stale_tick_is_ignored() {
    let mut engine = engine();
    engine.on_visibility_changed(true);
    let tick = engine.pending_tick().unwrap();

    engine.on_ambient_mode_changed(true);
    engine.take_redraw();
    engine.clock_mut().advance(1000);

    assert!(!engine.on_tick(tick));
    assert!(!engine.take_redraw());
}

#[test]
fn test_tap_palette_parity() {
    let mut engine = connected_engine();

    engine.on_tap(TapKind::Touch, 10, 10, 0);
    assert_eq!(engine.background(), SUNSHINE_BLUE);
    assert!(engine.take_redraw());

    engine.on_tap(TapKind::Tap, 10, 10, 5);
    assert_eq!(engine.background(), SUNSHINE_DARK_BLUE);

    engine.on_tap(TapKind::TouchCancel, 10, 10, 9);
    engine.on_tap(TapKind::Tap, 10, 10, 12);
    assert_eq!(engine.background(), SUNSHINE_BLUE);
    assert_eq!(engine.display().tap_count, 2);
}

#[test]
fn test_time_zone_change() {
    let mut engine = connected_engine();
    engine.clock_mut().zone = TimeZone::fixed(tz::offset(-5));

    // Zone is only re-read on notification
    assert_eq!(
        engine.compose(&HalfEm, CANVAS).text_of(TextRole::Time),
        Some("14:05")
    );

    engine.on_time_zone_changed();
    assert!(engine.take_redraw());
    assert_eq!(
        engine.compose(&HalfEm, CANVAS).text_of(TextRole::Time),
        Some("9:05")
    );
}

#[test]
fn test_time_tick_redraws() {
    let mut engine = connected_engine();
    engine.on_ambient_mode_changed(true);
    engine.take_redraw();

    engine.on_time_tick();
    assert!(engine.take_redraw());
}

#[test]
fn test_redraw_requests_coalesce() {
    let mut engine = connected_engine();
    engine.on_sync_event(changed(800, "50", "34"));
    engine.on_tap(TapKind::Tap, 0, 0, 0);
    engine.on_time_tick();

    assert!(engine.take_redraw());
    assert!(!engine.take_redraw());
}

#[test]
fn test_render_to_sink() {
    let mut engine = connected_engine();
    engine.on_sync_event(changed(800, "50", "34"));

    let mut sink = RecordingSink::default();
    engine.render_to(&mut sink, &HalfEm, CANVAS).unwrap();

    assert_eq!(sink.frames.len(), 1);
    assert_eq!(sink.frames[0].len(), 5);
}

//! Face engine
//!
//! Owns the display state, tick scheduler, sync pipeline and last weather
//! snapshot, and routes every host, timer and sync event through one place.
//! The engine never blocks and never draws directly: it records that a redraw
//! is due and composes frames on request.

use jiff::tz::TimeZone;
use solstice_protocol::SyncEvent;

use crate::config::{Color, FaceConfig};
use crate::layout::{compose, Frame, Paints, Scene};
use crate::scheduler::{ScheduledTick, TickOutcome, TickScheduler};
use crate::state::{DisplayState, Effect, HostEvent, TapKind};
use crate::time::TimeSnapshot;
use crate::traits::{Clock, IconSource, RenderError, RenderSink, Size, SyncChannel, TextMeasure};
use crate::weather::{SyncPipeline, WeatherSnapshot};

/// Watch face engine
pub struct FaceEngine<S, I, C> {
    config: FaceConfig,
    display: DisplayState,
    paints: Paints,
    background: Color,
    scheduler: TickScheduler,
    pipeline: SyncPipeline,
    weather: Option<WeatherSnapshot>,
    time_zone: TimeZone,
    redraw_pending: bool,
    redraw_requests: u32,
    sync: S,
    icons: I,
    clock: C,
}

impl<S: SyncChannel, I: IconSource, C: Clock> FaceEngine<S, I, C> {
    /// Create a hidden engine
    pub fn new(config: FaceConfig, sync: S, icons: I, clock: C) -> Self {
        let pipeline = SyncPipeline::new(
            config.sync.path.clone(),
            config.sync.keys.clone(),
            config.icon_size,
        );

        Self {
            paints: Paints::from_config(&config),
            background: config.background,
            scheduler: TickScheduler::new(config.tick_period_ms),
            display: DisplayState::new(),
            pipeline,
            weather: None,
            time_zone: clock.time_zone(),
            redraw_pending: false,
            redraw_requests: 0,
            config,
            sync,
            icons,
            clock,
        }
    }

    // Host entry points

    /// Face shown or hidden
    pub fn on_visibility_changed(&mut self, visible: bool) {
        self.handle_host_event(HostEvent::VisibilityChanged(visible));
    }

    /// Entered or left ambient mode
    pub fn on_ambient_mode_changed(&mut self, ambient: bool) {
        self.handle_host_event(HostEvent::AmbientModeChanged(ambient));
    }

    /// Display properties reported
    pub fn on_properties_changed(&mut self, low_bit_ambient: bool) {
        self.handle_host_event(HostEvent::PropertiesChanged { low_bit_ambient });
    }

    /// Touch gesture
    pub fn on_tap(&mut self, kind: TapKind, x: i32, y: i32, time_ms: u64) {
        self.handle_host_event(HostEvent::Tap {
            kind,
            x,
            y,
            time_ms,
        });
    }

    /// Local time zone changed
    pub fn on_time_zone_changed(&mut self) {
        self.handle_host_event(HostEvent::TimeZoneChanged);
    }

    /// Host minute tick
    pub fn on_time_tick(&mut self) {
        self.handle_host_event(HostEvent::TimeTick);
    }

    /// Apply a host event
    pub fn handle_host_event(&mut self, event: HostEvent) {
        trace!("engine: {:?}", event);
        let effects = self.display.apply(event);
        for effect in effects {
            self.apply_effect(effect);
        }
    }

    /// Deliver a scheduler tick
    ///
    /// Returns true if the tick was live and requested a redraw.
    pub fn on_tick(&mut self, tick: ScheduledTick) -> bool {
        let now_ms = self.clock.now_ms();
        let should_run = self.display.timer_should_run();

        match self.scheduler.on_tick(tick, now_ms, should_run) {
            TickOutcome::Stale => {
                trace!("engine: stale tick {}", tick.generation);
                false
            }
            TickOutcome::Fired { .. } => {
                self.request_redraw();
                true
            }
        }
    }

    /// Deliver an event from the sync channel
    pub fn on_sync_event(&mut self, event: SyncEvent) {
        if let Some(snapshot) = self
            .pipeline
            .handle(event, &mut self.sync, &mut self.icons)
        {
            self.weather = Some(snapshot);
            self.request_redraw();
        }
    }

    // Rendering

    /// Clear and return the redraw flag
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw_pending)
    }

    /// Check if a redraw is due
    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Total redraw requests since creation
    pub fn redraw_requests(&self) -> u32 {
        self.redraw_requests
    }

    /// Compose a frame for the current instant
    pub fn compose<M: TextMeasure + ?Sized>(&self, measure: &M, canvas: Size) -> Frame {
        let time = TimeSnapshot::at(self.clock.now(), &self.time_zone);
        let scene = Scene {
            time: &time,
            weather: self.weather.as_ref(),
            display: &self.display,
            paints: &self.paints,
            background: self.background,
            config: &self.config,
            canvas,
        };
        compose(&scene, measure)
    }

    /// Compose a frame and hand it to a sink
    pub fn render_to<R, M>(&self, sink: &mut R, measure: &M, canvas: Size) -> Result<(), RenderError>
    where
        R: RenderSink + ?Sized,
        M: TextMeasure + ?Sized,
    {
        let frame = self.compose(measure, canvas);
        sink.render(&frame, canvas)
    }

    // Accessors

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn paints(&self) -> &Paints {
        &self.paints
    }

    /// Current interactive background
    pub fn background(&self) -> Color {
        self.background
    }

    /// Last received weather
    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    pub fn pipeline(&self) -> &SyncPipeline {
        &self.pipeline
    }

    /// Pending scheduler tick
    pub fn pending_tick(&self) -> Option<ScheduledTick> {
        self.scheduler.pending()
    }

    pub fn sync(&self) -> &S {
        &self.sync
    }

    pub fn sync_mut(&mut self) -> &mut S {
        &mut self.sync
    }

    pub fn icons_mut(&mut self) -> &mut I {
        &mut self.icons
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    fn request_redraw(&mut self) {
        self.redraw_pending = true;
        self.redraw_requests = self.redraw_requests.wrapping_add(1);
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::OpenSync => self.pipeline.open(&mut self.sync),
            Effect::CloseSync => self.pipeline.close(&mut self.sync),
            Effect::RefreshTimeZone => self.time_zone = self.clock.time_zone(),
            Effect::SetAntiAlias(enabled) => self.paints.set_anti_alias(enabled),
            Effect::ApplyTapPalette => {
                self.background = self.config.tap_background(self.display.tap_count);
            }
            Effect::Redraw => self.request_redraw(),
            Effect::UpdateTimer => {
                let should_run = self.display.timer_should_run();
                match self.scheduler.update(should_run, self.clock.now_ms()) {
                    Some(tick) => debug!("engine: tick armed for {}", tick.due_at_ms),
                    None => debug!("engine: tick stopped"),
                }
            }
        }
    }
}

//! Shared face engine
//!
//! Every task reaches the engine through `FrameCoordinator`. Each call runs
//! under a short critical section; afterwards the coordinator wakes the
//! render task if a redraw became due and the tick task if the pending tick
//! changed. Frames are composed under the lock but drawn outside it.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use solstice_core::layout::Frame;
use solstice_core::scheduler::ScheduledTick;
use solstice_core::state::HostEvent;
use solstice_core::traits::{
    Clock, IconSource, RenderError, RenderSink, Size, SyncChannel, TextMeasure,
};
use solstice_core::FaceEngine;
use solstice_protocol::SyncEvent;

use crate::channels::{RedrawSignal, TimerSignal};

/// Face engine shared between tasks
pub struct FrameCoordinator<'a, S, I, C> {
    engine: Mutex<CriticalSectionRawMutex, RefCell<FaceEngine<S, I, C>>>,
    redraw: &'a RedrawSignal,
    timer: &'a TimerSignal,
}

impl<'a, S, I, C> FrameCoordinator<'a, S, I, C>
where
    S: SyncChannel,
    I: IconSource,
    C: Clock,
{
    pub fn new(
        engine: FaceEngine<S, I, C>,
        redraw: &'a RedrawSignal,
        timer: &'a TimerSignal,
    ) -> Self {
        Self {
            engine: Mutex::new(RefCell::new(engine)),
            redraw,
            timer,
        }
    }

    /// Run `f` against the engine, then publish redraw and timer changes
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut FaceEngine<S, I, C>) -> R) -> R {
        let (result, redraw, tick) = self.engine.lock(|engine| {
            let mut engine = engine.borrow_mut();
            let before = engine.pending_tick();
            let result = f(&mut *engine);
            let after = engine.pending_tick();
            let tick = (before != after).then_some(after);
            (result, engine.redraw_pending(), tick)
        });

        if redraw {
            self.redraw.signal(());
        }
        if let Some(tick) = tick {
            self.timer.signal(tick);
        }
        result
    }

    pub fn host_event(&self, event: HostEvent) {
        self.with_engine(|e| e.handle_host_event(event));
    }

    /// Deliver a scheduler tick, returning true if it was live
    pub fn on_tick(&self, tick: ScheduledTick) -> bool {
        self.with_engine(|e| e.on_tick(tick))
    }

    pub fn on_sync_event(&self, event: SyncEvent) {
        self.with_engine(|e| e.on_sync_event(event));
    }

    pub fn pending_tick(&self) -> Option<ScheduledTick> {
        self.engine.lock(|e| e.borrow().pending_tick())
    }

    /// Current time on the engine's clock
    pub fn now_ms(&self) -> i64 {
        self.engine.lock(|e| e.borrow().clock().now_ms())
    }

    /// Compose a frame if a redraw is due, clearing the request
    pub fn take_frame<M: TextMeasure + ?Sized>(&self, measure: &M, canvas: Size) -> Option<Frame> {
        self.engine.lock(|e| {
            let mut engine = e.borrow_mut();
            engine.take_redraw().then(|| engine.compose(measure, canvas))
        })
    }

    /// Draw a pending frame into `sink`
    ///
    /// Returns the frame that was drawn, or None if no redraw was due.
    pub fn render<R, M>(
        &self,
        sink: &mut R,
        measure: &M,
        canvas: Size,
    ) -> Result<Option<Frame>, RenderError>
    where
        R: RenderSink + ?Sized,
        M: TextMeasure + ?Sized,
    {
        let Some(frame) = self.take_frame(measure, canvas) else {
            return Ok(None);
        };
        sink.render(&frame, canvas)?;
        Ok(Some(frame))
    }
}

//! Property tests for tick alignment, run policy and centering

use proptest::prelude::*;
use solstice_core::layout::center_offset;
use solstice_core::scheduler::{next_delay_ms, TickOutcome, TickScheduler};
use solstice_core::state::{DisplayState, HostEvent};

proptest! {
    #[test]
    fn delay_is_within_one_period(now in any::<i64>().prop_map(|n| n / 4), period in 1u32..=60_000) {
        let delay = next_delay_ms(now, period);
        prop_assert!(delay >= 1);
        prop_assert!(delay <= period);
        prop_assert_eq!((now + delay as i64).rem_euclid(period as i64), 0);
    }

    #[test]
    fn ticks_never_drift(
        start in 0i64..1_000_000_000_000,
        period in 100u32..5_000,
        lateness in prop::collection::vec(0i64..90, 1..50),
    ) {
        let mut scheduler = TickScheduler::new(period);
        let mut tick = scheduler.start(start);
        let first_due = tick.due_at_ms;

        for (i, late) in lateness.iter().enumerate() {
            let now = tick.due_at_ms + late;
            let TickOutcome::Fired { rearmed: Some(next) } = scheduler.on_tick(tick, now, true) else {
                return Err(TestCaseError::fail("tick did not re-arm"));
            };
            prop_assert_eq!(next.due_at_ms, first_due + (i as i64 + 1) * period as i64);
            tick = next;
        }
    }

    #[test]
    fn timer_runs_iff_visible_and_interactive(
        events in prop::collection::vec((any::<bool>(), any::<bool>()), 1..20),
    ) {
        let mut state = DisplayState::new();
        let mut scheduler = TickScheduler::default();

        for (i, (is_visibility, value)) in events.into_iter().enumerate() {
            let event = if is_visibility {
                HostEvent::VisibilityChanged(value)
            } else {
                HostEvent::AmbientModeChanged(value)
            };
            state.apply(event);
            scheduler.update(state.timer_should_run(), i as i64 * 333);

            prop_assert_eq!(scheduler.is_running(), state.visible && !state.ambient);
        }
    }

    #[test]
    fn centering_is_symmetric(container in 0u32..2_000, width in 0u32..4_000) {
        let (c, w) = (container as f32, width as f32);
        let x = center_offset(c, w);

        // Whole-pixel inputs keep every value exact in f32
        prop_assert_eq!(x * 2.0, c - w);
        prop_assert_eq!(x + w, c - x);
    }
}

//! Display state definition
//!
//! Visibility and ambient transitions are edge-triggered: reporting the
//! current value again produces no effects.

use super::events::{Effect, Effects, HostEvent, TapKind};

/// Derived face mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceMode {
    /// Not visible
    Inactive,
    /// Visible, full color, ticking every period
    Interactive,
    /// Visible, low power, redrawn on host minute ticks
    Ambient,
}

/// Display state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    pub visible: bool,
    pub ambient: bool,
    pub low_bit_ambient: bool,
    pub tap_count: u32,
}

impl DisplayState {
    /// Create the initial (hidden, interactive) state
    pub const fn new() -> Self {
        Self {
            visible: false,
            ambient: false,
            low_bit_ambient: false,
            tap_count: 0,
        }
    }

    /// Current face mode
    pub fn mode(&self) -> FaceMode {
        match (self.visible, self.ambient) {
            (false, _) => FaceMode::Inactive,
            (true, false) => FaceMode::Interactive,
            (true, true) => FaceMode::Ambient,
        }
    }

    /// The periodic tick runs only while visible and not ambient
    pub fn timer_should_run(&self) -> bool {
        self.visible && !self.ambient
    }

    /// Apply an event, returning the effects to perform
    pub fn apply(&mut self, event: HostEvent) -> Effects {
        let mut effects = Effects::new();
        let list: &[Effect] = match event {
            HostEvent::VisibilityChanged(visible) if visible != self.visible => {
                self.visible = visible;
                if visible {
                    &[
                        Effect::OpenSync,
                        Effect::RefreshTimeZone,
                        Effect::Redraw,
                        Effect::UpdateTimer,
                    ]
                } else {
                    &[Effect::CloseSync, Effect::UpdateTimer]
                }
            }
            HostEvent::AmbientModeChanged(ambient) if ambient != self.ambient => {
                self.ambient = ambient;
                if self.low_bit_ambient {
                    // Only this arm carries a value, so push it here
                    let _ = effects.push(Effect::SetAntiAlias(!ambient));
                }
                &[Effect::Redraw, Effect::UpdateTimer]
            }
            HostEvent::PropertiesChanged { low_bit_ambient } => {
                self.low_bit_ambient = low_bit_ambient;
                &[]
            }
            HostEvent::Tap {
                kind: TapKind::Tap, ..
            } => {
                self.tap_count = self.tap_count.wrapping_add(1);
                &[Effect::ApplyTapPalette, Effect::Redraw]
            }
            HostEvent::Tap { .. } => &[Effect::Redraw],
            HostEvent::TimeZoneChanged => &[Effect::RefreshTimeZone, Effect::Redraw],
            HostEvent::TimeTick => &[Effect::Redraw],
            // Repeated visibility or ambient value
            _ => &[],
        };

        for effect in list {
            // Every list fits in MAX_EFFECTS
            let _ = effects.push(*effect);
        }
        effects
    }
}

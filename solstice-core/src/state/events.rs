//! Host lifecycle events and the effects they produce

use heapless::Vec;

/// Touch gesture kinds reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapKind {
    /// Finger down
    Touch,
    /// Gesture was cancelled (e.g. became a swipe)
    TouchCancel,
    /// Completed tap
    Tap,
}

/// Events delivered by the host to the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostEvent {
    /// Face shown or hidden
    VisibilityChanged(bool),
    /// Entered or left ambient mode
    AmbientModeChanged(bool),
    /// Display properties reported
    PropertiesChanged { low_bit_ambient: bool },
    /// Touch gesture
    Tap {
        kind: TapKind,
        x: i32,
        y: i32,
        time_ms: u64,
    },
    /// Local time zone changed
    TimeZoneChanged,
    /// Host minute tick (delivered while ambient)
    TimeTick,
}

impl HostEvent {
    /// Check if this event comes from the wearer touching the screen
    pub fn is_user_event(&self) -> bool {
        matches!(self, HostEvent::Tap { .. })
    }
}

/// Side effects requested by a state transition
///
/// Effects are applied by the engine in the order they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Connect the sync channel
    OpenSync,
    /// Remove the listener and disconnect
    CloseSync,
    /// Reload the time zone from the clock
    RefreshTimeZone,
    /// Set anti-aliasing on the time and temperature paints
    SetAntiAlias(bool),
    /// Select the background from the tap palette
    ApplyTapPalette,
    /// Request a redraw
    Redraw,
    /// Start or stop the tick scheduler according to the current state
    UpdateTimer,
}

/// Maximum effects produced by one transition
pub const MAX_EFFECTS: usize = 4;

/// Effect list produced by one transition
pub type Effects = Vec<Effect, MAX_EFFECTS>;

//! One-way diagnostic log of calls, door events and arrivals.
//!
//! The controller reports [`Event`]s to a board-supplied [`DiagnosticSink`]
//! (typically a serial port or RTT channel). Nothing is ever read back.

use crate::types::{DispatchReason, Floor};

/// Something the controller did that an operator may want to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Controller started and is waiting for calls.
    Ready,
    /// A call button toggled a floor's pending flag.
    CallToggled {
        /// Floor whose call changed.
        floor: Floor,
        /// Flag value after the toggle.
        pending: bool,
    },
    /// The car started moving.
    Departing {
        /// Destination.
        floor: Floor,
        /// Call service or auto-return.
        reason: DispatchReason,
    },
    /// The car reached its destination.
    Arrived {
        /// Floor reached.
        floor: Floor,
    },
    /// Door actuator commanded open.
    DoorOpened,
    /// Door actuator commanded closed.
    DoorClosed,
}

impl core::fmt::Display for Event {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Event::Ready => write!(f, "Please press a floor button."),
            Event::CallToggled {
                floor,
                pending: true,
            } => write!(f, "Floor {} called", floor),
            Event::CallToggled {
                floor,
                pending: false,
            } => write!(f, "Floor {} call cancelled", floor),
            Event::Departing {
                floor,
                reason: DispatchReason::Call,
            } => write!(f, "Moving to floor: {}", floor),
            Event::Departing {
                floor,
                reason: DispatchReason::AutoReturn,
            } => write!(f, "Returning to floor: {}", floor),
            Event::Arrived { floor } => write!(f, "Arrived at floor: {}", floor),
            Event::DoorOpened => write!(f, "Door opened"),
            Event::DoorClosed => write!(f, "Door closed"),
        }
    }
}

/// Trait for abstracting the diagnostic output channel.
///
/// Implementations are best-effort: dropping or truncating output is fine,
/// and this method cannot fail.
pub trait DiagnosticSink {
    /// Records one event.
    fn record(&mut self, event: &Event);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl DiagnosticSink for NoDiagnostics {
    #[inline]
    fn record(&mut self, _event: &Event) {}
}

/// Forwards to the sink and mirrors the event to `defmt` when enabled.
pub(crate) fn emit<G: DiagnosticSink>(sink: &mut G, event: Event) {
    #[cfg(feature = "defmt")]
    defmt::info!("{}", event);
    sink.record(&event);
}

/// `defmt::debug!` when the `defmt` feature is enabled, nothing otherwise.
macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
    };
}

pub(crate) use debug;

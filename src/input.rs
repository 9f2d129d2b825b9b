//! Button and speed-knob sampling.
//!
//! Call buttons are debounced without blocking: a press counts once the
//! button reads high on two samples at least the debounce window apart, and
//! fires once per press. Door buttons are level-triggered and reported on
//! every sample they read high.

use crate::config::ControllerConfig;
use crate::time::{TimeDuration, TimeInstant};
use crate::types::{Button, FLOOR_COUNT, Floor};
use heapless::Vec;

/// Maximum number of presses reported in one sample (three calls, two door buttons).
pub const MAX_PRESSES: usize = FLOOR_COUNT + 2;

/// Trait for abstracting the control panel inputs.
pub trait ControlInputs {
    /// Reads the raw level of a button, `true` meaning pressed.
    fn is_high(&mut self, button: Button) -> bool;

    /// Reads the speed knob's raw analog value.
    fn read_speed_raw(&mut self) -> u16;
}

#[derive(Debug, Clone, Copy)]
enum DebounceState<I> {
    Released,
    Settling(I),
    Held,
}

/// Two-sample debouncer for a single button.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer<I: TimeInstant> {
    state: DebounceState<I>,
}

impl<I: TimeInstant> Debouncer<I> {
    /// Creates a debouncer for a released button.
    pub const fn new() -> Self {
        Self {
            state: DebounceState::Released,
        }
    }

    /// Feeds one sample; returns true on a confirmed press.
    ///
    /// # Arguments
    /// * `is_high` - Current button level
    /// * `now` - Time of this sample
    /// * `window` - Minimum time between the first and confirming high sample
    pub fn check_press(&mut self, is_high: bool, now: I, window: I::Duration) -> bool {
        match self.state {
            _ if !is_high => {
                self.state = DebounceState::Released;
                false
            }
            DebounceState::Released => {
                self.state = DebounceState::Settling(now);
                false
            }
            DebounceState::Settling(since) => {
                if now.duration_since(since).as_millis() >= window.as_millis() {
                    self.state = DebounceState::Held;
                    true
                } else {
                    false
                }
            }
            DebounceState::Held => false,
        }
    }

    /// Returns true while a confirmed press is held.
    pub fn is_held(&self) -> bool {
        matches!(self.state, DebounceState::Held)
    }
}

impl<I: TimeInstant> Default for Debouncer<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of sampling the panel once.
#[derive(Debug, Clone)]
pub struct Sample<D: TimeDuration> {
    /// Confirmed presses, call buttons first in floor order.
    pub presses: Vec<Button, MAX_PRESSES>,
    /// Animation step duration from the speed knob.
    pub step_duration: D,
}

/// Polls the panel inputs each tick.
pub struct InputSampler<I: TimeInstant, N: ControlInputs> {
    inputs: N,
    call_debouncers: [Debouncer<I>; FLOOR_COUNT],
    config: ControllerConfig<I::Duration>,
}

impl<I: TimeInstant, N: ControlInputs> InputSampler<I, N> {
    /// Creates a sampler with all call buttons released.
    pub fn new(inputs: N, config: ControllerConfig<I::Duration>) -> Self {
        Self {
            inputs,
            call_debouncers: [Debouncer::new(); FLOOR_COUNT],
            config,
        }
    }

    /// Reads every input once.
    pub fn sample(&mut self, now: I) -> Sample<I::Duration> {
        let mut presses = Vec::new();
        let window = self.config.debounce();

        // MAX_PRESSES covers every button, push cannot fail.
        for floor in Floor::ALL {
            let button = Button::Call(floor);
            let is_high = self.inputs.is_high(button);
            if self.call_debouncers[floor.index()].check_press(is_high, now, window) {
                let _ = presses.push(button);
            }
        }

        for button in [Button::DoorOpen, Button::DoorClose] {
            if self.inputs.is_high(button) {
                let _ = presses.push(button);
            }
        }

        let raw = self.inputs.read_speed_raw();

        Sample {
            presses,
            step_duration: self.config.step_duration(raw),
        }
    }

    /// Returns a reference to the input hardware.
    pub fn inputs(&self) -> &N {
        &self.inputs
    }

    /// Returns a mutable reference to the input hardware.
    pub fn inputs_mut(&mut self) -> &mut N {
        &mut self.inputs
    }
}

//! Controller timing and actuator configuration.

use crate::time::TimeDuration;

/// Door hold after arrival, in milliseconds.
pub const DEFAULT_DOOR_HOLD_MS: u64 = 2000;

/// Idle interval away from the ground floor before auto-return, in milliseconds.
pub const DEFAULT_AUTO_RETURN_MS: u64 = 3000;

/// Call button debounce window, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

/// Fastest animation step, in milliseconds.
pub const DEFAULT_SPEED_MIN_MS: u16 = 100;

/// Slowest animation step, in milliseconds.
pub const DEFAULT_SPEED_MAX_MS: u16 = 2000;

/// Raw analog reading that maps to the slowest step.
pub const DEFAULT_SPEED_FULL_SCALE: u16 = 1024;

/// Servo angle for a closed door.
pub const DOOR_CLOSED_ANGLE: u8 = 0;

/// Servo angle for an open door.
pub const DOOR_OPEN_ANGLE: u8 = 90;

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Speed range is empty, inverted or starts at zero.
    InvalidSpeedRange,

    /// Analog full scale of zero cannot be mapped.
    ZeroFullScale,

    /// Door hold of zero would never show the door open.
    ZeroDoorHold,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidSpeedRange => {
                write!(f, "animation speed range must satisfy 0 < min <= max")
            }
            ConfigError::ZeroFullScale => {
                write!(f, "analog full scale must be non-zero")
            }
            ConfigError::ZeroDoorHold => {
                write!(f, "door hold must be non-zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Timing and actuator settings for the controller.
///
/// Construct with [`ControllerConfig::builder`] or take the defaults, which
/// match the reference panel (2 s door hold, 3 s auto-return, 50 ms debounce,
/// 100-2000 ms animation steps from a 10-bit analog input).
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig<D: TimeDuration> {
    door_hold: D,
    auto_return_after: D,
    debounce: D,
    speed_min_ms: u16,
    speed_max_ms: u16,
    speed_full_scale: u16,
    door_open_angle: u8,
    door_closed_angle: u8,
}

impl<D: TimeDuration> ControllerConfig<D> {
    /// Creates a configuration builder seeded with the defaults.
    pub fn builder() -> ConfigBuilder<D> {
        ConfigBuilder::new()
    }

    /// How long the door stays open after arrival.
    pub fn door_hold(&self) -> D {
        self.door_hold
    }

    /// Idle time away from ground floor before the car returns on its own.
    pub fn auto_return_after(&self) -> D {
        self.auto_return_after
    }

    /// Minimum time a call button must read high to count as pressed.
    pub fn debounce(&self) -> D {
        self.debounce
    }

    /// Servo angle for an open door.
    pub fn door_open_angle(&self) -> u8 {
        self.door_open_angle
    }

    /// Servo angle for a closed door.
    pub fn door_closed_angle(&self) -> u8 {
        self.door_closed_angle
    }

    /// Maps a raw analog reading onto the animation step duration.
    ///
    /// Linear, integer-only mapping of `0..=full_scale` onto `min..=max`.
    /// Readings above full scale are clamped.
    pub fn step_duration(&self, raw: u16) -> D {
        let raw = raw.min(self.speed_full_scale) as u64;
        let span = (self.speed_max_ms - self.speed_min_ms) as u64;
        let millis = raw * span / self.speed_full_scale as u64 + self.speed_min_ms as u64;
        D::from_millis(millis)
    }
}

impl<D: TimeDuration> Default for ControllerConfig<D> {
    fn default() -> Self {
        Self {
            door_hold: D::from_millis(DEFAULT_DOOR_HOLD_MS),
            auto_return_after: D::from_millis(DEFAULT_AUTO_RETURN_MS),
            debounce: D::from_millis(DEFAULT_DEBOUNCE_MS),
            speed_min_ms: DEFAULT_SPEED_MIN_MS,
            speed_max_ms: DEFAULT_SPEED_MAX_MS,
            speed_full_scale: DEFAULT_SPEED_FULL_SCALE,
            door_open_angle: DOOR_OPEN_ANGLE,
            door_closed_angle: DOOR_CLOSED_ANGLE,
        }
    }
}

/// Builder for validated controller configurations.
#[derive(Debug)]
pub struct ConfigBuilder<D: TimeDuration> {
    config: ControllerConfig<D>,
}

impl<D: TimeDuration> ConfigBuilder<D> {
    /// Creates a builder holding the default configuration.
    pub fn new() -> Self {
        Self {
            config: ControllerConfig::default(),
        }
    }

    /// Sets the door hold after arrival.
    pub fn door_hold(mut self, hold: D) -> Self {
        self.config.door_hold = hold;
        self
    }

    /// Sets the idle interval before auto-return to the ground floor.
    pub fn auto_return_after(mut self, interval: D) -> Self {
        self.config.auto_return_after = interval;
        self
    }

    /// Sets the call button debounce window.
    pub fn debounce(mut self, window: D) -> Self {
        self.config.debounce = window;
        self
    }

    /// Sets the animation step range in milliseconds.
    pub fn speed_range(mut self, min_ms: u16, max_ms: u16) -> Self {
        self.config.speed_min_ms = min_ms;
        self.config.speed_max_ms = max_ms;
        self
    }

    /// Sets the raw analog value that maps to the slowest step.
    pub fn speed_full_scale(mut self, full_scale: u16) -> Self {
        self.config.speed_full_scale = full_scale;
        self
    }

    /// Sets the servo angles for the open and closed door.
    pub fn door_angles(mut self, open: u8, closed: u8) -> Self {
        self.config.door_open_angle = open;
        self.config.door_closed_angle = closed;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `InvalidSpeedRange` - min is zero or greater than max
    /// * `ZeroFullScale` - analog full scale is zero
    /// * `ZeroDoorHold` - door hold is zero
    pub fn build(self) -> Result<ControllerConfig<D>, ConfigError> {
        let config = self.config;

        if config.speed_min_ms == 0 || config.speed_min_ms > config.speed_max_ms {
            return Err(ConfigError::InvalidSpeedRange);
        }

        if config.speed_full_scale == 0 {
            return Err(ConfigError::ZeroFullScale);
        }

        if config.door_hold.as_millis() == 0 {
            return Err(ConfigError::ZeroDoorHold);
        }

        Ok(config)
    }
}

impl<D: TimeDuration> Default for ConfigBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

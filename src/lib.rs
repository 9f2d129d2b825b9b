#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Scheduler`**: The control loop; one `tick()` samples inputs, then advances motion
//! - **`MotionController`**: State machine that services calls, animates trips and cycles the door
//! - **`MotionState`**: `Idle`, `ReturnPending`, `MovingTo` or `DoorOpenHold`
//! - **`CallRegistry`**: Pending floor calls and their lamps, serviced in ascending floor order
//! - **`PositionIndicator`**: Drives the 7-position strip, digit display and floor lamps
//! - **`DoorController`**: Opens and closes the door servo
//! - **`InputSampler`**: Debounces call buttons, reads door buttons and the speed knob
//! - **`ControllerConfig`**: Door hold, auto-return interval, debounce and speed range
//! - **`IndicatorPanel`**, **`CallLamps`**, **`ControlInputs`**, **`DoorActuator`**,
//!   **`DiagnosticSink`**: Traits to implement for your hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! All waits are deadlines compared against the clock once per tick. Nothing
//! in the crate blocks, so the panel is polled every tick even while the door
//! is held open.

pub mod time;
pub mod types;
pub mod config;
pub mod diagnostics;
pub mod calls;
pub mod door;
pub mod indicator;
pub mod input;
pub mod motion;
pub mod scheduler;

pub use time::{Deadline, TimeDuration, TimeInstant, TimeSource};
pub use types::{Button, DispatchReason, DoorState, FLOOR_COUNT, Floor, FloorError};
pub use config::{ConfigBuilder, ConfigError, ControllerConfig};
pub use diagnostics::{DiagnosticSink, Event, NoDiagnostics};
pub use calls::{CallLamps, CallRegistry};
pub use door::{DoorActuator, DoorController};
pub use indicator::{AnimationPath, DIGIT_PATTERNS, IndicatorPanel, PositionIndicator, STRIP_LEN};
pub use input::{ControlInputs, Debouncer, InputSampler, Sample};
pub use motion::{MotionController, MotionState};
pub use scheduler::{Board, Scheduler};

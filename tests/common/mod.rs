//! Shared test infrastructure for elevator-controller integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use elevator_controller::{
    Board, Button, CallLamps, ControlInputs, ControllerConfig, DiagnosticSink, DoorActuator,
    Event, FLOOR_COUNT, Floor, IndicatorPanel, Scheduler, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }

    pub fn millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Peripherals
// ============================================================================

/// Scriptable button levels and speed knob
#[derive(Debug, Default)]
pub struct MockInputs {
    pub calls: [bool; FLOOR_COUNT],
    pub door_open: bool,
    pub door_close: bool,
    pub speed_raw: u16,
}

impl ControlInputs for MockInputs {
    fn is_high(&mut self, button: Button) -> bool {
        match button {
            Button::Call(floor) => self.calls[floor.index()],
            Button::DoorOpen => self.door_open,
            Button::DoorClose => self.door_close,
        }
    }

    fn read_speed_raw(&mut self) -> u16 {
        self.speed_raw
    }
}

/// Call lamps that remember their last level
#[derive(Debug, Default)]
pub struct MockCallLamps {
    pub lit: [bool; FLOOR_COUNT],
}

impl CallLamps for MockCallLamps {
    fn set_call_lamp(&mut self, floor: Floor, lit: bool) {
        self.lit[floor.index()] = lit;
    }
}

/// Indicator panel that records every shifted pattern
#[derive(Debug, Default)]
pub struct MockPanel {
    pub strip: Vec<u8>,
    pub digits: Vec<u8>,
    pub floor_lamps: [bool; FLOOR_COUNT],
}

impl IndicatorPanel for MockPanel {
    fn shift_position(&mut self, pattern: u8) {
        self.strip.push(pattern);
    }

    fn shift_digit(&mut self, pattern: u8) {
        self.digits.push(pattern);
    }

    fn set_floor_lamp(&mut self, floor: Floor, lit: bool) {
        self.floor_lamps[floor.index()] = lit;
    }
}

/// Servo that records every commanded angle
#[derive(Debug, Default)]
pub struct MockServo {
    pub angles: Vec<u8>,
}

impl DoorActuator for MockServo {
    fn set_angle(&mut self, degrees: u8) {
        self.angles.push(degrees);
    }
}

/// Diagnostic sink that keeps every event
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<Event>,
}

impl DiagnosticSink for RecordingSink {
    fn record(&mut self, event: &Event) {
        self.events.push(*event);
    }
}

// ============================================================================
// Scheduler Helpers
// ============================================================================

pub type TestScheduler<'t> = Scheduler<
    't,
    TestInstant,
    MockTimeSource,
    MockInputs,
    MockCallLamps,
    MockPanel,
    MockServo,
    RecordingSink,
>;

/// Tick granularity used by the helpers
pub const TICK_MS: u64 = 10;

/// Debounce window of the default configuration
pub const DEBOUNCE_MS: u64 = 50;

pub fn new_scheduler(timer: &MockTimeSource) -> TestScheduler<'_> {
    new_scheduler_with(timer, ControllerConfig::default())
}

pub fn new_scheduler_with(
    timer: &MockTimeSource,
    config: ControllerConfig<TestDuration>,
) -> TestScheduler<'_> {
    let board = Board {
        inputs: MockInputs::default(),
        call_lamps: MockCallLamps::default(),
        panel: MockPanel::default(),
        door: MockServo::default(),
    };
    Scheduler::new(board, RecordingSink::default(), timer, config)
}

/// Holds the given call buttons through one debounce window and releases them.
///
/// Leaves the clock at the tick that confirmed the presses.
pub fn press_calls(elevator: &mut TestScheduler<'_>, timer: &MockTimeSource, floors: &[Floor]) {
    for floor in floors {
        elevator.inputs_mut().calls[floor.index()] = true;
    }
    elevator.tick();
    timer.advance(DEBOUNCE_MS);
    elevator.tick();
    for floor in floors {
        elevator.inputs_mut().calls[floor.index()] = false;
    }
}

/// Ticks every `TICK_MS` until `millis` have passed.
pub fn run_for(elevator: &mut TestScheduler<'_>, timer: &MockTimeSource, millis: u64) {
    let end = timer.millis() + millis;
    while timer.millis() < end {
        timer.advance(TICK_MS);
        elevator.tick();
    }
}

/// Ticks until the car is parked again (door cycle finished).
pub fn run_until_parked(elevator: &mut TestScheduler<'_>, timer: &MockTimeSource) {
    for _ in 0..10_000 {
        if elevator.motion().state().is_parked() {
            return;
        }
        timer.advance(TICK_MS);
        elevator.tick();
    }
    panic!("car never parked");
}

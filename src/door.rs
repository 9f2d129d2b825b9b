//! Door actuator control.

use crate::types::DoorState;

/// Trait for abstracting the door servo.
///
/// Implement this for your servo driver (PWM channel, LEDC, ...). The command
/// is treated as instantaneous and always successful.
pub trait DoorActuator {
    /// Moves the door to the given angle in degrees.
    fn set_angle(&mut self, degrees: u8);
}

/// Opens and closes the door and tracks its state.
///
/// Commands are unconditional. Keeping the door shut while the car moves is
/// the motion controller's job.
pub struct DoorController<A: DoorActuator> {
    actuator: A,
    state: DoorState,
    open_angle: u8,
    closed_angle: u8,
}

impl<A: DoorActuator> DoorController<A> {
    /// Creates a controller and drives the actuator to the closed angle.
    pub fn new(mut actuator: A, open_angle: u8, closed_angle: u8) -> Self {
        actuator.set_angle(closed_angle);

        Self {
            actuator,
            state: DoorState::Closed,
            open_angle,
            closed_angle,
        }
    }

    /// Commands the door open. Re-issuing while open is harmless.
    pub fn open(&mut self) {
        self.actuator.set_angle(self.open_angle);
        self.state = DoorState::Open;
    }

    /// Commands the door closed. Re-issuing while closed is harmless.
    pub fn close(&mut self) {
        self.actuator.set_angle(self.closed_angle);
        self.state = DoorState::Closed;
    }

    /// Current door state.
    pub fn state(&self) -> DoorState {
        self.state
    }

    /// Returns true if the door is open.
    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }

    /// Returns a reference to the actuator.
    pub fn actuator(&self) -> &A {
        &self.actuator
    }
}

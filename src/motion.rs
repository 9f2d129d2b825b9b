//! Car motion state machine.
//!
//! [`MotionController`] owns every piece of control state: pending calls, the
//! car's floor, the position indicator and the door. It is advanced once per
//! tick against the clock; no step ever blocks.
//!
//! ```text
//!   Idle ──call──▶ MovingTo ──path done──▶ DoorOpenHold ──hold over──▶ Idle
//!    │                ▲
//!    └─away from 1F──▶ ReturnPending ──timer──┘ (or call)
//! ```

use crate::calls::{CallLamps, CallRegistry};
use crate::config::ControllerConfig;
use crate::diagnostics::{DiagnosticSink, Event, debug, emit};
use crate::door::{DoorActuator, DoorController};
use crate::indicator::{AnimationPath, IndicatorPanel, PositionIndicator};
use crate::time::{Deadline, TimeInstant};
use crate::types::{Button, DispatchReason, DoorState, Floor};

/// The car's current activity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionState<I: TimeInstant> {
    /// Parked with no timer running.
    Idle,
    /// Parked away from the ground floor, returning there when the deadline
    /// passes without activity.
    ReturnPending {
        /// When the car departs for the ground floor.
        deadline: Deadline<I>,
    },
    /// Animating towards a floor.
    MovingTo {
        /// Destination.
        target: Floor,
        /// Call service or auto-return.
        reason: DispatchReason,
        /// Index of the animation step currently shown.
        step: usize,
        /// When the next step is due.
        deadline: Deadline<I>,
    },
    /// Arrived with the door open.
    DoorOpenHold {
        /// When the door closes.
        deadline: Deadline<I>,
    },
}

impl<I: TimeInstant> MotionState<I> {
    /// Returns true if the car is parked and accepts panel input.
    pub fn is_parked(&self) -> bool {
        matches!(self, MotionState::Idle | MotionState::ReturnPending { .. })
    }

    /// Returns true while the car is animating between floors.
    pub fn is_moving(&self) -> bool {
        matches!(self, MotionState::MovingTo { .. })
    }

    /// Pending deadline of this state, if any.
    pub fn deadline(&self) -> Option<Deadline<I>> {
        match *self {
            MotionState::Idle => None,
            MotionState::ReturnPending { deadline }
            | MotionState::MovingTo { deadline, .. }
            | MotionState::DoorOpenHold { deadline } => Some(deadline),
        }
    }
}

/// Decides which call to service, animates the trip and cycles the door.
///
/// # Type Parameters
/// * `I` - Time instant type
/// * `L` - Call lamp implementation type
/// * `P` - Indicator panel implementation type
/// * `A` - Door actuator implementation type
pub struct MotionController<I: TimeInstant, L: CallLamps, P: IndicatorPanel, A: DoorActuator> {
    calls: CallRegistry<L>,
    indicator: PositionIndicator<P>,
    door: DoorController<A>,
    state: MotionState<I>,
    current_floor: Floor,
    last_activity: I,
    door_hold: I::Duration,
    auto_return_after: I::Duration,
}

impl<I, L, P, A> MotionController<I, L, P, A>
where
    I: TimeInstant,
    L: CallLamps,
    P: IndicatorPanel,
    A: DoorActuator,
{
    /// Creates an idle controller at the ground floor with the door closed.
    pub fn new(
        call_lamps: L,
        panel: P,
        actuator: A,
        config: &ControllerConfig<I::Duration>,
        now: I,
    ) -> Self {
        Self {
            calls: CallRegistry::new(call_lamps),
            indicator: PositionIndicator::new(panel, Floor::GROUND),
            door: DoorController::new(
                actuator,
                config.door_open_angle(),
                config.door_closed_angle(),
            ),
            state: MotionState::Idle,
            current_floor: Floor::GROUND,
            last_activity: now,
            door_hold: config.door_hold(),
            auto_return_after: config.auto_return_after(),
        }
    }

    /// Applies a confirmed button press.
    ///
    /// Presses are only accepted while the car is parked; otherwise they are
    /// dropped. Returns true if the press was applied.
    pub fn handle_press<G: DiagnosticSink>(&mut self, button: Button, now: I, sink: &mut G) -> bool {
        if !self.state.is_parked() {
            debug!("car busy, ignoring {}", button);
            return false;
        }

        match button {
            Button::Call(floor) => {
                let pending = self.calls.toggle(floor);
                emit(sink, Event::CallToggled { floor, pending });
            }
            Button::DoorOpen => {
                let was_open = self.door.is_open();
                self.door.open();
                if !was_open {
                    emit(sink, Event::DoorOpened);
                }
            }
            Button::DoorClose => {
                let was_open = self.door.is_open();
                self.door.close();
                if was_open {
                    emit(sink, Event::DoorClosed);
                }
            }
        }

        self.note_activity(now);
        true
    }

    /// Advances the state machine to `now`.
    ///
    /// `step_duration` paces the next animation step and is taken fresh from
    /// the speed knob every tick.
    pub fn advance<G: DiagnosticSink>(&mut self, now: I, step_duration: I::Duration, sink: &mut G) {
        match self.state {
            MotionState::Idle | MotionState::ReturnPending { .. } => {
                self.advance_parked(now, step_duration, sink);
            }
            MotionState::MovingTo {
                target,
                reason,
                step,
                deadline,
            } => {
                if !deadline.expired(now) {
                    return;
                }

                let next = step + 1;
                if next < self.path_len() {
                    self.indicator.show_step(next);
                    self.state = MotionState::MovingTo {
                        target,
                        reason,
                        step: next,
                        deadline: Deadline::new(now, step_duration),
                    };
                } else {
                    self.arrive(target, now, sink);
                }
            }
            MotionState::DoorOpenHold { deadline } => {
                if deadline.expired(now) {
                    self.door.close();
                    emit(sink, Event::DoorClosed);
                    self.last_activity = now;
                    self.state = MotionState::Idle;
                }
            }
        }
    }

    fn advance_parked<G: DiagnosticSink>(&mut self, now: I, step_duration: I::Duration, sink: &mut G) {
        if let Some(target) = self.calls.take_next_request() {
            self.depart(target, DispatchReason::Call, now, step_duration, sink);
            return;
        }

        if self.current_floor == Floor::GROUND {
            self.state = MotionState::Idle;
            return;
        }

        match self.state {
            MotionState::ReturnPending { deadline } => {
                if deadline.expired(now) {
                    self.depart(Floor::GROUND, DispatchReason::AutoReturn, now, step_duration, sink);
                }
            }
            _ => {
                self.state = MotionState::ReturnPending {
                    deadline: Deadline::new(self.last_activity, self.auto_return_after),
                };
            }
        }
    }

    fn depart<G: DiagnosticSink>(
        &mut self,
        target: Floor,
        reason: DispatchReason,
        now: I,
        step_duration: I::Duration,
        sink: &mut G,
    ) {
        // Never move with the door open
        if self.door.is_open() {
            self.door.close();
            emit(sink, Event::DoorClosed);
        }

        emit(sink, Event::Departing { floor: target, reason });

        self.indicator.begin(self.current_floor, target);
        self.indicator.show_step(0);
        self.state = MotionState::MovingTo {
            target,
            reason,
            step: 0,
            deadline: Deadline::new(now, step_duration),
        };
    }

    fn arrive<G: DiagnosticSink>(&mut self, target: Floor, now: I, sink: &mut G) {
        self.indicator.finish();
        self.current_floor = target;
        self.calls.acknowledge_arrival(target);
        emit(sink, Event::Arrived { floor: target });

        self.door.open();
        emit(sink, Event::DoorOpened);
        self.state = MotionState::DoorOpenHold {
            deadline: Deadline::new(now, self.door_hold),
        };
    }

    fn note_activity(&mut self, now: I) {
        self.last_activity = now;
        if let MotionState::ReturnPending { .. } = self.state {
            self.state = MotionState::ReturnPending {
                deadline: Deadline::new(now, self.auto_return_after),
            };
        }
    }

    fn path_len(&self) -> usize {
        self.indicator.path().map_or(0, AnimationPath::len)
    }

    /// Time until the next scheduled transition, `None` if nothing is scheduled.
    pub fn next_deadline(&self, now: I) -> Option<I::Duration> {
        self.state.deadline().map(|deadline| deadline.remaining(now))
    }

    /// Current motion state.
    pub fn state(&self) -> MotionState<I> {
        self.state
    }

    /// Floor the car is at (or last arrived at, while moving).
    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    /// Door state.
    pub fn door_state(&self) -> DoorState {
        self.door.state()
    }

    /// Pending calls.
    pub fn calls(&self) -> &CallRegistry<L> {
        &self.calls
    }

    /// Position indicator.
    pub fn indicator(&self) -> &PositionIndicator<P> {
        &self.indicator
    }

    /// Door controller.
    pub fn door(&self) -> &DoorController<A> {
        &self.door
    }
}

//! The control loop.
//!
//! One tick samples the panel, applies accepted presses, then advances the
//! motion state machine. Input sampling always precedes motion for the same
//! tick, so a press can dispatch the car in the tick it is confirmed.

use crate::calls::CallLamps;
use crate::config::ControllerConfig;
use crate::diagnostics::{DiagnosticSink, Event, emit};
use crate::door::DoorActuator;
use crate::indicator::IndicatorPanel;
use crate::input::{ControlInputs, InputSampler};
use crate::motion::MotionController;
use crate::time::{TimeInstant, TimeSource};

/// The peripherals a board hands to the controller.
pub struct Board<N, L, P, A> {
    /// Buttons and speed knob.
    pub inputs: N,
    /// Call-acknowledgement lamps.
    pub call_lamps: L,
    /// Position strip, digit display and floor lamps.
    pub panel: P,
    /// Door servo.
    pub door: A,
}

/// Runs the elevator: owns the sampler, the motion controller and the
/// diagnostic sink.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `N` - Control input implementation type
/// * `L` - Call lamp implementation type
/// * `P` - Indicator panel implementation type
/// * `A` - Door actuator implementation type
/// * `G` - Diagnostic sink implementation type
pub struct Scheduler<'t, I, T, N, L, P, A, G>
where
    I: TimeInstant,
    T: TimeSource<I>,
    N: ControlInputs,
    L: CallLamps,
    P: IndicatorPanel,
    A: DoorActuator,
    G: DiagnosticSink,
{
    time_source: &'t T,
    sampler: InputSampler<I, N>,
    motion: MotionController<I, L, P, A>,
    sink: G,
    last_tick: Option<I>,
}

impl<'t, I, T, N, L, P, A, G> Scheduler<'t, I, T, N, L, P, A, G>
where
    I: TimeInstant,
    T: TimeSource<I>,
    N: ControlInputs,
    L: CallLamps,
    P: IndicatorPanel,
    A: DoorActuator,
    G: DiagnosticSink,
{
    /// Brings the car up idle at the ground floor with the door closed.
    pub fn new(
        board: Board<N, L, P, A>,
        mut sink: G,
        time_source: &'t T,
        config: ControllerConfig<I::Duration>,
    ) -> Self {
        let now = time_source.now();
        let motion = MotionController::new(board.call_lamps, board.panel, board.door, &config, now);
        let sampler = InputSampler::new(board.inputs, config);

        emit(&mut sink, Event::Ready);

        Self {
            time_source,
            sampler,
            motion,
            sink,
            last_tick: None,
        }
    }

    /// Runs one pass of the control loop.
    ///
    /// # Returns
    /// Time until the next motion deadline, or `None` if nothing is scheduled.
    /// Inputs still need polling in the meantime.
    pub fn tick(&mut self) -> Option<I::Duration> {
        let now = self.time_source.now();
        let sample = self.sampler.sample(now);

        for button in sample.presses {
            self.motion.handle_press(button, now, &mut self.sink);
        }

        self.motion.advance(now, sample.step_duration, &mut self.sink);
        self.last_tick = Some(now);

        self.motion.next_deadline(now)
    }

    /// Ticks forever, handing each tick's timing hint to `idle`.
    ///
    /// `idle` is where a board sleeps or waits for its next poll interval.
    pub fn run<F>(&mut self, mut idle: F) -> !
    where
        F: FnMut(Option<I::Duration>),
    {
        loop {
            let next = self.tick();
            idle(next);
        }
    }

    /// Motion controller.
    pub fn motion(&self) -> &MotionController<I, L, P, A> {
        &self.motion
    }

    /// Returns a reference to the input hardware.
    pub fn inputs(&self) -> &N {
        self.sampler.inputs()
    }

    /// Returns a mutable reference to the input hardware.
    pub fn inputs_mut(&mut self) -> &mut N {
        self.sampler.inputs_mut()
    }

    /// Returns a reference to the diagnostic sink.
    pub fn sink(&self) -> &G {
        &self.sink
    }

    /// Time of the most recent tick.
    pub fn last_tick(&self) -> Option<I> {
        self.last_tick
    }
}

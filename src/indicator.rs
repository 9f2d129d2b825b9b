//! Car position rendering: linear indicator strip, digit display, floor lamps.
//!
//! The strip has [`STRIP_LEN`] discrete positions. Floors are anchored every
//! third position (0, 3, 6); the two positions between anchors mean "in
//! transit". Moving between floors animates every position from the source
//! anchor to the destination anchor.

use crate::types::{FLOOR_COUNT, Floor};
use heapless::Vec;

/// Number of discrete positions on the indicator strip.
pub const STRIP_LEN: usize = 7;

/// Strip positions between neighbouring floor anchors.
const POSITIONS_PER_FLOOR: u8 = 3;

/// Digit display patterns for floors 1, 2, 3 (common anode, segments A G F E D C B).
pub const DIGIT_PATTERNS: [u8; FLOOR_COUNT] = [0x9F, 0x25, 0x0D];

/// Trait for abstracting the indicator panel hardware.
///
/// The strip and the digit display each sit behind a serial-to-parallel
/// shift register. Implementations perform the timed shift and latch; none
/// of these calls can fail.
pub trait IndicatorPanel {
    /// Shifts a pattern into the position strip driver.
    fn shift_position(&mut self, pattern: u8);

    /// Shifts a pattern into the digit display driver.
    fn shift_digit(&mut self, pattern: u8);

    /// Turns a floor-position lamp on or off.
    fn set_floor_lamp(&mut self, floor: Floor, lit: bool);
}

/// Strip position a floor is anchored at.
#[inline]
pub const fn anchor(floor: Floor) -> u8 {
    floor.index() as u8 * POSITIONS_PER_FLOOR
}

/// Ordered strip positions traversed when moving between two floors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationPath {
    from: Floor,
    to: Floor,
    positions: Vec<u8, STRIP_LEN>,
}

impl AnimationPath {
    /// Builds the inclusive path from `from`'s anchor to `to`'s anchor.
    ///
    /// A same-floor path holds the single anchor position.
    pub fn between(from: Floor, to: Floor) -> Self {
        let start = anchor(from);
        let end = anchor(to);
        let mut positions = Vec::new();

        // At most STRIP_LEN positions fit between two anchors, push cannot fail.
        if end >= start {
            for position in start..=end {
                let _ = positions.push(position);
            }
        } else {
            for position in (end..=start).rev() {
                let _ = positions.push(position);
            }
        }

        Self { from, to, positions }
    }

    /// Source floor.
    pub fn from(&self) -> Floor {
        self.from
    }

    /// Destination floor.
    pub fn to(&self) -> Floor {
        self.to
    }

    /// Number of positions in the path.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false; a path holds at least its destination anchor.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position at a step index.
    pub fn get(&self, step: usize) -> Option<u8> {
        self.positions.get(step).copied()
    }

    /// All positions in order.
    pub fn positions(&self) -> &[u8] {
        &self.positions
    }

    /// True if this path crosses the middle floor between the end floors.
    fn passes_middle_floor(&self) -> bool {
        matches!(
            (self.from, self.to),
            (Floor::GROUND, Floor::THIRD) | (Floor::THIRD, Floor::GROUND)
        )
    }
}

/// Renders the car's position on the strip, digit display and floor lamps.
pub struct PositionIndicator<P: IndicatorPanel> {
    panel: P,
    path: Option<AnimationPath>,
    position: u8,
    digit: Floor,
}

impl<P: IndicatorPanel> PositionIndicator<P> {
    /// Creates an indicator showing `floor` on the digit display.
    pub fn new(panel: P, floor: Floor) -> Self {
        let mut indicator = Self {
            panel,
            path: None,
            position: anchor(floor),
            digit: floor,
        };
        indicator.render_digit(floor);
        indicator
    }

    /// Prepares the animation from `from` to `to` and lights the
    /// destination's floor lamp.
    ///
    /// Returns the number of steps in the animation.
    pub fn begin(&mut self, from: Floor, to: Floor) -> usize {
        for floor in Floor::ALL {
            self.panel.set_floor_lamp(floor, floor == to);
        }

        let path = AnimationPath::between(from, to);
        let steps = path.len();
        self.path = Some(path);
        steps
    }

    /// Renders one animation step.
    ///
    /// On a ground-to-third (or reverse) traversal the digit display switches
    /// to the middle floor as the strip passes its anchor. No other transit
    /// touches the digit before arrival.
    pub fn show_step(&mut self, step: usize) {
        let Some(path) = self.path.as_ref() else {
            debug_assert!(false, "animation step without a path");
            return;
        };
        let Some(position) = path.get(step) else {
            debug_assert!(false, "animation step {} beyond path", step);
            return;
        };
        let crosses_middle = path.passes_middle_floor() && position == anchor(Floor::SECOND);

        self.render_step(position);
        if crosses_middle {
            self.render_digit(Floor::SECOND);
        }
    }

    /// Completes the animation, showing the destination digit.
    pub fn finish(&mut self) {
        if let Some(path) = self.path.take() {
            self.render_digit(path.to());
        }
    }

    /// Emits a single-bit pattern at `position` to the strip.
    pub fn render_step(&mut self, position: u8) {
        debug_assert!((position as usize) < STRIP_LEN);
        self.panel.shift_position(1 << position);
        self.position = position;
    }

    /// Emits the digit pattern for `floor` to the display.
    pub fn render_digit(&mut self, floor: Floor) {
        self.panel.shift_digit(DIGIT_PATTERNS[floor.index()]);
        self.digit = floor;
    }

    /// Animation in progress, if any.
    pub fn path(&self) -> Option<&AnimationPath> {
        self.path.as_ref()
    }

    /// Last strip position rendered.
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Floor currently shown on the digit display.
    pub fn digit(&self) -> Floor {
        self.digit
    }

    /// Returns a reference to the panel hardware.
    pub fn panel(&self) -> &P {
        &self.panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockPanel {
        strip: Vec<u8, 16>,
        digits: Vec<u8, 16>,
        lamps: [bool; FLOOR_COUNT],
    }

    impl IndicatorPanel for MockPanel {
        fn shift_position(&mut self, pattern: u8) {
            let _ = self.strip.push(pattern);
        }

        fn shift_digit(&mut self, pattern: u8) {
            let _ = self.digits.push(pattern);
        }

        fn set_floor_lamp(&mut self, floor: Floor, lit: bool) {
            self.lamps[floor.index()] = lit;
        }
    }

    #[test]
    fn paths_run_between_anchors() {
        assert_eq!(
            AnimationPath::between(Floor::GROUND, Floor::THIRD).positions(),
            &[0, 1, 2, 3, 4, 5, 6]
        );
        assert_eq!(
            AnimationPath::between(Floor::SECOND, Floor::GROUND).positions(),
            &[3, 2, 1, 0]
        );
        assert_eq!(
            AnimationPath::between(Floor::SECOND, Floor::THIRD).positions(),
            &[3, 4, 5, 6]
        );
        assert_eq!(
            AnimationPath::between(Floor::THIRD, Floor::THIRD).positions(),
            &[6]
        );
    }

    #[test]
    fn new_shows_starting_floor_digit() {
        let indicator = PositionIndicator::new(MockPanel::default(), Floor::GROUND);

        assert_eq!(indicator.panel().digits.as_slice(), &[0x9F]);
        assert_eq!(indicator.digit(), Floor::GROUND);
    }

    #[test]
    fn full_traversal_flashes_middle_digit() {
        let mut indicator = PositionIndicator::new(MockPanel::default(), Floor::GROUND);
        let steps = indicator.begin(Floor::GROUND, Floor::THIRD);
        assert_eq!(steps, 7);

        for step in 0..steps {
            indicator.show_step(step);
            if step < 3 {
                assert_eq!(indicator.digit(), Floor::GROUND);
            } else {
                assert_eq!(indicator.digit(), Floor::SECOND);
            }
        }
        indicator.finish();

        let panel = indicator.panel();
        assert_eq!(
            panel.strip.as_slice(),
            &[0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40]
        );
        assert_eq!(panel.digits.as_slice(), &[0x9F, 0x25, 0x0D]);
        assert_eq!(panel.lamps, [false, false, true]);
        assert!(indicator.path().is_none());
    }

    #[test]
    fn single_hop_updates_digit_only_on_finish() {
        let mut indicator = PositionIndicator::new(MockPanel::default(), Floor::SECOND);
        let steps = indicator.begin(Floor::SECOND, Floor::GROUND);

        for step in 0..steps {
            indicator.show_step(step);
        }
        // Passing anchor 3 at the start of a 2 -> 1 hop is not the midpoint case
        assert_eq!(indicator.panel().digits.as_slice(), &[0x25]);

        indicator.finish();
        assert_eq!(indicator.panel().digits.as_slice(), &[0x25, 0x9F]);
        assert_eq!(indicator.position(), 0);
    }
}

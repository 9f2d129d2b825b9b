//! Core types shared by every controller component.

/// Number of floors served by the car.
pub const FLOOR_COUNT: usize = 3;

/// A floor index, always in `0..FLOOR_COUNT`.
///
/// Index 0 is the ground floor. Operator-facing text shows floors 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Floor(u8);

impl Floor {
    /// Ground floor.
    pub const GROUND: Floor = Floor(0);
    /// Second floor.
    pub const SECOND: Floor = Floor(1);
    /// Third floor.
    pub const THIRD: Floor = Floor(2);

    /// All floors in ascending order.
    pub const ALL: [Floor; FLOOR_COUNT] = [Floor::GROUND, Floor::SECOND, Floor::THIRD];

    /// Creates a floor, returning `None` if the index is out of range.
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < FLOOR_COUNT {
            Some(Floor(index))
        } else {
            None
        }
    }

    /// Zero-based floor index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Floor number as shown to passengers (1-based).
    #[inline]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }
}

impl TryFrom<u8> for Floor {
    type Error = FloorError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Floor::new(index).ok_or(FloorError::OutOfRange(index))
    }
}

impl From<Floor> for usize {
    fn from(floor: Floor) -> Self {
        floor.index()
    }
}

impl core::fmt::Display for Floor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Floor construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FloorError {
    /// Index is not a served floor.
    OutOfRange(u8),
}

impl core::fmt::Display for FloorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FloorError::OutOfRange(index) => {
                write!(
                    f,
                    "floor index {} out of range (car serves {} floors)",
                    index, FLOOR_COUNT
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FloorError {}

/// A logical button on the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Floor-side call button.
    Call(Floor),
    /// Door-open override.
    DoorOpen,
    /// Door-close override.
    DoorClose,
}

/// Physical door state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DoorState {
    /// Door closed (actuator at the closed angle).
    #[default]
    Closed,
    /// Door open (actuator at the open angle).
    Open,
}

/// Why the car was dispatched to a floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchReason {
    /// Servicing a pending call.
    Call,
    /// Idle timer expired away from the ground floor.
    AutoReturn,
}

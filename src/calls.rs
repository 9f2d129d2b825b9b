//! Pending floor calls and their acknowledgement lamps.
//!
//! [`CallRegistry`] is the single owner of per-floor call state. The pending
//! flag and the call lamp are tracked together so every mutation goes through
//! one place.

use crate::types::{FLOOR_COUNT, Floor};

/// Trait for abstracting the call-acknowledgement lamps.
pub trait CallLamps {
    /// Turns a floor's call lamp on or off. Cannot fail.
    fn set_call_lamp(&mut self, floor: Floor, lit: bool);
}

/// Boards without call lamps.
impl CallLamps for () {
    #[inline]
    fn set_call_lamp(&mut self, _floor: Floor, _lit: bool) {}
}

/// Per-floor call record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CallSlot {
    pending: bool,
    lamp: bool,
}

/// Holds outstanding floor calls.
///
/// A floor's pending flag is cleared the moment the car is dispatched to it,
/// but its lamp stays lit until the car arrives.
pub struct CallRegistry<L: CallLamps> {
    lamps: L,
    slots: [CallSlot; FLOOR_COUNT],
}

impl<L: CallLamps> CallRegistry<L> {
    /// Creates a registry with no pending calls and all lamps off.
    pub fn new(mut lamps: L) -> Self {
        for floor in Floor::ALL {
            lamps.set_call_lamp(floor, false);
        }

        Self {
            lamps,
            slots: [CallSlot::default(); FLOOR_COUNT],
        }
    }

    /// Flips a floor's pending flag and mirrors it on the lamp.
    ///
    /// Returns the new flag value.
    pub fn toggle(&mut self, floor: Floor) -> bool {
        let slot = &mut self.slots[floor.index()];
        slot.pending = !slot.pending;
        slot.lamp = slot.pending;
        self.lamps.set_call_lamp(floor, slot.lamp);
        slot.pending
    }

    /// Lowest-indexed floor with a pending call.
    ///
    /// Service order is strictly ascending floor index; the current floor is
    /// not special-cased and a call there is serviced like any other.
    pub fn peek_next_request(&self) -> Option<Floor> {
        Floor::ALL
            .into_iter()
            .find(|floor| self.slots[floor.index()].pending)
    }

    /// Removes and returns the next call to service, leaving its lamp lit.
    pub fn take_next_request(&mut self) -> Option<Floor> {
        let floor = self.peek_next_request()?;
        self.slots[floor.index()].pending = false;
        Some(floor)
    }

    /// Turns off a floor's lamp once the car has arrived there.
    ///
    /// A call raised again for this floor while the car was travelling keeps
    /// its lamp.
    pub fn acknowledge_arrival(&mut self, floor: Floor) {
        let slot = &mut self.slots[floor.index()];
        if !slot.pending {
            slot.lamp = false;
            self.lamps.set_call_lamp(floor, false);
        }
    }

    /// Returns true if the floor has an outstanding call.
    pub fn is_pending(&self, floor: Floor) -> bool {
        self.slots[floor.index()].pending
    }

    /// Returns true if the floor's call lamp is lit.
    pub fn is_lamp_lit(&self, floor: Floor) -> bool {
        self.slots[floor.index()].lamp
    }

    /// Returns true if any call is outstanding.
    pub fn has_pending(&self) -> bool {
        self.slots.iter().any(|slot| slot.pending)
    }

    /// Returns a reference to the lamp hardware.
    pub fn lamps(&self) -> &L {
        &self.lamps
    }
}

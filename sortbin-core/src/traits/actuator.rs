//! Actuator trait
//!
//! The selector drives a single open-loop rotary actuator. Nothing is read
//! back: a move is assumed to succeed once commanded.

use crate::config::Position;

/// Absolute-position actuator
///
/// Implemented by the servo driver on hardware and by recording fakes in
/// tests. This is the only path by which positions reach the hardware.
pub trait Actuator {
    /// Command the actuator to an absolute angle
    fn move_to(&mut self, position: Position);
}

impl<T: Actuator + ?Sized> Actuator for &mut T {
    fn move_to(&mut self, position: Position) {
        (**self).move_to(position);
    }
}

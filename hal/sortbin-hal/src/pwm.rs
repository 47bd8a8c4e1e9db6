//! Servo PWM output abstractions
//!
//! Hobby servos expect a 50 Hz pulse train whose high time (typically
//! 500-2500 µs) encodes the commanded angle. Chip HALs implement
//! [`ServoPwm`] on top of their PWM peripheral.

/// Servo frame period in microseconds (50 Hz)
pub const SERVO_PERIOD_US: u32 = 20_000;

/// Pulse high time in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseWidth(pub u16);

impl PulseWidth {
    /// Fraction of the servo frame this pulse occupies, scaled to `top`
    ///
    /// Used by HALs whose PWM compare register counts to `top` per period.
    pub fn to_compare(self, top: u16) -> u16 {
        let ticks = (u32::from(self.0) * (u32::from(top) + 1)) / SERVO_PERIOD_US;
        ticks.min(u32::from(top)) as u16
    }
}

/// Servo pulse output
///
/// Implementations own one PWM channel configured for the servo frame
/// period. Writes are fire-and-forget: there is no position feedback, and
/// once started the output keeps holding the last pulse width.
pub trait ServoPwm {
    /// Start (or keep) emitting pulses of the given width
    fn set_pulse(&mut self, width: PulseWidth);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_for_microsecond_ticks() {
        // top = 19_999 means one tick per microsecond at 50 Hz
        assert_eq!(PulseWidth(1500).to_compare(19_999), 1500);
        assert_eq!(PulseWidth(500).to_compare(19_999), 500);
    }

    #[test]
    fn test_compare_scales_to_coarser_counter() {
        // 1000 counts per frame -> 20 µs per count
        assert_eq!(PulseWidth(1500).to_compare(999), 75);
    }

    #[test]
    fn test_compare_never_exceeds_top() {
        assert_eq!(PulseWidth(u16::MAX).to_compare(999), 999);
    }
}

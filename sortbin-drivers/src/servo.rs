//! Hobby servo driver
//!
//! This driver provides:
//! - Angle to pulse-width conversion (linear between calibrated endpoints)
//! - Clamping to a configured angle range
//! - Tracking of the last commanded angle (there is no feedback)
//!
//! # Usage
//!
//! ```ignore
//! let mut servo = Servo::new(pwm, ServoConfig::default())?;
//! servo.move_to(Position(90)); // via the Actuator trait
//! ```

use sortbin_core::config::{AngleRange, Position, MAX_ANGLE};
use sortbin_core::traits::Actuator;
use sortbin_hal::{PulseWidth, ServoPwm, SERVO_PERIOD_US};

/// Servo calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    /// Pulse width at 0° (µs)
    pub min_pulse_us: u16,
    /// Pulse width at 180° (µs)
    pub max_pulse_us: u16,
    /// Angles outside this range are clamped
    pub range: AngleRange,
}

impl Default for ServoConfig {
    fn default() -> Self {
        // SG90-class servos: 0.5 ms .. 2.5 ms
        Self {
            min_pulse_us: 500,
            max_pulse_us: 2500,
            range: AngleRange::default(),
        }
    }
}

/// Servo calibration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoConfigError {
    /// Minimum pulse not below maximum, or maximum longer than the frame
    InvalidPulseRange,
    /// Range minimum above maximum, or maximum above 180°
    InvalidAngleRange,
}

impl ServoConfig {
    /// Check calibration consistency
    pub fn validate(&self) -> Result<(), ServoConfigError> {
        if self.min_pulse_us >= self.max_pulse_us || u32::from(self.max_pulse_us) >= SERVO_PERIOD_US {
            return Err(ServoConfigError::InvalidPulseRange);
        }
        if self.range.min > self.range.max || self.range.max > MAX_ANGLE {
            return Err(ServoConfigError::InvalidAngleRange);
        }
        Ok(())
    }

    /// Pulse width for an angle, after clamping to the configured range
    pub fn pulse_for(&self, position: Position) -> PulseWidth {
        let angle = u32::from(self.range.clamp(position).degrees());
        let min = u32::from(self.min_pulse_us);
        let span = u32::from(self.max_pulse_us - self.min_pulse_us);
        // At most max_pulse_us, so it fits back into u16
        PulseWidth((min + angle * span / u32::from(MAX_ANGLE)) as u16)
    }
}

/// Servo driver over any [`ServoPwm`] output
pub struct Servo<P: ServoPwm> {
    pwm: P,
    config: ServoConfig,
    /// Last commanded angle (after clamping), if any
    position: Option<Position>,
}

impl<P: ServoPwm> Servo<P> {
    /// Create a servo driver
    ///
    /// No pulses are emitted until the first move.
    pub fn new(pwm: P, config: ServoConfig) -> Result<Self, ServoConfigError> {
        config.validate()?;
        Ok(Self {
            pwm,
            config,
            position: None,
        })
    }

    /// Last commanded angle, or `None` before the first move
    pub fn position(&self) -> Option<Position> {
        self.position
    }
}

impl<P: ServoPwm> Actuator for Servo<P> {
    fn move_to(&mut self, position: Position) {
        let clamped = self.config.range.clamp(position);
        self.pwm.set_pulse(self.config.pulse_for(clamped));
        self.position = Some(clamped);
    }
}

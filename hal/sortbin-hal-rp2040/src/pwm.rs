//! Servo pulse output on RP2040 PWM slices
//!
//! Each RP2040 GPIO maps to a fixed PWM slice and channel:
//! slice = (pin / 2) % 8, channel A for even pins and B for odd pins.
//! The [`servo_pwm!`] macro resolves that mapping from a pin number so the
//! servo pin can come from the build-time machine config.

use embassy_rp::pwm::{ChannelAPin, ChannelBPin, Config, Pwm, Slice};
use embassy_rp::Peri;
use sortbin_hal::{PulseWidth, ServoPwm, SERVO_PERIOD_US};

/// Servo frame rate
const SERVO_FREQ_HZ: u32 = 1_000_000 / SERVO_PERIOD_US;

/// Take a servo PWM output by pin number from peripherals
///
/// Usage:
/// ```ignore
/// let servo_pwm = servo_pwm!(p, 9); // PIN_9 on PWM_SLICE4, channel B
/// ```
#[macro_export]
macro_rules! servo_pwm {
    ($p:expr, 0) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE0, $p.PIN_0) };
    ($p:expr, 1) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE0, $p.PIN_1) };
    ($p:expr, 2) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE1, $p.PIN_2) };
    ($p:expr, 3) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE1, $p.PIN_3) };
    ($p:expr, 4) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE2, $p.PIN_4) };
    ($p:expr, 5) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE2, $p.PIN_5) };
    ($p:expr, 6) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE3, $p.PIN_6) };
    ($p:expr, 7) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE3, $p.PIN_7) };
    ($p:expr, 8) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE4, $p.PIN_8) };
    ($p:expr, 9) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE4, $p.PIN_9) };
    ($p:expr, 10) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE5, $p.PIN_10) };
    ($p:expr, 11) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE5, $p.PIN_11) };
    ($p:expr, 12) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE6, $p.PIN_12) };
    ($p:expr, 13) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE6, $p.PIN_13) };
    ($p:expr, 14) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE7, $p.PIN_14) };
    ($p:expr, 15) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE7, $p.PIN_15) };
    ($p:expr, 16) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE0, $p.PIN_16) };
    ($p:expr, 17) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE0, $p.PIN_17) };
    ($p:expr, 18) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE1, $p.PIN_18) };
    ($p:expr, 19) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE1, $p.PIN_19) };
    ($p:expr, 20) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE2, $p.PIN_20) };
    ($p:expr, 21) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE2, $p.PIN_21) };
    ($p:expr, 22) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE3, $p.PIN_22) };
    ($p:expr, 23) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE3, $p.PIN_23) };
    ($p:expr, 24) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE4, $p.PIN_24) };
    ($p:expr, 25) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE4, $p.PIN_25) };
    ($p:expr, 26) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE5, $p.PIN_26) };
    ($p:expr, 27) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE5, $p.PIN_27) };
    ($p:expr, 28) => { $crate::pwm::RpServoPwm::channel_a($p.PWM_SLICE6, $p.PIN_28) };
    ($p:expr, 29) => { $crate::pwm::RpServoPwm::channel_b($p.PWM_SLICE6, $p.PIN_29) };
}

/// PWM channel within a slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PwmChannel {
    A,
    B,
}

/// Servo output on one channel of an RP2040 PWM slice
pub struct RpServoPwm {
    pwm: Pwm<'static>,
    channel: PwmChannel,
    config: Config,
}

impl RpServoPwm {
    /// Servo output on channel A of `slice`
    pub fn channel_a<T: Slice>(slice: Peri<'static, T>, pin: Peri<'static, impl ChannelAPin<T>>) -> Self {
        let config = servo_config();
        let pwm = Pwm::new_output_a(slice, pin, config.clone());
        Self::new(pwm, PwmChannel::A, config)
    }

    /// Servo output on channel B of `slice`
    pub fn channel_b<T: Slice>(slice: Peri<'static, T>, pin: Peri<'static, impl ChannelBPin<T>>) -> Self {
        let config = servo_config();
        let pwm = Pwm::new_output_b(slice, pin, config.clone());
        Self::new(pwm, PwmChannel::B, config)
    }

    fn new(pwm: Pwm<'static>, channel: PwmChannel, config: Config) -> Self {
        Self {
            pwm,
            channel,
            config,
        }
    }

    fn set_compare(&mut self, compare: u16) {
        match self.channel {
            PwmChannel::A => self.config.compare_a = compare,
            PwmChannel::B => self.config.compare_b = compare,
        }
        self.pwm.set_config(&self.config);
    }
}

impl ServoPwm for RpServoPwm {
    fn set_pulse(&mut self, width: PulseWidth) {
        let compare = width.to_compare(self.config.top);
        self.set_compare(compare);
    }
}

/// 50 Hz frame with the finest resolution the 16-bit counter allows
///
/// Output starts at zero duty.
fn servo_config() -> Config {
    let clock_hz = embassy_rp::clocks::clk_sys_freq();
    let divider = (clock_hz / (SERVO_FREQ_HZ * 65_536) + 1) as u8;
    let top = (clock_hz / (SERVO_FREQ_HZ * u32::from(divider)) - 1) as u16;

    let mut config = Config::default();
    config.top = top;
    config.divider = divider.into();
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

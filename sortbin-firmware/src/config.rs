//! Build-time machine configuration
//!
//! `build.rs` validates `machine.toml` and generates the constants included
//! here. This module turns them into the library configuration types.

use embassy_rp::uart::Config as UartConfig;
use sortbin_core::config::{AngleRange, BinPositions, Position, SorterConfig};
use sortbin_drivers::ServoConfig;

include!(concat!(env!("OUT_DIR"), "/machine_config.rs"));

/// Selector configuration from machine.toml
pub fn sorter_config() -> SorterConfig {
    SorterConfig {
        angle_range: angle_range(),
        positions: BinPositions {
            neutral: Position(NEUTRAL),
            plastic: Position(PLASTICO),
            organic: Position(ORGANICO),
            metal: Position(METAL),
        },
        dwell_ms: DWELL_MS,
    }
}

/// Servo calibration from machine.toml
pub fn servo_config() -> ServoConfig {
    ServoConfig {
        min_pulse_us: MIN_PULSE_US,
        max_pulse_us: MAX_PULSE_US,
        range: angle_range(),
    }
}

/// Host serial link settings
pub fn uart_config() -> UartConfig {
    let mut cfg = UartConfig::default();
    cfg.baudrate = BAUDRATE;
    cfg
}

fn angle_range() -> AngleRange {
    AngleRange {
        min: MIN_ANGLE,
        max: MAX_ANGLE,
    }
}

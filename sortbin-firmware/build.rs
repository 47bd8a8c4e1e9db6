//! Build script for sortbin-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates machine.toml at compile time
//! - Generates `machine_config.rs` with the validated values

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIOs taken by UART0 (TX, RX)
const UART_PINS: [i64; 2] = [0, 1];

/// Highest RP2040 user GPIO
const MAX_GPIO: i64 = 29;

/// Servo frame period (µs)
const SERVO_PERIOD_US: i64 = 20_000;

/// Validated machine configuration
struct MachineToml {
    pin: i64,
    min_angle: i64,
    max_angle: i64,
    min_pulse_us: i64,
    max_pulse_us: i64,
    neutral: i64,
    plastico: i64,
    organico: i64,
    metal: i64,
    dwell_ms: i64,
    baudrate: i64,
}

fn main() {
    setup_linker();
    let machine = validate_config();
    generate_config(&machine);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate machine.toml configuration at compile time
fn validate_config() -> MachineToml {
    // Re-run if machine.toml changes
    println!("cargo:rerun-if-changed=machine.toml");

    let config_path = Path::new("machine.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: machine.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a machine.toml configuration file.        ║\n\
            ║  Please create one in the sortbin-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read machine.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in machine.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let machine = MachineToml {
        pin: read_int(&config, "servo", "pin", None, &mut errors),
        min_angle: read_int(&config, "servo", "min_angle", Some(0), &mut errors),
        max_angle: read_int(&config, "servo", "max_angle", Some(180), &mut errors),
        min_pulse_us: read_int(&config, "servo", "min_pulse_us", Some(500), &mut errors),
        max_pulse_us: read_int(&config, "servo", "max_pulse_us", Some(2500), &mut errors),
        neutral: read_int(&config, "positions", "neutral", None, &mut errors),
        plastico: read_int(&config, "positions", "plastico", None, &mut errors),
        organico: read_int(&config, "positions", "organico", None, &mut errors),
        metal: read_int(&config, "positions", "metal", None, &mut errors),
        dwell_ms: read_int(&config, "timing", "dwell_ms", Some(3000), &mut errors),
        baudrate: read_int(&config, "serial", "baudrate", Some(9600), &mut errors),
    };

    if errors.is_empty() {
        validate_servo(&machine, &mut errors);
        validate_positions(&machine, &mut errors);
        validate_timing(&machine, &mut errors);
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid machine.toml                                     ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=machine.toml validated successfully");
    machine
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read `[section] key` as an integer, falling back to `default` when absent
fn read_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: Option<i64>,
    errors: &mut Vec<String>,
) -> i64 {
    let table = match config.get(section) {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push(format!("[{}] must be a table", section));
            return 0;
        }
        None => {
            if let Some(value) = default {
                return value;
            }
            errors.push(format!("Missing [{}] section", section));
            return 0;
        }
    };

    match (table.get(key), default) {
        (Some(toml::Value::Integer(value)), _) => *value,
        (Some(_), _) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            0
        }
        (None, Some(value)) => value,
        (None, None) => {
            errors.push(format!("[{}] missing '{}'", section, key));
            0
        }
    }
}

/// Validate servo wiring and calibration
fn validate_servo(machine: &MachineToml, errors: &mut Vec<String>) {
    if machine.pin < 0 || machine.pin > MAX_GPIO {
        errors.push(format!("[servo] pin must be 0-{}", MAX_GPIO));
    } else if UART_PINS.contains(&machine.pin) {
        errors.push(format!("[servo] pin {} is used by UART0", machine.pin));
    }

    if machine.min_angle < 0 || machine.max_angle > 180 || machine.min_angle > machine.max_angle {
        errors.push("[servo] angles must satisfy 0 <= min_angle <= max_angle <= 180".to_string());
    }

    if machine.min_pulse_us < 0
        || machine.min_pulse_us >= machine.max_pulse_us
        || machine.max_pulse_us >= SERVO_PERIOD_US
    {
        errors.push(format!(
            "[servo] pulses must satisfy min_pulse_us < max_pulse_us < {}",
            SERVO_PERIOD_US
        ));
    }
}

/// Validate that every bin angle is reachable
fn validate_positions(machine: &MachineToml, errors: &mut Vec<String>) {
    let positions = [
        ("neutral", machine.neutral),
        ("plastico", machine.plastico),
        ("organico", machine.organico),
        ("metal", machine.metal),
    ];

    for (name, angle) in positions {
        if angle < machine.min_angle || angle > machine.max_angle {
            errors.push(format!(
                "[positions] {} must be {}-{}",
                name, machine.min_angle, machine.max_angle
            ));
        }
    }
}

/// Validate dwell and serial settings
fn validate_timing(machine: &MachineToml, errors: &mut Vec<String>) {
    if machine.dwell_ms <= 0 || machine.dwell_ms > u32::MAX as i64 {
        errors.push("[timing] dwell_ms must be positive".to_string());
    }

    if machine.baudrate <= 0 || machine.baudrate > 921_600 {
        errors.push("[serial] baudrate must be 1-921600".to_string());
    }
}

/// Write the validated values as Rust constants
fn generate_config(machine: &MachineToml) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("machine_config.rs")).unwrap();

    writeln!(f, "// Generated by build.rs from machine.toml").unwrap();
    writeln!(f, "pub const SERVO_PIN: u8 = {};", machine.pin).unwrap();
    writeln!(f, "pub const MIN_ANGLE: u8 = {};", machine.min_angle).unwrap();
    writeln!(f, "pub const MAX_ANGLE: u8 = {};", machine.max_angle).unwrap();
    writeln!(f, "pub const MIN_PULSE_US: u16 = {};", machine.min_pulse_us).unwrap();
    writeln!(f, "pub const MAX_PULSE_US: u16 = {};", machine.max_pulse_us).unwrap();
    writeln!(f, "pub const NEUTRAL: u8 = {};", machine.neutral).unwrap();
    writeln!(f, "pub const PLASTICO: u8 = {};", machine.plastico).unwrap();
    writeln!(f, "pub const ORGANICO: u8 = {};", machine.organico).unwrap();
    writeln!(f, "pub const METAL: u8 = {};", machine.metal).unwrap();
    writeln!(f, "pub const DWELL_MS: u32 = {};", machine.dwell_ms).unwrap();
    writeln!(f, "pub const BAUDRATE: u32 = {};", machine.baudrate).unwrap();

    // Peripheral names must be literal tokens, so the pin is baked into a macro
    writeln!(f, "macro_rules! take_servo_pwm {{").unwrap();
    writeln!(
        f,
        "    ($p:expr) => {{ sortbin_hal_rp2040::servo_pwm!($p, {}) }};",
        machine.pin
    )
    .unwrap();
    writeln!(f, "}}").unwrap();
    writeln!(f, "pub(crate) use take_servo_pwm;").unwrap();
}

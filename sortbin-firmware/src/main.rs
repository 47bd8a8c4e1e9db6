//! Sortbin - Waste Sorting Bin Selector Firmware
//!
//! Main firmware binary for RP2040-based bin selectors. Listens for material
//! classifications on UART0, swings the servo to the matching bin and brings
//! it back to neutral after the configured dwell.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sortbin_core::rx::RxQueue;
use sortbin_core::Sorter;
use sortbin_drivers::Servo;

mod channels;
mod clock;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Receive queue shared by the RX and control tasks
static RX_QUEUE: StaticCell<RxQueue> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Sortbin firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let sorter_config = config::sorter_config();
    let servo_config = config::servo_config();
    info!(
        "Config: neutral={} plastico={} organico={} metal={} dwell={}ms",
        sorter_config.positions.neutral.degrees(),
        sorter_config.positions.plastic.degrees(),
        sorter_config.positions.organic.degrees(),
        sorter_config.positions.metal.degrees(),
        sorter_config.dwell_ms
    );

    // Servo PWM on the configured GPIO
    let pwm = config::take_servo_pwm!(p);
    info!("Servo PWM on GPIO {}", config::SERVO_PIN);

    let servo = match Servo::new(pwm, servo_config) {
        Ok(servo) => servo,
        Err(e) => {
            error!("Invalid servo calibration: {:?}", e);
            halt().await
        }
    };

    let sorter = match Sorter::new(sorter_config, servo) {
        Ok(sorter) => sorter,
        Err(e) => {
            error!("Invalid selector config: {:?}", e);
            halt().await
        }
    };

    // Host serial link on UART0 (GPIO0 TX, GPIO1 RX)
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, config::uart_config());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    info!("UART initialized at {} baud", config::BAUDRATE);

    let queue = RX_QUEUE.init(RxQueue::new());
    let (producer, consumer) = queue.split();

    // Spawn tasks
    info!("Spawning tasks...");

    spawner.spawn(tasks::serial_rx_task(rx, producer)).unwrap();
    spawner.spawn(tasks::control_task(sorter, consumer, tx)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Park forever after a fatal configuration error
async fn halt() -> ! {
    loop {
        Timer::after_secs(60).await;
    }
}

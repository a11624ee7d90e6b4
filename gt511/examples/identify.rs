//! Identify example
//!
//! Set `GT511_PORT` to the sensor's serial port (default `/dev/ttyUSB0`).

use std::time::Duration;

use gt511::{DeadlineHost, Mode, Sensor, SerialTransport};
use gt511_core::constants::DEFAULT_BAUD_RATE;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let path = std::env::var("GT511_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    let mut transport = SerialTransport::new(path, DEFAULT_BAUD_RATE);
    transport.open()?;

    let host = DeadlineHost::new(Duration::from_secs(10))
        .with_handler(|mode: Mode, event| println!("[{}] {}", mode, event));

    let mut sensor = Sensor::new(transport, host);

    if let Some(info) = sensor.open(true)? {
        println!("Firmware: 0x{:08X}", info.firmware_version);
        println!("Serial:   {}", info.serial_hex());
    }

    println!("Enrolled: {}", sensor.enroll_count()?);

    match sensor.run_identify() {
        Ok(id) => println!("Matched slot {}", id),
        Err(err) => println!("No match: {}", err),
    }

    sensor.close()?;

    Ok(())
}

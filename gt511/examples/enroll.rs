//! Enroll example
//!
//! Set `GT511_PORT` to the sensor's serial port (default `/dev/ttyUSB0`).
//! Pass `--clear` to delete every template first.

use std::time::Duration;

use gt511::{DeadlineHost, ErrorCode, Mode, Sensor, SerialTransport};
use gt511_core::constants::DEFAULT_BAUD_RATE;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gt511=debug".into()),
        )
        .init();

    let path = std::env::var("GT511_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());
    let clear = std::env::args().any(|arg| arg == "--clear");

    println!("Serial ports: {:?}", SerialTransport::list_ports()?);

    let mut transport =
        SerialTransport::new(path, DEFAULT_BAUD_RATE).with_timeout(Duration::from_millis(500));
    transport.open()?;

    let host = DeadlineHost::new(Duration::from_secs(10))
        .with_mode_timeout(Mode::Enroll, Duration::from_secs(20))
        .with_handler(|mode: Mode, event| println!("[{}] {}", mode, event));

    let mut sensor = Sensor::new(transport, host);
    sensor.open(false)?;

    if clear {
        match sensor.delete_all() {
            Ok(()) | Err(ErrorCode::DbIsEmpty) => println!("Database cleared"),
            Err(err) => return Err(err.into()),
        }
    }

    let slot = sensor.run_enroll()?;
    println!("Enrolled into slot {}", slot);

    println!("Verifying...");
    sensor.run_verify(slot)?;
    println!("Verified slot {}", slot);

    sensor.close()?;

    Ok(())
}

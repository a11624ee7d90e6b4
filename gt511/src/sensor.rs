//! High-level sensor interface

use tracing::{debug, info, trace, warn};

use gt511_core::{
    constants::{CAPTURE_HIGH_QUALITY, OPEN_WITH_INFO},
    Command, DataPacket, Packet, Reply,
};
use gt511_transport::Transport;
use gt511_types::{ErrorCode, SensorInfo};

use crate::config::SensorConfig;
use crate::error::{OrLocal, Result};
use crate::host::Host;

/// Image quality requested from a capture
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CaptureQuality {
    /// Faster capture, used for identify and verify
    Normal,

    /// Slower, better image, used for enrollment
    High,
}

impl CaptureQuality {
    fn parameter(self) -> u32 {
        match self {
            Self::Normal => 0,
            Self::High => CAPTURE_HIGH_QUALITY,
        }
    }
}

/// One of the three enrollment captures
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EnrollStep {
    First,
    Second,
    Third,
}

impl EnrollStep {
    /// All steps in order
    pub const ALL: [Self; 3] = [Self::First, Self::Second, Self::Third];

    /// Command issued after this step's capture
    pub fn command(self) -> Command {
        match self {
            Self::First => Command::Enroll1,
            Self::Second => Command::Enroll2,
            Self::Third => Command::Enroll3,
        }
    }

    /// Zero-based step index
    pub fn index(self) -> u32 {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::First => Some(Self::Second),
            Self::Second => Some(Self::Third),
            Self::Third => None,
        }
    }
}

/// GT-511C sensor
///
/// Owns the transport, the host capabilities and the transaction scratch
/// buffer. Every call blocks until its transaction (or wait loop) is done.
/// The sensor is not reentrant: share it between threads only behind a lock.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
///
/// use gt511::{DeadlineHost, SerialTransport, Sensor};
///
/// fn main() -> anyhow::Result<()> {
///     let mut transport = SerialTransport::new("/dev/ttyUSB0", 9600);
///     transport.open()?;
///
///     let mut sensor = Sensor::new(transport, DeadlineHost::new(Duration::from_secs(5)));
///     sensor.open(false)?;
///
///     println!("Enrolled: {}", sensor.enroll_count()?);
///
///     sensor.close()?;
///     Ok(())
/// }
/// ```
pub struct Sensor<T, H> {
    transport: T,
    host: H,
    config: SensorConfig,
    scratch: [u8; DataPacket::SENSOR_INFO_SIZE],
    info: Option<SensorInfo>,
    open: bool,
}

impl<T: Transport, H: Host> Sensor<T, H> {
    /// Create a new sensor instance with the default configuration
    pub fn new(transport: T, host: H) -> Self {
        Self {
            transport,
            host,
            config: SensorConfig::default(),
            scratch: [0; DataPacket::SENSOR_INFO_SIZE],
            info: None,
            open: false,
        }
    }

    /// Set configuration
    pub fn with_config(mut self, config: SensorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set number of template slots
    pub fn with_slot_count(mut self, slot_count: u32) -> Self {
        self.config.slot_count = slot_count;
        self
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Give back the transport and host
    pub fn into_parts(self) -> (T, H) {
        (self.transport, self.host)
    }

    /// Check if Open was acknowledged (and Close was not)
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Sensor info from the last Open that requested it
    pub fn info(&self) -> Option<&SensorInfo> {
        self.info.as_ref()
    }

    /// Run one command/response transaction
    ///
    /// Sends `command` with `parameter` (0 when `None`) and waits for one
    /// response packet. On ACK the response parameter is returned. On NACK
    /// the sensor's error code is returned untouched, unknown values
    /// included. Transport and framing failures give [`ErrorCode::Other`].
    /// Nothing is retried.
    pub fn execute(&mut self, command: Command, parameter: Option<u32>) -> Result<u32> {
        let packet = Packet::new(command, parameter.unwrap_or(0));

        if command.is_database_write() {
            debug!("Sending {}", packet);
        } else {
            trace!("Sending {}", packet);
        }

        self.transport.send(&packet.encode()).or_local(command)?;

        let frame = &mut self.scratch[..Packet::SIZE];
        let count = self.transport.receive(frame).or_local(command)?;
        if count != Packet::SIZE {
            warn!(
                "{} response: expected {} bytes, got {}",
                command,
                Packet::SIZE,
                count
            );
            return Err(ErrorCode::Other);
        }

        let reply = Reply::decode(&self.scratch[..Packet::SIZE]).or_local(command)?;
        trace!("Received {:?}", reply);

        match reply {
            Reply::Ack(output) => Ok(output),
            Reply::Nack(raw) => match ErrorCode::from_raw(raw) {
                Some(err) => {
                    debug!("{} rejected: {}", command, err);
                    Err(err)
                }
                // NACK carrying "no error": success, output left as sent
                None => Ok(parameter.unwrap_or(0)),
            },
        }
    }

    /// Initialise the sensor
    ///
    /// With `with_info`, the sensor follows its ACK with a data packet
    /// holding [`SensorInfo`]. That packet is checked for length only.
    /// The sensor counts as open only once the info packet has been read.
    pub fn open(&mut self, with_info: bool) -> Result<Option<SensorInfo>> {
        info!("Opening sensor on {}...", self.transport.name());

        let parameter = if with_info { OPEN_WITH_INFO } else { 0 };
        self.execute(Command::Open, Some(parameter))?;

        if !with_info {
            self.open = true;
            info!("Sensor opened");
            return Ok(None);
        }

        let count = self.transport.receive(&mut self.scratch).or_local(Command::Open)?;
        if count != DataPacket::SENSOR_INFO_SIZE {
            warn!(
                "Sensor info: expected {} bytes, got {}",
                DataPacket::SENSOR_INFO_SIZE,
                count
            );
            return Err(ErrorCode::Other);
        }

        if !DataPacket::checksum_matches(&self.scratch) {
            debug!("Sensor info checksum mismatch (not enforced)");
        }

        let info = DataPacket::decode_sensor_info(&self.scratch).or_local(Command::Open)?;
        info!("Sensor opened: {}", info);

        self.open = true;
        self.info = Some(info.clone());
        Ok(Some(info))
    }

    /// Terminate the session
    pub fn close(&mut self) -> Result<()> {
        info!("Closing sensor on {}...", self.transport.name());

        self.execute(Command::Close, None)?;
        self.open = false;

        info!("Sensor closed");
        Ok(())
    }

    /// Switch the CMOS LED
    pub fn set_illumination(&mut self, on: bool) -> Result<()> {
        self.execute(Command::CmosLed, Some(u32::from(on)))?;
        Ok(())
    }

    /// Switch the LED off, ignoring failures
    pub(crate) fn illumination_off(&mut self) {
        if let Err(err) = self.set_illumination(false) {
            warn!("Ignoring illumination-off failure: {}", err);
        }
    }

    /// Check whether a finger is on the sensor
    pub fn is_finger_pressed(&mut self) -> Result<bool> {
        // Sensor answers 0 when pressed
        let output = self.execute(Command::IsPressFinger, Some(0))?;
        Ok(output == 0)
    }

    /// Capture a fingerprint image for the next identify/verify/enroll
    pub fn capture_finger(&mut self, quality: CaptureQuality) -> Result<()> {
        self.execute(Command::CaptureFinger, Some(quality.parameter()))?;
        Ok(())
    }

    /// Match the captured image against all slots; returns the matched id
    pub fn identify(&mut self) -> Result<u32> {
        self.execute(Command::Identify, Some(0))
    }

    /// Match the captured image against slot `id`
    pub fn verify(&mut self, id: u32) -> Result<()> {
        self.execute(Command::Verify, Some(id))?;
        Ok(())
    }

    /// Begin enrolling into slot `id`
    pub fn enroll_start(&mut self, id: u32) -> Result<()> {
        self.execute(Command::EnrollStart, Some(id))?;
        Ok(())
    }

    /// Submit the captured image as enrollment `step`
    pub fn enroll_step(&mut self, step: EnrollStep) -> Result<()> {
        self.execute(step.command(), None)?;
        Ok(())
    }

    /// Delete the template in slot `id`
    pub fn delete(&mut self, id: u32) -> Result<()> {
        self.execute(Command::DeleteId, Some(id))?;
        Ok(())
    }

    /// Delete all templates
    pub fn delete_all(&mut self) -> Result<()> {
        self.execute(Command::DeleteAll, None)?;
        Ok(())
    }

    /// Number of enrolled templates
    pub fn enroll_count(&mut self) -> Result<u32> {
        self.execute(Command::GetEnrollCount, Some(0))
    }

    /// Check whether slot `id` holds a template
    ///
    /// `Ok(())` when used; [`ErrorCode::IsNotUsed`] when free.
    pub fn check_enrolled(&mut self, id: u32) -> Result<()> {
        self.execute(Command::CheckEnrolled, Some(id))?;
        Ok(())
    }
}

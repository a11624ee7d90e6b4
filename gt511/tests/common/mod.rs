//! Common test utilities for integration tests.
//!
//! [`SimulatedSensor`] answers command frames the way a GT-511C does: it keeps
//! a slot table, tracks the LED, alternates the finger between down and up on
//! every press query, and can be told to NACK a given occurrence of a command.
//! [`RecordingHost`] records every notification and can time out on demand.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io;

use gt511::{Host, Mode, UiEvent};
use gt511_core::{Command, DataPacket, Packet, Reply};
use gt511_transport::Transport;
use gt511_types::{ErrorCode, SensorInfo};

/// Firmware version reported by the simulated sensor
pub const FIRMWARE_VERSION: u32 = 0x2012_1105;

/// ISO area size reported by the simulated sensor
pub const ISO_AREA_MAX_SIZE: u32 = 0x3A98;

/// Serial number reported by the simulated sensor
pub const SERIAL_NUMBER: [u8; 16] = *b"GT511C3-00000042";

#[derive(Debug)]
struct Fault {
    command: Command,
    occurrence: usize,
    error: u32,
}

/// In-memory GT-511C
#[derive(Debug)]
pub struct SimulatedSensor {
    /// `true` when the slot holds a template
    pub slots: Vec<bool>,

    /// Every command received, with its parameter
    pub commands: Vec<(Command, u32)>,

    /// Current LED state
    pub led: bool,

    /// Number of LED-on commands
    pub led_on: usize,

    /// Number of LED-off commands
    pub led_off: usize,

    /// Fail every send
    pub fail_sends: bool,

    /// Drop the last byte of the Open info packet
    pub truncate_info: bool,

    /// Corrupt the checksum of the Open info packet
    pub corrupt_info_checksum: bool,

    finger_down: bool,
    enrolling: Option<u32>,
    faults: Vec<Fault>,
    counts: HashMap<Command, usize>,
    pending: VecDeque<u8>,
}

impl SimulatedSensor {
    /// Sensor whose slot table is `slots` (`true` = used)
    pub fn new(slots: &[bool]) -> Self {
        Self {
            slots: slots.to_vec(),
            commands: Vec::new(),
            led: false,
            led_on: 0,
            led_off: 0,
            fail_sends: false,
            truncate_info: false,
            corrupt_info_checksum: false,
            finger_down: false,
            enrolling: None,
            faults: Vec::new(),
            counts: HashMap::new(),
            pending: VecDeque::new(),
        }
    }

    /// Sensor with `count` free slots
    pub fn empty(count: usize) -> Self {
        Self::new(&vec![false; count])
    }

    /// NACK the `occurrence`-th (zero-based) `command` with `error`
    pub fn nack_on(self, command: Command, occurrence: usize, error: ErrorCode) -> Self {
        self.nack_raw(command, occurrence, error.raw())
    }

    /// NACK with an arbitrary raw value
    pub fn nack_raw(mut self, command: Command, occurrence: usize, error: u32) -> Self {
        self.faults.push(Fault {
            command,
            occurrence,
            error,
        });
        self
    }

    /// How many times `command` was received
    pub fn count(&self, command: Command) -> usize {
        self.commands.iter().filter(|(c, _)| *c == command).count()
    }

    /// Parameters sent with `command`, in order
    pub fn parameters(&self, command: Command) -> Vec<u32> {
        self.commands
            .iter()
            .filter(|(c, _)| *c == command)
            .map(|(_, p)| *p)
            .collect()
    }

    /// Commands received, without parameters
    pub fn command_log(&self) -> Vec<Command> {
        self.commands.iter().map(|(c, _)| *c).collect()
    }

    fn slot(&self, id: u32) -> Option<bool> {
        self.slots.get(id as usize).copied()
    }

    fn handle(&mut self, command: Command, parameter: u32) -> Reply {
        let nack = |code: ErrorCode| Reply::Nack(code.raw());

        match command {
            Command::Open | Command::Close | Command::CaptureFinger => Reply::Ack(0),
            Command::CmosLed => {
                self.led = parameter != 0;
                if self.led {
                    self.led_on += 1;
                } else {
                    self.led_off += 1;
                }
                Reply::Ack(0)
            }
            Command::IsPressFinger => {
                self.finger_down = !self.finger_down;
                Reply::Ack(if self.finger_down { 0 } else { 1 })
            }
            Command::GetEnrollCount => {
                Reply::Ack(self.slots.iter().filter(|used| **used).count() as u32)
            }
            Command::CheckEnrolled => match self.slot(parameter) {
                None => nack(ErrorCode::InvalidPos),
                Some(true) => Reply::Ack(0),
                Some(false) => nack(ErrorCode::IsNotUsed),
            },
            Command::EnrollStart => match self.slot(parameter) {
                None => nack(ErrorCode::InvalidPos),
                Some(true) => nack(ErrorCode::IsAlreadyUsed),
                Some(false) => {
                    self.enrolling = Some(parameter);
                    Reply::Ack(0)
                }
            },
            Command::Enroll1 | Command::Enroll2 => match self.enrolling {
                Some(_) => Reply::Ack(0),
                None => nack(ErrorCode::TurnErr),
            },
            Command::Enroll3 => match self.enrolling.take() {
                Some(id) => {
                    self.slots[id as usize] = true;
                    Reply::Ack(0)
                }
                None => nack(ErrorCode::TurnErr),
            },
            Command::DeleteId => match self.slot(parameter) {
                Some(true) => {
                    self.slots[parameter as usize] = false;
                    Reply::Ack(0)
                }
                _ => nack(ErrorCode::InvalidPos),
            },
            Command::DeleteAll => {
                if self.slots.iter().any(|used| *used) {
                    self.slots.iter_mut().for_each(|used| *used = false);
                    Reply::Ack(0)
                } else {
                    nack(ErrorCode::DbIsEmpty)
                }
            }
            Command::Verify => match self.slot(parameter) {
                Some(true) => Reply::Ack(0),
                Some(false) => nack(ErrorCode::VerifyFailed),
                None => nack(ErrorCode::InvalidPos),
            },
            Command::Identify => match self.slots.iter().position(|used| *used) {
                Some(id) => Reply::Ack(id as u32),
                None => nack(ErrorCode::DbIsEmpty),
            },
        }
    }
}

impl Transport for SimulatedSensor {
    fn send(&mut self, data: &[u8]) -> gt511_transport::Result<()> {
        if self.fail_sends {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "simulated send failure").into());
        }

        let packet = Packet::decode(data).expect("driver sent a malformed frame");
        let command = packet.command().expect("driver sent an unknown command");
        self.commands.push((command, packet.parameter));

        let occurrence = self.counts.entry(command).or_insert(0);
        let current = *occurrence;
        *occurrence += 1;

        let fault = self
            .faults
            .iter()
            .find(|f| f.command == command && f.occurrence == current)
            .map(|f| f.error);

        let reply = match fault {
            Some(error) => Reply::Nack(error),
            None => self.handle(command, packet.parameter),
        };
        self.pending.extend(reply.encode());

        if command == Command::Open && packet.parameter == 1 && matches!(reply, Reply::Ack(_)) {
            let mut info = DataPacket::encode(&info_payload()).to_vec();
            if self.corrupt_info_checksum {
                if let Some(last) = info.last_mut() {
                    *last ^= 0xFF;
                }
            }
            if self.truncate_info {
                info.pop();
            }
            self.pending.extend(info);
        }

        Ok(())
    }

    fn receive(&mut self, buf: &mut [u8]) -> gt511_transport::Result<usize> {
        let count = buf.len().min(self.pending.len());
        for (dst, src) in buf.iter_mut().zip(self.pending.drain(..count)) {
            *dst = src;
        }
        Ok(count)
    }

    fn name(&self) -> String {
        "simulated".to_string()
    }
}

/// Payload of the Open info data packet
pub fn info_payload() -> Vec<u8> {
    let mut payload = Vec::with_capacity(SensorInfo::SIZE);
    payload.extend_from_slice(&FIRMWARE_VERSION.to_le_bytes());
    payload.extend_from_slice(&ISO_AREA_MAX_SIZE.to_le_bytes());
    payload.extend_from_slice(&SERIAL_NUMBER);
    payload
}

/// Host that records notifications
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Every notification, in order
    pub events: Vec<(Mode, UiEvent)>,

    /// Every armed timeout, in order
    pub armed: Vec<Mode>,

    /// Total number of timeout polls
    pub polls: usize,

    expire_after: Option<usize>,
    expire_on_arm: Option<usize>,
    polls_since_arm: usize,
}

impl RecordingHost {
    /// Host that never times out
    pub fn new() -> Self {
        Self::default()
    }

    /// Host that times out once `polls` polls of a wait have passed
    ///
    /// `expiring_after(0)` reports expiry on the first poll.
    pub fn expiring_after(polls: usize) -> Self {
        Self {
            expire_after: Some(polls),
            ..Self::default()
        }
    }

    /// Host whose `arm`-th wait (zero-based) times out on its first poll
    ///
    /// Earlier and later waits never time out.
    pub fn expiring_on_arm(arm: usize) -> Self {
        Self {
            expire_after: Some(0),
            expire_on_arm: Some(arm),
            ..Self::default()
        }
    }

    /// Notified events, without modes
    pub fn event_log(&self) -> Vec<UiEvent> {
        self.events.iter().map(|(_, e)| *e).collect()
    }

    /// How many times `event` was notified
    pub fn count(&self, event: UiEvent) -> usize {
        self.events.iter().filter(|(_, e)| *e == event).count()
    }
}

impl Host for RecordingHost {
    fn notify(&mut self, mode: Mode, event: UiEvent) {
        self.events.push((mode, event));
    }

    fn arm_timeout(&mut self, mode: Mode) {
        self.armed.push(mode);
        self.polls_since_arm = 0;
    }

    fn timeout_expired(&mut self, _mode: Mode) -> bool {
        self.polls += 1;
        let seen = self.polls_since_arm;
        self.polls_since_arm += 1;

        let current_arm = self.armed.len().checked_sub(1);
        let armed_match = self.expire_on_arm.is_none_or(|arm| current_arm == Some(arm));
        armed_match && self.expire_after.is_some_and(|limit| seen >= limit)
    }
}

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

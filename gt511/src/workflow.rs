//! Identify, verify and enroll workflows
//!
//! Each workflow is built from passes. A pass walks the [`Phase`] machine:
//!
//! ```text
//! Idle → IlluminateOn → AwaitPress → Capture → DeviceOp → AwaitRelease → IlluminateOff → Complete
//!                 └──────────┴──────────┴─────────┴────────────┴──→ Failed
//! ```
//!
//! Identify and verify are one pass. Enroll allocates a slot, starts the
//! enrollment, then runs one pass per [`EnrollStep`] (see [`EnrollPhase`]).
//! What a failing phase does on its way to `Failed` is given by
//! [`Phase::abort`].

use tracing::{debug, info, trace, warn};

use gt511_transport::Transport;
use gt511_types::{ErrorCode, Mode, UiEvent};

use crate::error::Result;
use crate::host::Host;
use crate::sensor::{CaptureQuality, EnrollStep, Sensor};

/// State of a single pass
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    IlluminateOn,
    AwaitPress,
    Capture,
    DeviceOp,
    AwaitRelease,
    IlluminateOff,
    Complete,
    Failed,
}

/// Cleanup performed when a phase fails
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Abort {
    /// Switch the LED off (best effort)
    pub illumination_off: bool,

    /// Extra notification, if any
    pub notify: Option<UiEvent>,
}

impl Phase {
    /// Transition taken when this phase succeeds
    pub fn on_success(self) -> Self {
        match self {
            Self::Idle => Self::IlluminateOn,
            Self::IlluminateOn => Self::AwaitPress,
            Self::AwaitPress => Self::Capture,
            Self::Capture => Self::DeviceOp,
            Self::DeviceOp => Self::AwaitRelease,
            Self::AwaitRelease => Self::IlluminateOff,
            Self::IlluminateOff | Self::Complete => Self::Complete,
            Self::Failed => Self::Failed,
        }
    }

    /// Transition taken when this phase fails
    pub fn on_failure(self) -> Self {
        match self {
            Self::Complete => Self::Complete,
            _ => Self::Failed,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }

    /// Cleanup for a failure in this phase
    ///
    /// Touch waits notify on their own, so only capture (`Error`) and the
    /// device operation (`Reject`) add a notification here.
    pub fn abort(self) -> Abort {
        let (illumination_off, notify) = match self {
            Self::IlluminateOn | Self::AwaitPress | Self::AwaitRelease => (true, None),
            Self::Capture => (true, Some(UiEvent::Error)),
            Self::DeviceOp => (true, Some(UiEvent::Reject)),
            Self::Idle | Self::IlluminateOff | Self::Complete | Self::Failed => (false, None),
        };

        Abort {
            illumination_off,
            notify,
        }
    }
}

/// Sensor operation performed in the `DeviceOp` phase
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeviceOp {
    /// Match against every slot
    Identify,

    /// Match against one slot
    Verify(u32),

    /// Submit an enrollment capture
    Enroll(EnrollStep),
}

impl DeviceOp {
    pub fn mode(self) -> Mode {
        match self {
            Self::Identify => Mode::Identify,
            Self::Verify(_) => Mode::Verify,
            Self::Enroll(_) => Mode::Enroll,
        }
    }

    pub fn quality(self) -> CaptureQuality {
        match self {
            Self::Identify | Self::Verify(_) => CaptureQuality::Normal,
            Self::Enroll(_) => CaptureQuality::High,
        }
    }
}

/// State of the enroll workflow
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EnrollPhase {
    /// Find a free slot
    Allocate,

    /// Issue enroll-start for the slot
    Start,

    /// Run one capture pass
    Step(EnrollStep),

    Complete,
}

impl EnrollPhase {
    /// Transition taken when this phase succeeds
    pub fn on_success(self) -> Self {
        match self {
            Self::Allocate => Self::Start,
            Self::Start => Self::Step(EnrollStep::First),
            Self::Step(step) => step.next().map_or(Self::Complete, Self::Step),
            Self::Complete => Self::Complete,
        }
    }

    /// Notification for a failure in this phase
    ///
    /// Step passes notify through [`Phase::abort`].
    pub fn failure_event(self) -> Option<UiEvent> {
        match self {
            Self::Allocate => Some(UiEvent::Error),
            Self::Start | Self::Step(_) | Self::Complete => None,
        }
    }
}

impl<T: Transport, H: Host> Sensor<T, H> {
    /// Identify the finger on the sensor
    ///
    /// Prompts for a press, captures, identifies, prompts for release and
    /// returns the matched slot id. Notifies [`UiEvent::Accept`] on success.
    pub fn run_identify(&mut self) -> Result<u32> {
        info!("Running identify");

        let id = self.run_pass(DeviceOp::Identify)?;

        info!(id, "Identify ok");
        self.host_mut().notify(Mode::Identify, UiEvent::Accept);
        Ok(id)
    }

    /// Verify the finger on the sensor against slot `id`
    pub fn run_verify(&mut self, id: u32) -> Result<()> {
        info!(id, "Running verify");

        self.run_pass(DeviceOp::Verify(id))?;

        info!(id, "Verify ok");
        self.host_mut().notify(Mode::Verify, UiEvent::Accept);
        Ok(())
    }

    /// Enroll a new finger into the lowest free slot
    ///
    /// The slot is always chosen by [`Sensor::find_available`]; returns it.
    /// Notifies [`UiEvent::Accept`] once all three captures are accepted.
    pub fn run_enroll(&mut self) -> Result<u32> {
        info!("Running enroll");

        let mut phase = EnrollPhase::Allocate;
        let mut slot = 0;

        while phase != EnrollPhase::Complete {
            trace!(?phase, "Enroll phase");

            let outcome = match phase {
                EnrollPhase::Allocate => self.find_available().map(|free| slot = free),
                EnrollPhase::Start => self.enroll_start(slot),
                EnrollPhase::Step(step) => {
                    debug!(slot, step = step.index(), "Enroll step");
                    self.run_pass(DeviceOp::Enroll(step)).map(drop)
                }
                EnrollPhase::Complete => Ok(()),
            };

            if let Err(err) = outcome {
                warn!(?phase, slot, "Enroll failed: {}", err);
                if let Some(event) = phase.failure_event() {
                    self.host_mut().notify(Mode::Enroll, event);
                }
                return Err(err);
            }

            phase = phase.on_success();
        }

        info!(slot, "Enroll ok");
        self.host_mut().notify(Mode::Enroll, UiEvent::Accept);
        Ok(slot)
    }

    /// Run one pass; returns the device operation's output
    fn run_pass(&mut self, op: DeviceOp) -> Result<u32> {
        let mode = op.mode();
        let mut phase = Phase::Idle;
        let mut output = 0;
        let mut failure = None;

        while !phase.is_terminal() {
            trace!(%mode, ?phase, "Pass phase");

            let outcome = match phase {
                Phase::Idle | Phase::Complete | Phase::Failed => Ok(()),
                Phase::IlluminateOn => self.set_illumination(true),
                Phase::AwaitPress => self.wait_for_press(mode),
                Phase::Capture => self.capture_finger(op.quality()),
                Phase::DeviceOp => self.device_op(op).map(|value| output = value),
                Phase::AwaitRelease => self.wait_for_release(mode),
                Phase::IlluminateOff => {
                    self.illumination_off();
                    Ok(())
                }
            };

            phase = match outcome {
                Ok(()) => phase.on_success(),
                Err(err) => {
                    self.abort_pass(mode, phase, err);
                    failure = Some(err);
                    phase.on_failure()
                }
            };
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(output),
        }
    }

    fn device_op(&mut self, op: DeviceOp) -> Result<u32> {
        match op {
            DeviceOp::Identify => self.identify(),
            DeviceOp::Verify(id) => self.verify(id).map(|()| id),
            DeviceOp::Enroll(step) => self.enroll_step(step).map(|()| step.index()),
        }
    }

    fn abort_pass(&mut self, mode: Mode, phase: Phase, err: ErrorCode) {
        warn!(%mode, ?phase, "Pass failed: {}", err);

        let abort = phase.abort();
        if abort.illumination_off {
            self.illumination_off();
        }
        if let Some(event) = abort.notify {
            self.host_mut().notify(mode, event);
        }
    }
}

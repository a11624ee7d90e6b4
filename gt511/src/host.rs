//! Host capabilities: user notifications and wait timeouts
//!
//! The driver never sleeps or renders anything itself. While it waits for a
//! finger it polls [`Host::timeout_expired`], and it reports progress through
//! [`Host::notify`].

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use gt511_types::{Mode, UiEvent};
use tracing::info;

/// Application side of the driver
pub trait Host {
    /// Fire-and-forget UI notification
    fn notify(&mut self, mode: Mode, event: UiEvent);

    /// Start the timeout for a wait phase
    ///
    /// Called once per wait, before polling begins.
    fn arm_timeout(&mut self, mode: Mode);

    /// Check whether the armed timeout has run out
    ///
    /// Polled in a tight loop during a wait; returning `true` cancels it.
    fn timeout_expired(&mut self, mode: Mode) -> bool;
}

impl<H: Host + ?Sized> Host for &mut H {
    fn notify(&mut self, mode: Mode, event: UiEvent) {
        (**self).notify(mode, event)
    }

    fn arm_timeout(&mut self, mode: Mode) {
        (**self).arm_timeout(mode)
    }

    fn timeout_expired(&mut self, mode: Mode) -> bool {
        (**self).timeout_expired(mode)
    }
}

impl<H: Host + ?Sized> Host for Box<H> {
    fn notify(&mut self, mode: Mode, event: UiEvent) {
        (**self).notify(mode, event)
    }

    fn arm_timeout(&mut self, mode: Mode) {
        (**self).arm_timeout(mode)
    }

    fn timeout_expired(&mut self, mode: Mode) -> bool {
        (**self).timeout_expired(mode)
    }
}

type EventHandler = Box<dyn FnMut(Mode, UiEvent) + Send>;

/// Wall-clock host
///
/// Arms a deadline from a per-mode timeout and logs every notification.
/// A timeout of [`Duration::MAX`] never expires.
/// An optional handler receives the notifications as well.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use gt511::{DeadlineHost, Host, Mode};
///
/// let mut host = DeadlineHost::new(Duration::from_secs(10))
///     .with_mode_timeout(Mode::Enroll, Duration::from_secs(30));
///
/// host.arm_timeout(Mode::Enroll);
/// assert!(!host.timeout_expired(Mode::Enroll));
/// ```
pub struct DeadlineHost {
    default_timeout: Duration,
    mode_timeouts: HashMap<Mode, Duration>,
    deadline: Option<Instant>,
    handler: Option<EventHandler>,
}

impl DeadlineHost {
    /// Create a host using `timeout` for every mode
    pub fn new(timeout: Duration) -> Self {
        Self {
            default_timeout: timeout,
            mode_timeouts: HashMap::new(),
            deadline: None,
            handler: None,
        }
    }

    /// Override the timeout for one mode
    pub fn with_mode_timeout(mut self, mode: Mode, timeout: Duration) -> Self {
        self.mode_timeouts.insert(mode, timeout);
        self
    }

    /// Forward notifications to `handler`
    pub fn with_handler(mut self, handler: impl FnMut(Mode, UiEvent) + Send + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Timeout used for `mode`
    pub fn timeout_for(&self, mode: Mode) -> Duration {
        self.mode_timeouts
            .get(&mode)
            .copied()
            .unwrap_or(self.default_timeout)
    }
}

impl Host for DeadlineHost {
    fn notify(&mut self, mode: Mode, event: UiEvent) {
        info!(%mode, %event, "Sensor notification");

        if let Some(handler) = self.handler.as_mut() {
            handler(mode, event);
        }
    }

    fn arm_timeout(&mut self, mode: Mode) {
        // A timeout past the end of the clock never expires
        self.deadline = Instant::now().checked_add(self.timeout_for(mode));
    }

    fn timeout_expired(&mut self, _mode: Mode) -> bool {
        // No deadline means never expires
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }
}

impl fmt::Debug for DeadlineHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeadlineHost")
            .field("default_timeout", &self.default_timeout)
            .field("mode_timeouts", &self.mode_timeouts)
            .field("deadline", &self.deadline)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

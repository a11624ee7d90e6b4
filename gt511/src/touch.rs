//! Waiting for the finger to go down or come up
//!
//! Both waits prompt the user, arm the host timeout once, then poll the
//! sensor with no delay of their own. Pacing is up to the host's
//! [`Host::timeout_expired`].

use std::fmt;

use tracing::{debug, info, warn};

use gt511_transport::Transport;
use gt511_types::{ErrorCode, Mode, UiEvent};

use crate::error::Result;
use crate::host::Host;
use crate::sensor::Sensor;

/// Finger state a wait is looking for
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Touch {
    Press,
    Release,
}

impl Touch {
    fn prompt(self) -> UiEvent {
        match self {
            Self::Press => UiEvent::Press,
            Self::Release => UiEvent::Release,
        }
    }

    fn reached(self, pressed: bool) -> bool {
        match self {
            Self::Press => pressed,
            Self::Release => !pressed,
        }
    }
}

impl fmt::Display for Touch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Press => f.write_str("press"),
            Self::Release => f.write_str("release"),
        }
    }
}

impl<T: Transport, H: Host> Sensor<T, H> {
    /// Prompt for a finger and wait until one is on the sensor
    ///
    /// # Errors
    ///
    /// - [`ErrorCode::Other`] after notifying [`UiEvent::Timeout`] when the
    ///   host timeout runs out
    /// - the press query's own error after switching the LED off and
    ///   notifying [`UiEvent::Error`]
    pub fn wait_for_press(&mut self, mode: Mode) -> Result<()> {
        self.wait_for(mode, Touch::Press)
    }

    /// Prompt to lift the finger and wait until the sensor is clear
    ///
    /// Fails the same way as [`Sensor::wait_for_press`].
    pub fn wait_for_release(&mut self, mode: Mode) -> Result<()> {
        self.wait_for(mode, Touch::Release)
    }

    fn wait_for(&mut self, mode: Mode, target: Touch) -> Result<()> {
        self.host_mut().notify(mode, target.prompt());
        debug!(%mode, "Waiting for {}", target);

        self.host_mut().arm_timeout(mode);

        loop {
            if self.host_mut().timeout_expired(mode) {
                info!(%mode, "Timed out waiting for {}", target);
                self.host_mut().notify(mode, UiEvent::Timeout);
                return Err(ErrorCode::Other);
            }

            match self.is_finger_pressed() {
                Ok(pressed) if target.reached(pressed) => {
                    debug!(%mode, "Detected {}", target);
                    return Ok(());
                }
                Ok(_) => continue,
                Err(err) => {
                    warn!(%mode, "Finger query failed: {}", err);
                    self.illumination_off();
                    self.host_mut().notify(mode, UiEvent::Error);
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::tests::{MockLink, MockUi};
    use gt511_core::{Packet, Reply};
    use mockall::{predicate::eq, Sequence};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_timeout_on_first_poll_never_queries_sensor() {
        let mut seq = Sequence::new();
        let mut host = MockUi::new();
        host.expect_notify()
            .with(eq(Mode::Identify), eq(UiEvent::Press))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        host.expect_arm_timeout()
            .with(eq(Mode::Identify))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        host.expect_timeout_expired()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(true);
        host.expect_notify()
            .with(eq(Mode::Identify), eq(UiEvent::Timeout))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut link = MockLink::new();
        link.expect_send().never();
        link.expect_receive().never();

        let mut sensor = Sensor::new(link, host);
        assert_eq!(sensor.wait_for_press(Mode::Identify), Err(ErrorCode::Other));
    }

    #[test]
    fn test_release_polls_until_clear() {
        let mut host = MockUi::new();
        host.expect_notify()
            .with(eq(Mode::Verify), eq(UiEvent::Release))
            .times(1)
            .return_const(());
        host.expect_arm_timeout().times(1).return_const(());
        host.expect_timeout_expired().times(3).return_const(false);

        // pressed, pressed, released
        let mut answers = vec![1u32, 0, 0].into_iter();
        let mut link = MockLink::new();
        link.expect_send().times(3).returning(|_| Ok(()));
        link.expect_receive().times(3).returning(move |buf| {
            let output = answers.next().unwrap_or(1);
            buf.copy_from_slice(&Reply::Ack(output).encode());
            Ok(Packet::SIZE)
        });

        let mut sensor = Sensor::new(link, host);
        assert_eq!(sensor.wait_for_release(Mode::Verify), Ok(()));
    }

    #[test]
    fn test_query_failure_turns_led_off_and_reports_error() {
        let mut host = MockUi::new();
        host.expect_notify()
            .with(eq(Mode::Enroll), eq(UiEvent::Press))
            .times(1)
            .return_const(());
        host.expect_arm_timeout().times(1).return_const(());
        host.expect_timeout_expired().times(1).return_const(false);
        host.expect_notify()
            .with(eq(Mode::Enroll), eq(UiEvent::Error))
            .times(1)
            .return_const(());

        let mut link = MockLink::new();
        link.expect_send()
            .withf(|data| data[8] == 0x26)
            .times(1)
            .returning(|_| Ok(()));
        link.expect_send()
            .withf(|data| data[8] == 0x12 && data[4] == 0)
            .times(1)
            .returning(|_| Ok(()));

        // DEV_ERR for the press query, then ACK for the LED
        let mut replies = vec![Reply::Nack(0x100F), Reply::Ack(0)].into_iter();
        link.expect_receive().times(2).returning(move |buf| {
            let reply = replies.next().unwrap_or(Reply::Ack(0));
            buf.copy_from_slice(&reply.encode());
            Ok(Packet::SIZE)
        });

        let mut sensor = Sensor::new(link, host);
        assert_eq!(sensor.wait_for_press(Mode::Enroll), Err(ErrorCode::DevErr));
    }
}

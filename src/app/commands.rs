//! Inbound commands to the application service.
//!
//! The dashboard exposes a single manual switch.  Whatever transport
//! carries it (cloud callback, serial console) decodes the raw widget value
//! into a [`SwitchCommand`] and posts it to the
//! [`CommandMailbox`](super::mailbox::CommandMailbox).

/// Master on/off command from the manual-switch control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchCommand {
    On,
    Off,
}

impl SwitchCommand {
    /// Decode a raw widget value: HIGH (non-zero) is `On`, LOW is `Off`.
    pub fn from_raw(value: i32) -> Self {
        if value == 0 { Self::Off } else { Self::On }
    }

    /// Parse a console token.  Case-insensitive; surrounding whitespace is ignored.
    pub fn parse(token: &str) -> Option<Self> {
        let t = token.trim();
        if t.eq_ignore_ascii_case("on") || t == "1" {
            Some(Self::On)
        } else if t.eq_ignore_ascii_case("off") || t == "0" {
            Some(Self::Off)
        } else {
            None
        }
    }
}

//! Single-slot command mailbox.
//!
//! The dashboard transport (or console reader) runs on its own thread and
//! posts decoded [`SwitchCommand`]s here; the control loop drains the slot
//! once at the start of every cycle.  Posting overwrites any command not
//! yet drained, so only the most recent one is ever handled
//! (last-write-wins).  That is sufficient because disabling always forces a
//! deterministic reset regardless of history.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use super::commands::SwitchCommand;

/// Last-write-wins command slot, safe to share between threads.
pub struct CommandMailbox {
    slot: Signal<CriticalSectionRawMutex, SwitchCommand>,
}

impl CommandMailbox {
    pub const fn new() -> Self {
        Self {
            slot: Signal::new(),
        }
    }

    /// Post a command, replacing any pending one.
    pub fn post(&self, cmd: SwitchCommand) {
        self.slot.signal(cmd);
    }

    /// Take the pending command, leaving the slot empty.
    pub fn take(&self) -> Option<SwitchCommand> {
        self.slot.try_take()
    }

    /// Whether a command is waiting.
    pub fn is_pending(&self) -> bool {
        self.slot.signaled()
    }
}

impl Default for CommandMailbox {
    fn default() -> Self {
        Self::new()
    }
}

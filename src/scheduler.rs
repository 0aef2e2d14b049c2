//! Cycle scheduler: the control loop glue.
//!
//! Fixed-cadence cooperative loop.  Every cycle:
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────┐   ┌───────────────────────┐   ┌───────┐
//! │ drain mailbox│──▶│ mode == Enabled?│─Y─▶│ ControllerService.tick│──▶│ sleep │
//! └──────────────┘   └────────┬────────┘   └───────────────────────┘   └───▲───┘
//!                             └──────────────────── N ─────────────────────┘
//! ```
//!
//! Time is injected: [`CycleScheduler::run_cycle`] takes `now` and returns
//! the next deadline, so the whole loop is testable without real time
//! passing.  [`CycleScheduler::run`] wires it to a [`ClockPort`].

use embassy_time::{Duration, Instant};
use log::info;

use crate::app::mailbox::CommandMailbox;
use crate::app::ports::{ActuatorPort, ClockPort, EventSink, SensorPort, TelemetrySink};
use crate::app::service::{ControllerService, CycleOutcome};
use crate::control::supervisor::Transition;

/// Loop mode, derived from the supervisor's master switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Only drains commands and sleeps.
    Disabled,
    /// Full evaluation pipeline.
    Enabled,
}

impl Mode {
    pub fn of(app: &ControllerService) -> Self {
        if app.is_enabled() {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// Summary of one scheduler cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// Command drained at the start of the cycle, and what it did.
    pub command: Option<Transition>,
    pub mode: Mode,
    pub outcome: CycleOutcome,
    pub next_deadline: Instant,
}

/// The scheduler engine.
///
/// Owns the cadence and a reference to the command mailbox.  The
/// controller and all ports are lent in per call.
pub struct CycleScheduler<'a> {
    mailbox: &'a CommandMailbox,
    interval: Duration,
    /// Deadline returned by the previous cycle.
    last_deadline: Option<Instant>,
    cycles: u64,
}

impl<'a> CycleScheduler<'a> {
    pub fn new(mailbox: &'a CommandMailbox, interval_ms: u32) -> Self {
        Self {
            mailbox,
            interval: Duration::from_millis(u64::from(interval_ms.max(1))),
            last_deadline: None,
            cycles: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Cycles run since construction (enabled or not).
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run one cycle at `now` and return the instant the next one is due.
    ///
    /// Deadlines advance in whole intervals from the previous deadline.  If
    /// the loop overran and that deadline already passed, the cadence is
    /// re-anchored at `now` instead of bursting to catch up.
    pub fn run_cycle(
        &mut self,
        now: Instant,
        app: &mut ControllerService,
        hw: &mut (impl SensorPort + ActuatorPort),
        telemetry: &mut impl TelemetrySink,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycles += 1;

        let command = self
            .mailbox
            .take()
            .map(|cmd| app.handle_command(cmd, hw, telemetry, sink));

        let mode = Mode::of(app);
        let outcome = match mode {
            Mode::Enabled => app.tick(hw, telemetry, sink),
            Mode::Disabled => CycleOutcome::Skipped,
        };

        let next_deadline = self.next_deadline(now);
        self.last_deadline = Some(next_deadline);

        CycleReport {
            command,
            mode,
            outcome,
            next_deadline,
        }
    }

    /// Loop forever.  "Disabled" is a logical pause, never a termination.
    pub fn run(
        &mut self,
        clock: &mut impl ClockPort,
        app: &mut ControllerService,
        hw: &mut (impl SensorPort + ActuatorPort),
        telemetry: &mut impl TelemetrySink,
        sink: &mut impl EventSink,
    ) -> ! {
        info!(
            "Control loop running every {} ms",
            self.interval.as_millis()
        );
        loop {
            let report = self.run_cycle(clock.now(), app, hw, telemetry, sink);
            clock.sleep_until(report.next_deadline);
        }
    }

    fn next_deadline(&self, now: Instant) -> Instant {
        match self.last_deadline {
            Some(prev) if prev + self.interval > now => prev + self.interval,
            _ => now + self.interval,
        }
    }
}

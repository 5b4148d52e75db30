//! Per-process periodic alarm (`sigalarm` / `sigreturn`).
//!
//! A process arms the alarm with an interval in ticks and a handler address.
//! Every timer interrupt taken while the process runs in user mode counts
//! against the interval; when it is used up, the trap returns into the
//! handler instead of the interrupted instruction. The handler finishes with
//! `sigreturn`, which resumes the interrupted context exactly.
//!
//! While a handler is running the alarm neither fires nor counts, so a slow
//! handler is never re-entered.

use crate::process::Process;
use crate::trap_frame::TrapFrame;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlarmError {
    #[error("sigreturn without an outstanding alarm handler")]
    NotInHandler,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alarm {
    interval: u64,
    spend: u64,
    handler: u64,
    saved: Option<TrapFrame>,
}

impl Alarm {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: 0,
            spend: 0,
            handler: 0,
            saved: None,
        }
    }

    /// Fires `handler` every `interval` ticks. An interval of 0 disarms.
    ///
    /// Restarts the count. A handler that is currently running is unaffected.
    pub const fn arm(&mut self, interval: u64, handler: u64) {
        self.interval = interval;
        self.handler = handler;
        self.spend = 0;
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.interval != 0
    }

    #[must_use]
    pub const fn in_handler(&self) -> bool {
        self.saved.is_some()
    }

    #[must_use]
    pub const fn interval(&self) -> u64 {
        self.interval
    }

    /// Ticks counted since the alarm last fired or was armed.
    #[must_use]
    pub const fn spend(&self) -> u64 {
        self.spend
    }

    #[must_use]
    pub const fn handler(&self) -> u64 {
        self.handler
    }

    /// Counts one timer tick against the interval.
    ///
    /// Returns the handler address when the interval is used up; `frame` is
    /// then kept for [`take_saved`](Self::take_saved) and the caller is
    /// expected to resume user mode at the handler.
    pub fn on_tick(&mut self, frame: &TrapFrame) -> Option<u64> {
        if !self.is_armed() || self.in_handler() {
            return None;
        }

        self.spend += 1;
        if self.spend != self.interval {
            return None;
        }

        self.spend = 0;
        self.saved = Some(*frame);
        Some(self.handler)
    }

    /// Ends the running handler and hands back the interrupted context.
    ///
    /// # Errors
    /// [`AlarmError::NotInHandler`] if no handler is running.
    pub const fn take_saved(&mut self) -> Result<TrapFrame, AlarmError> {
        match self.saved.take() {
            Some(frame) => Ok(frame),
            None => Err(AlarmError::NotInHandler),
        }
    }
}

/// Applies one user-mode timer tick to `process`'s alarm, redirecting its
/// saved program counter into the handler when the alarm fires.
pub fn alarm_tick<P: Process + ?Sized>(process: &mut P) -> bool {
    if !process.alarm().is_armed() {
        return false;
    }

    let frame = *process.trap_frame();
    match process.alarm().on_tick(&frame) {
        Some(handler) => {
            process.trap_frame().epc = handler;
            true
        }
        None => false,
    }
}

/// `sigalarm(interval, handler)`.
pub fn sigalarm<P: Process + ?Sized>(process: &mut P, interval: u64, handler: u64) {
    process.alarm().arm(interval, handler);
}

/// `sigreturn()`: restores the context the alarm interrupted.
///
/// Returns the restored `a0`, so the system call layer can store it as the
/// call's result without clobbering the interrupted code's register.
///
/// # Errors
/// [`AlarmError::NotInHandler`] if no handler is running.
pub fn sigreturn<P: Process + ?Sized>(process: &mut P) -> Result<u64, AlarmError> {
    let saved = process.alarm().take_saved()?;
    *process.trap_frame() = saved;
    Ok(saved.a0)
}

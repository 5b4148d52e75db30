//! # Trap Dispatch
//!
//! Everything that happens between "the hart took a trap" and "the hart
//! resumes somewhere": system calls, device interrupts, timer ticks, user
//! faults and fatal kernel faults.
//!
//! ## Entry points
//!
//! ```text
//!   user mode ──trap──► uservec (trampoline) ──► TrapDispatcher::handle_from_user
//!                                                    │
//!              ┌─────────────────────────────────────┼──────────────────────┐
//!              ▼                                     ▼                      ▼
//!        ecall: syscall                 interrupt: InterruptClassifier   fault: kill
//!              │                                     │ (timer: alarm)       │
//!              └─────────────────────────────────────┼──────────────────────┘
//!                                                    ▼
//!                             killed? ── yes ──► Scheduler::exit
//!                                │ no
//!                         timer? ── yes ──► Scheduler::yield_now
//!                                ▼
//!                      TrapDispatcher::return_to_user ──► userret (trampoline)
//!
//!   supervisor mode ──trap──► kernelvec ──► TrapDispatcher::handle_from_kernel
//! ```
//!
//! The machine is reached only through the [`Hart`], [`InterruptController`]
//! and [`DeviceDrivers`] traits, and the rest of the kernel only through
//! [`Process`], [`Scheduler`] and [`SyscallHandler`]. On `riscv64`, [`CsrHart`]
//! and [`Plic`] are the real hardware; host tests substitute recording mocks.
//!
//! ## Fatal conditions
//!
//! A user trap that did not come from user mode, a kernel trap that did not
//! come from supervisor mode or arrived with interrupts enabled, and any
//! kernel trap that is not a device or timer interrupt panic. A user fault
//! only kills the offending process.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod alarm;
mod cause;
mod devintr;
mod dispatch;
mod hart;
mod process;
#[cfg(target_arch = "riscv64")]
mod riscv;
mod ticks;
mod trap_frame;

pub use alarm::{Alarm, AlarmError, alarm_tick, sigalarm, sigreturn};
pub use cause::{TrapCause, describe_cause};
pub use devintr::{
    DeviceDrivers, DeviceIrq, InterruptClassifier, InterruptController, InterruptKind,
    PRIMARY_HART,
};
pub use dispatch::{TrapDispatcher, TrapVectors, UserTrapExit, trap_init, trap_init_hart};
pub use hart::Hart;
pub use process::{Process, Scheduler, SyscallHandler, UserFault};
#[cfg(target_arch = "riscv64")]
pub use riscv::{CsrHart, Plic};
pub use ticks::{TickCounter, Wakeup};
pub use trap_frame::TrapFrame;

//! # Kernel Core Wiring
//!
//! Owns the process-wide singletons and exposes the interface the rest of the
//! kernel builds on:
//!
//! - [`allocate_page`] / [`reclaim_page`]: the physical page pool.
//! - [`ticks`]: the global timer tick counter.
//! - [`init`] and [`init_hart`]: boot-time setup, once per machine and once
//!   per hart.
//!
//! Any panic on the target is fatal: the handler masks interrupts, prints the
//! message on the debug console and parks the hart with `wfi`.
//!
//! Boot order on each machine:
//!
//! ```text
//! hart 0: init(BootConfig) ─► init_hart ─► scheduler
//! hart n:                     init_hart ─► scheduler   (after hart 0 finished init)
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod boot;
mod kmem;
#[cfg(any(test, target_os = "none"))]
mod panic;

pub use boot::{BootConfig, BootError, init, init_hart};
pub use kmem::{allocate_page, allocate_zeroed_page, free_pages, reclaim_page, ticks};

#[cfg(target_arch = "riscv64")]
pub use boot::{init_this_hart, interrupt_classifier};

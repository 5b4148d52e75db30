//! # Kernel synchronization primitives
//!
//! - [`SpinLock`]: test-and-test-and-set busy-wait lock. [`SpinLock::lock_irq`]
//!   additionally masks supervisor interrupts on the acquiring hart for the
//!   lifetime of the guard, which makes the lock usable from trap handlers.
//! - [`IrqGuard`]: the interrupt-masking half on its own.
//! - [`SyncOnceCell`]: write-once cell for process-wide singletons.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod irq;
mod spin_lock;
mod sync_once_cell;

pub use irq::IrqGuard;
pub use spin_lock::{IrqSpinLockGuard, SpinLock, SpinLockGuard};
pub use sync_once_cell::SyncOnceCell;

//! # Typed RISC-V Supervisor CSRs
//!
//! Bit-level models of the supervisor control and status registers the trap
//! path touches, built on [`bitfield_struct`]. Decoding and encoding are plain
//! `const`-friendly value operations and work on any host; the actual
//! `csrr`/`csrw` instructions are only compiled for `riscv64` with the `asm`
//! feature.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod csr;
mod satp;
mod scause;
mod sip;
mod sstatus;

pub use csr::{Sepc, Stval, Stvec, Tp};
pub use satp::{Satp, SatpMode};
pub use scause::Scause;
pub use sip::Sip;
pub use sstatus::Sstatus;

pub trait LoadRegisterUnsafe {
    /// # Safety
    /// The caller must uphold the implementation-specific safety requirements.
    /// Supervisor CSRs can only be accessed in S-mode or above.
    unsafe fn load_unsafe() -> Self;
}

pub trait StoreRegisterUnsafe {
    /// # Safety
    /// The caller must uphold the implementation-specific safety requirements.
    /// Writing trap and translation CSRs changes where the hart goes next.
    unsafe fn store_unsafe(self);
}

/// Emits a `csrr` for a named CSR into a `u64`.
#[cfg(all(feature = "asm", target_arch = "riscv64"))]
macro_rules! csr_read {
    ($csr:literal) => {{
        let value: u64;
        unsafe {
            core::arch::asm!(concat!("csrr {}, ", $csr), out(reg) value, options(nomem, nostack));
        }
        value
    }};
}

/// Emits a `csrw` of a `u64` into a named CSR.
#[cfg(all(feature = "asm", target_arch = "riscv64"))]
macro_rules! csr_write {
    ($csr:literal, $value:expr) => {{
        let value: u64 = $value;
        unsafe {
            core::arch::asm!(concat!("csrw ", $csr, ", {}"), in(reg) value, options(nostack));
        }
    }};
}

#[cfg(all(feature = "asm", target_arch = "riscv64"))]
pub(crate) use {csr_read, csr_write};

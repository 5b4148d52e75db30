//! Plain-word supervisor CSRs.

/// `sepc`: address of the instruction that trapped, and `sret` target.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Sepc(pub u64);

/// `stval`: faulting address or instruction bits for the current trap.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Stval(pub u64);

/// `stvec`: trap vector base (direct mode, low two bits zero).
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Stvec(pub u64);

/// `tp`: the kernel keeps the hart id in the thread pointer.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Tp(pub u64);

#[cfg(all(feature = "asm", target_arch = "riscv64"))]
mod asm {
    use super::{Sepc, Stval, Stvec, Tp};
    use crate::{LoadRegisterUnsafe, StoreRegisterUnsafe, csr_read, csr_write};

    impl LoadRegisterUnsafe for Sepc {
        unsafe fn load_unsafe() -> Self {
            Self(csr_read!("sepc"))
        }
    }

    impl StoreRegisterUnsafe for Sepc {
        unsafe fn store_unsafe(self) {
            csr_write!("sepc", self.0);
        }
    }

    impl LoadRegisterUnsafe for Stval {
        unsafe fn load_unsafe() -> Self {
            Self(csr_read!("stval"))
        }
    }

    impl StoreRegisterUnsafe for Stvec {
        unsafe fn store_unsafe(self) {
            debug_assert_eq!(self.0 & 0b11, 0, "stvec must be 4-byte aligned (direct mode)");
            csr_write!("stvec", self.0);
        }
    }

    impl LoadRegisterUnsafe for Tp {
        unsafe fn load_unsafe() -> Self {
            let tp: u64;
            unsafe {
                core::arch::asm!("mv {}, tp", out(reg) tp, options(nomem, nostack));
            }
            Self(tp)
        }
    }
}

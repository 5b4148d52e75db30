use bitfield_struct::bitfield;

/// `scause`: Supervisor Cause Register (RV64).
///
/// The top bit distinguishes asynchronous interrupts from synchronous
/// exceptions; the remaining bits hold the cause code.
#[bitfield(u64, order = Lsb)]
#[derive(PartialEq, Eq)]
pub struct Scause {
    /// Exception or interrupt code.
    #[bits(63)]
    pub code: u64, // 0–62

    /// Set when the trap was caused by an interrupt.
    pub interrupt: bool, // 63
}

impl Scause {
    /// Supervisor software interrupt.
    pub const SUPERVISOR_SOFTWARE: u64 = 1;
    /// Supervisor timer interrupt.
    pub const SUPERVISOR_TIMER: u64 = 5;
    /// Supervisor external interrupt (PLIC).
    pub const SUPERVISOR_EXTERNAL: u64 = 9;

    pub const INSTRUCTION_MISALIGNED: u64 = 0;
    pub const INSTRUCTION_ACCESS_FAULT: u64 = 1;
    pub const ILLEGAL_INSTRUCTION: u64 = 2;
    pub const BREAKPOINT: u64 = 3;
    pub const LOAD_MISALIGNED: u64 = 4;
    pub const LOAD_ACCESS_FAULT: u64 = 5;
    pub const STORE_MISALIGNED: u64 = 6;
    pub const STORE_ACCESS_FAULT: u64 = 7;
    pub const USER_ENV_CALL: u64 = 8;
    pub const SUPERVISOR_ENV_CALL: u64 = 9;
    pub const INSTRUCTION_PAGE_FAULT: u64 = 12;
    pub const LOAD_PAGE_FAULT: u64 = 13;
    pub const STORE_PAGE_FAULT: u64 = 15;

    /// An interrupt cause with the given code.
    #[inline]
    #[must_use]
    pub const fn interrupt_code(code: u64) -> Self {
        Self::new().with_interrupt(true).with_code(code)
    }

    /// An exception cause with the given code.
    #[inline]
    #[must_use]
    pub const fn exception_code(code: u64) -> Self {
        Self::new().with_code(code)
    }
}

#[cfg(all(feature = "asm", target_arch = "riscv64"))]
impl crate::LoadRegisterUnsafe for Scause {
    unsafe fn load_unsafe() -> Self {
        Self::from_bits(crate::csr_read!("scause"))
    }
}

#[cfg(all(feature = "asm", target_arch = "riscv64"))]
impl crate::StoreRegisterUnsafe for Scause {
    unsafe fn store_unsafe(self) {
        crate::csr_write!("scause", self.into_bits());
    }
}

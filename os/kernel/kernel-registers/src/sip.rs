use bitfield_struct::bitfield;

/// `sip`: Supervisor Interrupt Pending.
#[bitfield(u64, order = Lsb)]
#[derive(PartialEq, Eq)]
pub struct Sip {
    _rsvd0: bool, // 0

    /// SSIP: supervisor software interrupt pending. Writable from S-mode;
    /// the machine-mode timer handler raises it to forward timer ticks.
    pub ssip: bool, // 1

    #[bits(3)]
    _rsvd2: u8, // 2–4

    /// STIP: supervisor timer interrupt pending (read only in S-mode).
    pub stip: bool, // 5

    #[bits(3)]
    _rsvd6: u8, // 6–8

    /// SEIP: supervisor external interrupt pending (read only in S-mode).
    pub seip: bool, // 9

    #[bits(54)]
    _rsvd10: u64, // 10–63
}

#[cfg(all(feature = "asm", target_arch = "riscv64"))]
impl crate::LoadRegisterUnsafe for Sip {
    unsafe fn load_unsafe() -> Self {
        Self::from_bits(crate::csr_read!("sip"))
    }
}

#[cfg(all(feature = "asm", target_arch = "riscv64"))]
impl crate::StoreRegisterUnsafe for Sip {
    unsafe fn store_unsafe(self) {
        crate::csr_write!("sip", self.into_bits());
    }
}

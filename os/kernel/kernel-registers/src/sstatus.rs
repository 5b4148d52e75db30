use bitfield_struct::bitfield;

/// `sstatus`: Supervisor Status Register (RV64).
///
/// Only the fields the kernel reads or writes are public; the remaining bits
/// are carried through unchanged so a read-modify-write never clobbers state
/// owned by other extensions.
#[bitfield(u64, order = Lsb)]
#[derive(PartialEq, Eq)]
pub struct Sstatus {
    _rsvd0: bool, // 0

    /// SIE: supervisor interrupts enabled.
    pub sie: bool, // 1

    #[bits(3)]
    _rsvd2: u8, // 2–4

    /// SPIE: value SIE takes on `sret`.
    pub spie: bool, // 5

    /// UBE: user-mode big-endian.
    pub ube: bool, // 6

    _rsvd7: bool, // 7

    /// SPP: privilege level before the trap. `false` = user, `true` = supervisor.
    pub spp: bool, // 8

    /// VS: vector unit state.
    #[bits(2)]
    pub vs: u8, // 9–10

    #[bits(2)]
    _rsvd11: u8, // 11–12

    /// FS: floating-point unit state.
    #[bits(2)]
    pub fs: u8, // 13–14

    /// XS: additional extension state (read only).
    #[bits(2)]
    pub xs: u8, // 15–16

    _rsvd17: bool, // 17

    /// SUM: permit supervisor access to user pages.
    pub sum: bool, // 18

    /// MXR: make executable pages readable.
    pub mxr: bool, // 19

    #[bits(12)]
    _rsvd20: u16, // 20–31

    /// UXL: effective XLEN in U-mode.
    #[bits(2)]
    pub uxl: u8, // 32–33

    #[bits(29)]
    _rsvd34: u32, // 34–62

    /// SD: some dirty extension state exists.
    pub sd: bool, // 63
}

impl Sstatus {
    /// Whether the trap that is being handled came from user mode.
    #[inline]
    #[must_use]
    pub const fn from_user(&self) -> bool {
        !self.spp()
    }

    /// Configure the register so that the next `sret` drops to user mode
    /// with interrupts enabled.
    #[inline]
    #[must_use]
    pub const fn prepared_for_user_return(self) -> Self {
        self.with_spp(false).with_spie(true)
    }
}

#[cfg(all(feature = "asm", target_arch = "riscv64"))]
impl crate::LoadRegisterUnsafe for Sstatus {
    unsafe fn load_unsafe() -> Self {
        Self::from_bits(crate::csr_read!("sstatus"))
    }
}

#[cfg(all(feature = "asm", target_arch = "riscv64"))]
impl crate::StoreRegisterUnsafe for Sstatus {
    unsafe fn store_unsafe(self) {
        crate::csr_write!("sstatus", self.into_bits());
    }
}

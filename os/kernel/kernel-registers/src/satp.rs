use bitfield_struct::bitfield;
use kernel_memory_addresses::{PhysicalAddress, PhysicalPage};

/// Address-translation scheme selected by `satp.MODE`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum SatpMode {
    Bare = 0,
    Sv39 = 8,
}

impl SatpMode {
    const fn into_bits(self) -> u8 {
        self as u8
    }

    const fn from_bits(value: u8) -> Self {
        match value {
            8 => Self::Sv39,
            _ => Self::Bare,
        }
    }
}

/// `satp`: Supervisor Address Translation and Protection.
#[bitfield(u64, order = Lsb)]
#[derive(PartialEq, Eq)]
pub struct Satp {
    /// Physical page number of the root page table.
    #[bits(44)]
    pub ppn: u64, // 0–43

    /// Address-space identifier.
    #[bits(16)]
    pub asid: u16, // 44–59

    #[bits(4)]
    pub mode: SatpMode, // 60–63
}

impl Satp {
    /// An Sv39 `satp` value pointing at the root table `root`.
    #[inline]
    #[must_use]
    pub const fn sv39(root: PhysicalAddress) -> Self {
        Self::new()
            .with_mode(SatpMode::Sv39)
            .with_ppn(PhysicalPage::containing(root).number())
    }

    /// Physical address of the root page table.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> PhysicalAddress {
        PhysicalAddress::new(self.ppn() << kernel_memory_addresses::PAGE_SHIFT)
    }
}

#[cfg(all(feature = "asm", target_arch = "riscv64"))]
impl crate::LoadRegisterUnsafe for Satp {
    unsafe fn load_unsafe() -> Self {
        Self::from_bits(crate::csr_read!("satp"))
    }
}

//! # Physical Memory Address Types
//!
//! Strongly typed wrappers for physical addresses and 4 KiB page-frame bases
//! used by the page allocator and the trap path.
//!
//! ## Overview
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`PhysicalAddress`] | A raw 64-bit physical address (RAM or MMIO). |
//! | [`PhysicalPage`] | The page-aligned base of a 4 KiB physical page frame. |
//!
//! Both are `#[repr(transparent)]` over `u64` and zero-cost. The RISC-V Sv39
//! machine this kernel targets only uses 4 KiB leaf frames for allocation, so
//! the page size is a plain constant ([`PAGE_SIZE`]) rather than a type
//! parameter.
//!
//! ## Typical Usage
//!
//! ```rust
//! # use kernel_memory_addresses::*;
//! let pa = PhysicalAddress::new(0x8020_1234);
//! assert!(!pa.is_page_aligned());
//! assert_eq!(pa.page_round_down().as_u64(), 0x8020_1000);
//! assert_eq!(pa.page_round_up().as_u64(), 0x8020_2000);
//!
//! let page = PhysicalPage::containing(pa);
//! assert_eq!(page.base().as_u64(), 0x8020_1000);
//! assert_eq!(page.next().base().as_u64(), 0x8020_2000);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod physical_address;
mod physical_page;

pub use physical_address::PhysicalAddress;
pub use physical_page::PhysicalPage;

/// Size of one page frame in bytes.
pub const PAGE_SIZE: u64 = 4096;

/// `log2(PAGE_SIZE)`, the number of in-page offset bits.
pub const PAGE_SHIFT: u32 = 12;

const _: () = assert!(1 << PAGE_SHIFT == PAGE_SIZE);

/// Round `value` up to the next multiple of [`PAGE_SIZE`].
#[inline]
#[must_use]
pub const fn page_round_up(value: u64) -> u64 {
    (value + PAGE_SIZE - 1) & !(PAGE_SIZE - 1)
}

/// Like [`page_round_up`], but `None` when the next boundary is past `u64::MAX`.
#[inline]
#[must_use]
pub const fn checked_page_round_up(value: u64) -> Option<u64> {
    match value.checked_add(PAGE_SIZE - 1) {
        Some(v) => Some(v & !(PAGE_SIZE - 1)),
        None => None,
    }
}

/// Round `value` down to a multiple of [`PAGE_SIZE`].
#[inline]
#[must_use]
pub const fn page_round_down(value: u64) -> u64 {
    value & !(PAGE_SIZE - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_is_identity_on_aligned_values() {
        assert_eq!(page_round_up(0x8000_0000), 0x8000_0000);
        assert_eq!(page_round_down(0x8000_0000), 0x8000_0000);
    }

    #[test]
    fn rounding_moves_to_neighboring_boundaries() {
        assert_eq!(page_round_up(0x8000_0001), 0x8000_1000);
        assert_eq!(page_round_down(0x8000_0fff), 0x8000_0000);
    }

    #[test]
    fn checked_round_up_reports_overflow_past_the_last_page() {
        assert_eq!(checked_page_round_up(0x8000_0001), Some(0x8000_1000));
        assert_eq!(checked_page_round_up(0xFFFF_FFFF_FFFF_F000), Some(0xFFFF_FFFF_FFFF_F000));
        assert_eq!(checked_page_round_up(0xFFFF_FFFF_FFFF_F001), None);
    }
}

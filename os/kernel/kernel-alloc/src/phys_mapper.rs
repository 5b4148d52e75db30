//! # Physical-to-virtual translation for frame contents
//!
//! The allocator needs to write into the frames it manages (the free-list
//! link and the junk fill) but only knows their physical addresses. A
//! [`PhysMapper`] turns a physical address into a pointer the kernel can
//! dereference.
//!
//! The kernel direct-maps all of RAM at its physical address, so the running
//! kernel uses [`IdentityMapper`]. Host-side tests use the same mapper over a
//! heap allocation whose address simply *is* the "physical" address.

use kernel_memory_addresses::PhysicalAddress;

/// Translates physical addresses to dereferenceable pointers.
///
/// # Safety
/// Implementations must return a pointer through which the full page at
/// `pa` can be read and written, for every page the allocator is handed.
pub unsafe trait PhysMapper {
    /// Pointer to the first byte of the page containing `pa`'s mapping.
    fn phys_to_ptr(&self, pa: PhysicalAddress) -> *mut u8;
}

/// [`PhysMapper`] for a kernel that maps RAM one-to-one.
#[derive(Debug, Default, Copy, Clone)]
pub struct IdentityMapper;

// SAFETY: the kernel page table maps [KERNBASE, PHYSTOP) at VA == PA.
unsafe impl PhysMapper for IdentityMapper {
    #[inline]
    fn phys_to_ptr(&self, pa: PhysicalAddress) -> *mut u8 {
        pa.as_u64() as *mut u8
    }
}

//! Intrusive singly-linked list of free frames.
//!
//! The first word of each free frame holds the physical address of the next
//! free frame, or [`END`] for the tail. Nothing else about a free frame is
//! recorded anywhere.

use crate::phys_mapper::PhysMapper;
use kernel_memory_addresses::PhysicalAddress;

/// Tail marker. Never page aligned, so never a frame address.
const END: u64 = u64::MAX;

pub(crate) struct FreeList {
    head: Option<PhysicalAddress>,
    len: usize,
}

impl FreeList {
    pub(crate) const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Links `pa` in as the new head.
    ///
    /// # Safety
    /// `pa` must be a page-aligned frame that nobody else references and that
    /// `mapper` can write. It must not already be on the list.
    pub(crate) unsafe fn push<M: PhysMapper>(&mut self, pa: PhysicalAddress, mapper: &M) {
        let link = mapper.phys_to_ptr(pa).cast::<u64>();
        let next = self.head.map_or(END, PhysicalAddress::as_u64);
        // SAFETY: frames are page aligned and at least 8 bytes long.
        unsafe { link.write(next) };
        self.head = Some(pa);
        self.len += 1;
    }

    /// Unlinks and returns the head, if any.
    pub(crate) fn pop<M: PhysMapper>(&mut self, mapper: &M) -> Option<PhysicalAddress> {
        let pa = self.head?;
        // SAFETY: every listed frame was written by `push`.
        let next = unsafe { read_link(pa, mapper) };
        self.head = next;
        self.len -= 1;
        Some(pa)
    }

    /// Walks the list from head to tail without modifying it.
    pub(crate) fn iter<'a, M: PhysMapper>(
        &'a self,
        mapper: &'a M,
    ) -> impl Iterator<Item = PhysicalAddress> + 'a {
        // SAFETY: every listed frame was written by `push`.
        core::iter::successors(self.head, move |&pa| unsafe { read_link(pa, mapper) })
    }
}

/// # Safety
/// `pa` must be a frame currently on a free list.
unsafe fn read_link<M: PhysMapper>(pa: PhysicalAddress, mapper: &M) -> Option<PhysicalAddress> {
    // SAFETY: caller guarantees `pa` holds a link word.
    let next = unsafe { mapper.phys_to_ptr(pa).cast::<u64>().read() };
    (next != END).then(|| PhysicalAddress::new(next))
}

use crate::free_list::FreeList;
use crate::layout::MemoryLayout;
use crate::phys_mapper::PhysMapper;
use kernel_memory_addresses::{PAGE_SIZE, PhysicalAddress};
use kernel_sync::{SpinLock, SyncOnceCell};
use log::info;

/// Byte pattern written over every frame handed out by [`PageAllocator::allocate`].
pub const ALLOC_JUNK: u8 = 0x05;

/// Byte pattern written over every frame passed to [`PageAllocator::reclaim`].
///
/// The first word of a free frame is overwritten again by the free-list link.
pub const FREE_JUNK: u8 = 0x01;

#[allow(clippy::cast_possible_truncation)]
const PAGE_BYTES: usize = PAGE_SIZE as usize;

/// Exclusive ownership of one allocated physical page frame.
///
/// Not `Clone`: the only way to give the frame back is to move the handle
/// into [`PageAllocator::reclaim`].
#[must_use = "dropping a PageFrame leaks the page; pass it to reclaim"]
#[derive(Debug, PartialEq, Eq)]
pub struct PageFrame {
    pa: PhysicalAddress,
}

impl PageFrame {
    #[must_use]
    pub const fn address(&self) -> PhysicalAddress {
        self.pa
    }

    /// Gives up the handle, e.g. to install the frame in a page table.
    #[must_use]
    pub const fn into_raw(self) -> PhysicalAddress {
        self.pa
    }

    /// Re-creates a handle from an address previously obtained via
    /// [`into_raw`](Self::into_raw) or a frame that was never allocator-owned
    /// (boot-time seeding).
    ///
    /// # Safety
    /// Nothing else may use or own the frame at `pa` afterwards.
    pub const unsafe fn from_raw(pa: PhysicalAddress) -> Self {
        Self { pa }
    }

    /// The frame's contents.
    pub fn bytes<M: PhysMapper>(&self, mapper: &M) -> &[u8; PAGE_BYTES] {
        // SAFETY: the handle owns the frame; the mapper makes it addressable.
        unsafe { &*mapper.phys_to_ptr(self.pa).cast::<[u8; PAGE_BYTES]>() }
    }

    /// The frame's contents, writable.
    pub fn bytes_mut<M: PhysMapper>(&mut self, mapper: &M) -> &mut [u8; PAGE_BYTES] {
        // SAFETY: as above, and `&mut self` makes the borrow unique.
        unsafe { &mut *mapper.phys_to_ptr(self.pa).cast::<[u8; PAGE_BYTES]>() }
    }
}

/// The kernel-wide physical page pool.
///
/// Intended to live in a `static`; every method takes `&self`.
pub struct PageAllocator<M> {
    layout: SyncOnceCell<MemoryLayout>,
    free: SpinLock<FreeList>,
    mapper: M,
}

impl<M: PhysMapper> PageAllocator<M> {
    pub const fn new(mapper: M) -> Self {
        Self {
            layout: SyncOnceCell::new(),
            free: SpinLock::new(FreeList::new()),
            mapper,
        }
    }

    /// Seeds the pool with every whole page in `layout` by reclaiming each one,
    /// lowest address first. Returns the number of pages added.
    ///
    /// # Panics
    /// If the allocator was already initialized.
    pub fn init(&self, layout: MemoryLayout) -> usize {
        let first_init = self.layout.set(layout).is_ok();
        assert!(first_init, "kinit: page allocator already initialized");

        let count = layout.usable_pages().fold(0, |count, page| {
            // SAFETY: pages past the kernel image belong to nobody yet.
            self.reclaim(unsafe { PageFrame::from_raw(page.base()) });
            count + 1
        });

        info!(
            "kinit: {count} pages free in [{}, {})",
            layout.kernel_end().page_round_up(),
            layout.phys_top()
        );
        count
    }

    /// Takes one frame from the pool, filled with [`ALLOC_JUNK`].
    ///
    /// Returns `None` when memory is exhausted; the pool is left unchanged.
    pub fn allocate(&self) -> Option<PageFrame> {
        let pa = self.free.lock_irq().pop(&self.mapper)?;
        let mut frame = PageFrame { pa };
        frame.bytes_mut(&self.mapper).fill(ALLOC_JUNK);
        Some(frame)
    }

    /// Like [`allocate`](Self::allocate), but the frame is zero-filled.
    pub fn allocate_zeroed(&self) -> Option<PageFrame> {
        let mut frame = self.allocate()?;
        frame.bytes_mut(&self.mapper).fill(0);
        Some(frame)
    }

    /// Returns `frame` to the pool after filling it with [`FREE_JUNK`].
    ///
    /// # Panics
    /// If the allocator is not initialized, or the frame's address is not
    /// page aligned, lies below the end of the kernel image, or lies at or
    /// above the top of memory. Nothing is written to the frame in that case.
    pub fn reclaim(&self, mut frame: PageFrame) {
        let Some(layout) = self.layout.get() else {
            panic!("reclaim: page allocator not initialized");
        };
        if let Err(violation) = layout.check_frame(frame.pa) {
            panic!("reclaim: {violation}");
        }

        frame.bytes_mut(&self.mapper).fill(FREE_JUNK);

        // SAFETY: the handle was owned and is consumed here; the address passed
        // the layout checks.
        unsafe { self.free.lock_irq().push(frame.into_raw(), &self.mapper) };
    }

    /// Number of frames currently in the pool.
    pub fn free_pages(&self) -> usize {
        self.free.lock_irq().len()
    }

    /// Calls `f` for every free frame, most recently reclaimed first.
    ///
    /// The pool stays locked with interrupts masked for the whole walk.
    pub fn for_each_free(&self, f: impl FnMut(PhysicalAddress)) {
        let free = self.free.lock_irq();
        free.iter(&self.mapper).for_each(f);
    }

    pub const fn mapper(&self) -> &M {
        &self.mapper
    }
}

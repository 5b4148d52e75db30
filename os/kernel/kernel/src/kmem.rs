use kernel_alloc::{IdentityMapper, PageAllocator, PageFrame};
use kernel_trap::{TickCounter, trap_init};

/// All free physical RAM above the kernel image.
pub(crate) static KMEM: PageAllocator<IdentityMapper> = PageAllocator::new(IdentityMapper);

static TICKS: TickCounter = trap_init();

/// One page of physical memory, or `None` when RAM is exhausted.
///
/// The page is filled with junk; see [`allocate_zeroed_page`].
pub fn allocate_page() -> Option<PageFrame> {
    KMEM.allocate()
}

pub fn allocate_zeroed_page() -> Option<PageFrame> {
    KMEM.allocate_zeroed()
}

/// Returns a page to the pool.
///
/// # Panics
/// If the frame is not a page of allocatable RAM.
pub fn reclaim_page(frame: PageFrame) {
    KMEM.reclaim(frame);
}

pub fn free_pages() -> usize {
    KMEM.free_pages()
}

/// Timer interrupts since boot.
pub fn ticks() -> &'static TickCounter {
    &TICKS
}

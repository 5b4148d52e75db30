use std::alloc::{Layout, alloc_zeroed, dealloc};
use std::collections::HashSet;

use kernel_alloc::{
    ALLOC_JUNK, FREE_JUNK, IdentityMapper, MemoryLayout, PageAllocator, PageFrame,
};
use kernel_memory_addresses::{PAGE_SIZE, PhysicalAddress};

/// Page-aligned host memory standing in for a slice of RAM.
struct Arena {
    base: *mut u8,
    layout: Layout,
}

impl Arena {
    fn pages(n: usize) -> Self {
        let layout = Layout::from_size_align(n * PAGE_SIZE as usize, PAGE_SIZE as usize).unwrap();
        let base = unsafe { alloc_zeroed(layout) };
        assert!(!base.is_null());
        Self { base, layout }
    }

    fn start(&self) -> PhysicalAddress {
        PhysicalAddress::from_ptr(self.base)
    }

    fn page(&self, i: u64) -> PhysicalAddress {
        self.start() + i * PAGE_SIZE
    }

    fn end(&self) -> PhysicalAddress {
        self.start() + self.layout.size() as u64
    }

    fn read(&self, pa: PhysicalAddress) -> &[u8] {
        unsafe { std::slice::from_raw_parts(pa.as_u64() as *const u8, PAGE_SIZE as usize) }
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        unsafe { dealloc(self.base, self.layout) };
    }
}

fn pool(arena: &Arena) -> PageAllocator<IdentityMapper> {
    let kmem = PageAllocator::new(IdentityMapper);
    kmem.init(MemoryLayout::new(arena.start(), arena.end()).unwrap());
    kmem
}

#[test]
fn init_seeds_every_whole_page_after_kernel_end() {
    let arena = Arena::pages(6);
    let kmem = PageAllocator::new(IdentityMapper);

    // Pretend the kernel image ends partway into the first page.
    let layout = MemoryLayout::new(arena.start() + 0x234, arena.end()).unwrap();
    assert_eq!(kmem.init(layout), 5);
    assert_eq!(kmem.free_pages(), 5);

    let mut free = Vec::new();
    kmem.for_each_free(|pa| free.push(pa));
    let expected: Vec<_> = (1..6).rev().map(|i| arena.page(i)).collect();
    assert_eq!(free, expected);
}

#[test]
fn allocated_frames_are_aligned_in_range_and_junk_filled() {
    let arena = Arena::pages(4);
    let kmem = pool(&arena);

    let frame = kmem.allocate().unwrap();
    let pa = frame.address();
    assert!(pa.is_page_aligned());
    assert!(pa >= arena.start() && pa < arena.end());
    assert!(frame.bytes(kmem.mapper()).iter().all(|&b| b == ALLOC_JUNK));
    assert_eq!(kmem.free_pages(), 3);
    kmem.reclaim(frame);
}

#[test]
fn zeroed_allocation_is_all_zero() {
    let arena = Arena::pages(2);
    let kmem = pool(&arena);

    let frame = kmem.allocate_zeroed().unwrap();
    assert!(frame.bytes(kmem.mapper()).iter().all(|&b| b == 0));
    kmem.reclaim(frame);
}

#[test]
fn most_recently_reclaimed_frame_is_handed_out_first() {
    let arena = Arena::pages(3);
    let kmem = pool(&arena);

    // Seeding reclaims lowest first, so the highest page is on top.
    let first = kmem.allocate().unwrap();
    assert_eq!(first.address(), arena.page(2));

    let second = kmem.allocate().unwrap();
    let second_pa = second.address();
    kmem.reclaim(second);
    assert_eq!(kmem.allocate().unwrap().into_raw(), second_pa);
    let _ = first.into_raw();
}

#[test]
fn eight_page_pool_exhausts_and_recycles() {
    let arena = Arena::pages(8);
    let kmem = pool(&arena);
    assert_eq!(kmem.free_pages(), 8);

    let mut frames: Vec<PageFrame> = (0..8).map(|_| kmem.allocate().unwrap()).collect();
    let distinct: HashSet<_> = frames.iter().map(PageFrame::address).collect();
    assert_eq!(distinct.len(), 8);
    assert!(kmem.allocate().is_none());
    assert_eq!(kmem.free_pages(), 0);

    let third = frames.swap_remove(3);
    let third_pa = third.address();
    kmem.reclaim(third);
    assert_eq!(kmem.free_pages(), 1);

    // Everything past the link word carries the reclaim filler.
    assert!(arena.read(third_pa)[8..].iter().all(|&b| b == FREE_JUNK));

    let again = kmem.allocate().unwrap();
    assert_eq!(again.address(), third_pa);
    assert!(kmem.allocate().is_none());

    frames.push(again);
    for frame in frames {
        kmem.reclaim(frame);
    }
    assert_eq!(kmem.free_pages(), 8);
}

#[test]
fn exhaustion_leaves_the_pool_unchanged() {
    let arena = Arena::pages(1);
    let kmem = pool(&arena);

    let only = kmem.allocate().unwrap();
    assert!(kmem.allocate().is_none());
    assert!(kmem.allocate_zeroed().is_none());
    assert_eq!(kmem.free_pages(), 0);

    kmem.reclaim(only);
    assert_eq!(kmem.free_pages(), 1);
}

#[test]
#[should_panic(expected = "reclaim: ")]
fn reclaiming_a_misaligned_address_panics() {
    let arena = Arena::pages(2);
    let kmem = pool(&arena);
    kmem.reclaim(unsafe { PageFrame::from_raw(arena.page(1) + 8) });
}

#[test]
#[should_panic(expected = "inside the kernel image")]
fn reclaiming_below_kernel_end_panics() {
    let arena = Arena::pages(3);
    let kmem = PageAllocator::new(IdentityMapper);
    kmem.init(MemoryLayout::new(arena.page(1), arena.end()).unwrap());
    kmem.reclaim(unsafe { PageFrame::from_raw(arena.page(0)) });
}

#[test]
#[should_panic(expected = "at or above the top of memory")]
fn reclaiming_at_phys_top_panics() {
    let arena = Arena::pages(2);
    let kmem = pool(&arena);
    kmem.reclaim(unsafe { PageFrame::from_raw(arena.end()) });
}

#[test]
#[should_panic(expected = "already initialized")]
fn second_init_panics() {
    let arena = Arena::pages(2);
    let kmem = pool(&arena);
    kmem.init(MemoryLayout::new(arena.start(), arena.end()).unwrap());
}

#[test]
fn concurrent_allocations_never_share_a_frame() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 16;

    let arena = Arena::pages(THREADS * PER_THREAD);
    let kmem = pool(&arena);

    let taken: Vec<Vec<PhysicalAddress>> = std::thread::scope(|s| {
        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    let mut mine = Vec::new();
                    for _ in 0..PER_THREAD {
                        let frame = kmem.allocate().unwrap();
                        mine.push(frame.into_raw());
                    }
                    mine
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    let all: HashSet<_> = taken.iter().flatten().copied().collect();
    assert_eq!(all.len(), THREADS * PER_THREAD);
    assert!(kmem.allocate().is_none());

    std::thread::scope(|s| {
        for mine in &taken {
            let kmem = &kmem;
            s.spawn(move || {
                for &pa in mine {
                    kmem.reclaim(unsafe { PageFrame::from_raw(pa) });
                }
            });
        }
    });
    assert_eq!(kmem.free_pages(), THREADS * PER_THREAD);
}

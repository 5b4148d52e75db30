//! # Physical Page Allocator
//!
//! Hands out and reclaims whole 4 KiB physical page frames for every other
//! kernel subsystem: process kernel stacks, page-table pages, trap frames and
//! pipe buffers.
//!
//! ## Design
//!
//! ```text
//!            head
//!             │
//!             ▼
//!   ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!   │ next ────────┼───►│ next ────────┼───►│ next = END   │
//!   │ 0x01 0x01 …  │    │ 0x01 0x01 …  │    │ 0x01 0x01 …  │
//!   └──────────────┘    └──────────────┘    └──────────────┘
//!     free frame          free frame          free frame
//! ```
//!
//! * **Intrusive free list**: a free frame stores the only per-frame metadata,
//!   the physical address of the next free frame, in its own first word.
//!   Allocated frames carry no metadata at all.
//! * **O(1)** allocate (pop) and reclaim (push). No coalescing, no
//!   fragmentation tracking; every request is exactly one page.
//! * **Junk fill**: allocated frames are filled with [`ALLOC_JUNK`] and
//!   reclaimed frames with [`FREE_JUNK`]. Code that relies on fresh pages
//!   being zeroed without zeroing them shows up quickly. Use
//!   [`PageAllocator::allocate_zeroed`] when zeroes are needed.
//!
//! ## Ownership
//!
//! [`PageAllocator::allocate`] returns a move-only [`PageFrame`].
//! [`PageAllocator::reclaim`] consumes it, so the handle API cannot free the
//! same frame twice. Raw addresses can be turned back into handles with the
//! `unsafe` [`PageFrame::from_raw`]; such frames still go through the address
//! checks below.
//!
//! ## Failure model
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | free list empty | `allocate` returns `None`; the caller decides |
//! | reclaimed address not page aligned | panic (`"reclaim: …"`) |
//! | reclaimed address inside the kernel image | panic |
//! | reclaimed address at or above the top of RAM | panic |
//! | `init` called twice | panic |
//!
//! A bad reclaim means some other part of the kernel has lost track of its
//! memory; continuing would hand the same frame to two owners.
//!
//! ## Concurrency
//!
//! The free list sits behind a [`SpinLock`](kernel_sync::SpinLock) taken with
//! interrupts masked. The critical sections are a single push or pop; the
//! junk fill of a 4 KiB frame always happens outside the lock.
//!
//! ## Example
//!
//! ```rust
//! use kernel_alloc::{IdentityMapper, MemoryLayout, PageAllocator, ALLOC_JUNK};
//! use kernel_memory_addresses::{PhysicalAddress, PAGE_SIZE};
//!
//! // Four page-aligned pages of host memory stand in for RAM.
//! let ram = std::alloc::Layout::from_size_align(4 * 4096, 4096).unwrap();
//! let base = unsafe { std::alloc::alloc(ram) };
//! let start = PhysicalAddress::from_ptr(base);
//!
//! let layout = MemoryLayout::new(start, start + 4 * PAGE_SIZE).unwrap();
//! let kmem = PageAllocator::new(IdentityMapper);
//! assert_eq!(kmem.init(layout), 4);
//!
//! let frame = kmem.allocate().expect("a free page");
//! assert!(frame.bytes(kmem.mapper()).iter().all(|&b| b == ALLOC_JUNK));
//! kmem.reclaim(frame);
//! assert_eq!(kmem.free_pages(), 4);
//! # unsafe { std::alloc::dealloc(base, ram) };
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod free_list;
mod layout;
mod page_alloc;
mod phys_mapper;

pub use layout::{LayoutError, MemoryLayout, ReclaimViolation};
pub use page_alloc::{ALLOC_JUNK, FREE_JUNK, PageAllocator, PageFrame};
pub use phys_mapper::{IdentityMapper, PhysMapper};

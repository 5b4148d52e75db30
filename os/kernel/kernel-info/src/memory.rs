//! # Memory Layout

use kernel_memory_addresses::PAGE_SIZE;

/// Where the boot ROM jumps and where the kernel image is linked.
pub const KERNBASE: u64 = 0x8000_0000;

/// Amount of RAM the kernel takes ownership of.
pub const RAM_SIZE: u64 = 128 * 1024 * 1024;

/// First physical address past usable RAM.
pub const PHYSTOP: u64 = KERNBASE + RAM_SIZE;

/// One beyond the highest possible Sv39 virtual address.
///
/// Kept one bit below the architectural maximum to avoid having to
/// sign-extend virtual addresses with the high bit set.
pub const MAXVA: u64 = 1 << (9 + 9 + 9 + 12 - 1);

/// The trampoline page, mapped at the same virtual address in user and
/// kernel page tables.
pub const TRAMPOLINE: u64 = MAXVA - PAGE_SIZE;

/// The per-process trap frame, mapped just below the trampoline in every
/// user page table.
pub const TRAPFRAME: u64 = TRAMPOLINE - PAGE_SIZE;

/// Size of each process's kernel stack.
pub const KERNEL_STACK_SIZE: u64 = PAGE_SIZE;

const _: () = {
    assert!(KERNBASE % PAGE_SIZE == 0);
    assert!(PHYSTOP % PAGE_SIZE == 0);
    assert!(PHYSTOP > KERNBASE);
    assert!(TRAPFRAME < TRAMPOLINE);
};

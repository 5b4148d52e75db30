//! # Platform Layout for the QEMU `virt` RISC-V Machine
//!
//! This crate is the single source of truth for the addresses and interrupt
//! numbers that the allocator, the trap path and the debug console share.
//!
//! ## Physical Memory Layout
//!
//! ```text
//! 0x0200_0000  CLINT
//! 0x0C00_0000  PLIC
//! 0x1000_0000  UART0 (16550)            IRQ 10
//! 0x1000_1000  VIRTIO0 (block device)   IRQ 1
//! 0x8000_0000  KERNBASE  ┌──────────────────────────────┐
//!                        │ kernel text, data, bss       │
//!              `end`     ├──────────────────────────────┤
//!                        │ free page frames             │
//!                        │ (managed by kernel-alloc)    │
//! PHYSTOP                └──────────────────────────────┘  KERNBASE + 128 MiB
//! ```
//!
//! ## Virtual Memory Layout (top of every address space)
//!
//! ```text
//! MAXVA      ────────────────────
//! TRAMPOLINE   trampoline code page (mapped in user and kernel tables)
//! TRAPFRAME    per-process trap frame (user table only)
//! ```
//!
//! All values are `const` and sanity checked at compile time.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod devices;
pub mod memory;

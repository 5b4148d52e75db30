//! The real hart and PLIC on `riscv64`.

use core::num::NonZeroU32;

use kernel_info::devices::{PLIC, UART0_IRQ, VIRTIO0_IRQ, plic_senable, plic_sclaim, plic_spriority};
use kernel_registers::{
    LoadRegisterUnsafe, Satp, Scause, Sepc, Sip, Sstatus, StoreRegisterUnsafe, Stval, Stvec, Tp,
};
use kernel_sync::irq;

use crate::devintr::InterruptController;
use crate::hart::Hart;

/// The hart executing the current code, accessed through its CSRs.
#[derive(Debug, Default, Copy, Clone)]
pub struct CsrHart;

impl Hart for CsrHart {
    fn id(&self) -> u64 {
        // SAFETY: `tp` holds the hart id from boot on and is never reused.
        unsafe { Tp::load_unsafe() }.0
    }

    fn sstatus(&self) -> Sstatus {
        // SAFETY: S-mode CSR access; the kernel runs in supervisor mode.
        unsafe { Sstatus::load_unsafe() }
    }

    fn set_sstatus(&self, value: Sstatus) {
        // SAFETY: S-mode CSR access; the kernel runs in supervisor mode.
        unsafe { value.store_unsafe() }
    }

    fn scause(&self) -> Scause {
        // SAFETY: S-mode CSR access; the kernel runs in supervisor mode.
        unsafe { Scause::load_unsafe() }
    }

    fn set_scause(&self, value: Scause) {
        // SAFETY: S-mode CSR access; the kernel runs in supervisor mode.
        unsafe { value.store_unsafe() }
    }

    fn sepc(&self) -> u64 {
        // SAFETY: S-mode CSR access; the kernel runs in supervisor mode.
        unsafe { Sepc::load_unsafe() }.0
    }

    fn set_sepc(&self, value: u64) {
        // SAFETY: S-mode CSR access; the kernel runs in supervisor mode.
        unsafe { Sepc(value).store_unsafe() }
    }

    fn stval(&self) -> u64 {
        // SAFETY: S-mode CSR access; the kernel runs in supervisor mode.
        unsafe { Stval::load_unsafe() }.0
    }

    fn satp(&self) -> Satp {
        // SAFETY: S-mode CSR access; the kernel runs in supervisor mode.
        unsafe { Satp::load_unsafe() }
    }

    fn set_stvec(&self, vector: u64) {
        // SAFETY: S-mode CSR access; the kernel runs in supervisor mode.
        unsafe { Stvec(vector).store_unsafe() }
    }

    fn sip(&self) -> Sip {
        // SAFETY: S-mode CSR access; the kernel runs in supervisor mode.
        unsafe { Sip::load_unsafe() }
    }

    fn set_sip(&self, value: Sip) {
        // SAFETY: S-mode CSR access; the kernel runs in supervisor mode.
        unsafe { value.store_unsafe() }
    }

    fn interrupts_enabled(&self) -> bool {
        irq::enabled()
    }

    fn enable_interrupts(&self) {
        irq::enable();
    }

    fn disable_interrupts(&self) {
        irq::disable();
    }

    fn enter_user(&self, userret: u64, trap_frame: u64, satp: Satp) {
        // SAFETY: `userret` is the trampoline's return path, mapped at the same
        // address in the kernel and every user page table.
        let userret = unsafe { core::mem::transmute::<u64, extern "C" fn(u64, u64) -> !>(userret) };
        userret(trap_frame, satp.into_bits());
    }
}

/// The QEMU `virt` PLIC, supervisor context of each hart.
#[derive(Debug, Default, Copy, Clone)]
pub struct Plic;

impl Plic {
    /// Gives the devices the kernel drives a non-zero priority.
    pub fn init(&self) {
        for irq in [UART0_IRQ, VIRTIO0_IRQ] {
            let priority = (PLIC + u64::from(irq) * 4) as *mut u32;
            // SAFETY: the priority word of a valid source inside the PLIC's
            // identity-mapped MMIO window.
            unsafe { priority.write_volatile(1) };
        }
    }

    /// Enables the kernel's devices for `hart`'s supervisor context and
    /// accepts every priority.
    pub fn init_hart(&self, hart: u64) {
        let enable = plic_senable(hart) as *mut u32;
        let threshold = plic_spriority(hart) as *mut u32;
        // SAFETY: `hart`'s S-mode enable and threshold words inside the
        // PLIC's identity-mapped MMIO window.
        unsafe {
            enable.write_volatile((1 << UART0_IRQ) | (1 << VIRTIO0_IRQ));
            threshold.write_volatile(0);
        }
    }
}

impl InterruptController for Plic {
    fn claim(&self, hart: u64) -> Option<NonZeroU32> {
        let claim = plic_sclaim(hart) as *const u32;
        // SAFETY: `hart`'s S-mode claim register; reading it claims the
        // highest pending source.
        NonZeroU32::new(unsafe { claim.read_volatile() })
    }

    fn complete(&self, hart: u64, irq: NonZeroU32) {
        let complete = plic_sclaim(hart) as *mut u32;
        // SAFETY: writing a previously claimed id back to the claim
        // register completes that source.
        unsafe { complete.write_volatile(irq.get()) };
    }
}

use kernel_registers::{Satp, Scause, Sip, Sstatus};

/// The per-hart machine state the trap path reads and writes.
///
/// [`CsrHart`](crate::CsrHart) is the real implementation on `riscv64`.
pub trait Hart {
    /// This hart's id (kept in `tp`).
    fn id(&self) -> u64;

    fn sstatus(&self) -> Sstatus;
    fn set_sstatus(&self, value: Sstatus);

    fn scause(&self) -> Scause;
    fn set_scause(&self, value: Scause);

    fn sepc(&self) -> u64;
    fn set_sepc(&self, value: u64);

    fn stval(&self) -> u64;

    /// The translation root currently in use, i.e. the kernel page table while
    /// handling a trap.
    fn satp(&self) -> Satp;

    fn set_stvec(&self, vector: u64);

    fn sip(&self) -> Sip;
    fn set_sip(&self, value: Sip);

    /// Whether supervisor interrupts are enabled (`sstatus.SIE`).
    fn interrupts_enabled(&self) -> bool {
        self.sstatus().sie()
    }

    fn enable_interrupts(&self);
    fn disable_interrupts(&self);

    /// Jumps to the trampoline's `userret` with the user trap frame address and
    /// the user `satp`. `userret` switches page tables, restores the user
    /// registers and executes `sret`.
    ///
    /// On hardware this never returns.
    fn enter_user(&self, userret: u64, trap_frame: u64, satp: Satp);
}

use core::mem::{offset_of, size_of};

/// Per-process register save area shared with the trampoline.
///
/// The trampoline page maps this at [`TRAPFRAME`](kernel_info::memory::TRAPFRAME)
/// in every user address space. `uservec` stores the user registers here and
/// loads the five kernel fields; `userret` reloads the user registers. The
/// field offsets are therefore fixed.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TrapFrame {
    /// Kernel page table (`satp` value).
    pub kernel_satp: u64,
    /// Top of this process's kernel stack.
    pub kernel_sp: u64,
    /// Address of the user-trap handler.
    pub kernel_trap: u64,
    /// Saved user program counter.
    pub epc: u64,
    /// Hart the process last returned to user mode on.
    pub kernel_hartid: u64,
    pub ra: u64,
    pub sp: u64,
    pub gp: u64,
    pub tp: u64,
    pub t0: u64,
    pub t1: u64,
    pub t2: u64,
    pub s0: u64,
    pub s1: u64,
    pub a0: u64,
    pub a1: u64,
    pub a2: u64,
    pub a3: u64,
    pub a4: u64,
    pub a5: u64,
    pub a6: u64,
    pub a7: u64,
    pub s2: u64,
    pub s3: u64,
    pub s4: u64,
    pub s5: u64,
    pub s6: u64,
    pub s7: u64,
    pub s8: u64,
    pub s9: u64,
    pub s10: u64,
    pub s11: u64,
    pub t3: u64,
    pub t4: u64,
    pub t5: u64,
    pub t6: u64,
}

const _: () = {
    assert!(offset_of!(TrapFrame, kernel_satp) == 0);
    assert!(offset_of!(TrapFrame, kernel_sp) == 8);
    assert!(offset_of!(TrapFrame, kernel_trap) == 16);
    assert!(offset_of!(TrapFrame, epc) == 24);
    assert!(offset_of!(TrapFrame, kernel_hartid) == 32);
    assert!(offset_of!(TrapFrame, ra) == 40);
    assert!(offset_of!(TrapFrame, a0) == 112);
    assert!(offset_of!(TrapFrame, a7) == 168);
    assert!(offset_of!(TrapFrame, s2) == 176);
    assert!(offset_of!(TrapFrame, t6) == 280);
    assert!(size_of::<TrapFrame>() == 288);
};

impl TrapFrame {
    /// System call number (`a7`).
    #[must_use]
    pub const fn syscall_number(&self) -> u64 {
        self.a7
    }

    /// The `n`th system call argument (`a0`..=`a5`).
    ///
    /// # Panics
    /// If `n > 5`.
    #[must_use]
    pub const fn arg(&self, n: usize) -> u64 {
        match n {
            0 => self.a0,
            1 => self.a1,
            2 => self.a2,
            3 => self.a3,
            4 => self.a4,
            5 => self.a5,
            _ => panic!("arg: system calls take at most six arguments"),
        }
    }

    /// Stores a system call's return value in `a0`.
    pub const fn set_return(&mut self, value: u64) {
        self.a0 = value;
    }
}

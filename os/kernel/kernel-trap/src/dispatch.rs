use kernel_info::memory::{KERNEL_STACK_SIZE, TRAMPOLINE, TRAPFRAME};
use kernel_registers::{Satp, Scause};
use log::{error, warn};

use crate::alarm::alarm_tick;
use crate::cause::{TrapCause, describe_cause};
use crate::devintr::{DeviceDrivers, InterruptClassifier, InterruptController, InterruptKind};
use crate::hart::Hart;
use crate::process::{Process, Scheduler, SyscallHandler, UserFault};
use crate::ticks::TickCounter;

/// Addresses the trap path installs in `stvec` and the trap frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TrapVectors {
    /// `kernelvec`: entry for traps taken in supervisor mode.
    pub kernel_vec: u64,
    /// `uservec` as mapped in the trampoline page.
    pub user_vec: u64,
    /// `userret` as mapped in the trampoline page.
    pub user_ret: u64,
    /// The function `uservec` jumps to, i.e. the user-trap handler.
    pub user_trap: u64,
    /// User virtual address of the trap frame.
    pub trap_frame: u64,
}

impl TrapVectors {
    /// Vectors for a trampoline page mapped at [`TRAMPOLINE`] with `uservec`
    /// and `userret` at the given offsets into it, and the trap frame at
    /// [`TRAPFRAME`].
    #[must_use]
    pub const fn with_trampoline(
        kernel_vec: u64,
        user_trap: u64,
        uservec_offset: u64,
        userret_offset: u64,
    ) -> Self {
        Self {
            kernel_vec,
            user_vec: TRAMPOLINE + uservec_offset,
            user_ret: TRAMPOLINE + userret_offset,
            user_trap,
            trap_frame: TRAPFRAME,
        }
    }
}

/// How a user trap ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UserTrapExit {
    /// The process was killed and handed to [`Scheduler::exit`].
    Terminated,
    /// The return-to-user path ran.
    ReturnedToUser,
}

/// Routes every trap taken on one hart.
pub struct TrapDispatcher<'a, H, S, Y, C, D> {
    hart: &'a H,
    scheduler: &'a S,
    syscalls: &'a Y,
    interrupts: &'a InterruptClassifier<'a, C, D>,
    vectors: TrapVectors,
}

impl<'a, H, S, Y, C, D> TrapDispatcher<'a, H, S, Y, C, D>
where
    H: Hart,
    S: Scheduler,
    C: InterruptController,
    D: DeviceDrivers,
{
    pub const fn new(
        hart: &'a H,
        scheduler: &'a S,
        syscalls: &'a Y,
        interrupts: &'a InterruptClassifier<'a, C, D>,
        vectors: TrapVectors,
    ) -> Self {
        Self {
            hart,
            scheduler,
            syscalls,
            interrupts,
            vectors,
        }
    }

    /// Handles an interrupt, exception or system call from user space.
    ///
    /// # Panics
    /// If the trap did not come from user mode.
    pub fn handle_from_user<P>(&self, process: &mut P) -> UserTrapExit
    where
        P: Process,
        Y: SyscallHandler<P>,
    {
        let hart = self.hart;
        assert!(hart.sstatus().from_user(), "usertrap: not from user mode");

        // Further traps are kernel traps until we return to user space.
        hart.set_stvec(self.vectors.kernel_vec);
        process.trap_frame().epc = hart.sepc();

        let scause = hart.scause();
        let mut kind = InterruptKind::Unrecognized;

        if TrapCause::from_scause(scause) == TrapCause::UserEnvCall {
            if process.killed() {
                self.scheduler.exit(-1);
                return UserTrapExit::Terminated;
            }

            // Resume after the ecall.
            process.trap_frame().epc += 4;

            // Interrupts may clobber sepc, scause and sstatus, so only now.
            hart.enable_interrupts();
            self.syscalls.syscall(process);
        } else {
            kind = self.interrupts.classify(scause, hart, self.scheduler);
            match kind {
                InterruptKind::Timer => {
                    alarm_tick(process);
                }
                InterruptKind::Device => {}
                InterruptKind::Unrecognized => self.user_fault(process, scause),
            }
        }

        if process.killed() {
            self.scheduler.exit(-1);
            return UserTrapExit::Terminated;
        }

        if kind == InterruptKind::Timer {
            self.scheduler.yield_now();
        }

        self.return_to_user(process);
        UserTrapExit::ReturnedToUser
    }

    fn user_fault<P: Process>(&self, process: &mut P, scause: Scause) {
        let fault = UserFault {
            scause,
            sepc: self.hart.sepc(),
            stval: self.hart.stval(),
        };
        warn!(
            "usertrap: unexpected scause {:#x} ({}) pid={} sepc={:#x} stval={:#x}",
            scause.into_bits(),
            fault.description(),
            process.pid(),
            fault.sepc,
            fault.stval
        );
        process.kill();
        process.record_fault(fault);
    }

    /// Switches the hart back to `process` in user mode.
    ///
    /// Fills in the kernel half of the trap frame for the next `uservec`, then
    /// leaves through the trampoline's `userret`.
    pub fn return_to_user<P: Process>(&self, process: &mut P) {
        let hart = self.hart;

        // Traps must not reach kernelvec once stvec points at uservec.
        hart.disable_interrupts();
        hart.set_stvec(self.vectors.user_vec);

        let kernel_satp = hart.satp().into_bits();
        let kernel_sp = process.kernel_stack() + KERNEL_STACK_SIZE;
        let user_satp = Satp::sv39(process.page_table_root());

        let tf = process.trap_frame();
        tf.kernel_satp = kernel_satp;
        tf.kernel_sp = kernel_sp;
        tf.kernel_trap = self.vectors.user_trap;
        tf.kernel_hartid = hart.id();
        let epc = tf.epc;

        // sret goes to user mode with interrupts on.
        hart.set_sstatus(hart.sstatus().prepared_for_user_return());
        hart.set_sepc(epc);

        hart.enter_user(self.vectors.user_ret, self.vectors.trap_frame, user_satp);
    }

    /// Handles an interrupt or exception taken in supervisor mode.
    ///
    /// # Panics
    /// If the trap did not come from supervisor mode, arrived with interrupts
    /// enabled, or is not a device or timer interrupt.
    pub fn handle_from_kernel(&self) {
        let hart = self.hart;
        let sepc = hart.sepc();
        let sstatus = hart.sstatus();
        let scause = hart.scause();

        assert!(!sstatus.from_user(), "kerneltrap: not from supervisor mode");
        assert!(!hart.interrupts_enabled(), "kerneltrap: interrupts enabled");

        let kind = self.interrupts.classify(scause, hart, self.scheduler);
        if kind == InterruptKind::Unrecognized {
            error!(
                "kerneltrap: scause={:#x} ({}) sepc={sepc:#x} stval={:#x}",
                scause.into_bits(),
                describe_cause(scause),
                hart.stval()
            );
            panic!("kerneltrap: {}", describe_cause(scause));
        }

        if kind == InterruptKind::Timer && self.scheduler.has_running_process() {
            self.scheduler.yield_now();
        }

        // yield_now may have taken traps of its own.
        hart.set_sepc(sepc);
        hart.set_sstatus(sstatus);
        hart.set_scause(scause);
    }
}

/// Per-hart trap setup: route supervisor-mode traps to `kernelvec`.
pub fn trap_init_hart<H: Hart + ?Sized>(hart: &H, vectors: &TrapVectors) {
    hart.set_stvec(vectors.kernel_vec);
}

/// One-time trap setup: the global tick counter.
#[must_use]
pub const fn trap_init() -> TickCounter {
    TickCounter::new()
}

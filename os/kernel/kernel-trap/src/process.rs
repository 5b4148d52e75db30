use kernel_memory_addresses::PhysicalAddress;
use kernel_registers::Scause;

use crate::alarm::Alarm;
use crate::cause::describe_cause;
use crate::ticks::Wakeup;
use crate::trap_frame::TrapFrame;

/// Raw trap state of a user trap the kernel could not handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UserFault {
    pub scause: Scause,
    pub sepc: u64,
    pub stval: u64,
}

impl UserFault {
    #[must_use]
    pub const fn description(&self) -> &'static str {
        describe_cause(self.scause)
    }
}

/// The current process, as seen by the trap path.
pub trait Process {
    fn pid(&self) -> u32;

    fn killed(&self) -> bool;

    /// Marks the process for termination at its next checkpoint.
    fn kill(&mut self);

    fn trap_frame(&mut self) -> &mut TrapFrame;

    /// Lowest address of the process's kernel stack.
    fn kernel_stack(&self) -> u64;

    /// Root of the process's user page table.
    fn page_table_root(&self) -> PhysicalAddress;

    fn alarm(&mut self) -> &mut Alarm;

    /// Keeps the details of a fatal user fault, e.g. for a core report.
    fn record_fault(&mut self, fault: UserFault);
}

/// Process lifecycle and CPU hand-off.
pub trait Scheduler: Wakeup {
    /// Terminates the current process with `status`. Does not return on
    /// hardware.
    fn exit(&self, status: i32);

    /// Gives up the CPU; resumes later, possibly on another hart.
    fn yield_now(&self);

    /// Whether a process is in the running state on this hart.
    fn has_running_process(&self) -> bool;
}

/// The system call table.
pub trait SyscallHandler<P: ?Sized> {
    /// Runs the call selected by the trap frame's `a7` and stores its result
    /// in `a0`.
    fn syscall(&self, process: &mut P);
}

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::num::NonZeroU32;

use kernel_memory_addresses::PhysicalAddress;
use kernel_registers::{Satp, Scause, Sip, Sstatus};
use kernel_trap::{
    Alarm, DeviceDrivers, Hart, InterruptController, Process, Scheduler, SyscallHandler,
    TrapFrame, TrapVectors, UserFault, Wakeup,
};

pub const VECTORS: TrapVectors = TrapVectors {
    kernel_vec: 0x8000_4000,
    user_vec: 0x3f_ffff_f000,
    user_ret: 0x3f_ffff_f09c,
    user_trap: 0x8000_2a10,
    trap_frame: 0x3f_ffff_e000,
};

pub const KERNEL_SATP: u64 = 0x8000_0000_0008_7fff;

/// Hart-visible side effects, in program order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HartEvent {
    EnableInterrupts,
    DisableInterrupts,
    SetStvec(u64),
    SetSepc(u64),
    SetSstatus(u64),
    SetScause(u64),
    EnterUser { userret: u64, trap_frame: u64, satp: u64 },
}

pub struct MockHart {
    pub id: u64,
    pub sstatus: Cell<Sstatus>,
    pub scause: Cell<Scause>,
    pub sepc: Cell<u64>,
    pub stval: Cell<u64>,
    pub satp: Cell<Satp>,
    pub sip: Cell<Sip>,
    pub events: RefCell<Vec<HartEvent>>,
}

impl MockHart {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            sstatus: Cell::new(Sstatus::new()),
            scause: Cell::new(Scause::new()),
            sepc: Cell::new(0),
            stval: Cell::new(0),
            satp: Cell::new(Satp::from_bits(KERNEL_SATP)),
            sip: Cell::new(Sip::new()),
            events: RefCell::new(Vec::new()),
        }
    }

    /// State on entry to the user-trap handler.
    pub fn trapped_from_user(id: u64, scause: Scause, sepc: u64) -> Self {
        let hart = Self::new(id);
        hart.sstatus.set(Sstatus::new().with_spp(false).with_sie(false));
        hart.scause.set(scause);
        hart.sepc.set(sepc);
        hart
    }

    /// State on entry to the kernel-trap handler.
    pub fn trapped_from_kernel(id: u64, scause: Scause, sepc: u64) -> Self {
        let hart = Self::new(id);
        hart.sstatus.set(Sstatus::new().with_spp(true).with_sie(false).with_spie(true));
        hart.scause.set(scause);
        hart.sepc.set(sepc);
        hart
    }

    pub fn events(&self) -> Vec<HartEvent> {
        self.events.borrow().clone()
    }

    pub fn entered_user(&self) -> Option<HartEvent> {
        self.events
            .borrow()
            .iter()
            .copied()
            .find(|e| matches!(e, HartEvent::EnterUser { .. }))
    }

    fn record(&self, event: HartEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl Hart for MockHart {
    fn id(&self) -> u64 {
        self.id
    }

    fn sstatus(&self) -> Sstatus {
        self.sstatus.get()
    }

    fn set_sstatus(&self, value: Sstatus) {
        self.record(HartEvent::SetSstatus(value.into_bits()));
        self.sstatus.set(value);
    }

    fn scause(&self) -> Scause {
        self.scause.get()
    }

    fn set_scause(&self, value: Scause) {
        self.record(HartEvent::SetScause(value.into_bits()));
        self.scause.set(value);
    }

    fn sepc(&self) -> u64 {
        self.sepc.get()
    }

    fn set_sepc(&self, value: u64) {
        self.record(HartEvent::SetSepc(value));
        self.sepc.set(value);
    }

    fn stval(&self) -> u64 {
        self.stval.get()
    }

    fn satp(&self) -> Satp {
        self.satp.get()
    }

    fn set_stvec(&self, vector: u64) {
        self.record(HartEvent::SetStvec(vector));
    }

    fn sip(&self) -> Sip {
        self.sip.get()
    }

    fn set_sip(&self, value: Sip) {
        self.sip.set(value);
    }

    fn enable_interrupts(&self) {
        self.record(HartEvent::EnableInterrupts);
        self.sstatus.set(self.sstatus.get().with_sie(true));
    }

    fn disable_interrupts(&self) {
        self.record(HartEvent::DisableInterrupts);
        self.sstatus.set(self.sstatus.get().with_sie(false));
    }

    fn enter_user(&self, userret: u64, trap_frame: u64, satp: Satp) {
        self.record(HartEvent::EnterUser {
            userret,
            trap_frame,
            satp: satp.into_bits(),
        });
    }
}

#[derive(Default)]
pub struct MockScheduler {
    pub exits: RefCell<Vec<i32>>,
    pub yields: Cell<usize>,
    pub running: Cell<bool>,
    pub wakeups: RefCell<Vec<usize>>,
}

impl MockScheduler {
    pub fn with_running_process() -> Self {
        let scheduler = Self::default();
        scheduler.running.set(true);
        scheduler
    }
}

impl Wakeup for MockScheduler {
    fn wakeup(&self, channel: usize) {
        self.wakeups.borrow_mut().push(channel);
    }
}

impl Scheduler for MockScheduler {
    fn exit(&self, status: i32) {
        self.exits.borrow_mut().push(status);
    }

    fn yield_now(&self) {
        self.yields.set(self.yields.get() + 1);
    }

    fn has_running_process(&self) -> bool {
        self.running.get()
    }
}

/// A PLIC with a queue of pending source ids.
#[derive(Default)]
pub struct MockPlic {
    pub pending: RefCell<VecDeque<u32>>,
    pub claims: RefCell<Vec<u64>>,
    pub completed: RefCell<Vec<(u64, u32)>>,
}

impl MockPlic {
    pub fn pending(ids: &[u32]) -> Self {
        let plic = Self::default();
        plic.pending.borrow_mut().extend(ids);
        plic
    }
}

impl InterruptController for MockPlic {
    fn claim(&self, hart: u64) -> Option<NonZeroU32> {
        self.claims.borrow_mut().push(hart);
        self.pending.borrow_mut().pop_front().and_then(NonZeroU32::new)
    }

    fn complete(&self, hart: u64, irq: NonZeroU32) {
        self.completed.borrow_mut().push((hart, irq.get()));
    }
}

#[derive(Default)]
pub struct MockDevices {
    pub uart: Cell<usize>,
    pub virtio: Cell<usize>,
}

impl DeviceDrivers for MockDevices {
    fn uart_interrupt(&self) {
        self.uart.set(self.uart.get() + 1);
    }

    fn virtio_disk_interrupt(&self) {
        self.virtio.set(self.virtio.get() + 1);
    }
}

pub struct MockProcess {
    pub pid: u32,
    pub killed: bool,
    pub trap_frame: TrapFrame,
    pub kernel_stack: u64,
    pub page_table: PhysicalAddress,
    pub alarm: Alarm,
    pub faults: Vec<UserFault>,
}

impl MockProcess {
    pub fn new(pid: u32) -> Self {
        Self {
            pid,
            killed: false,
            trap_frame: TrapFrame::default(),
            kernel_stack: 0x3f_fffd_c000,
            page_table: PhysicalAddress::new(0x8765_4000),
            alarm: Alarm::new(),
            faults: Vec::new(),
        }
    }
}

impl Process for MockProcess {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn killed(&self) -> bool {
        self.killed
    }

    fn kill(&mut self) {
        self.killed = true;
    }

    fn trap_frame(&mut self) -> &mut TrapFrame {
        &mut self.trap_frame
    }

    fn kernel_stack(&self) -> u64 {
        self.kernel_stack
    }

    fn page_table_root(&self) -> PhysicalAddress {
        self.page_table
    }

    fn alarm(&mut self) -> &mut Alarm {
        &mut self.alarm
    }

    fn record_fault(&mut self, fault: UserFault) {
        self.faults.push(fault);
    }
}

/// Records each call's number; optionally kills the caller mid-call.
#[derive(Default)]
pub struct MockSyscalls {
    pub calls: RefCell<Vec<u64>>,
    pub kill_caller: Cell<bool>,
    pub result: Cell<u64>,
}

impl SyscallHandler<MockProcess> for MockSyscalls {
    fn syscall(&self, process: &mut MockProcess) {
        let number = process.trap_frame().syscall_number();
        self.calls.borrow_mut().push(number);
        if self.kill_caller.get() {
            process.kill();
        }
        process.trap_frame().set_return(self.result.get());
    }
}

pub fn ecall() -> Scause {
    Scause::exception_code(Scause::USER_ENV_CALL)
}

pub fn software_interrupt() -> Scause {
    Scause::interrupt_code(Scause::SUPERVISOR_SOFTWARE)
}

pub fn external_interrupt() -> Scause {
    Scause::interrupt_code(Scause::SUPERVISOR_EXTERNAL)
}

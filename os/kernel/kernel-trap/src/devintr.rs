//! Device and timer interrupt handling.

use core::num::NonZeroU32;

use kernel_info::devices::{UART0_IRQ, VIRTIO0_IRQ};
use kernel_registers::Scause;
use log::warn;

use crate::cause::TrapCause;
use crate::hart::Hart;
use crate::ticks::{TickCounter, Wakeup};

/// The hart that keeps time.
pub const PRIMARY_HART: u64 = 0;

/// Claim/complete interface of a PLIC-style interrupt controller.
pub trait InterruptController {
    /// Takes ownership of the highest-priority pending source for `hart`.
    fn claim(&self, hart: u64) -> Option<NonZeroU32>;

    /// Hands `irq` back so the controller delivers it again.
    fn complete(&self, hart: u64, irq: NonZeroU32);
}

/// Interrupt handlers of the devices the kernel drives.
pub trait DeviceDrivers {
    fn uart_interrupt(&self);
    fn virtio_disk_interrupt(&self);
}

/// A claimed interrupt source.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeviceIrq {
    Uart,
    VirtioDisk,
    Unknown(u32),
}

impl DeviceIrq {
    #[must_use]
    pub const fn from_id(id: u32) -> Self {
        match id {
            UART0_IRQ => Self::Uart,
            VIRTIO0_IRQ => Self::VirtioDisk,
            other => Self::Unknown(other),
        }
    }
}

/// Outcome of [`InterruptClassifier::classify`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum InterruptKind {
    /// Not an interrupt this kernel handles.
    Unrecognized = 0,
    /// A device interrupt, already serviced.
    Device = 1,
    /// A timer tick, already counted.
    Timer = 2,
}

impl InterruptKind {
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Recognizes and services device and timer interrupts.
pub struct InterruptClassifier<'a, C, D> {
    plic: C,
    devices: D,
    ticks: &'a TickCounter,
}

impl<'a, C, D> InterruptClassifier<'a, C, D>
where
    C: InterruptController,
    D: DeviceDrivers,
{
    pub const fn new(plic: C, devices: D, ticks: &'a TickCounter) -> Self {
        Self {
            plic,
            devices,
            ticks,
        }
    }

    pub const fn controller(&self) -> &C {
        &self.plic
    }

    pub const fn devices(&self) -> &D {
        &self.devices
    }

    pub const fn ticks(&self) -> &'a TickCounter {
        self.ticks
    }

    /// Handles the interrupt described by `scause` on `hart`.
    ///
    /// - External interrupts are claimed, passed to the owning driver and
    ///   completed.
    /// - Software interrupts (forwarded timer ticks) advance the tick counter
    ///   on [`PRIMARY_HART`] only and are acknowledged on every hart.
    /// - Everything else is left alone and reported as
    ///   [`InterruptKind::Unrecognized`].
    pub fn classify<H, W>(&self, scause: Scause, hart: &H, waker: &W) -> InterruptKind
    where
        H: Hart + ?Sized,
        W: Wakeup + ?Sized,
    {
        match TrapCause::from_scause(scause) {
            TrapCause::ExternalInterrupt => {
                self.service_external(hart.id());
                InterruptKind::Device
            }
            TrapCause::SoftwareInterrupt => {
                if hart.id() == PRIMARY_HART {
                    self.ticks.tick(waker);
                }
                hart.set_sip(hart.sip().with_ssip(false));
                InterruptKind::Timer
            }
            TrapCause::UserEnvCall | TrapCause::Unrecognized(_) => InterruptKind::Unrecognized,
        }
    }

    fn service_external(&self, hart: u64) {
        let Some(irq) = self.plic.claim(hart) else {
            return;
        };

        match DeviceIrq::from_id(irq.get()) {
            DeviceIrq::Uart => self.devices.uart_interrupt(),
            DeviceIrq::VirtioDisk => self.devices.virtio_disk_interrupt(),
            DeviceIrq::Unknown(id) => warn!("unexpected interrupt irq={id} on hart {hart}"),
        }

        // One in flight per source until completed.
        self.plic.complete(hart, irq);
    }
}

use kernel_alloc::{LayoutError, MemoryLayout};
use kernel_info::memory::PHYSTOP;
use kernel_memory_addresses::PhysicalAddress;
use kernel_qemu::QemuLogger;
use kernel_sync::SyncOnceCell;
use kernel_trap::{Hart, TrapVectors, trap_init_hart};
use log::{LevelFilter, debug, info, warn};

use crate::kmem::KMEM;

static LOGGER: SyncOnceCell<QemuLogger> = SyncOnceCell::new();

/// Everything [`init`] needs to know about the machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BootConfig {
    pub layout: MemoryLayout,
    pub log_level: LevelFilter,
}

impl BootConfig {
    /// The QEMU `virt` machine with RAM up to [`PHYSTOP`], given where the
    /// kernel image ends (the linker's `end` symbol).
    ///
    /// # Errors
    /// If no page of RAM is left above `kernel_end`.
    pub fn qemu_virt(kernel_end: PhysicalAddress) -> Result<Self, LayoutError> {
        Ok(Self {
            layout: MemoryLayout::new(kernel_end, PhysicalAddress::new(PHYSTOP))?,
            log_level: LevelFilter::Info,
        })
    }

    #[must_use]
    pub const fn with_log_level(self, log_level: LevelFilter) -> Self {
        Self { log_level, ..self }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootError {
    #[error("invalid memory layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("the kernel is already initialized")]
    AlreadyInitialized,
}

/// One-time machine setup on the boot hart: console logging, then the
/// physical page pool. Returns the number of free pages.
///
/// If some other `log` sink is already installed it keeps receiving the
/// kernel's records and the console logger stays unused; the page pool is
/// seeded either way.
///
/// # Errors
/// [`BootError::AlreadyInitialized`] if called again; nothing is touched in
/// that case.
pub fn init(config: BootConfig) -> Result<usize, BootError> {
    if LOGGER.set(QemuLogger::new(config.log_level)).is_err() {
        return Err(BootError::AlreadyInitialized);
    }
    let console = LOGGER.get().is_some_and(|logger| logger.init().is_ok());
    if !console {
        warn!("boot: a logger is already installed, console logging disabled");
    }

    info!(
        "boot: kernel ends at {}, RAM ends at {}",
        config.layout.kernel_end(),
        config.layout.phys_top()
    );

    #[cfg(target_arch = "riscv64")]
    kernel_trap::Plic.init();

    Ok(KMEM.init(config.layout))
}

/// Per-hart trap setup.
pub fn init_hart<H: Hart + ?Sized>(hart: &H, vectors: &TrapVectors) {
    trap_init_hart(hart, vectors);
    debug!("hart {}: kernel trap vector at {:#x}", hart.id(), vectors.kernel_vec);
}

/// Per-hart setup for the hart running this code: trap vector and PLIC
/// context.
#[cfg(target_arch = "riscv64")]
pub fn init_this_hart(vectors: &TrapVectors) {
    let hart = kernel_trap::CsrHart;
    kernel_trap::Plic.init_hart(hart.id());
    init_hart(&hart, vectors);
}

/// The interrupt classifier over the real PLIC and the global tick counter.
#[cfg(target_arch = "riscv64")]
pub fn interrupt_classifier<D>(
    devices: D,
) -> kernel_trap::InterruptClassifier<'static, kernel_trap::Plic, D>
where
    D: kernel_trap::DeviceDrivers,
{
    kernel_trap::InterruptClassifier::new(kernel_trap::Plic, devices, crate::kmem::ticks())
}

//! Supervisor interrupt masking (`sstatus.SIE`).
//!
//! On `riscv64` these functions touch the real CSR. On any other target
//! (host-side unit tests) there is no interrupt to mask and they compile to
//! no-ops that report interrupts as disabled.

/// Enables supervisor interrupts on this hart (`sstatus.SIE = 1`).
///
/// # Platform / Privilege
///
/// Requires S-mode. Only call where taking an interrupt is safe, i.e. no
/// [`IrqGuard`] or IRQ-masking spin lock is held on this hart.
#[inline]
pub fn enable() {
    #[cfg(target_arch = "riscv64")]
    unsafe {
        core::arch::asm!("csrsi sstatus, 2", options(nomem, nostack));
    }
}

/// Disables supervisor interrupts on this hart (`sstatus.SIE = 0`).
#[inline]
pub fn disable() {
    #[cfg(target_arch = "riscv64")]
    unsafe {
        core::arch::asm!("csrci sstatus, 2", options(nomem, nostack));
    }
}

/// Returns whether supervisor interrupts are currently enabled on this hart.
#[inline]
#[must_use]
pub fn enabled() -> bool {
    #[cfg(target_arch = "riscv64")]
    {
        use kernel_registers::{LoadRegisterUnsafe, Sstatus};
        unsafe { Sstatus::load_unsafe() }.sie()
    }
    #[cfg(not(target_arch = "riscv64"))]
    {
        false
    }
}

/// RAII guard that disables interrupts on creation and restores them on drop.
///
/// `IrqGuard::new()` snapshots `sstatus.SIE`. If interrupts were enabled, it
/// clears the bit. On drop, it sets the bit again **only** if it was set
/// before, so guards nest correctly: the outermost guard decides.
///
/// # Examples
///
/// ```no_run
/// use kernel_sync::irq::{self, IrqGuard};
///
/// {
///     let _g = IrqGuard::new(); // interrupts disabled here if previously enabled
///     assert!(!irq::enabled());
/// }
/// // SIE restored to prior state
/// ```
pub struct IrqGuard {
    /// Whether interrupts were enabled (SIE=1) when the guard was created.
    were_enabled: bool,
}

impl Default for IrqGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl IrqGuard {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        let were_enabled = enabled();
        disable();
        Self { were_enabled }
    }

    /// Whether this guard will re-enable interrupts when dropped.
    #[inline]
    #[must_use]
    pub const fn restores(&self) -> bool {
        self.were_enabled
    }
}

impl Drop for IrqGuard {
    fn drop(&mut self) {
        if self.were_enabled {
            enable();
        }
    }
}

//! Fatal-error path: report on the debug console, then park the hart.

use core::fmt::{self, Display, Write};

#[cfg(not(test))]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    kernel_sync::irq::disable();
    let _ = write_report(&mut Console, info);
    halt()
}

/// The line the panic handler prints before halting.
fn write_report(out: &mut impl Write, cause: impl Display) -> fmt::Result {
    writeln!(out, "panic: {cause}")?;
    out.write_str("halting hart\n")
}

#[cfg(not(test))]
struct Console;

#[cfg(not(test))]
impl Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        kernel_qemu::qemu_trace!("{s}");
        Ok(())
    }
}

/// Parks this hart for good. Interrupts must already be masked, so `wfi`
/// never returns into kernel code.
#[cfg(not(test))]
fn halt() -> ! {
    loop {
        #[cfg(target_arch = "riscv64")]
        // SAFETY: `wfi` only stalls the hart; it touches no memory.
        unsafe {
            core::arch::asm!("wfi", options(nomem, nostack));
        }
        #[cfg(not(target_arch = "riscv64"))]
        core::hint::spin_loop();
    }
}

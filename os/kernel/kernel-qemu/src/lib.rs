//! # QEMU Debug Console
//!
//! Early, allocation-free diagnostic output for the kernel running on the
//! QEMU `virt` machine.
//!
//! ```text
//! log::info!(…) ──► QemuLogger ──► qemu_trace! ──► QemuSink ──► UART0 THR
//! ```
//!
//! * [`qemu_trace!`] formats with `format_args!` and writes byte by byte to
//!   the 16550 UART at [`UART0`](kernel_info::devices::UART0), polling the
//!   line status register before each byte. It needs no interrupts, no locks
//!   and no initialized UART driver, so it works from the first instruction
//!   of Rust code and from inside panic and trap handlers.
//! * [`QemuLogger`] implements [`log::Log`] on top of it with a level filter.
//!
//! Off `riscv64` (host tests) the sink discards output. With the `enabled`
//! feature turned off, [`qemu_trace!`] compiles to nothing.
//!
//! Run QEMU with `-nographic` (or `-serial stdio`) to see the output.
//!
//! ```rust,no_run
//! use kernel_qemu::{QemuLogger, qemu_trace};
//! use log::LevelFilter;
//!
//! static LOGGER: QemuLogger = QemuLogger::new(LevelFilter::Info);
//!
//! LOGGER.init().expect("logger installed once");
//! log::info!("hart {} starting", 0);
//! qemu_trace!("raw: {:#x}\n", 0x8000_0000_u64);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod logger;

pub use logger::QemuLogger;

#[cfg(feature = "enabled")]
#[doc(hidden)]
pub mod qemu_fmt {
    use core::fmt::{self, Write};

    /// Transmit holding register.
    #[cfg(target_arch = "riscv64")]
    const THR: usize = 0;
    /// Line status register.
    #[cfg(target_arch = "riscv64")]
    const LSR: usize = 5;
    /// LSR: transmit holding register empty.
    #[cfg(target_arch = "riscv64")]
    const LSR_TX_IDLE: u8 = 1 << 5;

    /// Write a single byte to the console UART, waiting until it can take one.
    #[inline]
    pub fn dbg_putc(c: u8) {
        #[cfg(target_arch = "riscv64")]
        unsafe {
            let uart = kernel_info::devices::UART0 as *mut u8;
            while uart.add(LSR).read_volatile() & LSR_TX_IDLE == 0 {
                core::hint::spin_loop();
            }
            uart.add(THR).write_volatile(c);
        }
        #[cfg(not(target_arch = "riscv64"))]
        let _ = c;
    }

    pub struct QemuSink;

    impl Write for QemuSink {
        #[inline]
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for b in s.bytes() {
                dbg_putc(b);
            }
            Ok(())
        }
    }

    #[doc(hidden)]
    #[inline]
    pub fn qemu_write(args: fmt::Arguments) {
        // Best effort; there is nowhere to report a console failure.
        let _ = fmt::write(&mut QemuSink, args);
    }
}

#[cfg(not(feature = "enabled"))]
#[doc(hidden)]
pub mod qemu_fmt {
    use core::fmt;

    #[doc(hidden)]
    #[inline]
    pub fn qemu_write(_: fmt::Arguments) {}
}

/// `print!`-style output straight to the debug console.
#[macro_export]
macro_rules! qemu_trace {
    ($($arg:tt)*) => {{
        $crate::qemu_fmt::qemu_write(core::format_args!($($arg)*));
    }};
}

//! # Device Addresses and Interrupt Numbers

/// 16550-compatible UART used as the console.
pub const UART0: u64 = 0x1000_0000;

/// PLIC source id of the console UART.
pub const UART0_IRQ: u32 = 10;

/// `virtio-mmio` block device.
pub const VIRTIO0: u64 = 0x1000_1000;

/// PLIC source id of the virtio block device.
pub const VIRTIO0_IRQ: u32 = 1;

/// Platform-level interrupt controller.
pub const PLIC: u64 = 0x0c00_0000;

/// Supervisor-mode interrupt-enable bits for `hart`.
#[must_use]
pub const fn plic_senable(hart: u64) -> u64 {
    PLIC + 0x2080 + hart * 0x100
}

/// Supervisor-mode priority threshold for `hart`.
#[must_use]
pub const fn plic_spriority(hart: u64) -> u64 {
    PLIC + 0x20_1000 + hart * 0x2000
}

/// Supervisor-mode claim/complete register for `hart`.
#[must_use]
pub const fn plic_sclaim(hart: u64) -> u64 {
    PLIC + 0x20_1004 + hart * 0x2000
}

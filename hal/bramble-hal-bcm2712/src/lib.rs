//! BCM2712-specific HAL for Bramble
//!
//! This crate implements the `bramble-hal` traits for the Raspberry Pi 5:
//!
//! - Volatile MMIO bus (the only place `unsafe` is allowed)
//! - Peripheral memory map and register offsets
//! - 1 MHz system timer with a tear-free 64-bit counter read
//! - PL011 console UART (FIFO-gated blocking I/O)
//! - RP1 GPIO function select and LED helpers
//!
//! Every driver is generic over [`RegisterBus`], so the register-level
//! behavior is tested on the host against an in-memory bus.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gpio;
pub mod map;
pub mod mmio;
pub mod timer;
pub mod uart;

#[cfg(test)]
mod testutil;

// Re-export shared traits from bramble-hal for convenience
pub use bramble_hal::{FunctionSelect, GpioController, GpioError, Monotonic, RegisterBus, SerialRx, SerialTx};

pub use gpio::Rp1Gpio;
pub use map::Layout;
pub use mmio::Mmio;
pub use timer::SystemTimer;
pub use uart::Pl011;

/// All peripherals this HAL drives, sharing one bus
pub struct Peripherals<B> {
    pub timer: SystemTimer<B>,
    pub uart: Pl011<B>,
    pub gpio: Rp1Gpio<B>,
}

impl<B: RegisterBus + Copy> Peripherals<B> {
    /// Bind every driver to its base address in `layout`
    pub fn new(bus: B, layout: &Layout) -> Self {
        Self {
            timer: SystemTimer::new(bus, layout.timer_base),
            uart: Pl011::new(bus, layout.uart_base),
            gpio: Rp1Gpio::new(bus, layout.gpio_base),
        }
    }
}

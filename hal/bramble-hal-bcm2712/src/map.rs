//! Physical memory map of the peripherals Bramble drives
//!
//! Addresses are 40-bit physical addresses as seen by the Cortex-A76 cores
//! with the firmware's default (low peripheral) mapping.

// ============================================================================
// System Timer (BCM2712)
// ============================================================================

/// System timer base address
pub const SYSTIMER_BASE: usize = 0x10_7c00_3000;

/// Counter lower 32 bits
pub const SYSTIMER_CLO: usize = 0x04;

/// Counter upper 32 bits
pub const SYSTIMER_CHI: usize = 0x08;

// ============================================================================
// PL011 UART (console)
// ============================================================================

/// Console UART base address
pub const UART0_BASE: usize = 0x10_7d00_1000;

/// Data register
pub const UART_DR: usize = 0x00;

/// Flag register
pub const UART_FR: usize = 0x18;

/// Data register payload bits
pub const UART_DR_DATA_MASK: u32 = 0xFF;

/// FR: UART busy transmitting
pub const UART_FR_BUSY: u32 = 1 << 3;

/// FR: receive FIFO empty
pub const UART_FR_RXFE: u32 = 1 << 4;

/// FR: transmit FIFO full
pub const UART_FR_TXFF: u32 = 1 << 5;

// ============================================================================
// RP1 GPIO
// ============================================================================

/// RP1 GPIO controller base address
pub const GPIO_BASE: usize = 0x1f_000d_0000;

/// Per-pin status register
pub const GPIO_STATUS: usize = 0x0000;

/// Per-pin control register (bits 0-4 function select)
pub const GPIO_CTRL: usize = 0x0004;

/// Address distance between consecutive pins' register pairs
pub const GPIO_PIN_STRIDE: usize = 8;

/// Number of GPIOs on RP1
pub const GPIO_COUNT: u8 = 54;

/// Activity LED pin
pub const LED_ACTIVITY: u8 = 29;

/// Power LED pin
pub const LED_POWER: u8 = 31;

/// Base addresses of the peripherals on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    pub timer_base: usize,
    pub uart_base: usize,
    pub gpio_base: usize,
}

impl Layout {
    /// Raspberry Pi 5 default layout
    pub const BCM2712: Self = Self {
        timer_base: SYSTIMER_BASE,
        uart_base: UART0_BASE,
        gpio_base: GPIO_BASE,
    };
}

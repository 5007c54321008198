//! GPIO pin abstractions
//!
//! Provides the function-select value type and the [`GpioController`]
//! trait implemented by chip-specific pin controllers. LED and blink
//! helpers are built on top of the trait's required methods.

use crate::timer::Monotonic;

/// Mask of the function-select field in a pin control register
pub const FUNCSEL_MASK: u32 = 0x1F;

/// Half-period of [`GpioController::blink`] in milliseconds
pub const BLINK_HALF_PERIOD_MS: u32 = 100;

/// 5-bit pin function selector
///
/// Chooses which internal peripheral (or plain software control) drives
/// a pin. Construction masks the value to the low 5 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FunctionSelect(u8);

impl FunctionSelect {
    /// Pin attached to a UART
    pub const UART: Self = Self(2);

    /// Pin driven by software-controlled I/O
    pub const SIO: Self = Self(5);

    /// Create a selector from raw bits, discarding everything above bit 4
    pub const fn new(bits: u8) -> Self {
        Self(bits & FUNCSEL_MASK as u8)
    }

    /// Get the 5-bit code
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Replace the function-select field of a control register value
    ///
    /// Bits 5..=31 of `ctrl` are returned unchanged.
    pub const fn apply(self, ctrl: u32) -> u32 {
        (ctrl & !FUNCSEL_MASK) | self.0 as u32
    }
}

/// Errors from GPIO operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Pin number beyond the controller's addressable range
    InvalidPin,
    /// Level control is not available on this controller
    Unsupported,
}

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Per-pin GPIO controller
///
/// Implementations handle the register layout of a specific chip. Pins
/// are addressed by number; out-of-range numbers are rejected with
/// [`GpioError::InvalidPin`] rather than wrapped.
pub trait GpioController {
    /// Write the pin's function-select field, preserving all other bits
    fn set_function(&mut self, pin: u8, function: FunctionSelect) -> Result<(), GpioError>;

    /// Drive the pin's logic level
    fn set(&mut self, pin: u8, high: bool) -> Result<(), GpioError>;

    /// Read the pin's logic level
    fn get(&self, pin: u8) -> Result<bool, GpioError>;

    /// Raw per-pin status register
    fn status(&self, pin: u8) -> Result<u32, GpioError>;

    /// Configure the pin for output
    ///
    /// Currently identical to [`set_input`](GpioController::set_input):
    /// both select software-controlled I/O. Direction is not modeled.
    fn set_output(&mut self, pin: u8) -> Result<(), GpioError> {
        self.set_function(pin, FunctionSelect::SIO)
    }

    /// Configure the pin for input
    fn set_input(&mut self, pin: u8) -> Result<(), GpioError> {
        self.set_function(pin, FunctionSelect::SIO)
    }

    /// Configure the pin as output and drive it high
    fn led_on(&mut self, pin: u8) -> Result<(), GpioError> {
        self.set_output(pin)?;
        self.set(pin, true)
    }

    /// Configure the pin as output and drive it low
    fn led_off(&mut self, pin: u8) -> Result<(), GpioError> {
        self.set_output(pin)?;
        self.set(pin, false)
    }

    /// One on/off cycle: on, 100 ms, off, 100 ms
    ///
    /// Always blocks for the full cycle. Returns the first error seen.
    fn blink<M: Monotonic>(&mut self, pin: u8, clock: &M) -> Result<(), GpioError> {
        let on = self.led_on(pin);
        clock.delay_ms(BLINK_HALF_PERIOD_MS);
        let off = self.led_off(pin);
        clock.delay_ms(BLINK_HALF_PERIOD_MS);
        on.and(off)
    }
}

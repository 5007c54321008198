//! Bramble Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits shared by the chip
//! HAL (`bramble-hal-bcm2712`) and the board-agnostic console logic
//! (`bramble-core`). Everything above the register level talks to the
//! hardware through these traits, which keeps the console and self-tests
//! runnable on the host against test doubles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  bramble-firmware  /  bramble-core      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bramble-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bramble-hal-bcm2712 (registers)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`mmio::RegisterBus`] - Single 32-bit register transactions
//! - [`timer::Monotonic`] - Microsecond tick counter, delays, uptime
//! - [`uart::SerialTx`], [`uart::SerialRx`] - Blocking character I/O
//! - [`gpio::GpioController`] - Function select and pin level control

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gpio;
pub mod mmio;
pub mod timer;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{FunctionSelect, GpioController, GpioError};
pub use mmio::RegisterBus;
pub use timer::{Monotonic, Uptime};
pub use uart::{SerialRx, SerialTx};

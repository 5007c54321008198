//! Board-agnostic logic on top of the Bramble HAL traits
//!
//! This crate contains everything above the register level that does not
//! depend on a specific chip:
//!
//! - Line console (editing, command parsing, dispatch)
//! - Hardware self-tests
//!
//! It only sees the hardware through `bramble-hal` traits, so all of it
//! runs on the host against test doubles.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod console;
pub mod selftest;

#[cfg(test)]
mod testutil;

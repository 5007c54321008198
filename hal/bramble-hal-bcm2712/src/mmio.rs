//! Memory-Mapped I/O (MMIO) Operations
//!
//! Volatile register access at physical addresses. All BCM2712 and RP1
//! peripheral traffic goes through [`Mmio`].

#![allow(unsafe_code)]

use core::hint::spin_loop;
use core::ptr::{read_volatile, write_volatile};

use bramble_hal::RegisterBus;

/// Volatile bus over the physical address space
///
/// Zero-sized and `Copy`: every driver holds its own handle. Each access is
/// a single `ldr`/`str` that the compiler may neither cache, merge, elide
/// nor reorder with respect to other volatile accesses.
#[derive(Debug, Clone, Copy)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Create the bus handle
    ///
    /// # Safety
    /// The caller must ensure every address later passed to this bus is a
    /// mapped device register (Device-nGnRE or stronger, never cacheable),
    /// and that nothing else concurrently drives the same registers.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterBus for Mmio {
    #[inline(always)]
    fn read32(&self, addr: usize) -> u32 {
        // SAFETY: address validity is the contract of `Mmio::new`
        unsafe { read_volatile(addr as *const u32) }
    }

    #[inline(always)]
    fn write32(&self, addr: usize, value: u32) {
        // SAFETY: address validity is the contract of `Mmio::new`
        unsafe { write_volatile(addr as *mut u32, value) }
    }
}

/// Spin while any bit of `mask` is set in the register at `addr`
///
/// Re-reads the register on every iteration. Unbounded: if the hardware
/// never clears the bits, this never returns.
#[inline]
pub fn wait_while_set<B: RegisterBus>(bus: &B, addr: usize, mask: u32) {
    while bus.read32(addr) & mask != 0 {
        spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeBus;

    #[test]
    fn test_wait_returns_once_bit_clears() {
        let bus = FakeBus::new();
        bus.script(0x18, &[0x20, 0x20, 0x20, 0x00]);

        wait_while_set(&bus, 0x18, 0x20);
        assert_eq!(bus.read_count(0x18), 4);
    }

    #[test]
    fn test_wait_ignores_other_bits() {
        let bus = FakeBus::new();
        bus.set(0x18, 0xFFFF_FFDF);

        wait_while_set(&bus, 0x18, 0x20);
        assert_eq!(bus.read_count(0x18), 1);
    }

    #[test]
    fn test_volatile_round_trip_on_ram() {
        // Plain memory behaves as a register that holds its value
        let mut cell: u32 = 0;
        let addr = &mut cell as *mut u32 as usize;
        let bus = unsafe { Mmio::new() };

        bus.write32(addr, 0xCAFE_F00D);
        assert_eq!(bus.read32(addr), 0xCAFE_F00D);
        bus.modify32(addr, |v| v & 0xFFFF);
        assert_eq!(bus.read32(addr), 0xF00D);
    }
}

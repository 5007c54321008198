//! System Timer Driver
//!
//! The BCM2712 has a free-running 64-bit counter that increments at 1 MHz
//! from power-on. It is exposed as two 32-bit registers, so software must
//! read it as two separate transactions.

use bramble_hal::Monotonic;
use bramble_hal::RegisterBus;

use crate::map::{SYSTIMER_CHI, SYSTIMER_CLO};

/// BCM2712 system timer
pub struct SystemTimer<B> {
    bus: B,
    base: usize,
}

impl<B: RegisterBus> SystemTimer<B> {
    /// Bind the timer at `base`
    pub const fn new(bus: B, base: usize) -> Self {
        Self { bus, base }
    }

    /// No-op: the counter free-runs from power-on
    pub fn init(&mut self) {}

    /// Lower 32 bits of the counter
    ///
    /// Wraps every ~71.5 minutes.
    #[inline]
    pub fn ticks_low(&self) -> u32 {
        self.bus.read32(self.base + SYSTIMER_CLO)
    }

    #[inline]
    fn ticks_high(&self) -> u32 {
        self.bus.read32(self.base + SYSTIMER_CHI)
    }

    /// Full 64-bit counter value
    ///
    /// Reads CHI, CLO, CHI. If the two high reads disagree, CLO wrapped
    /// in between and the low value may belong to either epoch, so the
    /// whole sequence is retried.
    ///
    /// Never logs, so it is safe to call from a defmt timestamp while the
    /// logger is held.
    pub fn counter(&self) -> u64 {
        loop {
            let hi1 = self.ticks_high();
            let lo = self.ticks_low();
            let hi2 = self.ticks_high();

            if hi1 == hi2 {
                return (u64::from(hi1) << 32) | u64::from(lo);
            }
        }
    }
}

impl<B: RegisterBus> Monotonic for SystemTimer<B> {
    fn ticks(&self) -> u64 {
        self.counter()
    }
}

impl<B: RegisterBus> embedded_hal::delay::DelayNs for SystemTimer<B> {
    fn delay_ns(&mut self, ns: u32) {
        // Counter resolution is 1 us, round up
        self.delay_ticks(u64::from(ns.div_ceil(1_000)));
    }

    fn delay_us(&mut self, us: u32) {
        <Self as Monotonic>::delay_us(self, us);
    }

    fn delay_ms(&mut self, ms: u32) {
        <Self as Monotonic>::delay_ms(self, ms);
    }
}

//! Monotonic time abstractions
//!
//! A [`Monotonic`] source counts microseconds since power-on. Delays are
//! pure busy-waits over that counter: no sleep, no yield, no upper bound.

use core::hint::spin_loop;

/// Counter frequency in Hz (one tick per microsecond)
pub const TICKS_PER_SECOND: u64 = 1_000_000;

/// Ticks per millisecond
pub const TICKS_PER_MILLI: u64 = 1_000;

/// Uptime broken down into hours, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Uptime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Uptime {
    /// Split a whole number of seconds
    pub const fn from_seconds(total: u32) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

/// Free-running microsecond counter
///
/// Implementors only provide [`ticks`](Monotonic::ticks); the delay and
/// uptime helpers are derived from it. If the underlying counter stalls,
/// every delay spins forever.
pub trait Monotonic {
    /// Microseconds elapsed since power-on
    ///
    /// Must be monotonically non-decreasing across calls.
    fn ticks(&self) -> u64;

    /// Spin until `ticks` microseconds have elapsed
    fn delay_ticks(&self, ticks: u64) {
        let target = self.ticks().saturating_add(ticks);
        while self.ticks() < target {
            spin_loop();
        }
    }

    /// Spin for at least `us` microseconds
    fn delay_us(&self, us: u32) {
        self.delay_ticks(u64::from(us));
    }

    /// Spin for at least `ms` milliseconds
    ///
    /// The conversion to microseconds is done in 64 bits, so every `u32`
    /// input is valid.
    fn delay_ms(&self, ms: u32) {
        self.delay_ticks(u64::from(ms) * TICKS_PER_MILLI);
    }

    /// Whole seconds since power-on, truncated
    fn uptime_seconds(&self) -> u32 {
        (self.ticks() / TICKS_PER_SECOND) as u32
    }

    /// Uptime as hours, minutes and seconds
    fn uptime(&self) -> Uptime {
        Uptime::from_seconds(self.uptime_seconds())
    }
}

impl<M: Monotonic + ?Sized> Monotonic for &M {
    fn ticks(&self) -> u64 {
        (**self).ticks()
    }
}

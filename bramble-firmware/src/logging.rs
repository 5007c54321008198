//! Logging support
//!
//! defmt frames go to an RTT buffer in RAM, read out over the debug probe,
//! so the console UART stays plain text. defmt-rtt needs a critical
//! section; with a single running core and no interrupt handlers, masking
//! DAIF is enough.

use core::arch::asm;

use bramble_hal_bcm2712::{Mmio, SystemTimer};
use critical_section::RawRestoreState;

use crate::board;

struct DaifCriticalSection;
critical_section::set_impl!(DaifCriticalSection);

// SAFETY: only the boot core runs, so masking its exceptions excludes
// every other execution context
unsafe impl critical_section::Impl for DaifCriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        let daif: u64;
        asm!("mrs {}, daif", "msr daifset, #0xf", out(reg) daif, options(nostack));
        daif
    }

    unsafe fn release(daif: RawRestoreState) {
        asm!("msr daif, {}", in(reg) daif, options(nostack));
    }
}

/// Microseconds since power-on, for log timestamps
///
/// defmt calls this with the logger already acquired, so it goes through
/// the non-logging counter read.
fn uptime_us() -> u64 {
    // SAFETY: the timer base comes from the validated board layout and
    // the timer is read-only
    let timer = SystemTimer::new(unsafe { Mmio::new() }, board::LAYOUT.timer_base);
    timer.counter()
}

defmt::timestamp!("{=u64:us}", uptime_us());

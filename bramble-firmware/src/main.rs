//! Bramble - Raspberry Pi 5 bare-metal image
//!
//! Brings up the console UART, system timer and RP1 GPIO, runs the
//! hardware self-tests once, then hands the serial port to the line
//! console forever.

#![no_std]
#![no_main]

use core::fmt::Write;

use defmt::{error, info, warn};
use defmt_rtt as _;

use bramble_core::console::Console;
use bramble_core::selftest;
use bramble_hal::SerialTx;
use bramble_hal_bcm2712::map::LED_ACTIVITY;
use bramble_hal_bcm2712::{Layout, Mmio, Peripherals, Pl011};

mod boot;
mod logging;

/// Board constants generated from board.toml
mod board {
    use bramble_hal_bcm2712::Layout;

    include!(concat!(env!("OUT_DIR"), "/board.rs"));
}

/// Main entry point (called from boot.rs)
#[no_mangle]
pub extern "C" fn kernel_main() -> ! {
    // SAFETY: every driver below is bound to an address from the
    // validated board layout, the MMU is off (all accesses are Device
    // memory) and this is the only core running
    let bus = unsafe { Mmio::new() };
    let Peripherals {
        mut timer,
        mut uart,
        mut gpio,
    } = Peripherals::new(bus, &board::LAYOUT);

    uart.init();
    info!("Bramble starting on {=str}", board::NAME);
    if board::LAYOUT != Layout::BCM2712 {
        warn!("board.toml overrides the BCM2712 memory map: {}", board::LAYOUT);
    }

    uart.put_str("\n\n");
    uart.put_str("========================================\n");
    uart.put_str("   ");
    uart.put_str(board::TITLE);
    uart.put_str("\n");
    uart.put_str("   BCM2712 - ARM Cortex-A76\n");
    uart.put_str("========================================\n");
    uart.put_str("\n");

    uart.put_str("Initializing hardware...\n");
    timer.init();
    uart.put_str("  Timer: OK\n");

    let status = gpio.init();
    info!("GPIO0 status {=u32:#010x}", status);
    uart.put_str("  GPIO: OK\n");

    uart.put_str("Hardware initialization complete!\n");

    match gpio.function(LED_ACTIVITY) {
        Ok(function) => info!("activity LED function {=u8}", function.bits()),
        Err(e) => warn!("activity LED: {}", e),
    }
    if let Err(e) = gpio.blink_activity_led(&timer) {
        warn!("activity LED: {}", e);
    }

    let report = selftest::run_hardware_tests(&mut uart, &timer, &gpio);
    if report.passed() {
        info!("self-test passed: {}", report);
    } else {
        warn!("self-test failed: {}", report);
    }

    let mut console = Console::new(uart, timer, gpio, board::PROMPT);
    console.banner(board::SHELL_TITLE);
    console.run()
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    // SAFETY: the console UART address is part of the board layout; the
    // panicking context owns the core, nothing else will write to it
    let mut uart = Pl011::new(unsafe { Mmio::new() }, board::LAYOUT.uart_base);
    let _ = write!(uart, "\n*** PANIC: {}\n", info);

    if let Some(location) = info.location() {
        error!(
            "panic at {=str}:{=u32}",
            location.file(),
            location.line()
        );
    } else {
        error!("panic");
    }

    boot::halt()
}

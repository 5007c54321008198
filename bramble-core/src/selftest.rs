//! Hardware self-tests
//!
//! Exercises each peripheral once and reports over the serial console.
//! Run at boot and from the `test` console command.
//!
//! The GPIO test samples a pin status register through [`GpioController`],
//! which on the Pi 5 is the RP1 bank (pin 0 status at RP1 base + 0). It does
//! not read the SoC-side BCM2712 GPIO block at `0x10_7d20_0000`: that block
//! drives no header pins on this board and has no driver here.

use core::hint::black_box;

use bramble_hal::{GpioController, Monotonic, SerialTx};

/// Bytes summed by the memory test
pub const MEMORY_TEST_LEN: usize = 256;

/// Expected memory test checksum (0 + 1 + ... + 255)
pub const MEMORY_TEST_CHECKSUM: u32 = 0x7F80;

/// Number of timer test ticks
pub const TIMER_TEST_STEPS: u8 = 5;

/// Delay between timer test ticks in milliseconds
pub const TIMER_TEST_STEP_MS: u32 = 200;

/// Pin whose status register is sampled by the GPIO test (RP1 GPIO0)
pub const GPIO_TEST_PIN: u8 = 0;

/// Values gathered while running the tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report {
    pub checksum: u32,
    pub gpio_status: Option<u32>,
}

impl Report {
    /// Every test produced its expected result
    pub fn passed(&self) -> bool {
        self.checksum == MEMORY_TEST_CHECKSUM && self.gpio_status.is_some()
    }
}

/// Fill a stack buffer with `i % 256` and sum it back
pub fn memory_checksum() -> u32 {
    let mut buf = [0u8; MEMORY_TEST_LEN];
    for (i, b) in buf.iter_mut().enumerate() {
        *b = (i % 256) as u8;
    }
    // Force the buffer through memory instead of folding the sum
    let buf = black_box(buf);
    buf.iter().map(|&b| u32::from(b)).sum()
}

fn test_memory<S: SerialTx>(serial: &mut S) -> u32 {
    serial.put_str("  Memory Test: ");
    let checksum = memory_checksum();
    serial.put_str("checksum=");
    serial.put_hex(checksum);
    if checksum == MEMORY_TEST_CHECKSUM {
        serial.put_str(" OK\n");
    } else {
        serial.put_str(" FAIL\n");
    }
    checksum
}

fn test_timer<S: SerialTx, M: Monotonic>(serial: &mut S, clock: &M) {
    serial.put_str("  Timer Test: ");
    for i in 1..=TIMER_TEST_STEPS {
        clock.delay_ms(TIMER_TEST_STEP_MS);
        serial.put_char(b'0' + i);
        serial.put_char(b' ');
    }
    serial.put_str("OK\n");
}

fn test_gpio<S: SerialTx, G: GpioController>(serial: &mut S, gpio: &G) -> Option<u32> {
    serial.put_str("  GPIO Test: ");
    match gpio.status(GPIO_TEST_PIN) {
        Ok(status) => {
            serial.put_str("status=");
            serial.put_hex(status);
            serial.put_str(" OK\n");
            Some(status)
        }
        Err(_) => {
            serial.put_str("status unavailable FAIL\n");
            None
        }
    }
}

/// Run all four tests, printing progress to `serial`
///
/// Blocks for about one second (the timer test).
pub fn run_hardware_tests<S, M, G>(serial: &mut S, clock: &M, gpio: &G) -> Report
where
    S: SerialTx,
    M: Monotonic,
    G: GpioController,
{
    serial.put_str("\n=== PI5 HARDWARE TESTS ===\n");

    serial.put_str("1. UART Test:\n");
    serial.put_str("  Character output: Hello Pi5!\n");

    serial.put_str("2. Memory Test:\n");
    let checksum = test_memory(serial);

    serial.put_str("3. Timer Test:\n");
    test_timer(serial, clock);

    serial.put_str("4. GPIO Test:\n");
    let gpio_status = test_gpio(serial, gpio);

    serial.put_str("=== ALL TESTS COMPLETE ===\n\n");

    Report {
        checksum,
        gpio_status,
    }
}

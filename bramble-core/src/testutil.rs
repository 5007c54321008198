//! Test doubles for the HAL traits

use core::cell::Cell;

use bramble_hal::{FunctionSelect, GpioController, GpioError, Monotonic, SerialRx, SerialTx};
use heapless::{Deque, Vec};

/// Serial port with a scripted receive queue and a captured transmit log
pub struct MockSerial {
    rx: Deque<u8, 256>,
    tx: Vec<u8, 4096>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self {
            rx: Deque::new(),
            tx: Vec::new(),
        }
    }

    /// Queue bytes for `get_char`
    pub fn feed(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.rx.push_back(b).unwrap();
        }
    }

    /// Everything transmitted so far, as text
    pub fn output(&self) -> &str {
        core::str::from_utf8(&self.tx).unwrap()
    }

    pub fn clear_output(&mut self) {
        self.tx.clear();
    }
}

impl SerialTx for MockSerial {
    fn write_byte(&mut self, byte: u8) {
        self.tx.push(byte).unwrap();
    }
}

impl SerialRx for MockSerial {
    fn get_char(&mut self) -> u8 {
        // A real port would spin forever here
        self.rx.pop_front().expect("receive queue exhausted")
    }
}

/// Clock that advances by a fixed step on every read
pub struct StepClock {
    now: Cell<u64>,
    step: u64,
}

impl StepClock {
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            now: Cell::new(start),
            step,
        }
    }

    pub fn peek(&self) -> u64 {
        self.now.get()
    }
}

impl Monotonic for StepClock {
    fn ticks(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

/// GPIO controller that only knows a fixed status word
pub struct MockGpio {
    pub status: u32,
}

impl GpioController for MockGpio {
    fn set_function(&mut self, _pin: u8, _function: FunctionSelect) -> Result<(), GpioError> {
        Ok(())
    }

    fn set(&mut self, _pin: u8, _high: bool) -> Result<(), GpioError> {
        Err(GpioError::Unsupported)
    }

    fn get(&self, _pin: u8) -> Result<bool, GpioError> {
        Err(GpioError::Unsupported)
    }

    fn status(&self, pin: u8) -> Result<u32, GpioError> {
        if pin == 0 {
            Ok(self.status)
        } else {
            Err(GpioError::InvalidPin)
        }
    }
}

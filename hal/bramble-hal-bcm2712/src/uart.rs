//! PL011 console UART
//!
//! The firmware leaves UART0 configured (115200 8N1) before handing over,
//! so this driver never touches the baud, line control or control
//! registers. It only polls the flag register and moves bytes through
//! the data register.

use core::convert::Infallible;
use core::hint::spin_loop;

use bramble_hal::{RegisterBus, SerialRx, SerialTx};

use crate::map::{UART_DR, UART_DR_DATA_MASK, UART_FR, UART_FR_BUSY, UART_FR_RXFE, UART_FR_TXFF};
use crate::mmio::wait_while_set;

/// PL011 UART
pub struct Pl011<B> {
    bus: B,
    base: usize,
}

impl<B: RegisterBus> Pl011<B> {
    /// Bind the UART at `base`
    pub const fn new(bus: B, base: usize) -> Self {
        Self { bus, base }
    }

    /// No-op: the UART is configured by firmware before we run
    ///
    /// This is an environmental precondition, not something checked here.
    pub fn init(&mut self) {}

    /// Raw flag register
    #[inline]
    pub fn flags(&self) -> u32 {
        self.bus.read32(self.base + UART_FR)
    }

    /// Transmit FIFO full
    pub fn is_tx_full(&self) -> bool {
        self.flags() & UART_FR_TXFF != 0
    }

    /// Receive FIFO empty
    pub fn is_rx_empty(&self) -> bool {
        self.flags() & UART_FR_RXFE != 0
    }

    /// Spin until the transmitter has shifted out every queued byte
    pub fn flush(&mut self) {
        wait_while_set(&self.bus, self.base + UART_FR, UART_FR_BUSY);
    }
}

impl<B: RegisterBus> SerialTx for Pl011<B> {
    fn write_byte(&mut self, byte: u8) {
        while self.is_tx_full() {
            spin_loop();
        }
        self.bus.write32(self.base + UART_DR, u32::from(byte));
    }
}

impl<B: RegisterBus> SerialRx for Pl011<B> {
    fn get_char(&mut self) -> u8 {
        while self.is_rx_empty() {
            spin_loop();
        }
        (self.bus.read32(self.base + UART_DR) & UART_DR_DATA_MASK) as u8
    }
}

impl<B: RegisterBus> core::fmt::Write for Pl011<B> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.put_str(s);
        Ok(())
    }
}

impl<B> embedded_io::ErrorType for Pl011<B> {
    type Error = Infallible;
}

impl<B: RegisterBus> embedded_io::Write for Pl011<B> {
    /// Raw bytes, no newline translation
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for &b in buf {
            self.write_byte(b);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Pl011::flush(self);
        Ok(())
    }
}

impl<B: RegisterBus> embedded_io::Read for Pl011<B> {
    /// Blocks for the first byte, then drains whatever is already queued
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let Some((first, rest)) = buf.split_first_mut() else {
            return Ok(0);
        };

        *first = self.get_char();
        let mut n = 1;
        for slot in rest {
            if self.is_rx_empty() {
                break;
            }
            *slot = self.get_char();
            n += 1;
        }
        Ok(n)
    }
}

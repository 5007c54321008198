//! Serial communication abstractions
//!
//! Blocking, unbuffered character I/O. Implementations gate every data
//! register access on the peripheral's FIFO status and spin without a
//! timeout until the hardware is ready.

/// Uppercase hexadecimal digits, indexed by nibble value
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Length of a formatted [`hex_u32`] value (`"0x"` plus 8 digits)
pub const HEX_U32_LEN: usize = 10;

/// Format `value` as `0x` followed by exactly 8 uppercase hex digits
///
/// Most-significant nibble first, zero padded.
pub fn hex_u32(value: u32) -> [u8; HEX_U32_LEN] {
    let mut out = [0u8; HEX_U32_LEN];
    out[0] = b'0';
    out[1] = b'x';
    for (i, slot) in out[2..].iter_mut().enumerate() {
        let shift = (7 - i) * 4;
        let nibble = (value >> shift) & 0xF;
        *slot = HEX_DIGITS[nibble as usize];
    }
    out
}

/// Serial transmitter
pub trait SerialTx {
    /// Write one raw byte once the transmit FIFO has room
    ///
    /// Blocks until the hardware accepts the byte. No newline translation.
    fn write_byte(&mut self, byte: u8);

    /// Write one character, translating `\n` to `\r\n`
    ///
    /// The carriage return is a complete, separately gated write issued
    /// before the line feed is queued.
    fn put_char(&mut self, c: u8) {
        if c == b'\n' {
            self.put_char(b'\r');
        }
        self.write_byte(c);
    }

    /// Write every byte of `s` through [`put_char`](SerialTx::put_char)
    fn put_str(&mut self, s: &str) {
        for b in s.bytes() {
            self.put_char(b);
        }
    }

    /// Write a fixed-width `0xXXXXXXXX` debug value
    fn put_hex(&mut self, value: u32) {
        for b in hex_u32(value) {
            self.put_char(b);
        }
    }
}

/// Serial receiver
pub trait SerialRx {
    /// Block until a byte is available and return it
    fn get_char(&mut self) -> u8;
}

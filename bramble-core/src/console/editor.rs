//! Line editor
//!
//! Accumulates received bytes into a line, echoing as it goes. Bytes are
//! stored as received; nothing assumes the terminal sends ASCII or UTF-8.

use bramble_hal::SerialTx;
use heapless::Vec;

/// Longest line the editor will hold
pub const MAX_LINE_LEN: usize = 127;

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

/// Result of feeding one byte to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edit {
    /// Line still being typed
    Pending,
    /// Enter pressed, line is ready
    Complete,
}

/// Single-line input buffer with echo and backspace handling
#[derive(Debug, Default)]
pub struct LineEditor {
    line: Vec<u8, { MAX_LINE_LEN + 1 }>,
}

impl LineEditor {
    pub const fn new() -> Self {
        Self { line: Vec::new() }
    }

    /// Bytes typed so far
    pub fn line(&self) -> &[u8] {
        &self.line
    }

    /// Discard the current line
    pub fn clear(&mut self) {
        self.line.clear();
    }

    /// Process one received byte, echoing to `echo`
    ///
    /// - `\r` or `\n` completes the line and echoes a newline
    /// - DEL or BS erases the last character (`"\b \b"`), if any
    /// - any other byte is appended and echoed while there is room; once
    ///   the line is full it is dropped without echo
    pub fn feed<T: SerialTx>(&mut self, byte: u8, echo: &mut T) -> Edit {
        match byte {
            b'\r' | b'\n' => {
                echo.put_str("\n");
                Edit::Complete
            }
            DELETE | BACKSPACE => {
                if self.line.pop().is_some() {
                    echo.put_str("\x08 \x08");
                }
                Edit::Pending
            }
            b if self.line.len() < MAX_LINE_LEN => {
                // Cannot fail: length checked against capacity above
                let _ = self.line.push(b);
                echo.put_char(b);
                Edit::Pending
            }
            _ => Edit::Pending,
        }
    }
}

//! Interactive line console
//!
//! A minimal shell over the serial port: read a line with echo and
//! editing, parse it as a [`Command`], print the response, repeat.

pub mod command;
pub mod editor;

pub use command::{Command, HELP};
pub use editor::{Edit, LineEditor, MAX_LINE_LEN};

use bramble_hal::{GpioController, Monotonic, SerialRx, SerialTx};

use crate::selftest;

/// ANSI sequence: erase display, cursor home
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Console bound to a serial port, a clock and a GPIO controller
pub struct Console<S, M, G> {
    serial: S,
    clock: M,
    gpio: G,
    prompt: &'static str,
    editor: LineEditor,
}

impl<S, M, G> Console<S, M, G>
where
    S: SerialTx + SerialRx,
    M: Monotonic,
    G: GpioController,
{
    pub fn new(serial: S, clock: M, gpio: G, prompt: &'static str) -> Self {
        Self {
            serial,
            clock,
            gpio,
            prompt,
            editor: LineEditor::new(),
        }
    }

    /// Print the greeting shown once before the first prompt
    pub fn banner(&mut self, title: &str) {
        self.serial.put_str("\n");
        self.serial.put_str("========================================\n");
        self.serial.put_str("   ");
        self.serial.put_str(title);
        self.serial.put_str("\n");
        self.serial.put_str("========================================\n");
        self.serial.put_str("\n");
        self.serial.put_str("Type 'help' for available commands\n\n");
    }

    /// Block until a full line has been typed
    pub fn read_line(&mut self) -> &[u8] {
        self.editor.clear();
        loop {
            let byte = self.serial.get_char();
            if self.editor.feed(byte, &mut self.serial) == Edit::Complete {
                return self.editor.line();
            }
        }
    }

    /// Prompt, read one line and run it
    pub fn step(&mut self) {
        self.serial.put_str(self.prompt);
        self.read_line();

        // Copy out so the editor buffer is free while the command runs
        let line = self.editor.line();
        let mut owned: heapless::Vec<u8, { MAX_LINE_LEN + 1 }> = heapless::Vec::new();
        // Same capacity as the editor, cannot fail
        let _ = owned.extend_from_slice(line);

        self.execute(Command::parse(&owned));
    }

    /// Run the console forever
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Print the response to one command
    pub fn execute(&mut self, command: Command<'_>) {
        #[cfg(feature = "defmt")]
        defmt::debug!("console: {}", command);

        match command {
            Command::Empty => {}
            Command::Help => self.help(),
            Command::Uptime => self.uptime(),
            Command::Test => {
                let report = selftest::run_hardware_tests(&mut self.serial, &self.clock, &self.gpio);
                if !report.passed() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("self-test failed: {}", report);
                }
            }
            Command::Clear => self.serial.put_str(CLEAR_SCREEN),
            Command::Reboot => self
                .serial
                .put_str("Reboot not implemented. Please reset manually.\n"),
            Command::Unknown(line) => {
                for &b in line {
                    self.serial.put_char(b);
                }
                self.serial.put_str(": command not found\n");
            }
        }
    }

    fn help(&mut self) {
        self.serial.put_str("Available commands:\n");
        for (name, description) in HELP {
            self.serial.put_str("  ");
            self.serial.put_str(name);
            for _ in name.len()..8 {
                self.serial.put_char(b' ');
            }
            self.serial.put_str("- ");
            self.serial.put_str(description);
            self.serial.put_str("\n");
        }
    }

    fn uptime(&mut self) {
        let uptime = self.clock.uptime();
        self.serial.put_str("System uptime: ");
        self.serial.put_hex(uptime.hours);
        self.serial.put_str("h ");
        self.serial.put_hex(uptime.minutes);
        self.serial.put_str("m ");
        self.serial.put_hex(uptime.seconds);
        self.serial.put_str("s\n");
    }

    /// Give back the owned peripherals
    pub fn release(self) -> (S, M, G) {
        (self.serial, self.clock, self.gpio)
    }
}

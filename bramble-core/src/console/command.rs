//! Console commands

/// A parsed console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Nothing typed
    Empty,
    /// List commands
    Help,
    /// Print time since power-on
    Uptime,
    /// Run the hardware self-tests
    Test,
    /// Clear the terminal
    Clear,
    /// Restart (not available, prints a notice)
    Reboot,
    /// Anything else, as typed
    Unknown(&'a [u8]),
}

impl<'a> Command<'a> {
    /// Parse a line; names must match exactly, with no surrounding spaces
    pub fn parse(line: &'a [u8]) -> Self {
        match line {
            b"" => Command::Empty,
            b"help" => Command::Help,
            b"uptime" => Command::Uptime,
            b"test" => Command::Test,
            b"clear" => Command::Clear,
            b"reboot" => Command::Reboot,
            other => Command::Unknown(other),
        }
    }
}

/// Help table: command name and one-line description
pub const HELP: &[(&str, &str)] = &[
    ("help", "Show this help"),
    ("uptime", "Show system uptime"),
    ("test", "Run hardware tests"),
    ("clear", "Clear screen"),
    ("reboot", "Restart system"),
];

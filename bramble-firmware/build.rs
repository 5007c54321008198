//! Build script for bramble-firmware
//!
//! - Sets up linker search paths for link.x
//! - Validates board.toml and turns it into Rust constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Highest physical address bit on BCM2712
const PHYS_ADDR_BITS: u32 = 40;

/// Longest accepted console prompt
const MAX_PROMPT_LEN: usize = 32;

#[derive(Debug, Deserialize)]
struct BoardFile {
    board: BoardSection,
    peripherals: PeripheralSection,
    console: ConsoleSection,
}

#[derive(Debug, Deserialize)]
struct BoardSection {
    name: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct PeripheralSection {
    timer_base: u64,
    uart_base: u64,
    gpio_base: u64,
}

#[derive(Debug, Deserialize)]
struct ConsoleSection {
    title: String,
    prompt: String,
}

fn main() {
    setup_linker();
    let board = load_board();
    validate_board(&board);
    generate_board(&board);
}

/// Set up linker search paths for link.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy link.x to the output directory
    let link_x = include_bytes!("link.x");
    let mut f = File::create(out_dir.join("link.x")).unwrap();
    f.write_all(link_x).unwrap();

    // Tell rustc where to find link.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if link.x changes
    println!("cargo:rerun-if-changed=link.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse board.toml
fn load_board() -> BoardFile {
    println!("cargo:rerun-if-changed=board.toml");

    let path = Path::new("board.toml");
    if !path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml describing the memory map.   ║\n\
            ║  Please create one in the bramble-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&content) {
        Ok(board) => board,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid board.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check addresses and console settings
fn validate_board(board: &BoardFile) {
    let mut errors = Vec::new();

    let bases = [
        ("timer_base", board.peripherals.timer_base),
        ("uart_base", board.peripherals.uart_base),
        ("gpio_base", board.peripherals.gpio_base),
    ];

    for (name, addr) in bases {
        if addr == 0 {
            errors.push(format!("[peripherals] {} must be non-zero", name));
        }
        if addr % 4 != 0 {
            errors.push(format!("[peripherals] {} must be 4-byte aligned", name));
        }
        if addr >> PHYS_ADDR_BITS != 0 {
            errors.push(format!("[peripherals] {} exceeds {}-bit space", name, PHYS_ADDR_BITS));
        }
    }

    for (i, (a_name, a)) in bases.iter().enumerate() {
        for (b_name, b) in &bases[i + 1..] {
            if a == b {
                errors.push(format!("[peripherals] {} and {} overlap", a_name, b_name));
            }
        }
    }

    let prompt = &board.console.prompt;
    if prompt.is_empty() || prompt.len() > MAX_PROMPT_LEN {
        errors.push(format!("[console] prompt must be 1-{} characters", MAX_PROMPT_LEN));
    }
    if !prompt.is_ascii() || !board.board.title.is_ascii() || !board.console.title.is_ascii() {
        errors.push("[console] prompt, titles must be ASCII".to_string());
    }
    if board.console.title.is_empty() {
        errors.push("[console] title must not be empty".to_string());
    }
    if board.console.title == board.board.title {
        errors.push("[console] title must differ from the [board] boot title".to_string());
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=board.toml validated for {}", board.board.name);
}

/// Write `$OUT_DIR/board.rs`
fn generate_board(board: &BoardFile) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let p = &board.peripherals;

    let src = format!(
        "// Generated by build.rs from board.toml - do not edit\n\
         \n\
         /// Board name\n\
         pub const NAME: &str = {name:?};\n\
         \n\
         /// Console banner title\n\
         pub const TITLE: &str = {title:?};\n\
         \n\
         /// Shell banner title\n\
         pub const SHELL_TITLE: &str = {shell_title:?};\n\
         \n\
         /// Console prompt\n\
         pub const PROMPT: &str = {prompt:?};\n\
         \n\
         /// Peripheral base addresses\n\
         pub const LAYOUT: Layout = Layout {{\n\
         \x20   timer_base: {timer:#x},\n\
         \x20   uart_base: {uart:#x},\n\
         \x20   gpio_base: {gpio:#x},\n\
         }};\n",
        name = board.board.name,
        title = board.board.title,
        shell_title = board.console.title,
        prompt = board.console.prompt,
        timer = p.timer_base,
        uart = p.uart_base,
        gpio = p.gpio_base,
    );

    fs::write(out_dir.join("board.rs"), src).unwrap();
}

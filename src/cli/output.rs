//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, created rows
//! - Red: errors, failed rows
//! - Yellow: warnings, updated rows
//! - Cyan: names, commands, hints
//! - Bold: headers, important values
//! - Dimmed: secondary info, skipped rows

use console::style;
use std::fmt::Display;
use std::io::{self, Write as IoWrite};

const RULE_WIDTH: usize = 56;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ initialized`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr (red).
///
/// Example: `✗ file not found`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a warning message (yellow).
///
/// Example: `⚠ metadata write failed`
pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("⚠").yellow(), msg);
    } else {
        println!("⚠ {}", msg);
    }
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ run: lockbox init`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a bold section header.
pub fn header(title: &str) {
    if colors_enabled() {
        println!("{}", style(title).bold());
    } else {
        println!("{}", title);
    }
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  title  Primary database`
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", style(label).dim(), style(value).bold());
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Print a horizontal rule separator.
pub fn rule() {
    if colors_enabled() {
        println!("{}", style("─".repeat(RULE_WIDTH)).dim());
    } else {
        println!("{}", "─".repeat(RULE_WIDTH));
    }
}

/// Print a section header with a separator line.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}

/// Format a secret name in cyan.
pub fn key(k: &str) -> String {
    if colors_enabled() {
        style(k).cyan().to_string()
    } else {
        k.to_string()
    }
}

/// Format a command string in green.
pub fn cmd(c: &str) -> String {
    if colors_enabled() {
        style(c).green().to_string()
    } else {
        c.to_string()
    }
}

/// Print a dimmed/secondary message.
///
/// Example: `no secrets found`
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}

/// One report line: a colored marker, the name, and a detail.
///
/// Example: `  + DATABASE_URL  create`
pub fn row(marker: Marker, name: &str, detail: &str) {
    let symbol = marker.symbol();
    if colors_enabled() {
        let symbol = match marker {
            Marker::Create => style(symbol).green(),
            Marker::Update => style(symbol).yellow(),
            Marker::Skip => style(symbol).dim(),
            Marker::Fail => style(symbol).red(),
        };
        println!("  {} {}  {}", symbol, key(name), style(detail).dim());
    } else {
        println!("  {} {}  {}", symbol, name, detail);
    }
}

/// Report line markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Create,
    Update,
    Skip,
    Fail,
}

impl Marker {
    fn symbol(self) -> &'static str {
        match self {
            Self::Create => "+",
            Self::Update => "~",
            Self::Skip => "-",
            Self::Fail => "✗",
        }
    }
}

/// Write raw text to stdout without decoration (for piping).
///
/// A reader that hangs up early is not an error; any other write failure is.
pub fn raw(text: &str) -> io::Result<()> {
    write_raw(&mut io::stdout().lock(), text)
}

fn write_raw(out: &mut impl IoWrite, text: &str) -> io::Result<()> {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result,
    }
}

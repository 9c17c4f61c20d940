//! Terminal logging with colored prefixes and a single-line progress bar.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `Progress` for an in-place progress bar while artifacts are cataloged
//!
//! # Example
//!
//! ```ignore
//! log!("scan"; "found {} artifacts", count);
//!
//! let progress = Progress::new("catalog", count);
//! for artifact in &artifacts {
//!     // ...
//!     progress.inc();
//! }
//! progress.finish();
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    cell::Cell,
    io::{IsTerminal, Write, stdout},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

// ============================================================================
// Layout Constants
// ============================================================================
//
// Progress bar format: "[module] [████░░░░] 42/100"
//                       ^------^ ^-------^ ^----^
//                       prefix   bar       count

/// Length of brackets around module name: "[]"
const BRACKET_LEN: usize = 2;
/// Space after prefix: "[module] " <- this space
const SPACE_AFTER_PREFIX: usize = 1;
/// Bar wrapper: " []" (space + brackets around progress bar)
const BAR_WRAPPER_LEN: usize = 3;
/// Space before count: "...] 42/100" <- this space
const SPACE_BEFORE_COUNT: usize = 1;
/// Minimum progress bar width in characters
const MIN_BAR_WIDTH: usize = 10;
/// Maximum progress bar width in characters
const MAX_BAR_WIDTH: usize = 40;

/// Total prefix length for a module name: `module.len() + 3`
#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a colored module prefix.
///
/// Single-line messages are truncated to the terminal width.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());
    let width = get_terminal_width() as usize;

    let mut stdout = stdout().lock();
    if stdout.is_terminal() {
        execute!(stdout, Clear(ClearType::CurrentLine)).ok();
        write!(stdout, "\r").ok();
    }

    let message = if message.contains('\n') {
        message
    } else {
        truncate_str(message, width.saturating_sub(calc_prefix_len(module.len())))
    };

    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "serve" => prefix.bright_blue().bold(),
        "build" | "done" => prefix.bright_green().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to fit within `max_len` bytes on a char boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Progress
// ============================================================================

/// In-place progress bar on the current terminal line.
///
/// Catalog building is sequential, so a `Cell` counter is enough.
/// Nothing is drawn when stdout is not a terminal.
pub struct Progress {
    prefix: ColoredString,
    prefix_len: usize,
    total: usize,
    current: Cell<usize>,
    enabled: bool,
}

impl Progress {
    pub fn new(module: &'static str, total: usize) -> Self {
        Self {
            prefix: colorize_prefix(module, &module.to_ascii_lowercase()),
            prefix_len: calc_prefix_len(module.len()),
            total,
            current: Cell::new(0),
            enabled: total > 1 && stdout().is_terminal(),
        }
    }

    /// Advance by one item and redraw.
    pub fn inc(&self) {
        let current = self.current.get() + 1;
        self.current.set(current);
        if self.enabled {
            self.display(current);
        }
    }

    fn display(&self, current: usize) {
        let width = get_terminal_width() as usize;
        let line = render_bar(&self.prefix, self.prefix_len, current, self.total, width);

        let mut stdout = stdout().lock();
        execute!(stdout, Clear(ClearType::CurrentLine)).ok();
        write!(stdout, "\r{line}").ok();
        stdout.flush().ok();
    }

    /// Clear the progress line.
    pub fn finish(&self) {
        if !self.enabled {
            return;
        }
        let mut stdout = stdout().lock();
        execute!(stdout, Clear(ClearType::CurrentLine)).ok();
        write!(stdout, "\r").ok();
        stdout.flush().ok();
    }
}

/// Format one progress line for the given terminal width.
fn render_bar(
    prefix: &ColoredString,
    prefix_len: usize,
    current: usize,
    total: usize,
    width: usize,
) -> String {
    let progress_text = format!("{current}/{total}");
    let overhead = prefix_len + BAR_WRAPPER_LEN + SPACE_BEFORE_COUNT + progress_text.len();
    let bar_width = width.saturating_sub(overhead).clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);

    let filled = if total > 0 {
        (current.min(total) * bar_width) / total
    } else {
        0
    };
    let empty = bar_width - filled;

    format!(
        "{prefix} [{}{}] {progress_text}",
        "█".repeat(filled),
        "░".repeat(empty)
    )
}

// ============================================================================
// Tests
// ============================================================================

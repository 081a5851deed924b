/// User interface and status output utilities
///
/// This module handles:
/// - Serialized console output
/// - Colored terminal text
/// - Status, warning and error message formatting
/// - The parse progress bar

use lazy_static::lazy_static;
use std::io::{IsTerminal, Write};
use std::sync::Mutex;
use terminal_size::{Width, terminal_size};

/// Execute a function with exclusive access to console output
fn status_lock<F>(f: F)
where
    F: FnOnce(),
{
    lazy_static! {
        static ref LOCK: Mutex<()> = Mutex::new(());
    }
    let _guard = LOCK.lock();
    f();
}

/// Print the "rule-audit: " prefix for status messages
fn print_status_header() {
    print!("rule-audit: ");
}

/// Print colored text to terminal, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        print!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        if let Some(ref mut t) = term::stdout() {
            if t.fg(fg).is_err() {
                return false;
            }
            let _ = t.attr(term::Attr::Bold);
            if write!(t, "{}", s).is_err() {
                return false;
            }
            let _ = t.reset();
            return true;
        }

        false
    }
}

/// Print a status message with "rule-audit: " prefix
pub fn status(s: &str) {
    status_lock(|| {
        print_status_header();
        println!("{}", s);
    });
}

/// Print a warning with colored "warning" prefix
pub fn print_warning(msg: &str) {
    status_lock(|| {
        print_color("warning", term::color::BRIGHT_YELLOW);
        println!(": {}", msg);
    });
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    status_lock(|| {
        println!();
        print_color("error", term::color::BRIGHT_RED);
        println!(": {}", msg);
        println!();
    });
}

/// Whether stdout is an interactive terminal
pub fn stdout_is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Terminal progress bar: `prefix |████------| 42.0% suffix`
pub struct ProgressBar {
    prefix: String,
    length: usize,
    enabled: bool,
    last_permille: Option<usize>,
}

impl ProgressBar {
    const FILL: char = '█';

    pub fn new(prefix: &str, enabled: bool) -> Self {
        // Leave room for the prefix, brackets and percentage
        let columns = terminal_size().map(|(Width(w), _)| w as usize).unwrap_or(100);
        let length = columns.saturating_sub(prefix.chars().count() + 12).clamp(10, 100);
        Self { prefix: prefix.to_string(), length, enabled, last_permille: None }
    }

    /// Render the bar for `done` of `total` units of work
    pub fn render(&self, done: usize, total: usize) -> String {
        let total = total.max(1);
        let done = done.min(total);
        let filled = self.length * done / total;
        let percent = 100.0 * done as f64 / total as f64;
        let bar: String =
            std::iter::repeat_n(Self::FILL, filled).chain(std::iter::repeat_n('-', self.length - filled)).collect();
        format!("{} |{}| {:.1}%", self.prefix, bar, percent)
    }

    /// Redraw the bar in place; ends the line once `done == total`
    pub fn update(&mut self, done: usize, total: usize) {
        if !self.enabled {
            return;
        }

        // Redraw only when the displayed value changes
        let permille = 1000 * done / total.max(1);
        if self.last_permille == Some(permille) {
            return;
        }
        self.last_permille = Some(permille);

        let line = self.render(done, total);
        status_lock(|| {
            print!("\r{}", line);
            if done >= total {
                println!();
            }
            let _ = std::io::stdout().flush();
        });
    }
}

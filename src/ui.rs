//! Terminal feedback: spinners for long phases and status lines.
//!
//! Spinners draw to stderr and stay hidden when it is not a terminal, so the
//! library can report phases unconditionally.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a success message
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("{} {}", style("!").yellow().bold(), msg);
}

/// Print an info message
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue(), msg);
}

/// Create a spinner
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Runs `f` behind a spinner labelled `message`.
///
/// The spinner line is replaced by a check mark on success and a cross on
/// failure; the result is passed through untouched.
pub fn step<T, E>(message: &str, f: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
    let pb = create_spinner(message);
    let result = f();
    match &result {
        Ok(_) => pb.finish_with_message(format!("{} {}", style("✓").green().bold(), message)),
        Err(_) => pb.abandon_with_message(format!("{} {}", style("✗").red().bold(), message)),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_passes_results_through() {
        assert_eq!(step("ok", || Ok::<_, ()>(7)), Ok(7));
        assert_eq!(step("fail", || Err::<(), _>("boom")), Err("boom"));
    }
}

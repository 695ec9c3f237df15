//! Output formatting utilities

use colored::Colorize;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a success message
pub(crate) fn success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// Print a warning message
pub(crate) fn warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// Print an info message
#[allow(dead_code)]
pub(crate) fn info(msg: &str) {
    println!("{} {}", "[INFO]".blue(), msg);
}

/// Format bytes as human-readable size
pub(crate) fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Format a prediction for display, two decimals plus unit
pub(crate) fn format_gb(value: f32) -> String {
    format!("{value:.2} GB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_does_not_panic() {
        section("Prediction");
    }

    #[test]
    fn test_kv_does_not_panic() {
        kv("key", "value");
        kv("count", 42);
    }

    #[test]
    fn test_status_lines_do_not_panic() {
        success("bundle written");
        warning("prediction below zero");
        info("informational message");
    }

    #[test]
    fn test_format_size_bytes() {
        let s = format_size(512);
        assert!(s.contains("512"));
    }

    #[test]
    fn test_format_size_kib() {
        let s = format_size(2048);
        assert!(s.contains("KiB"));
    }

    #[test]
    fn test_format_gb_two_decimals() {
        assert_eq!(format_gb(16.0), "16.00 GB");
        assert_eq!(format_gb(12.345), "12.35 GB");
        assert_eq!(format_gb(-0.5), "-0.50 GB");
    }
}

//! Output helper functions for consistent styled messages.

use super::colors::SemanticStyle;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".success(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".error(), msg);
}

pub fn print_warn(msg: &str) {
    println!("{} {}", "⚠".warning(), msg);
}

pub fn print_hint(msg: &str) {
    println!("{} {}", "→".muted(), msg.muted());
}

/// Prints a section title followed by a blank line.
pub fn print_section(title: &str) {
    println!();
    println!("{}", title.header());
}

pub fn print_path(label: &str, path: &std::path::Path) {
    println!("  {}: {}", label.muted(), path.display().code());
}

/// Compact numeric formatting for table cells.
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || (1e-3..1e5).contains(&magnitude) {
        format!("{value:.4}")
    } else {
        format!("{value:.4e}")
    }
}

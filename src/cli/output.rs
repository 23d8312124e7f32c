use colored::{ColoredString, Colorize};

use crate::core::models::category::Category;

/// Print a success message.
pub fn success(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    println!("  {} {}", "⚠".yellow(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    println!("\n{}", msg.bold());
}

/// Print a `label: value` line.
pub fn field(label: &str, value: &str) {
    println!("  {:<12} {}", format!("{label}:").dimmed(), value);
}

/// Category name painted in its display color.
pub fn category(category: Category) -> ColoredString {
    let (r, g, b) = hex_rgb(category.spec().display_color).unwrap_or((255, 255, 255));
    category.as_str().truecolor(r, g, b)
}

/// Parse `#rrggbb`.
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_colors() {
        assert_eq!(hex_rgb("#ff2424"), Some((0xff, 0x24, 0x24)));
        assert_eq!(hex_rgb("#3983ff"), Some((0x39, 0x83, 0xff)));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert_eq!(hex_rgb("ff2424"), None);
        assert_eq!(hex_rgb("#fff"), None);
        assert_eq!(hex_rgb("#gg0000"), None);
    }
}

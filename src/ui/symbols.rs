//! Stack display symbols (markers, indicators)
//!
//! ## Character Set Policy
//! - Proposal bodies use GitHub emoji shortcodes so they render on the web
//! - Terminal output sticks to ASCII, like `git branch`

/// Marker placed before every branch line
pub const INDENT_MARKER: &str = "-";

/// Current branch indicator in proposal bodies (rendered as 👈 by GitHub)
pub const POINT_LEFT: &str = ":point_left:";

/// Current branch indicator in terminal output, placed before the line
pub const TERMINAL_INDICATOR: &str = "*";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_left_is_shortcode() {
        assert!(POINT_LEFT.starts_with(':') && POINT_LEFT.ends_with(':'));
    }

    #[test]
    fn test_terminal_indicator_is_single_column() {
        // Keeps the highlighted line aligned with its siblings
        assert_eq!(TERMINAL_INDICATOR.chars().count(), 1);
        assert!(TERMINAL_INDICATOR.is_ascii());
    }
}

//! Color theme definitions
//!
//! Centralized color constants for terminal output.

use crossterm::style::Color;

/// Highlight of the branch the command was run from
pub const CURRENT_BRANCH: Color = Color::Green;

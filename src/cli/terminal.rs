//! Terminal colour support for menu output

use std::fmt::Display;

use owo_colors::{OwoColorize, colors::css};

/// Detects whether stdout is a terminal that understands colour codes
#[must_use]
pub fn stdout_supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Styles applied to the different kinds of message the planner prints.
///
/// Colour support is decided once, up front, so that output written to
/// anything other than a terminal stays plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Colours output if stdout supports it
    #[must_use]
    pub fn detect() -> Self {
        Self {
            enabled: stdout_supports_color(),
        }
    }

    /// Never colours output
    #[must_use]
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// Successful outcomes (green)
    #[must_use]
    pub fn success(self, text: &(impl Display + ?Sized)) -> String {
        if self.enabled {
            text.fg::<css::Green>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Rejected input and failed loads (amber)
    #[must_use]
    pub fn warning(self, text: &(impl Display + ?Sized)) -> String {
        if self.enabled {
            text.fg::<css::Orange>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Section headings (blue)
    #[must_use]
    pub fn heading(self, text: &(impl Display + ?Sized)) -> String {
        if self.enabled {
            text.fg::<css::LightBlue>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Hints and secondary text
    #[must_use]
    pub fn hint(self, text: &(impl Display + ?Sized)) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

//! Color theme and styling definitions using ratatui colors
//!
//! Each segment kind and screen region has one style here; the terminal layer looks styles up
//! by segment tag and never hardcodes colors.

use crate::render::segments::LineSegment;
use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTheme {
    /// Normal text style
    pub normal_text: Style,

    /// Row holding the cursor
    pub cursor_line: Style,

    /// Line-number gutter
    pub line_numbers: Style,

    /// Placeholder shown for undecodable or unreadable lines
    pub marker: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,
}

impl Default for ColorTheme {
    /// Default color theme similar to less/more
    fn default() -> Self {
        Self {
            normal_text: Style::default(),
            cursor_line: Style::default().add_modifier(Modifier::REVERSED),
            line_numbers: Style::default().fg(Color::White).bg(Color::Blue),
            marker: Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
            status_bg: Color::Blue,
            status_fg: Color::White,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            normal_text: Style::default(),
            cursor_line: Style::default().add_modifier(Modifier::REVERSED),
            line_numbers: Style::default().add_modifier(Modifier::DIM),
            marker: Style::default().add_modifier(Modifier::BOLD),
            status_bg: Color::Black,
            status_fg: Color::White,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            normal_text: Style::default().fg(Color::White),
            cursor_line: Style::default().fg(Color::Black).bg(Color::LightYellow),
            line_numbers: Style::default().fg(Color::LightGreen),
            marker: Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            status_bg: Color::White,
            status_fg: Color::Black,
        }
    }

    /// Look a theme up by its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "monochrome" => Some(Self::monochrome()),
            "high-contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    /// Style for a rendered segment
    pub fn segment_style(&self, segment: &LineSegment) -> Style {
        match segment {
            LineSegment::LineNumber(_) => self.line_numbers,
            LineSegment::Text(_) => self.normal_text,
            LineSegment::Marker(_) => self.marker,
        }
    }

    /// Style for the status line
    pub fn status_style(&self) -> Style {
        Style::default().bg(self.status_bg).fg(self.status_fg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_themes() {
        assert_eq!(ColorTheme::from_name("default"), Some(ColorTheme::default()));
        assert_eq!(
            ColorTheme::from_name("monochrome"),
            Some(ColorTheme::monochrome())
        );
        assert_eq!(
            ColorTheme::from_name("high-contrast"),
            Some(ColorTheme::high_contrast())
        );
        assert_eq!(ColorTheme::from_name("solarized"), None);
    }

    #[test]
    fn test_segment_styles() {
        let theme = ColorTheme::default();
        assert_eq!(
            theme.segment_style(&LineSegment::LineNumber("1 ".to_string())),
            theme.line_numbers
        );
        assert_eq!(
            theme.segment_style(&LineSegment::Marker("<x>".to_string())),
            theme.marker
        );
        assert_eq!(
            theme.status_style(),
            Style::default().bg(Color::Blue).fg(Color::White)
        );
    }
}

//! UI state management structures
//!
//! `ViewState` holds what the session shows: already segmented rows for the visible window,
//! where the cursor row is, and the status line. It holds no file data beyond what is on
//! screen. [`ViewState::screen`] turns it into the frame a renderer draws.

use crate::input::PromptKind;
use crate::render::segments::{DisplayFlags, LineSegment};
use crate::render::ui::renderer::{Body, Screen};
use std::path::{Path, PathBuf};

/// Appended to the position when the cursor line is not among the drawn rows
pub const CURSOR_BELOW_VIEW: &str = " (cursor below view)";

/// Everything the renderer needs to draw one frame
#[derive(Debug)]
pub struct ViewState {
    /// Segmented rows for the visible window, top to bottom
    pub rows: Vec<Vec<LineSegment>>,

    /// Row index of the cursor inside `rows`, if it is on screen
    pub cursor_row: Option<usize>,

    /// Selected line ordinal (0-based)
    pub cursor_line: u64,

    /// Total number of lines in the file
    pub line_count: u64,

    /// Whether line steps currently move the viewport
    pub locked: bool,

    /// Display toggles for this session
    pub flags: DisplayFlags,

    /// Help screen replaces the content area
    pub show_help: bool,

    /// Status line content
    pub status_line: StatusLine,

    /// File path for display
    pub file_path: PathBuf,

    /// Terminal dimensions
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    /// Create a new view state
    pub fn new(file_path: impl AsRef<Path>, viewport_width: u16, viewport_height: u16) -> Self {
        Self {
            rows: Vec::new(),
            cursor_row: None,
            cursor_line: 0,
            line_count: 0,
            locked: false,
            flags: DisplayFlags::default(),
            show_help: false,
            status_line: StatusLine::new(),
            file_path: file_path.as_ref().to_path_buf(),
            viewport_width,
            viewport_height,
        }
    }

    /// Get lines per page (viewport height minus status line)
    pub fn lines_per_page(&self) -> u16 {
        self.viewport_height.saturating_sub(1)
    }

    /// Update terminal dimensions
    /// Returns true if dimensions actually changed
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;

        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
            // Rows will be rebuilt for the new window
            self.rows.clear();
            self.cursor_row = None;
        }

        changed
    }

    /// Single-letter mode flags: prompt open, wrap, numbers, locked
    pub fn mode_indicators(&self) -> String {
        [
            (self.status_line.prompt.is_some(), 'e'),
            (self.flags.wrap, 'w'),
            (self.flags.line_numbers, 'n'),
            (self.locked, 'l'),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, c)| *c)
        .collect()
    }

    /// Position part of the status line: `path: cursor/count`
    ///
    /// The cursor may rest on the line just past the drawn rows, which has no highlight, so
    /// that case is spelled out.
    pub fn position(&self) -> String {
        let current = if self.line_count == 0 {
            0
        } else {
            self.cursor_line + 1
        };
        let mut position = format!(
            "{}: {}/{}",
            self.file_path.display(),
            current,
            self.line_count
        );
        if self.line_count > 0 && !self.show_help && self.cursor_row.is_none() {
            position.push_str(CURSOR_BELOW_VIEW);
        }
        position
    }

    /// Format the complete status line for this view state
    pub fn format_status_line(&self) -> String {
        self.status_line
            .format_status_line(&self.mode_indicators(), &self.position())
    }

    /// The frame a renderer should draw for this state
    pub fn screen(&self) -> Screen<'_> {
        Screen {
            body: if self.show_help {
                Body::Help
            } else {
                Body::Rows(&self.rows)
            },
            cursor_row: self.cursor_row,
            wrap: self.flags.wrap,
            status: self.format_status_line(),
        }
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
    pub prompt: Option<(PromptKind, String)>,
}

impl StatusLine {
    /// Create a new status line
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a temporary message
    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    /// Clear any temporary message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Show an empty prompt of the given kind
    pub fn open_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some((kind, String::new()));
    }

    /// Update prompt with current buffer
    pub fn update_prompt(&mut self, kind: PromptKind, buffer: String) {
        self.prompt = Some((kind, buffer));
    }

    /// Clear prompt and return to normal mode
    pub fn close_prompt(&mut self) {
        self.prompt = None;
    }

    /// Format the status line for display
    ///
    /// An open prompt takes the place of the position and any message.
    pub fn format_status_line(&self, indicators: &str, position: &str) -> String {
        if let Some((kind, buffer)) = &self.prompt {
            return format!("{} {}{}", indicators, kind.to_char(), buffer);
        }

        match &self.message {
            Some(message) => format!("{} {} | {}", indicators, position, message),
            None => format!("{} {}", indicators, position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_state_creation() {
        let path = PathBuf::from("/test/file.log");
        let state = ViewState::new(path.clone(), 80, 24);

        assert!(state.rows.is_empty());
        assert_eq!(state.file_path, path);
        assert_eq!(state.viewport_width, 80);
        assert_eq!(state.viewport_height, 24);
        assert_eq!(state.lines_per_page(), 23);
        assert!(!state.show_help);
    }

    #[test]
    fn test_mode_indicators() {
        let mut state = ViewState::new("/test/file.log", 80, 24);
        assert_eq!(state.mode_indicators(), "n");

        state.flags.wrap = true;
        state.locked = true;
        assert_eq!(state.mode_indicators(), "wnl");

        state.status_line.open_prompt(PromptKind::Search);
        state.flags.line_numbers = false;
        assert_eq!(state.mode_indicators(), "ewl");
    }

    #[test]
    fn test_status_line_format() {
        let mut status = StatusLine::new();

        let formatted = status.format_status_line("n", "test.log: 42/100");
        assert_eq!(formatted, "n test.log: 42/100");

        status.set_message("Pattern not found: zzz".to_string());
        let formatted = status.format_status_line("n", "test.log: 42/100");
        assert_eq!(formatted, "n test.log: 42/100 | Pattern not found: zzz");

        status.clear_message();
        status.open_prompt(PromptKind::Search);
        assert_eq!(status.format_status_line("en", "test.log: 1/10"), "en /");

        status.update_prompt(PromptKind::Command, "42".to_string());
        assert_eq!(status.format_status_line("en", "test.log: 1/10"), "en :42");

        status.close_prompt();
        assert_eq!(
            status.format_status_line("n", "test.log: 1/10"),
            "n test.log: 1/10"
        );
    }

    #[test]
    fn test_position() {
        let mut state = ViewState::new("test.log", 80, 10);
        state.flags.line_numbers = false;
        assert_eq!(state.format_status_line(), " test.log: 0/0");

        state.line_count = 100;
        state.cursor_line = 41;
        state.cursor_row = Some(3);
        assert_eq!(state.format_status_line(), " test.log: 42/100");

        state.cursor_row = None;
        assert_eq!(
            state.format_status_line(),
            " test.log: 42/100 (cursor below view)"
        );

        state.show_help = true;
        assert_eq!(state.position(), "test.log: 42/100");
    }

    #[test]
    fn test_prompt_keeps_indicators() {
        let mut state = ViewState::new("test.log", 80, 10);
        state.status_line.open_prompt(PromptKind::Search);
        state
            .status_line
            .update_prompt(PromptKind::Search, "err".to_string());

        assert_eq!(state.format_status_line(), "en /err");
    }

    #[test]
    fn test_screen_follows_help_and_wrap() {
        let mut state = ViewState::new("test.log", 80, 10);
        state.rows = vec![vec![LineSegment::Text("one".to_string())]];
        state.cursor_row = Some(0);
        state.line_count = 1;
        state.flags.wrap = true;

        let screen = state.screen();
        assert_eq!(screen.body, Body::Rows(&state.rows));
        assert_eq!(screen.cursor_row, Some(0));
        assert!(screen.wrap);

        state.show_help = true;
        assert_eq!(state.screen().body, Body::Help);
    }

    #[test]
    fn test_terminal_resize() {
        let mut state = ViewState::new("/test/file.log", 80, 24);
        state.rows = vec![vec![LineSegment::Text("line1".to_string())]];
        state.cursor_row = Some(0);

        assert!(!state.update_terminal_size(80, 24));
        assert_eq!(state.rows.len(), 1);

        assert!(state.update_terminal_size(120, 30));
        assert_eq!(state.viewport_width, 120);
        assert_eq!(state.lines_per_page(), 29);
        assert!(state.rows.is_empty());
        assert_eq!(state.cursor_row, None);
    }
}

//! Terminal UI implementation using ratatui
//!
//! This module provides the concrete implementation of UIRenderer using ratatui for a
//! cross-platform terminal interface. It only draws the [`Screen`] it is given; reading lines
//! and moving the cursor happen elsewhere.

use crate::error::{Result, TailError};
use crate::render::segments::LineSegment;
use crate::render::ui::{Body, ColorTheme, Screen, UIRenderer};
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Key reference shown by the help screen
pub const HELP_LINES: &[&str] = &[
    "rltail key bindings",
    "",
    "  j, Down          line down (scrolls the view when locked)",
    "  k, Up            line up (scrolls the view when locked)",
    "  f, Space, PgDn   page down",
    "  b, PgUp          page up",
    "  d / u            half page down / up",
    "  g, Home          first line",
    "  G, End           last line",
    "  l                toggle lock mode",
    "  w                toggle line wrapping",
    "  n                toggle line numbers",
    "  /pattern         search forward from the cursor",
    "  :N               go to line N",
    "  x                toggle this help",
    "  q, Ctrl-C        quit",
    "",
    "The cursor may rest on the line just below the window before the view",
    "re-centers; the status line then reads \"(cursor below view)\".",
];

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    /// Create a new terminal UI instance with the default theme
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    /// Create terminal UI with custom theme
    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    /// Build a styled row from its segments
    fn styled_row<'a>(segments: &'a [LineSegment], is_cursor: bool, theme: &ColorTheme) -> Line<'a> {
        let spans: Vec<Span<'a>> = segments
            .iter()
            .map(|segment| Span::styled(segment.as_str(), theme.segment_style(segment)))
            .collect();

        let mut line = Line::from(spans);
        if is_cursor {
            line.style = theme.cursor_line;
        }
        line
    }
}

/// Draw a whole frame: content area on top, one status row below
fn draw_screen(frame: &mut Frame, screen: &Screen<'_>, theme: &ColorTheme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(frame.size());

    draw_body(frame, chunks[0], screen, theme);

    let status = Paragraph::new(screen.status.as_str()).style(theme.status_style());
    frame.render_widget(status, chunks[1]);
}

fn draw_body(frame: &mut Frame, area: Rect, screen: &Screen<'_>, theme: &ColorTheme) {
    let rows = match screen.body {
        Body::Help => {
            let help: Vec<Line> = HELP_LINES.iter().map(|l| Line::from(*l)).collect();
            frame.render_widget(Paragraph::new(help), area);
            return;
        }
        Body::Rows(rows) => rows,
    };

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| TerminalUI::styled_row(row, screen.cursor_row == Some(idx), theme))
        .collect();

    if !screen.wrap {
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    // Wrapped rows can take more display lines than the window has; keep the cursor row on screen
    let heights: Vec<usize> = lines
        .iter()
        .map(|line| {
            Paragraph::new(line.clone())
                .wrap(Wrap { trim: false })
                .line_count(area.width)
        })
        .collect();
    let skip = wrapped_rows_to_skip(&heights, screen.cursor_row, usize::from(area.height));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(skip).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}

/// Display lines to skip at the top so the cursor row's last display line fits in `area_height`
///
/// `heights[i]` is how many display lines row `i` wraps into. The cursor row's first line is
/// never skipped.
fn wrapped_rows_to_skip(heights: &[usize], cursor_row: Option<usize>, area_height: usize) -> usize {
    let Some(cursor) = cursor_row.filter(|&row| row < heights.len()) else {
        return 0;
    };

    let above: usize = heights[..cursor].iter().sum();
    let bottom = above + heights[cursor];
    bottom.saturating_sub(area_height).min(above)
}

impl UIRenderer for TerminalUI {
    fn draw(&mut self, screen: &Screen<'_>) -> Result<()> {
        let Some(terminal) = self.terminal.as_mut() else {
            return Ok(());
        };
        let theme = &self.theme;

        terminal
            .draw(|frame| draw_screen(frame, screen, theme))
            .map_err(|e| TailError::terminal("Failed to draw frame", e))?;
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        enable_raw_mode().map_err(|e| TailError::terminal("Failed to enable raw mode", e))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| TailError::terminal("Failed to enter alternate screen", e))?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| TailError::terminal("Failed to set up terminal", e))?;
        self.terminal = Some(terminal);
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.terminal.take().is_some() {
            disable_raw_mode().map_err(|e| TailError::terminal("Failed to disable raw mode", e))?;
            execute!(io::stdout(), LeaveAlternateScreen)
                .map_err(|e| TailError::terminal("Failed to leave alternate screen", e))?;
        }
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        ratatui::crossterm::terminal::size()
            .map_err(|e| TailError::terminal("Failed to query terminal size", e))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::style::Color;

    fn draw_to_buffer(screen: &Screen<'_>, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let theme = ColorTheme::default();
        terminal
            .draw(|frame| draw_screen(frame, screen, &theme))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer.get(x, y).symbol())
            .collect()
    }

    fn text_rows(texts: &[&str]) -> Vec<Vec<LineSegment>> {
        texts
            .iter()
            .map(|text| vec![LineSegment::Text(text.to_string())])
            .collect()
    }

    #[test]
    fn test_terminal_ui_creation() {
        let ui = TerminalUI::new().unwrap();
        assert!(ui.terminal.is_none());
        assert_eq!(ui.theme.status_fg, Color::White);
        assert_eq!(ui.theme.status_bg, Color::Blue);

        let ui_with_theme = TerminalUI::with_theme(ColorTheme::monochrome()).unwrap();
        assert_eq!(ui_with_theme.theme.status_bg, Color::Black);
    }

    #[test]
    fn test_styled_row_uses_segment_styles() {
        let theme = ColorTheme::default();
        let segments = vec![
            LineSegment::LineNumber("  1 ".to_string()),
            LineSegment::Text("hello".to_string()),
        ];

        let line = TerminalUI::styled_row(&segments, false, &theme);
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, "  1 ");
        assert_eq!(line.spans[0].style, theme.line_numbers);
        assert_eq!(line.spans[1].content, "hello");
    }

    #[test]
    fn test_cursor_row_is_highlighted() {
        let theme = ColorTheme::default();
        let segments = vec![LineSegment::Text("selected".to_string())];

        let line = TerminalUI::styled_row(&segments, true, &theme);
        assert_eq!(line.style, theme.cursor_line);

        let line = TerminalUI::styled_row(&segments, false, &theme);
        assert_ne!(line.style, theme.cursor_line);
    }

    #[test]
    fn test_draw_rows_and_status() {
        let rows = text_rows(&["first", "second"]);
        let screen = Screen {
            body: Body::Rows(&rows),
            cursor_row: Some(0),
            wrap: false,
            status: " app.log: 1/2".to_string(),
        };

        let buffer = draw_to_buffer(&screen, 20, 3);
        assert!(buffer_row(&buffer, 0).starts_with("first"));
        assert!(buffer_row(&buffer, 1).starts_with("second"));
        assert!(buffer_row(&buffer, 2).starts_with(" app.log: 1/2"));
    }

    #[test]
    fn test_help_replaces_rows() {
        let screen = Screen {
            body: Body::Help,
            cursor_row: Some(0),
            wrap: false,
            status: String::new(),
        };

        let buffer = draw_to_buffer(&screen, 40, 4);
        assert!(buffer_row(&buffer, 0).starts_with(HELP_LINES[0]));
    }

    #[test]
    fn test_wrapped_cursor_row_stays_visible() {
        let a = "a".repeat(30);
        let b = "b".repeat(30);
        let c = "c".repeat(30);
        let rows = text_rows(&[&a, &b, &c]);
        let screen = Screen {
            body: Body::Rows(&rows),
            cursor_row: Some(2),
            wrap: true,
            status: String::new(),
        };

        // Three content rows, each logical row wraps into two
        let buffer = draw_to_buffer(&screen, 20, 4);
        assert!(!buffer_row(&buffer, 0).contains('a'));
        assert!(buffer_row(&buffer, 2).contains('c'));
    }

    #[test]
    fn test_wrapped_rows_to_skip() {
        assert_eq!(wrapped_rows_to_skip(&[1, 1, 1], Some(2), 5), 0);
        assert_eq!(wrapped_rows_to_skip(&[3, 3, 3], Some(2), 5), 4);
        assert_eq!(wrapped_rows_to_skip(&[3, 3, 3], Some(0), 5), 0);
        // A cursor row taller than the window shows its first line
        assert_eq!(wrapped_rows_to_skip(&[1, 10], Some(1), 5), 1);
        assert_eq!(wrapped_rows_to_skip(&[4, 4], None, 2), 0);
        assert_eq!(wrapped_rows_to_skip(&[], Some(0), 2), 0);
    }

    #[test]
    fn test_help_mentions_cursor_below_view() {
        assert!(HELP_LINES
            .iter()
            .any(|line| line.contains(crate::render::ui::state::CURSOR_BELOW_VIEW.trim())));
    }

    #[test]
    fn test_leave_without_enter_is_noop() {
        let mut ui = TerminalUI::new().unwrap();
        assert!(ui.leave().is_ok());
    }
}

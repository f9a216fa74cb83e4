//! Cursor and viewport navigation state machine
//!
//! The controller owns the selected line (cursor), the topmost visible line (scroll) and the
//! navigation mode. It never touches the file: it only knows the line count it was built for,
//! and the presentation layer hands it the visible window height on every call.
//!
//! Navigation always succeeds. Every operation clamps into `[0, line_count - 1]`, so the
//! ordinals the controller exposes can be passed straight to `LineIndex::get_line`.

use std::ops::Range;

/// What single-line steps move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationMode {
    /// Line steps move the cursor
    #[default]
    Free,
    /// Line steps move the viewport
    Locked,
}

impl NavigationMode {
    pub fn toggled(self) -> Self {
        match self {
            NavigationMode::Free => NavigationMode::Locked,
            NavigationMode::Locked => NavigationMode::Free,
        }
    }

    pub fn is_locked(self) -> bool {
        self == NavigationMode::Locked
    }
}

/// Unit a scroll delta is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Delta counts lines
    None,
    /// Delta counts half windows
    HalfPage,
    /// Delta counts whole windows
    FullPage,
}

impl PageMode {
    /// Effective line step for `delta` units at the given window height
    pub fn step(self, delta: i64, window_height: u64) -> i64 {
        let height = i64::try_from(window_height).unwrap_or(i64::MAX);
        match self {
            PageMode::None => delta,
            PageMode::HalfPage => delta.saturating_mul(height / 2),
            PageMode::FullPage => delta.saturating_mul(height),
        }
    }
}

/// Discrete navigation commands forwarded by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    JumpToStart,
    JumpToEnd,
    ToggleLock,
}

/// How much of the screen an operation invalidated
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Redraw {
    /// State is unchanged
    Nothing,
    /// Only the status line changed
    Status,
    /// Cursor or scroll moved; the content area must be redrawn
    Viewport,
}

/// Owns cursor, scroll and lock mode for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportController {
    cursor: u64,
    scroll: u64,
    mode: NavigationMode,
    line_count: u64,
}

impl ViewportController {
    /// Controller at the top of a file with `line_count` lines, in free mode
    pub fn new(line_count: u64) -> Self {
        Self::with_mode(line_count, NavigationMode::Free)
    }

    pub fn with_mode(line_count: u64, mode: NavigationMode) -> Self {
        Self {
            cursor: 0,
            scroll: 0,
            mode,
            line_count,
        }
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn scroll(&self) -> u64 {
        self.scroll
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn is_locked(&self) -> bool {
        self.mode.is_locked()
    }

    pub fn line_count(&self) -> u64 {
        self.line_count
    }

    /// Move the cursor by `delta` lines, re-centering the viewport if the cursor leaves it
    pub fn move_cursor(&mut self, delta: i64, window_height: u64) -> Redraw {
        let before = (self.cursor, self.scroll);

        let cursor = self.clamp_line(Self::as_signed(self.cursor).saturating_add(delta));
        if !Self::in_window(cursor, self.scroll, window_height) {
            self.scroll = cursor.saturating_sub(window_height / 2);
        }
        self.cursor = cursor;

        self.changed_since(before)
    }

    /// Move the viewport by `delta` units of `page_mode`, dragging the cursor along if it
    /// falls out of the new window
    pub fn scroll_view(&mut self, delta: i64, page_mode: PageMode, window_height: u64) -> Redraw {
        let before = (self.cursor, self.scroll);

        let step = page_mode.step(delta, window_height);
        self.scroll = self.clamp_line(Self::as_signed(self.scroll).saturating_add(step));
        if !Self::in_window(self.cursor, self.scroll, window_height) {
            self.cursor = self.scroll;
        }

        self.changed_since(before)
    }

    /// Flip between free and locked navigation
    pub fn toggle_lock(&mut self) -> Redraw {
        self.mode = self.mode.toggled();
        Redraw::Status
    }

    pub fn jump_to_start(&mut self) -> Redraw {
        let before = (self.cursor, self.scroll);
        self.cursor = 0;
        self.scroll = 0;
        self.changed_since(before)
    }

    pub fn jump_to_end(&mut self) -> Redraw {
        let before = (self.cursor, self.scroll);
        let last = self.last_line();
        self.cursor = last;
        self.scroll = last;
        self.changed_since(before)
    }

    /// Put the cursor on `line` (clamped), e.g. after a search hit
    pub fn jump_to_line(&mut self, line: u64, window_height: u64) -> Redraw {
        let delta = Self::as_signed(line).saturating_sub(Self::as_signed(self.cursor));
        self.move_cursor(delta, window_height)
    }

    /// Dispatch a navigation event according to the current mode
    pub fn handle(&mut self, event: NavigationEvent, window_height: u64) -> Redraw {
        match event {
            NavigationEvent::LineUp => self.line_step(-1, window_height),
            NavigationEvent::LineDown => self.line_step(1, window_height),
            NavigationEvent::PageUp => self.scroll_view(-1, PageMode::FullPage, window_height),
            NavigationEvent::PageDown => self.scroll_view(1, PageMode::FullPage, window_height),
            NavigationEvent::HalfPageUp => self.scroll_view(-1, PageMode::HalfPage, window_height),
            NavigationEvent::HalfPageDown => {
                self.scroll_view(1, PageMode::HalfPage, window_height)
            }
            NavigationEvent::JumpToStart => self.jump_to_start(),
            NavigationEvent::JumpToEnd => self.jump_to_end(),
            NavigationEvent::ToggleLock => self.toggle_lock(),
        }
    }

    /// Ordinals to render for a window of `window_height` rows
    ///
    /// Always within `[0, line_count)`; empty when the file has no lines.
    pub fn visible_range(&self, window_height: u64) -> Range<u64> {
        let end = self
            .scroll
            .saturating_add(window_height)
            .min(self.line_count);
        self.scroll.min(end)..end
    }

    /// Row of the cursor inside the visible window, if it is on screen
    pub fn cursor_row(&self, window_height: u64) -> Option<usize> {
        let range = self.visible_range(window_height);
        range
            .contains(&self.cursor)
            .then(|| (self.cursor - range.start) as usize)
    }

    fn line_step(&mut self, delta: i64, window_height: u64) -> Redraw {
        match self.mode {
            NavigationMode::Free => self.move_cursor(delta, window_height),
            NavigationMode::Locked => self.scroll_view(delta, PageMode::None, window_height),
        }
    }

    fn last_line(&self) -> u64 {
        self.line_count.saturating_sub(1)
    }

    fn clamp_line(&self, target: i64) -> u64 {
        target.clamp(0, Self::as_signed(self.last_line())) as u64
    }

    fn in_window(line: u64, top: u64, window_height: u64) -> bool {
        line >= top && line <= top.saturating_add(window_height)
    }

    fn as_signed(value: u64) -> i64 {
        i64::try_from(value).unwrap_or(i64::MAX)
    }

    fn changed_since(&self, before: (u64, u64)) -> Redraw {
        if before == (self.cursor, self.scroll) {
            Redraw::Nothing
        } else {
            Redraw::Viewport
        }
    }
}

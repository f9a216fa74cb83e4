//! The seam between a session and whatever draws it.
//!
//! A session hands the renderer a [`Screen`]: the segmented rows for the visible lines, which
//! of them holds the cursor, and the status text. The renderer never reads the file.

use crate::error::Result;
use crate::render::segments::LineSegment;

/// What fills the content area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body<'a> {
    /// One entry per visible line, top to bottom
    Rows(&'a [Vec<LineSegment>]),
    /// Key reference in place of file content
    Help,
}

/// Everything one frame shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen<'a> {
    pub body: Body<'a>,
    /// Index into the rows of the line holding the cursor, if it is drawn
    pub cursor_row: Option<usize>,
    /// Soft-wrap rows wider than the terminal
    pub wrap: bool,
    pub status: String,
}

/// Draws screens and owns the terminal while a session runs
pub trait UIRenderer {
    fn draw(&mut self, screen: &Screen<'_>) -> Result<()>;

    /// Take over the terminal
    fn enter(&mut self) -> Result<()>;

    /// Hand the terminal back; a no-op if `enter` never ran
    fn leave(&mut self) -> Result<()>;

    /// Current size as (columns, rows)
    fn size(&self) -> Result<(u16, u16)>;
}

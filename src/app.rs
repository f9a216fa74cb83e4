//! Application orchestration layer
//!
//! The application owns one session: the line index, the viewport controller, the searcher
//! and the view state handed to the renderer. Input actions are applied synchronously, then
//! the visible rows are rebuilt from the index and drawn.

use crate::config::Config;
use crate::error::{Result, TailError};
use crate::file_handler::LineIndex;
use crate::input::{InputAction, InputService, PromptKind};
use crate::render::segments::segments_for;
use crate::render::ui::{UIRenderer, ViewState};
use crate::search::LineSearcher;
use crate::viewport::{Redraw, ViewportController};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long the input thread waits for an event before checking for shutdown
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Application orchestrator for a single viewing session
pub struct Application<R = File> {
    index: LineIndex<R>,
    viewport: ViewportController,
    searcher: LineSearcher,
    ui_renderer: Box<dyn UIRenderer>,
    view_state: ViewState,
}

impl Application<File> {
    /// Open `file_path`, build its index and wire the session together
    pub fn new(file_path: &Path, ui_renderer: Box<dyn UIRenderer>, config: &Config) -> Result<Self> {
        let index = LineIndex::open(file_path)?;
        Ok(Self::from_index(index, file_path, ui_renderer, config))
    }
}

impl<R: Read + Seek> Application<R> {
    /// Build a session around an existing index
    pub fn from_index(
        index: LineIndex<R>,
        display_path: impl Into<PathBuf>,
        ui_renderer: Box<dyn UIRenderer>,
        config: &Config,
    ) -> Self {
        let line_count = index.line_count();
        let mut view_state = ViewState::new(display_path.into(), 0, 0);
        view_state.flags = config.display_flags();
        view_state.flags.fit_numbers_to(line_count);
        view_state.line_count = line_count;

        Self {
            index,
            viewport: ViewportController::with_mode(line_count, config.navigation_mode()),
            searcher: LineSearcher::new(config.search_options()),
            ui_renderer,
            view_state,
        }
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    /// Rows available for file content
    fn window_height(&self) -> u64 {
        u64::from(self.view_state.lines_per_page())
    }

    /// Run the interactive session until the user quits
    ///
    /// The terminal is restored on every exit path, including errors. A terminal failure on the
    /// input side ends the session and is returned.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.enter()?;

        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::unbounded_channel();
        let reader = spawn_input_reader(tx, Arc::clone(&stop));

        let session = self.event_loop(rx).await;

        stop.store(true, Ordering::Relaxed);
        let input = reader
            .join()
            .unwrap_or_else(|_| Err(TailError::ui("Input thread panicked")));
        let restore = self.ui_renderer.leave();

        session.and(input).and(restore)
    }

    async fn event_loop(&mut self, mut rx: mpsc::UnboundedReceiver<InputAction>) -> Result<()> {
        let (width, height) = self.ui_renderer.size()?;
        self.view_state.update_terminal_size(width, height);
        self.refresh_view();
        self.draw()?;

        while let Some(action) = rx.recv().await {
            if !self.handle_action(action) {
                return Ok(());
            }

            // Apply everything that queued up while we were busy before drawing again
            while let Ok(action) = rx.try_recv() {
                if !self.handle_action(action) {
                    return Ok(());
                }
            }

            self.refresh_view();
            self.draw()?;
        }

        Ok(())
    }

    /// Apply one input action - returns false if the session should end
    pub fn handle_action(&mut self, action: InputAction) -> bool {
        if !matches!(action, InputAction::UpdatePrompt { .. }) {
            self.view_state.status_line.clear_message();
        }

        match action {
            InputAction::Quit => return false,
            InputAction::Navigate(event) => {
                let height = self.window_height();
                if self.viewport.handle(event, height) == Redraw::Viewport {
                    log::trace!(
                        "cursor={} scroll={}",
                        self.viewport.cursor(),
                        self.viewport.scroll()
                    );
                }
            }
            InputAction::ToggleWrap => {
                self.view_state.flags.wrap = !self.view_state.flags.wrap;
            }
            InputAction::ToggleLineNumbers => {
                self.view_state.flags.line_numbers = !self.view_state.flags.line_numbers;
            }
            InputAction::ToggleHelp => {
                self.view_state.show_help = !self.view_state.show_help;
            }
            InputAction::OpenPrompt(kind) => {
                self.view_state.status_line.open_prompt(kind);
            }
            InputAction::UpdatePrompt { kind, buffer } => {
                self.view_state.status_line.update_prompt(kind, buffer);
            }
            InputAction::CancelPrompt => {
                self.view_state.status_line.close_prompt();
            }
            InputAction::SubmitPrompt { kind, text } => {
                self.view_state.status_line.close_prompt();
                match kind {
                    PromptKind::Search => self.execute_search(&text),
                    PromptKind::Command => return self.execute_command(&text),
                }
            }
            InputAction::Resize { width, height } => {
                self.view_state.update_terminal_size(width, height);
            }
            InputAction::NoAction | InputAction::InvalidInput => {}
        }

        true
    }

    /// Search forward from the cursor and land on the first match
    ///
    /// Cursor and scroll are left untouched when nothing matches or the pattern is invalid.
    pub fn execute_search(&mut self, pattern: &str) {
        let start = self.viewport.cursor();
        match self.searcher.search(&mut self.index, start, pattern) {
            Ok(Some(line)) => {
                let height = self.window_height();
                self.viewport.jump_to_line(line, height);
            }
            Ok(None) => {
                self.view_state
                    .status_line
                    .set_message(format!("Pattern not found: {}", pattern));
            }
            Err(e) => {
                log::warn!("Search for '{}' failed: {}", pattern, e);
                self.view_state.status_line.set_message(e.to_string());
            }
        }
    }

    /// Run a `:` command - returns false if the session should end
    pub fn execute_command(&mut self, command: &str) -> bool {
        let command = command.trim();
        match command {
            "q" | "quit" => return false,
            _ => match command.parse::<u64>() {
                Ok(line) => {
                    let height = self.window_height();
                    self.viewport.jump_to_line(line.saturating_sub(1), height);
                }
                Err(_) => {
                    self.view_state
                        .status_line
                        .set_message(format!("Unknown command: {}", command));
                }
            },
        }
        true
    }

    /// Rebuild the visible rows from the index
    ///
    /// Only ordinals from `ViewportController::visible_range` are requested, so retrieval is
    /// never called out of bounds. A line that fails to read becomes a marker for that row.
    pub fn refresh_view(&mut self) {
        let height = self.window_height();
        let range = self.viewport.visible_range(height);
        let flags = self.view_state.flags;

        let mut rows = Vec::with_capacity((range.end - range.start) as usize);
        for line in range {
            let fetched = self.index.get_line(line);
            if let Err(e) = &fetched {
                log::warn!("Cannot display line {}: {}", line, e);
                if !e.is_decode_error() {
                    self.view_state
                        .status_line
                        .set_message(format!("Read failed: {}", e));
                }
            }
            rows.push(segments_for(&flags, line, &fetched));
        }

        self.view_state.rows = rows;
        self.view_state.cursor_row = self.viewport.cursor_row(height);
        self.view_state.cursor_line = self.viewport.cursor();
        self.view_state.locked = self.viewport.is_locked();
    }

    /// Draw the current view state
    pub fn draw(&mut self) -> Result<()> {
        self.ui_renderer.draw(&self.view_state.screen())
    }
}

/// Poll the terminal on its own thread and queue actions for the session
///
/// Keys typed while the session is busy, for example during a long search, wait on the
/// channel. The thread stops when `stop` is set or the receiver is gone, and returns the
/// terminal error that ended it, if any.
fn spawn_input_reader(
    tx: mpsc::UnboundedSender<InputAction>,
    stop: Arc<AtomicBool>,
) -> thread::JoinHandle<Result<()>> {
    thread::spawn(move || {
        let mut input = InputService::new();
        while !stop.load(Ordering::Relaxed) {
            let Some(action) = input.poll_action(INPUT_POLL_INTERVAL)? else {
                continue;
            };
            if tx.send(action).is_err() {
                break;
            }
        }
        Ok(())
    })
}

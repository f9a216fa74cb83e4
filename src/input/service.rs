//! High-level input service.
//!
//! Polls crossterm for terminal events, runs the key-binding state machine, and yields
//! domain-level `InputAction`s that the application loop consumes.

use crate::error::{Result, TailError};
use crate::viewport::NavigationEvent;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Current input mode (key bindings vs text prompt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Navigation,
    Prompt { kind: PromptKind },
}

/// What a text prompt collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Search,
    Command,
}

impl PromptKind {
    /// Character displayed in front of the prompt buffer.
    pub fn to_char(self) -> char {
        match self {
            PromptKind::Search => '/',
            PromptKind::Command => ':',
        }
    }
}

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Navigate(NavigationEvent),
    ToggleWrap,
    ToggleLineNumbers,
    ToggleHelp,
    Quit,
    OpenPrompt(PromptKind),
    UpdatePrompt { kind: PromptKind, buffer: String },
    CancelPrompt,
    SubmitPrompt { kind: PromptKind, text: String },
    Resize { width: u16, height: u16 },
    NoAction,
    InvalidInput,
}

/// Key bindings without Ctrl or Alt held
fn plain(modifiers: KeyModifiers) -> bool {
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// State machine mapping keys to actions, with a single-line text prompt.
pub struct InputStateMachine {
    state: InputState,
    buffer: String,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            state: InputState::Navigation,
            buffer: String::new(),
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        match self.state {
            InputState::Navigation => self.navigation_key(key_event),
            InputState::Prompt { kind } => self.prompt_key(kind, key_event),
        }
    }

    fn navigation_key(&mut self, key_event: KeyEvent) -> InputAction {
        use NavigationEvent::*;

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => InputAction::Quit,
            (KeyCode::Down, _) => InputAction::Navigate(LineDown),
            (KeyCode::Up, _) => InputAction::Navigate(LineUp),
            (KeyCode::PageDown, _) => InputAction::Navigate(PageDown),
            (KeyCode::PageUp, _) => InputAction::Navigate(PageUp),
            (KeyCode::Home, _) => InputAction::Navigate(JumpToStart),
            (KeyCode::End, _) => InputAction::Navigate(JumpToEnd),
            (KeyCode::Char(ch), modifiers) if plain(modifiers) => match ch {
                'j' => InputAction::Navigate(LineDown),
                'k' => InputAction::Navigate(LineUp),
                'f' | ' ' => InputAction::Navigate(PageDown),
                'b' => InputAction::Navigate(PageUp),
                'd' => InputAction::Navigate(HalfPageDown),
                'u' => InputAction::Navigate(HalfPageUp),
                'g' => InputAction::Navigate(JumpToStart),
                'G' => InputAction::Navigate(JumpToEnd),
                'l' => InputAction::Navigate(ToggleLock),
                'w' => InputAction::ToggleWrap,
                'n' => InputAction::ToggleLineNumbers,
                'x' => InputAction::ToggleHelp,
                'q' => InputAction::Quit,
                '/' => self.open_prompt(PromptKind::Search),
                ':' => self.open_prompt(PromptKind::Command),
                _ => InputAction::InvalidInput,
            },
            _ => InputAction::InvalidInput,
        }
    }

    fn prompt_key(&mut self, kind: PromptKind, key_event: KeyEvent) -> InputAction {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => self.close_prompt(),
            (KeyCode::Char(ch), modifiers) if plain(modifiers) && !ch.is_control() => {
                self.buffer.push(ch);
                InputAction::UpdatePrompt {
                    kind,
                    buffer: self.buffer.clone(),
                }
            }
            (KeyCode::Backspace, _) => {
                self.buffer.pop();
                if self.buffer.is_empty() {
                    self.close_prompt()
                } else {
                    InputAction::UpdatePrompt {
                        kind,
                        buffer: self.buffer.clone(),
                    }
                }
            }
            (KeyCode::Enter, _) => {
                let text = std::mem::take(&mut self.buffer);
                self.state = InputState::Navigation;

                if text.trim().is_empty() {
                    InputAction::CancelPrompt
                } else {
                    InputAction::SubmitPrompt { kind, text }
                }
            }
            _ => InputAction::InvalidInput,
        }
    }

    fn open_prompt(&mut self, kind: PromptKind) -> InputAction {
        self.state = InputState::Prompt { kind };
        self.buffer.clear();
        InputAction::OpenPrompt(kind)
    }

    fn close_prompt(&mut self) -> InputAction {
        self.state = InputState::Navigation;
        self.buffer.clear();
        InputAction::CancelPrompt
    }

    pub fn get_buffer(&self) -> &str {
        &self.buffer
    }

    pub fn get_state(&self) -> InputState {
        self.state
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            state_machine: InputStateMachine::new(),
        }
    }

    /// Wait up to `timeout` for one terminal event and translate it
    pub fn poll_action(&mut self, timeout: Duration) -> Result<Option<InputAction>> {
        let ready = event::poll(timeout)
            .map_err(|e| TailError::terminal("Failed to poll terminal input", e))?;
        if !ready {
            return Ok(None);
        }
        let event =
            event::read().map_err(|e| TailError::terminal("Failed to read terminal input", e))?;
        Ok(self.process_event(event))
    }

    /// Translate one terminal event, dropping events with no effect
    pub fn process_event(&mut self, event: Event) -> Option<InputAction> {
        let action = match event {
            Event::Key(key_event) => self.state_machine.handle_key_event(key_event),
            Event::Resize(width, height) => InputAction::Resize { width, height },
            _ => InputAction::NoAction,
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

//! # PromptBox Component
//!
//! Single-field prompt editor for image descriptions.
//!
//! ## Responsibilities
//!
//! - Capture text input and basic editing (backspace, delete, cursor
//!   movement, paste)
//! - Handle submission (Enter), refusing whitespace-only prompts
//! - Lock out edits and submission while a generation is in flight
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `locked` is a prop derived
//! from the application phase on every frame; it is never tracked as a
//! separate flag here. The buffer is NOT cleared on submit: it is kept
//! until the generator resolves successfully, so a failed run can be
//! retried without retyping (the event loop calls `clear()` on success).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Wrapped lines shown at most before the box scrolls.
const MAX_VISIBLE_LINES: u16 = 5;
/// Top + bottom border.
const VERTICAL_OVERHEAD: u16 = 2;

/// High-level events emitted by the PromptBox
#[derive(Debug, Clone, PartialEq)]
pub enum PromptEvent {
    /// User submitted the prompt (Enter pressed, buffer non-blank)
    Submit(String),
    /// Text content or cursor changed
    ContentChanged,
}

pub struct PromptBox {
    /// Text buffer (internal state)
    pub buffer: String,
    /// Prop: while true (a request is in flight) all events are ignored
    pub locked: bool,
    /// Cursor byte offset into `buffer`
    cursor: usize,
}

impl PromptBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            locked: false,
            cursor: 0,
        }
    }

    /// Empties the buffer. Called by the event loop once the generator
    /// has resolved successfully, never on submit or failure.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Required height for the current buffer, clamped to the viewport.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let lines = self.wrapped_line_count(content_width);
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn inner_width(content_width: u16) -> usize {
        content_width.saturating_sub(2).max(1) as usize
    }

    fn wrapped_line_count(&self, content_width: u16) -> u16 {
        textwrap::wrap(&self.buffer, Self::inner_width(content_width)).len() as u16
    }

    /// Cursor position in wrapped-line space: (line, column).
    fn cursor_line_col(&self, content_width: u16) -> (u16, u16) {
        let prefix = &self.buffer[..self.cursor];
        let lines = textwrap::wrap(prefix, Self::inner_width(content_width));
        match lines.last() {
            None => (0, 0),
            Some(last) => (
                (lines.len() - 1) as u16,
                UnicodeWidthStr::width(last.as_ref()) as u16,
            ),
        }
    }

    /// First wrapped line shown, chosen so the cursor line stays visible.
    fn scroll_offset(&self, content_width: u16) -> u16 {
        let (cursor_line, _) = self.cursor_line_col(content_width);
        cursor_line.saturating_sub(MAX_VISIBLE_LINES - 1)
    }

    fn visible_text(&self, content_width: u16) -> String {
        let lines = textwrap::wrap(&self.buffer, Self::inner_width(content_width));
        let start = self.scroll_offset(content_width) as usize;
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        lines[start..end].join("\n")
    }

    fn prev_char_boundary(&self, pos: usize) -> usize {
        self.buffer[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_char_boundary(&self, pos: usize) -> usize {
        self.buffer[pos..]
            .chars()
            .next()
            .map(|c| pos + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }
}

impl Default for PromptBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PromptBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (title, style) = if self.locked {
            (
                "Prompt (generating)",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
            )
        } else {
            ("Prompt", Style::default().fg(Color::Green))
        };

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .title(title);

        let input = Paragraph::new(self.visible_text(area.width))
            .block(block)
            .style(style);

        frame.render_widget(input, area);

        if !self.locked {
            let (line, col) = self.cursor_line_col(area.width);
            let visible_line = line - self.scroll_offset(area.width);
            let max_x = area.x + area.width.saturating_sub(2);
            frame.set_cursor_position((
                (area.x + 1 + col).min(max_x),
                area.y + 1 + visible_line,
            ));
        }
    }
}

impl EventHandler for PromptBox {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        // Input and submit control are disabled while a request is in flight
        if self.locked {
            return None;
        }

        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(PromptEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // A prompt is one logical line
                let flat = text.replace(['\n', '\r'], " ");
                self.buffer.insert_str(self.cursor, &flat);
                self.cursor += flat.len();
                Some(PromptEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_char_boundary(self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(PromptEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = self.next_char_boundary(self.cursor);
                    self.buffer.drain(self.cursor..next);
                    Some(PromptEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = self.prev_char_boundary(self.cursor);
                    Some(PromptEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = self.next_char_boundary(self.cursor);
                    Some(PromptEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                PromptEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                PromptEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    None
                } else {
                    // Raw text, untrimmed; buffer intentionally retained
                    Some(PromptEvent::Submit(self.buffer.clone()))
                }
            }
            _ => None,
        }
    }
}

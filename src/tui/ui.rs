//! Frame layout and phase-driven view selection.
//!
//! The whole screen is a pure function of `App` + `TuiState`: a title
//! line, a main area that shows exactly one of spinner / error / image /
//! landing depending on the current `Phase`, and the prompt box.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::{App, Phase};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Landing, Viewer};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let input_height = tui.prompt_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    // Title bar
    let title_text = if app.status_message.is_empty() {
        format!("Pictor (model: {})", app.model_name)
    } else {
        format!("Pictor (model: {}) | {}", app.model_name, app.status_message)
    };
    frame.render_widget(Span::raw(title_text), title_area);

    // Main area - exactly one view per phase
    match &app.phase {
        Phase::Loading => draw_loading_view(frame, main_area, spinner_frame),
        Phase::Error(message) => draw_error_view(frame, main_area, message),
        Phase::Ready(image) => Viewer::new(image).render(frame, main_area),
        Phase::Idle => Landing::new().render(frame, main_area),
    }

    tui.prompt_box.render(frame, input_area);
}

fn draw_loading_view(frame: &mut Frame, area: Rect, spinner_frame: usize) {
    // A zero-height main area has no row to paint; writing anyway would
    // land on the title bar above it
    if area.height == 0 {
        return;
    }

    let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
    let paragraph = Paragraph::new(format!("{spinner} Generating..."))
        .style(Style::default().fg(Color::Magenta))
        .alignment(Alignment::Center);

    // Vertically centered single line
    let y = area.y + area.height / 2;
    let line_area = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
    frame.render_widget(paragraph, line_area);
}

fn draw_error_view(frame: &mut Frame, area: Rect, message: &str) {
    let error_paragraph = Paragraph::new(message)
        .block(Block::bordered().title("ERROR"))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);

    frame.render_widget(error_paragraph, area);
}

// src/ui.rs

pub mod chat;
pub mod footer;

use crate::chat_state::ChatState;
use crate::status_indicator::StatusIndicator;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Draws the whole chat screen.
pub fn draw(f: &mut Frame, state: &mut ChatState, status: &mut StatusIndicator) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),    // Messages
            Constraint::Length(1), // Status
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    chat::draw_messages(f, state, chunks[0]);

    status.update_spinner();
    status.render(f, chunks[1]);

    chat::draw_input(f, state, chunks[2]);
    footer::draw_footer(f, chunks[3]);
}

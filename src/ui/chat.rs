use crate::chat_message;
use crate::chat_state::ChatState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

const INPUT_PREFIX: &str = "→ ";

/// Every message as pre-wrapped lines, with a blank line between messages.
pub fn message_lines(state: &ChatState, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in state.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(chat_message::render(message, width));
    }
    lines
}

pub fn draw_messages(f: &mut Frame, state: &mut ChatState, area: Rect) {
    let lines = message_lines(state, area.width);
    let total_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);

    state.clamp_scroll(total_lines, area.height);
    let offset = state.scroll_offset(total_lines, area.height);

    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

pub fn draw_input(f: &mut Frame, state: &ChatState, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    let separator_style = Style::default().fg(Color::DarkGray);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(separator.as_str(), separator_style))),
        Rect {
            height: 1,
            ..area
        },
    );

    let prefix = INPUT_PREFIX;
    let input = Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::DarkGray)),
        Span::styled(state.input(), Style::default().fg(Color::White)),
    ]);

    let text_width = u16::try_from(state.input().width()).unwrap_or(u16::MAX);
    let scroll_offset = text_width.saturating_sub(visible_input_width(area));

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            y: area.y + 1,
            height: area.height.saturating_sub(2),
            ..area
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(separator.as_str(), separator_style))),
        Rect {
            y: area.y + area.height.saturating_sub(1),
            height: 1,
            ..area
        },
    );

    f.set_cursor_position((input_cursor_x(area, state.input()), area.y + 1));
}

/// Columns available for input text, leaving one for the cursor.
fn visible_input_width(area: Rect) -> u16 {
    area.width
        .saturating_sub(INPUT_PREFIX.width() as u16)
        .saturating_sub(1)
}

/// Column of the input cursor; stays inside the pane once the input scrolls.
pub fn input_cursor_x(area: Rect, input: &str) -> u16 {
    let prefix_width = INPUT_PREFIX.width() as u16;
    let text_width = u16::try_from(input.width()).unwrap_or(u16::MAX);
    let column = prefix_width.saturating_add(text_width.min(visible_input_width(area)));

    area.x
        .saturating_add(column.min(area.width.saturating_sub(1)))
}

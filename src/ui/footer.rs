use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub const KEY_HINTS: &str =
    "Enter send · PgUp/PgDn scroll · End latest · Ctrl-X cancel pending · Esc quit";

/// Draws the footer with key hints
pub fn draw_footer(f: &mut Frame<'_>, area: Rect) {
    let footer = Paragraph::new(KEY_HINTS)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}

use crate::constants::{BOT_LABEL, USER_LABEL};
use crate::models::{Author, Message};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

const BODY_PREFIX: &str = "│ ";

/// Renders one message as header, wrapped body and footer lines for a pane `width` columns wide.
pub fn render(message: &Message, width: u16) -> Vec<Line<'static>> {
    let style = base_style(message.author);
    let indent = indent(message.author);
    let mut lines = Vec::new();

    render_header(&mut lines, message, style, indent);
    render_body(&mut lines, &message.text, width, style, indent);
    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("╰─".to_string(), style),
    ]));

    lines
}

fn base_style(author: Author) -> Style {
    Style::default().fg(match author {
        Author::User => Color::Rgb(255, 223, 128),
        Author::Bot => Color::Rgb(144, 238, 144),
    })
}

fn indent(author: Author) -> &'static str {
    match author {
        Author::User => "  ",
        Author::Bot => "",
    }
}

fn render_header(lines: &mut Vec<Line<'static>>, message: &Message, style: Style, indent: &str) {
    let label = match message.author {
        Author::User => USER_LABEL,
        Author::Bot => BOT_LABEL,
    };

    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("┌─ ".to_string(), style),
        Span::styled(label.to_string(), style.add_modifier(Modifier::BOLD)),
        Span::styled(" ".to_string(), style),
        Span::styled(
            message.sent_at.format("%H:%M").to_string(),
            style.add_modifier(Modifier::DIM),
        ),
    ]));
}

fn render_body(
    lines: &mut Vec<Line<'static>>,
    text: &str,
    width: u16,
    style: Style,
    indent: &str,
) {
    let prefix_width = indent.width() + BODY_PREFIX.width();
    let wrap_width = (width as usize).saturating_sub(prefix_width).max(1);

    for paragraph in text.split('\n') {
        for wrapped in wrap(paragraph, wrap_width) {
            lines.push(Line::from(vec![
                Span::styled(indent.to_string(), style),
                Span::styled(BODY_PREFIX.to_string(), style),
                Span::styled(wrapped.into_owned(), style),
            ]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_short_message_layout() {
        let lines = render(&Message::bot("Sunny, 22°C"), 40);
        assert_eq!(lines.len(), 3);
        assert!(plain(&lines[0]).contains(BOT_LABEL));
        assert_eq!(plain(&lines[1]), "│ Sunny, 22°C");
        assert_eq!(plain(&lines[2]), "╰─");
    }

    #[test]
    fn test_user_messages_are_indented() {
        let lines = render(&Message::user("Hi"), 40);
        assert!(plain(&lines[0]).starts_with("  ┌─ You"));
        assert_eq!(plain(&lines[1]), "  │ Hi");
    }

    #[test]
    fn test_long_message_wraps_to_width() {
        let text = "the forecast for cambridge tomorrow is overcast clouds with light rain";
        let lines = render(&Message::user(text), 20);
        let body: Vec<String> = lines[1..lines.len() - 1].iter().map(plain).collect();

        assert!(body.len() > 1);
        assert!(body.iter().all(|l| l.width() <= 20));
    }

    #[test]
    fn test_newlines_start_new_body_lines() {
        let lines = render(&Message::bot("Today: 12°C\nTomorrow: 14°C"), 40);
        assert_eq!(lines.len(), 4);
        assert_eq!(plain(&lines[2]), "│ Tomorrow: 14°C");
    }
}

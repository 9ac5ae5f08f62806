use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// One-line status shown above the input: a spinner while replies are outstanding.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    waiting: bool,
    /// Set by a cancel request; holds until nothing is pending.
    cancelling: bool,
    status_text: String,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirrors the number of submissions still awaiting a reply.
    pub fn sync_pending(&mut self, pending: usize) {
        self.waiting = pending > 0;
        if pending == 0 {
            self.cancelling = false;
        }
        self.status_text = match pending {
            0 => String::new(),
            _ if self.cancelling => "Cancelling...".to_string(),
            1 => "Waiting for reply...".to_string(),
            n => format!("Waiting for {} replies...", n),
        };
    }

    pub fn begin_cancelling(&mut self) {
        self.cancelling = true;
        self.status_text = "Cancelling...".to_string();
    }

    pub fn status(&self) -> &str {
        &self.status_text
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub fn update_spinner(&mut self) {
        if self.waiting {
            self.spinner_idx = self.spinner_idx.wrapping_add(1);
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let spinner = if self.waiting {
            SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()]
        } else {
            " "
        };

        let status_color = if self.waiting {
            Color::DarkGray
        } else {
            Color::Yellow
        };

        let status = Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(self.status_text.as_str(), Style::default().fg(status_color)),
        ]);

        frame.render_widget(Paragraph::new(status).alignment(Alignment::Left), area);
    }
}

use crate::models::{Author, Message};

/// Everything the chat screen shows: the message list, the input field and
/// the scroll position. The controller mutates it; the renderer only reads it.
#[derive(Debug, Default)]
pub struct ChatState {
    messages: Vec<Message>,
    input: String,
    /// Lines scrolled up from the newest line. Zero means the latest message is visible.
    scroll_back: u16,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message. Messages are never removed or reordered.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// `(author, text)` pairs, mostly for assertions.
    pub fn transcript(&self) -> Vec<(Author, &str)> {
        self.messages
            .iter()
            .map(|m| (m.author, m.text.as_str()))
            .collect()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Empties the input field and returns what it held.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    pub fn scroll_to_latest(&mut self) {
        self.scroll_back = 0;
    }

    pub fn is_showing_latest(&self) -> bool {
        self.scroll_back == 0
    }

    pub fn scroll_back(&self) -> u16 {
        self.scroll_back
    }

    /// Top line to render for a pane `height` lines tall holding `total_lines`.
    pub fn scroll_offset(&self, total_lines: u16, height: u16) -> u16 {
        let max_scroll = total_lines.saturating_sub(height);
        max_scroll - self.scroll_back.min(max_scroll)
    }

    /// Keeps `scroll_back` within the content so scrolling down responds at once.
    pub fn clamp_scroll(&mut self, total_lines: u16, height: u16) {
        self.scroll_back = self.scroll_back.min(total_lines.saturating_sub(height));
    }
}

use crate::{
    api::{ChatTransport, HttpTransport},
    chat_state::ChatState,
    config::Config,
    constants::TICK_RATE_MS,
    controller::ChatController,
    errors::ChatResult,
    key_handlers::{handle_key, KeyAction},
    status_indicator::StatusIndicator,
    ui,
};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{io, time::Duration};

pub struct App<T: ChatTransport> {
    pub state: ChatState,
    pub controller: ChatController<T>,
    pub status_indicator: StatusIndicator,
    pub should_quit: bool,
}

impl<T: ChatTransport> App<T> {
    /// Builds the app and shows the greeting.
    pub fn new(transport: T, config: &Config) -> Self {
        let mut state = ChatState::new();
        let mut controller = ChatController::new(transport, config);
        controller.initialize(&mut state);

        Self {
            state,
            controller,
            status_indicator: StatusIndicator::new(),
            should_quit: false,
        }
    }

    /// Applies every reply that has arrived since the last call.
    pub fn drain_completions(&mut self) {
        while let Some(completion) = self.controller.try_next_completion() {
            self.controller.handle_completion(&mut self.state, completion);
        }
        self.status_indicator
            .sync_pending(self.controller.pending_count());
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        match handle_key(key, &mut self.state) {
            KeyAction::Submit => {
                if let Some(seq) = self.controller.submit(&mut self.state) {
                    log::info!("Sent submission #{}", seq);
                }
            }
            KeyAction::CancelPending => {
                let cancelled = self.controller.cancel_all();
                if cancelled > 0 {
                    log::info!("Cancelling {} pending submission(s)", cancelled);
                    self.status_indicator.begin_cancelling();
                }
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Handled | KeyAction::Ignored => {}
        }
    }

    async fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> ChatResult<()> {
        while !self.should_quit {
            self.drain_completions();
            terminal.draw(|f| ui::draw(f, &mut self.state, &mut self.status_indicator))?;

            if event::poll(Duration::from_millis(TICK_RATE_MS))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.on_key(key);
                    }
                }
            }

            // Let request tasks make progress between frames.
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Cancels whatever is still in flight.
    pub fn shutdown(&mut self) {
        let cancelled = self.controller.cancel_all();
        if cancelled > 0 {
            log::info!("Dropping {} pending submission(s) on exit", cancelled);
        }
    }
}

/// Runs the terminal chat until the user quits.
pub async fn run(config: Config) -> ChatResult<()> {
    let transport = HttpTransport::from_config(&config)?;
    log::info!("Chatting with {}", transport.endpoint());
    let mut app = App::new(transport, &config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.event_loop(&mut terminal).await;
    app.shutdown();

    // Restore the terminal even if the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

//! The chat controller: turns user submissions into requests and replies into
//! bot messages on a [`ChatState`].
//!
//! Each submission gets a sequence number and runs its request on its own
//! tokio task. The task reports back over a channel; the owner of the
//! controller feeds those [`Completion`]s into [`ChatController::handle_completion`].
//! With [`ReplyOrder::Submission`] a reply that overtakes an earlier one is
//! held back until every earlier submission has resolved.

use crate::{
    api::ChatTransport,
    chat_state::ChatState,
    config::{Config, ReplyOrder},
    errors::ChatError,
    logging::summarize,
    models::Message,
    sanitize,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub enum Outcome {
    Replied(String),
    Failed(ChatError),
    Cancelled,
}

/// Result of one submission's request, tagged with its sequence number.
#[derive(Debug)]
pub struct Completion {
    pub seq: u64,
    pub outcome: Outcome,
}

pub struct ChatController<T: ChatTransport> {
    transport: Arc<T>,
    greeting: String,
    failure_message: String,
    reply_order: ReplyOrder,
    strip_markup: bool,
    next_seq: u64,
    /// Lowest sequence number whose reply has not been displayed yet.
    next_to_display: u64,
    pending: HashMap<u64, CancellationToken>,
    /// Resolved submissions waiting for an earlier one. `None` displays nothing.
    held: BTreeMap<u64, Option<Message>>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<T: ChatTransport> ChatController<T> {
    pub fn new(transport: T, config: &Config) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            transport: Arc::new(transport),
            greeting: config.greeting.clone(),
            failure_message: config.failure_message.clone(),
            reply_order: config.reply_order,
            strip_markup: config.strip_markup,
            next_seq: 0,
            next_to_display: 0,
            pending: HashMap::new(),
            held: BTreeMap::new(),
            completions_tx,
            completions_rx,
        }
    }

    /// Shows the greeting.
    pub fn initialize(&mut self, state: &mut ChatState) {
        state.push(Message::bot(self.greeting.clone()));
        state.scroll_to_latest();
    }

    /// Sends whatever is in the input field.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the raw text is
    /// appended as a user message, the input is cleared and a request task is
    /// spawned; the submission's sequence number is returned.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, state: &mut ChatState) -> Option<u64> {
        if state.input().trim().is_empty() {
            return None;
        }

        let text = state.take_input();
        state.push(Message::user(text.clone()));
        state.scroll_to_latest();

        let seq = self.next_seq;
        self.next_seq += 1;

        let token = CancellationToken::new();
        self.pending.insert(seq, token.clone());

        log::debug!("Submitting #{}: {}", seq, summarize(&text, 80));

        let transport = Arc::clone(&self.transport);
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => Outcome::Cancelled,
                result = transport.send(text) => match result {
                    Ok(reply) => Outcome::Replied(reply),
                    Err(e) => Outcome::Failed(e),
                },
            };
            // The controller may already be gone on shutdown.
            let _ = completions.send(Completion { seq, outcome });
        });

        Some(seq)
    }

    /// Applies a finished request to the display.
    pub fn handle_completion(&mut self, state: &mut ChatState, completion: Completion) {
        let Completion { seq, outcome } = completion;

        if self.pending.remove(&seq).is_none() {
            log::warn!("Ignoring completion for unknown submission #{}", seq);
            return;
        }

        let message = match outcome {
            Outcome::Replied(reply) => {
                log::debug!("Reply for #{} received", seq);
                Some(Message::bot(sanitize::reply_text(&reply, self.strip_markup)))
            }
            Outcome::Failed(e) => {
                if e.is_send_failure() {
                    log::warn!("Submission #{} failed: {}", seq, e);
                } else {
                    log::error!("Submission #{} hit an unexpected error: {}", seq, e);
                }
                Some(Message::bot(self.failure_message.clone()))
            }
            Outcome::Cancelled => {
                log::info!("Submission #{} cancelled", seq);
                None
            }
        };

        match self.reply_order {
            ReplyOrder::Arrival => {
                if let Some(message) = message {
                    state.push(message);
                }
            }
            ReplyOrder::Submission => {
                self.held.insert(seq, message);
                while let Some(ready) = self.held.remove(&self.next_to_display) {
                    if let Some(message) = ready {
                        state.push(message);
                    }
                    self.next_to_display += 1;
                }
            }
        }

        state.scroll_to_latest();
    }

    /// Waits for the next request to finish.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completions_rx.recv().await
    }

    /// Returns a finished request if one is ready, without waiting.
    pub fn try_next_completion(&mut self) -> Option<Completion> {
        self.completions_rx.try_recv().ok()
    }

    /// Drives every pending submission to completion.
    pub async fn settle(&mut self, state: &mut ChatState) {
        while !self.is_idle() {
            match self.next_completion().await {
                Some(completion) => self.handle_completion(state, completion),
                None => break,
            }
        }
    }

    /// Cancels one pending submission. Returns false if it is not pending.
    pub fn cancel(&self, seq: u64) -> bool {
        match self.pending.get(&seq) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancels every pending submission and returns how many there were.
    pub fn cancel_all(&self) -> usize {
        for token in self.pending.values() {
            token.cancel();
        }
        self.pending.len()
    }

    /// No request is in flight.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

//! Orchestration engine shared by the TUI runner and headless commands.

use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use testdeck_client::TestService;

use crate::actions::PollTimerSlot;
use crate::config::Settings;
use crate::message::Message;
use crate::process;
use crate::state::AppState;

/// Capacity of the unified message channel
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// Orchestration engine for testdeck.
///
/// Owns everything the event loop needs:
/// - TEA state
/// - The message channel that background tasks report on
/// - The test service used by actions
/// - The dashboard poll timer
/// - Shutdown signaling
pub struct Engine<S> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    service: S,

    poll_timer: PollTimerSlot,
}

impl<S> Engine<S>
where
    S: TestService + Clone + Send + Sync + 'static,
{
    pub fn new(service: S, settings: Settings) -> Self {
        let state = AppState::with_settings(settings);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            service,
            poll_timer: Arc::new(Mutex::new(None)),
        }
    }

    /// Load the catalog and open the configured start view.
    pub fn start(&mut self) {
        let view = self.state.settings.ui.default_view;
        info!("Starting on {:?}", view);
        self.process_message(Message::LoadCatalog);
        self.process_message(Message::SwitchView(view));
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(
            &mut self.state,
            msg,
            &self.service,
            &self.msg_tx,
            &self.poll_timer,
            &self.shutdown_rx,
        );
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Get a clone of the shutdown receiver for background tasks.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Cancel the poll timer and signal background tasks to stop.
    pub fn shutdown(&mut self) {
        debug!("Engine shutting down");
        if let Ok(mut guard) = self.poll_timer.lock() {
            if let Some(handle) = guard.take() {
                handle.abort();
            }
        }
        self.state.poller.stop();
        let _ = self.shutdown_tx.send(true);
    }
}

//! Message processing
//!
//! Runs the TEA update function until no follow-up message remains and
//! hands every resulting action to the action layer.

use tokio::sync::{mpsc, watch};

use testdeck_client::TestService;

use crate::actions::{handle_action, PollTimerSlot};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<S>(
    state: &mut AppState,
    message: Message,
    service: &S,
    msg_tx: &mpsc::Sender<Message>,
    poll_timer: &PollTimerSlot,
    shutdown_rx: &watch::Receiver<bool>,
) where
    S: TestService + Clone + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        for action in result.actions {
            handle_action(
                action,
                service,
                msg_tx.clone(),
                poll_timer,
                shutdown_rx.clone(),
            );
        }

        msg = result.message;
    }
}

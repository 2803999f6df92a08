//! One-shot dashboard poll timer
//!
//! At most one timer task is alive: arming a new one aborts the previous
//! handle held in the slot. The task sleeps for the interval and then sends
//! `DashboardPollTick` with its generation; the update loop decides whether
//! the tick still counts.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::message::Message;

/// Holder of the armed poll timer task
pub type PollTimerSlot = Arc<Mutex<Option<JoinHandle<()>>>>;

pub(super) fn schedule_poll(
    slot: &PollTimerSlot,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
    generation: u64,
    interval: Duration,
) {
    let handle = tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {
                trace!("Dashboard poll timer {} fired", generation);
                let _ = msg_tx.send(Message::DashboardPollTick { generation }).await;
            }
            _ = shutdown_rx.changed() => {
                debug!("Shutdown before dashboard poll timer {} fired", generation);
            }
        }
    });

    match slot.lock() {
        Ok(mut guard) => {
            if let Some(previous) = guard.replace(handle) {
                previous.abort();
            }
        }
        Err(e) => {
            // Poisoned slot: the tick generation still rejects stale timers
            debug!("Poll timer slot poisoned: {}", e);
        }
    }
}

pub(super) fn cancel_poll(slot: &PollTimerSlot) {
    if let Ok(mut guard) = slot.lock() {
        if let Some(handle) = guard.take() {
            handle.abort();
        }
    }
}

//! OS signals: SIGINT/SIGTERM become [`Message::Quit`]
//!
//! In raw mode Ctrl+C arrives as a key event, so this mostly matters for a
//! `kill` from another shell.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use testdeck_core::prelude::*;

use crate::message::Message;

/// Forward the first termination signal to the event loop.
///
/// The task ends on its own once `shutdown` turns `true`.
pub fn spawn_signal_handler(
    tx: mpsc::Sender<Message>,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let stopped = async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        };
        tokio::select! {
            received = termination() => match received {
                Ok(name) => {
                    info!("{} received, quitting", name);
                    let _ = tx.send(Message::Quit).await;
                }
                Err(e) => warn!("Signal handling disabled: {}", e),
            },
            _ = stopped => debug!("Signal handler stopped"),
        }
    })
}

/// Resolves with the name of the first termination signal
#[cfg(unix)]
async fn termination() -> Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let listen = |kind: SignalKind, name: &str| {
        signal(kind).map_err(|e| Error::terminal(format!("cannot listen for {name}: {e}")))
    };
    let mut sigint = listen(SignalKind::interrupt(), "SIGINT")?;
    let mut sigterm = listen(SignalKind::terminate(), "SIGTERM")?;

    Ok(tokio::select! {
        _ = sigint.recv() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
    })
}

#[cfg(not(unix))]
async fn termination() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::terminal(format!("cannot listen for Ctrl+C: {e}")))?;
    Ok("Ctrl+C")
}

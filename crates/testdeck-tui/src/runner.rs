//! Main TUI runner - entry point and event loop
//!
//! Creates an [`Engine`] for the given service, then alternates between
//! draining background messages, drawing a frame, and polling the terminal.

use testdeck_app::config::Settings;
use testdeck_app::{signals, Engine};
use testdeck_client::TestService;
use testdeck_core::prelude::*;

use super::{event, render, terminal};

/// Run the TUI against `service` until the user quits.
pub async fn run<S>(service: S, settings: Settings) -> Result<()>
where
    S: TestService + Clone + Send + Sync + 'static,
{
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let mut term = ratatui::init();

    info!("testdeck starting against {}", settings.server.base_url);
    let mut engine = Engine::new(service, settings);

    // SIGINT/SIGTERM quit too; the handler stops with the engine
    signals::spawn_signal_handler(engine.msg_sender(), engine.shutdown_receiver());

    engine.start();

    let result = run_loop(&mut term, &mut engine);
    if let Err(e) = &result {
        error!("Event loop failed: {}", e);
    }

    engine.shutdown();

    // Restore terminal
    ratatui::restore();

    result
}

/// Main event loop
fn run_loop<S>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<S>) -> Result<()>
where
    S: TestService + Clone + Send + Sync + 'static,
{
    while !engine.should_quit() {
        // Results of background tasks, poll timer ticks, signals
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        // Handle terminal events
        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    debug!("Event loop finished");
    Ok(())
}

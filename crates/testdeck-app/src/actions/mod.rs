//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every service call runs in its own tokio task and reports back with a
//! [`Message`]. Nothing here touches [`AppState`](crate::state::AppState).

use tokio::sync::{mpsc, watch};

use testdeck_client::TestService;

use crate::message::Message;
use crate::UpdateAction;

mod fetch;
mod polling;

pub use polling::PollTimerSlot;

/// Execute an action by spawning a background task
pub fn handle_action<S>(
    action: UpdateAction,
    service: &S,
    msg_tx: mpsc::Sender<Message>,
    poll_timer: &PollTimerSlot,
    shutdown_rx: watch::Receiver<bool>,
) where
    S: TestService + Clone + Send + Sync + 'static,
{
    match action {
        UpdateAction::FetchCatalog { generation } => {
            fetch::spawn_catalog(service.clone(), msg_tx, generation);
        }

        UpdateAction::FetchClassDetail {
            generation,
            class_name,
        } => {
            fetch::spawn_class_detail(service.clone(), msg_tx, generation, class_name);
        }

        UpdateAction::FetchMethodCode { unique_id } => {
            fetch::spawn_method_code(service.clone(), msg_tx, unique_id);
        }

        UpdateAction::SubmitRun { class_names } => {
            fetch::spawn_submit_run(service.clone(), msg_tx, class_names);
        }

        UpdateAction::FetchExecutions { generation, limit } => {
            fetch::spawn_executions(service.clone(), msg_tx, generation, limit);
        }

        UpdateAction::FetchExecutionResults {
            generation,
            execution_id,
        } => {
            fetch::spawn_execution_results(service.clone(), msg_tx, generation, execution_id);
        }

        UpdateAction::FetchDashboard { generation, origin } => {
            fetch::spawn_dashboard(service.clone(), msg_tx, generation, origin);
        }

        UpdateAction::RefreshCatalog => {
            fetch::spawn_refresh_catalog(service.clone(), msg_tx);
        }

        UpdateAction::FetchServerToday => {
            fetch::spawn_server_today(service.clone(), msg_tx);
        }

        UpdateAction::ScheduleDashboardPoll {
            generation,
            interval,
        } => {
            polling::schedule_poll(poll_timer, msg_tx, shutdown_rx, generation, interval);
        }

        UpdateAction::StopDashboardPolling => {
            polling::cancel_poll(poll_timer);
        }
    }
}

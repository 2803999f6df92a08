//! One task per service call, each reporting back with a result message

use tokio::sync::mpsc;
use tracing::{debug, warn};

use testdeck_client::TestService;

use crate::message::{FetchOrigin, Message};

/// Send a completion, ignoring a closed channel (engine shutting down)
async fn report(msg_tx: &mpsc::Sender<Message>, msg: Message) {
    if msg_tx.send(msg).await.is_err() {
        debug!("Message channel closed, dropping completion");
    }
}

fn describe(err: testdeck_core::Error) -> String {
    warn!("Service call failed: {}", err);
    err.to_string()
}

pub(super) fn spawn_catalog<S>(service: S, msg_tx: mpsc::Sender<Message>, generation: u64)
where
    S: TestService + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = service.catalog_tree().await.map_err(describe);
        report(&msg_tx, Message::CatalogLoaded { generation, result }).await;
    });
}

pub(super) fn spawn_class_detail<S>(
    service: S,
    msg_tx: mpsc::Sender<Message>,
    generation: u64,
    class_name: String,
) where
    S: TestService + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = service.class_detail(&class_name).await.map_err(describe);
        report(
            &msg_tx,
            Message::ClassDetailLoaded {
                generation,
                class_name,
                result,
            },
        )
        .await;
    });
}

pub(super) fn spawn_method_code<S>(service: S, msg_tx: mpsc::Sender<Message>, unique_id: String)
where
    S: TestService + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = service.method_code(&unique_id).await.map_err(describe);
        report(&msg_tx, Message::MethodCodeLoaded { unique_id, result }).await;
    });
}

pub(super) fn spawn_submit_run<S>(service: S, msg_tx: mpsc::Sender<Message>, class_names: Vec<String>)
where
    S: TestService + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = service.submit_run(&class_names).await.map_err(describe);
        report(
            &msg_tx,
            Message::RunSubmitted {
                class_names,
                result,
            },
        )
        .await;
    });
}

pub(super) fn spawn_executions<S>(
    service: S,
    msg_tx: mpsc::Sender<Message>,
    generation: u64,
    limit: usize,
) where
    S: TestService + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = service.executions(limit).await.map_err(describe);
        report(&msg_tx, Message::ExecutionsLoaded { generation, result }).await;
    });
}

pub(super) fn spawn_execution_results<S>(
    service: S,
    msg_tx: mpsc::Sender<Message>,
    generation: u64,
    execution_id: String,
) where
    S: TestService + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = service
            .execution_results(&execution_id)
            .await
            .map_err(describe);
        report(
            &msg_tx,
            Message::ExecutionResultsLoaded {
                generation,
                execution_id,
                result,
            },
        )
        .await;
    });
}

pub(super) fn spawn_dashboard<S>(
    service: S,
    msg_tx: mpsc::Sender<Message>,
    generation: u64,
    origin: FetchOrigin,
) where
    S: TestService + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = service.dashboard().await.map_err(describe);
        report(
            &msg_tx,
            Message::DashboardLoaded {
                generation,
                origin,
                result,
            },
        )
        .await;
    });
}

pub(super) fn spawn_refresh_catalog<S>(service: S, msg_tx: mpsc::Sender<Message>)
where
    S: TestService + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = service.refresh_catalog().await.map_err(describe);
        report(&msg_tx, Message::CatalogRefreshed { result }).await;
    });
}

pub(super) fn spawn_server_today<S>(service: S, msg_tx: mpsc::Sender<Message>)
where
    S: TestService + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = service.server_today().await.map_err(describe);
        report(&msg_tx, Message::ServerTodayLoaded { result }).await;
    });
}

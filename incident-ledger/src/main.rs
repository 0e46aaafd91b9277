use incident_ledger::poller::{ChangeWatcher, run_poller};
use incident_ledger::{
    BackgroundTasks, LedgerEvent, NotificationLog, ReportLedger, TaskKind, print_banner,
    setup_environment,
};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, work dir, logging)
    let config = setup_environment()?;
    print_banner();

    let db_path = config.db_path();
    tracing::info!(
        db = %db_path.display(),
        environment = %config.environment,
        timezone = %config.business_timezone,
        "Incident ledger starting..."
    );

    // 2. Open store and seed reference data
    let ledger = ReportLedger::open(&db_path)?;
    let seeded = ledger.ensure_seeded()?;
    tracing::info!(
        zones = seeded.zones_seeded,
        inventory = seeded.inventory_seeded,
        revision = ledger.revision()?,
        "Store ready"
    );
    let notifications = NotificationLog::new(ledger.storage().clone());

    // 3. Background tasks
    let mut tasks = BackgroundTasks::new();

    let events = ledger.subscribe();
    let token = tasks.shutdown_token();
    tasks.spawn("ledger_events", TaskKind::Listener, log_ledger_events(events, token));

    let (tx, mut rx) = mpsc::channel(16);
    let watcher = ChangeWatcher::new(ledger.clone(), notifications);
    let token = tasks.shutdown_token();
    tasks.spawn(
        "change_poller",
        TaskKind::Periodic,
        run_poller(watcher, config.poll_interval(), tx, token),
    );

    // 4. Log changes until Ctrl-C
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
            Some(changes) = rx.recv() => {
                if let Some(n) = &changes.new_notification {
                    tracing::info!(notification_id = %n.id, zone = ?n.zone, message = %n.message, "New notification");
                }
                tracing::debug!(revision = changes.revision, "Store revision changed");
            }
        }
    }

    tasks.shutdown().await;
    Ok(())
}

async fn log_ledger_events(mut rx: broadcast::Receiver<LedgerEvent>, shutdown: CancellationToken) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => return,
            event = rx.recv() => match event {
                Ok(event) => tracing::debug!(?event, "Ledger event"),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Ledger event listener lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return,
            },
        }
    }
}

use tableside::api::start_server;
use tableside::config::TablesideConfig;
use tableside::lifecycle::{setup_tracing, TablesideSystem};
use tableside::model::Menu;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() {
    setup_tracing();

    if let Err(e) = run().await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = TablesideConfig::from_env()?;
    info!(
        addr = %config.bind_addr(),
        tick_ms = config.tick_interval.as_millis() as u64,
        probability = config.activation_probability,
        "Starting tableside"
    );

    let mut system = TablesideSystem::new(&config);
    system.start_simulation(&config);

    let mut notifications = system.sink.subscribe();
    let listener = tokio::spawn(async move {
        loop {
            match notifications.recv().await {
                Ok(notification) => {
                    debug!(order_id = %notification.order_id, "Notification delivered");
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Notification listener lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let state = system.app_state(Menu::house());
    let served = start_server(&config.bind_addr(), state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {e}");
        }
        info!("Shutdown signal received");
    })
    .await;

    system.shutdown().await?;
    listener.abort();
    served?;

    Ok(())
}

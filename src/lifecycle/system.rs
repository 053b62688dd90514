use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::api::AppState;
use crate::clients::{SessionClient, TrackingClient};
use crate::clock::{Clock, SystemClock};
use crate::config::TablesideConfig;
use crate::model::Menu;
use crate::notify::BroadcastSink;
use crate::session_actor::{self, SessionContext};
use crate::simulator::{ActivationSource, RandomActivation, SimulatorHandle, StatusSimulator};
use crate::tracking_actor::{self, TrackingContext};

/// Notifications a slow listener may fall behind by before it starts missing some.
const NOTIFICATION_CAPACITY: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorTask(String),

    #[error("Simulator task failed: {0}")]
    Simulator(String),
}

/// Starts, wires and stops the service's actors and the status simulator.
///
/// # Architecture
///
/// - **Tracking actor**: the order status registry. Depends on the notification sink and
///   the clock.
/// - **Session actor**: one cart store per table. Depends on the tracking client, since
///   checkout registers the new order for tracking.
/// - **Simulator** (optional): advances subscribed orders through the tracking client.
///
/// # Example
///
/// ```ignore
/// let mut system = TablesideSystem::new(&config);
/// system.start_simulation(&config);
///
/// let session = system.session_client.open_session(Some(4), Theme::System).await?;
/// // ...
/// system.shutdown().await?;
/// ```
pub struct TablesideSystem {
    pub tracking_client: TrackingClient,
    pub session_client: SessionClient,
    pub sink: BroadcastSink,
    pub clock: Arc<dyn Clock>,
    simulator: Option<SimulatorHandle>,
    handles: Vec<JoinHandle<()>>,
}

impl TablesideSystem {
    /// Spawns every actor on the wall clock.
    pub fn new(config: &TablesideConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Spawns every actor with an injected clock.
    pub fn with_clock(config: &TablesideConfig, clock: Arc<dyn Clock>) -> Self {
        let sink = BroadcastSink::new(NOTIFICATION_CAPACITY);

        // 1. Create actors
        let (tracking_actor, tracking_client) = tracking_actor::new();
        let (session_actor, session_client) = session_actor::new();

        // 2. Start them with their dependencies
        let tracking_handle = tokio::spawn(
            tracking_actor.run(TrackingContext::new(Arc::new(sink.clone()), clock.clone())),
        );
        let session_handle = tokio::spawn(session_actor.run(SessionContext {
            tracking: tracking_client.clone(),
            clock: clock.clone(),
            rates: config.rates,
            max_table_number: config.max_table_number,
            estimated_time: config.estimated_time.clone(),
        }));

        Self {
            tracking_client,
            session_client,
            sink,
            clock,
            simulator: None,
            // Sessions hold a tracking client, so they must stop first.
            handles: vec![session_handle, tracking_handle],
        }
    }

    /// Start the simulator with the configured period and probability. Draws are seeded
    /// when `SIMULATOR_SEED` is set.
    pub fn start_simulation(&mut self, config: &TablesideConfig) {
        let source = match config.simulator_seed {
            Some(seed) => RandomActivation::seeded(seed),
            None => RandomActivation::from_os_rng(),
        };
        self.start_simulation_with(
            Box::new(source),
            config.activation_probability,
            config.tick_interval,
        );
    }

    /// Start the simulator with an explicit activation source. Replaces a running one.
    pub fn start_simulation_with(
        &mut self,
        source: Box<dyn ActivationSource>,
        probability: f64,
        period: std::time::Duration,
    ) {
        let simulator = StatusSimulator::new(self.tracking_client.clone(), source, probability);
        self.simulator = Some(simulator.spawn(period));
    }

    /// Shared state for the HTTP handlers.
    pub fn app_state(&self, menu: Menu) -> Arc<AppState> {
        Arc::new(AppState::new(
            self.clock.clone(),
            menu,
            self.tracking_client.clone(),
        ))
    }

    /// Stop the simulator, close every actor and wait for them to finish.
    ///
    /// Any client clone handed out (to HTTP state, for example) must be dropped before this
    /// is called, or the owning actor will not see its channel close.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        if let Some(simulator) = self.simulator {
            simulator.stop().await.map_err(|e| {
                error!("Simulator task failed: {e}");
                SystemError::Simulator(e.to_string())
            })?;
        }

        drop(self.session_client);
        drop(self.tracking_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {e}");
                return Err(SystemError::ActorTask(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

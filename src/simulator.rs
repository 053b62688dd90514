//! Simulated kitchen and delivery progress.
//!
//! On every tick the [`StatusSimulator`] snapshots the subscribed orders and, for each one,
//! draws from its [`ActivationSource`]. A draw below the activation probability asks the
//! tracking actor to advance that order by one step. The actor re-reads the status itself,
//! so a step is never skipped or repeated and an order unsubscribed after the snapshot is
//! left alone.

use crate::clients::TrackingClient;
use crate::tracking_actor::TrackingError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Default time between ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Default chance that a subscribed order moves on during one tick.
pub const DEFAULT_ACTIVATION_PROBABILITY: f64 = 0.10;

/// Uniform draws in `[0, 1)`.
pub trait ActivationSource: Send {
    fn draw(&mut self) -> f64;
}

/// Activation backed by a [`StdRng`].
pub struct RandomActivation {
    rng: StdRng,
}

impl RandomActivation {
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible draws.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ActivationSource for RandomActivation {
    fn draw(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Subscribed orders in the snapshot.
    pub examined: usize,
    /// Orders that actually moved to a new status.
    pub advanced: usize,
}

pub struct StatusSimulator {
    tracking: TrackingClient,
    source: Box<dyn ActivationSource>,
    probability: f64,
}

impl StatusSimulator {
    pub fn new(tracking: TrackingClient, source: Box<dyn ActivationSource>, probability: f64) -> Self {
        Self {
            tracking,
            source,
            probability: probability.clamp(0.0, 1.0),
        }
    }

    /// Run one simulation step.
    pub async fn tick(&mut self) -> Result<TickReport, TrackingError> {
        let snapshot = self.tracking.subscribed_orders().await?;
        let mut report = TickReport {
            examined: snapshot.len(),
            advanced: 0,
        };

        for order_id in snapshot {
            if self.source.draw() >= self.probability {
                continue;
            }
            if let Some(update) = self.tracking.advance(order_id.clone()).await? {
                debug!(%order_id, status = %update.status, "Advanced");
                report.advanced += 1;
            }
        }

        Ok(report)
    }

    /// Tick every `period` in the background until stopped. The first tick fires one
    /// period from now.
    pub fn spawn(mut self, period: Duration) -> SimulatorHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(?period, probability = self.probability, "Simulator started");

            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => match self.tick().await {
                        Ok(report) if report.advanced > 0 => {
                            info!(examined = report.examined, advanced = report.advanced, "Tick");
                        }
                        Ok(report) => debug!(examined = report.examined, "Tick"),
                        Err(e) => warn!(error = %e, "Tick failed"),
                    },
                }
            }

            info!("Simulator stopped");
        });

        SimulatorHandle {
            stop: Some(stop_tx),
            task,
        }
    }
}

/// Owner of a running simulator.
pub struct SimulatorHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SimulatorHandle {
    /// Stop ticking. A tick already in progress finishes first; none start afterwards.
    pub async fn stop(mut self) -> Result<(), tokio::task::JoinError> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        (&mut self.task).await
    }
}

impl Drop for SimulatorHandle {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

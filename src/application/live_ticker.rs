// Live ticker - Periodic random drift on the selected vessel's snapshot
use crate::application::simulation::centered_jitter;
use crate::domain::vessel::Vessel;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::{oneshot, watch, Mutex};
use tokio::task::JoinHandle;

pub const DEFAULT_LIVE_INTERVAL: Duration = Duration::from_secs(5);

const SPEED_SPAN: f64 = 2.0;
const RPM_SPAN: f64 = 50.0;
const FUEL_SPAN: f64 = 5.0;

/// One simulated live update. Speed and RPM never go below zero.
pub fn live_tick<R: Rng + ?Sized>(vessel: &Vessel, now: DateTime<Utc>, rng: &mut R) -> Vessel {
    let mut next = vessel.clone();
    next.speed = (vessel.speed + centered_jitter(rng, SPEED_SPAN)).max(0.0);
    next.rpm_portside = (vessel.rpm_portside + centered_jitter(rng, RPM_SPAN)).max(0.0);
    next.rpm_starboard = (vessel.rpm_starboard + centered_jitter(rng, RPM_SPAN)).max(0.0);
    next.rpm_center = (vessel.rpm_center + centered_jitter(rng, RPM_SPAN)).max(0.0);
    next.fuel_consumption = vessel.fuel_consumption + centered_jitter(rng, FUEL_SPAN);
    next.last_update = now;
    next
}

/// Running ticker for one vessel. Dropping the handle without `stop` leaves
/// the task to exit once its stop sender is gone.
pub struct TickerHandle {
    vessel_id: String,
    snapshot: watch::Receiver<Vessel>,
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl TickerHandle {
    pub fn vessel_id(&self) -> &str {
        &self.vessel_id
    }

    pub fn subscribe(&self) -> watch::Receiver<Vessel> {
        self.snapshot.clone()
    }

    /// Cancel the task and wait for it to finish.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(());
        if let Err(e) = self.task.await {
            tracing::warn!("Live ticker for {} ended abnormally: {}", self.vessel_id, e);
        }
        tracing::debug!("Live ticker for {} stopped", self.vessel_id);
    }
}

pub struct LiveTicker;

impl LiveTicker {
    pub fn spawn(vessel: Vessel, interval: Duration, seed: Option<u64>) -> TickerHandle {
        let vessel_id = vessel.id.clone();
        let (snapshot_tx, snapshot_rx) = watch::channel(vessel);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        tracing::info!("Starting live ticker for {} every {:?}", vessel_id, interval);

        let task = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(interval);
            // The first tick completes immediately; the snapshot already holds it
            ticks.tick().await;

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticks.tick() => {
                        let next = live_tick(&snapshot_tx.borrow(), Utc::now(), &mut rng);
                        snapshot_tx.send_replace(next);
                    }
                }
            }
        });

        TickerHandle {
            vessel_id,
            snapshot: snapshot_rx,
            stop_tx,
            task,
        }
    }
}

/// Owns at most one running ticker, for the currently selected vessel.
pub struct LiveFeed {
    interval: Duration,
    seed: Option<u64>,
    current: Mutex<Option<TickerHandle>>,
}

impl LiveFeed {
    pub fn new(interval: Duration, seed: Option<u64>) -> Self {
        Self {
            interval,
            seed,
            current: Mutex::new(None),
        }
    }

    /// Subscribe to the live snapshot of `vessel`. Selecting a different
    /// vessel stops the running ticker and starts a fresh one from `vessel`.
    pub async fn select(&self, vessel: Vessel) -> watch::Receiver<Vessel> {
        let mut current = self.current.lock().await;

        if let Some(handle) = current.as_ref() {
            if handle.vessel_id() == vessel.id {
                return handle.subscribe();
            }
        }

        if let Some(previous) = current.take() {
            previous.stop().await;
        }

        let handle = LiveTicker::spawn(vessel, self.interval, self.seed);
        let rx = handle.subscribe();
        *current = Some(handle);
        rx
    }

    pub async fn selected(&self) -> Option<String> {
        self.current
            .lock()
            .await
            .as_ref()
            .map(|h| h.vessel_id().to_string())
    }

    pub async fn shutdown(&self) {
        if let Some(handle) = self.current.lock().await.take() {
            handle.stop().await;
        }
    }
}

//! In-process broadcast of settings changes.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use ramadan_core::{CalculationSettings, SettingsStore};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Holds the current settings; subscribers are woken on every change.
#[derive(Debug)]
pub struct SettingsBus {
    tx: watch::Sender<CalculationSettings>,
}

impl SettingsBus {
    #[must_use]
    pub fn new(initial: CalculationSettings) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replaces the current settings. Returns `false`, without waking
    /// subscribers, when nothing changed.
    pub fn publish(&self, settings: CalculationSettings) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == settings {
                false
            } else {
                *current = settings;
                true
            }
        })
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CalculationSettings> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn current(&self) -> CalculationSettings {
        self.tx.borrow().clone()
    }
}

/// Polls the store's modification time and publishes the settings whenever
/// the file changes, so edits from another process reach the bus.
pub fn spawn_store_watcher(
    store: SettingsStore,
    bus: Arc<SettingsBus>,
    every: Duration,
) -> JoinHandle<()> {
    let mut last_seen: Option<SystemTime> = store.modified_at().ok().flatten();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let modified = match store.modified_at() {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(error = %e, "cannot stat settings store");
                    continue;
                }
            };
            if modified == last_seen {
                continue;
            }
            last_seen = modified;
            match store.load_settings() {
                Ok(settings) => {
                    if bus.publish(settings) {
                        tracing::info!("settings changed on disk");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "cannot reload settings store"),
            }
        }
    })
}

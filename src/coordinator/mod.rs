// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic state coordination.
//!
//! A [`PodCoordinator`] owns the single in-memory snapshot of a pod's state.
//! On a fixed schedule (or on explicit request) it gathers the five device
//! fetches concurrently, merges them into one [`PodState`], swaps the
//! snapshot wholesale, and notifies observers through a watch channel.
//! Write-through helpers patch the snapshot field-by-field between refreshes
//! via [`apply_patch`](PodCoordinator::apply_patch).
//!
//! Refresh is fail-fast: if any constituent fetch fails, the whole batch
//! fails as one [`RefreshError`] and the previous snapshot is retained
//! unchanged.

mod firmware;

pub use firmware::{DEFAULT_FIRMWARE_INTERVAL, FirmwareCoordinator};

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::PodClient;
use crate::error::RefreshError;
use crate::state::{PodState, SideVitals};
use crate::types::Side;

/// Default period between scheduled device-state refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Coordinator for one pod's cached state.
///
/// Exactly one coordinator owns exactly one snapshot. Readers never hold the
/// raw snapshot - they either call [`data`](Self::data) for the current
/// `Arc` or subscribe to the watch channel and receive every replacement.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use freesleep_lib::{PodConfig, PodCoordinator};
///
/// # async fn example() -> freesleep_lib::Result<()> {
/// let client = PodConfig::new("http://192.168.1.50:3000")?.into_client()?;
/// let coordinator = Arc::new(PodCoordinator::new(client));
///
/// let snapshot = coordinator.refresh().await?;
/// println!("left target: {}", snapshot.status.left.target_temperature_f);
///
/// // Background polling
/// let _handle = Arc::clone(&coordinator)
///     .spawn_polling(freesleep_lib::coordinator::DEFAULT_REFRESH_INTERVAL);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PodCoordinator {
    client: PodClient,
    snapshot: RwLock<Option<Arc<PodState>>>,
    tx: watch::Sender<Option<Arc<PodState>>>,
}

impl PodCoordinator {
    /// Creates a coordinator with no snapshot yet.
    #[must_use]
    pub fn new(client: PodClient) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            client,
            snapshot: RwLock::new(None),
            tx,
        }
    }

    /// Returns the client this coordinator fetches with.
    #[must_use]
    pub fn client(&self) -> &PodClient {
        &self.client
    }

    /// Returns the current snapshot, if at least one refresh has succeeded.
    #[must_use]
    pub fn data(&self) -> Option<Arc<PodState>> {
        self.snapshot.read().clone()
    }

    /// Subscribes to snapshot replacements.
    ///
    /// The receiver observes every successful refresh and every
    /// write-through patch.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<PodState>>> {
        self.tx.subscribe()
    }

    /// Fetches all tracked remote state and replaces the snapshot.
    ///
    /// The five fetches (status, settings, vitals for both sides, services)
    /// run concurrently; total latency is bounded by the slowest call, and
    /// the first failure aborts the batch.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError`] wrapping the first failing fetch. The
    /// previous snapshot is retained unchanged on failure.
    pub async fn refresh(&self) -> Result<Arc<PodState>, RefreshError> {
        let result = tokio::try_join!(
            self.client.fetch_status(),
            self.client.fetch_settings(),
            self.client.fetch_vitals(Side::Left),
            self.client.fetch_vitals(Side::Right),
            self.client.fetch_services(),
        );

        let (status, settings, vitals_left, vitals_right, services) = match result {
            Ok(parts) => parts,
            Err(error) => {
                tracing::warn!(host = %self.client.base_url(), %error, "Refresh failed");
                return Err(RefreshError::from(error));
            }
        };

        let snapshot = Arc::new(PodState {
            status,
            settings,
            vitals: SideVitals {
                left: vitals_left,
                right: vitals_right,
            },
            services,
        });

        self.store(snapshot.clone());
        Ok(snapshot)
    }

    /// Applies a pure mutation to the cached snapshot and notifies observers.
    ///
    /// Used by write-through helpers right after a successful mutating call,
    /// so observers see the change before the next scheduled refresh. A no-op
    /// when no snapshot exists yet.
    ///
    /// If a refresh is in flight while a patch lands, whichever completes
    /// last wins; the next scheduled refresh re-reads true device state, so
    /// the cache is at most one interval away from correct.
    pub fn apply_patch(&self, mutate: impl FnOnce(&mut PodState)) {
        let patched = {
            let guard = self.snapshot.read();
            let Some(current) = guard.as_ref() else {
                return;
            };

            let mut state = PodState::clone(current);
            mutate(&mut state);
            Arc::new(state)
        };

        self.store(patched);
    }

    /// Swaps the snapshot and signals all watchers.
    fn store(&self, snapshot: Arc<PodState>) {
        *self.snapshot.write() = Some(snapshot.clone());
        let _ = self.tx.send(Some(snapshot));
    }

    /// Spawns a background task refreshing this coordinator on a fixed
    /// period.
    ///
    /// Failures are logged and do not stop the loop; retry/backoff beyond
    /// the next tick is the caller's concern. Drop or abort the returned
    /// handle to stop polling.
    pub fn spawn_polling(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if let Err(error) = self.refresh().await {
                    tracing::error!(host = %self.client.base_url(), %error, "Scheduled refresh failed");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::state::{DeviceStatus, Services, Settings, Vitals};

    fn sample_state() -> PodState {
        let status: DeviceStatus = serde_json::from_value(json!({
            "left": {
                "currentTemperatureF": 75, "targetTemperatureF": 75,
                "secondsRemaining": 100, "isOn": true, "isAlarmVibrating": false,
            },
            "right": {
                "currentTemperatureF": 65, "targetTemperatureF": 77,
                "secondsRemaining": 0, "isOn": false, "isAlarmVibrating": false,
            },
            "hubVersion": "Pod 4",
            "freeSleep": {"version": "2.1.3"},
            "settings": {"ledBrightness": 40},
        }))
        .unwrap();

        let settings: Settings = serde_json::from_value(json!({
            "rebootDaily": false,
            "left": {"awayMode": false},
            "right": {"awayMode": false},
            "primePodDaily": {"enabled": true, "time": "14:00"},
        }))
        .unwrap();

        PodState {
            status,
            settings,
            vitals: SideVitals {
                left: Vitals {
                    heart_rate: Some(60.0),
                    respiration_rate: Some(15.0),
                },
                right: Vitals {
                    heart_rate: None,
                    respiration_rate: None,
                },
            },
            services: Services::new(),
        }
    }

    fn coordinator() -> PodCoordinator {
        let client = crate::PodConfig::new("http://127.0.0.1:9")
            .unwrap()
            .into_client()
            .unwrap();
        PodCoordinator::new(client)
    }

    #[test]
    fn data_is_none_before_first_refresh() {
        assert!(coordinator().data().is_none());
    }

    #[test]
    fn apply_patch_without_snapshot_is_a_no_op() {
        let coordinator = coordinator();
        coordinator.apply_patch(|state| state.status.left.is_on = false);
        assert!(coordinator.data().is_none());
    }

    #[tokio::test]
    async fn apply_patch_replaces_snapshot_and_notifies() {
        let coordinator = coordinator();
        coordinator.store(Arc::new(sample_state()));

        let rx = coordinator.subscribe();
        coordinator.apply_patch(|state| {
            state.status.side_mut(Side::Left).target_temperature_f = 70.0;
        });

        let data = coordinator.data().unwrap();
        assert_eq!(data.status.left.target_temperature_f, 70.0);
        // Untouched fields survive the clone-and-swap.
        assert_eq!(data.status.right.target_temperature_f, 77.0);

        let seen = rx.borrow().clone().unwrap();
        assert_eq!(seen.status.left.target_temperature_f, 70.0);
    }

    #[test]
    fn store_replaces_wholesale() {
        let coordinator = coordinator();
        coordinator.store(Arc::new(sample_state()));

        let mut replacement = sample_state();
        replacement.status.left.is_on = false;
        coordinator.store(Arc::new(replacement));

        assert!(!coordinator.data().unwrap().status.left.is_on);
    }
}

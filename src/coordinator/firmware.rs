// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Firmware version coordination.
//!
//! Kept separate from [`PodCoordinator`](super::PodCoordinator) so the
//! remote version-check host is not hit every 30 seconds: this coordinator
//! refreshes hourly, and its failures never invalidate device-state
//! refreshes (or vice versa).

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::PodClient;
use crate::error::RefreshError;
use crate::state::FirmwareState;

/// Default period between firmware version checks.
pub const DEFAULT_FIRMWARE_INTERVAL: Duration = Duration::from_secs(3600);

/// Coordinator for the firmware version aggregate.
#[derive(Debug)]
pub struct FirmwareCoordinator {
    client: PodClient,
    snapshot: RwLock<Option<Arc<FirmwareState>>>,
    tx: watch::Sender<Option<Arc<FirmwareState>>>,
}

impl FirmwareCoordinator {
    /// Creates a coordinator with no firmware state yet.
    #[must_use]
    pub fn new(client: PodClient) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            client,
            snapshot: RwLock::new(None),
            tx,
        }
    }

    /// Returns the current firmware state, if a refresh has succeeded.
    #[must_use]
    pub fn data(&self) -> Option<Arc<FirmwareState>> {
        self.snapshot.read().clone()
    }

    /// Subscribes to firmware state replacements.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<FirmwareState>>> {
        self.tx.subscribe()
    }

    /// Fetches installed and latest versions concurrently.
    ///
    /// An unknown latest version (the remote file without a `version` field)
    /// is not a failure; an unreachable pod is.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError`] wrapping the failing fetch; the previous
    /// state is retained unchanged.
    pub async fn refresh(&self) -> Result<Arc<FirmwareState>, RefreshError> {
        let result = tokio::try_join!(
            self.client.fetch_current_version(),
            self.client.fetch_latest_version(),
        );

        let (current_version, latest_version) = match result {
            Ok(versions) => versions,
            Err(error) => {
                tracing::warn!(host = %self.client.base_url(), %error, "Firmware refresh failed");
                return Err(RefreshError::from(error));
            }
        };

        let snapshot = Arc::new(FirmwareState {
            current_version: Some(current_version),
            latest_version,
        });

        *self.snapshot.write() = Some(snapshot.clone());
        let _ = self.tx.send(Some(snapshot.clone()));
        Ok(snapshot)
    }

    /// Spawns a background task refreshing the firmware state on a fixed
    /// period. Failures are logged and the loop continues.
    pub fn spawn_polling(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if let Err(error) = self.refresh().await {
                    tracing::error!(host = %self.client.base_url(), %error, "Scheduled firmware refresh failed");
                }
            }
        })
    }
}

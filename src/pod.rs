// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pod device model and write-through actions.
//!
//! Every user-facing action follows one fixed protocol: build the minimal
//! JSON patch body for the target field, call the transport mutator (errors
//! propagate unchanged, and the cache is not touched on failure), then apply
//! the same change to the coordinator's snapshot so observers see it before
//! the next scheduled refresh. The two steps are sequential within the
//! process; a crash between them leaves the cache at most one refresh
//! interval away from correct.

use std::sync::Arc;

use serde_json::{Value, json};
use uuid::Uuid;

use crate::client::PodClient;
use crate::config::{PodConfig, validate_connection};
use crate::coordinator::PodCoordinator;
use crate::error::{Error, RequestError};
use crate::state::{PodState, ServiceHealth, SideSettings, SideStatus, Vitals};
use crate::types::{Brightness, DayOfWeek, Side};

/// Manufacturer of the underlying hardware.
pub const MANUFACTURER: &str = "Eight Sleep";

/// A Free Sleep pod: one device, two sides, one coordinator.
///
/// # Examples
///
/// ```no_run
/// use freesleep_lib::{Pod, PodConfig};
/// use freesleep_lib::types::Side;
///
/// # async fn example() -> freesleep_lib::Result<()> {
/// let pod = Pod::connect(PodConfig::new("http://192.168.1.50:3000")?).await?;
///
/// pod.set_active(Side::Left, true).await?;
/// pod.set_target_temperature(Side::Left, 70.0).await?;
///
/// // The cache reflects the action immediately.
/// let status = pod.side_status(Side::Left).unwrap();
/// assert!(status.is_on);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Pod {
    id: Uuid,
    name: String,
    client: PodClient,
    coordinator: Arc<PodCoordinator>,
}

impl Pod {
    /// Connects to a pod: validates reachability, takes the hub name from the
    /// device, and performs the first refresh so a snapshot exists before any
    /// reader arrives.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`](crate::error::ConfigError) variants for an
    /// unreachable pod and [`RefreshError`](crate::error::RefreshError) if
    /// the first refresh fails.
    pub async fn connect(config: PodConfig) -> Result<Self, Error> {
        let client = config.into_client()?;
        let name = validate_connection(&client).await?;

        let pod = Self::new(client, name);
        pod.coordinator.refresh().await?;
        Ok(pod)
    }

    /// Creates a pod around an existing client without touching the network.
    ///
    /// The snapshot is empty until the first [`refresh`](Self::refresh).
    #[must_use]
    pub fn new(client: PodClient, name: impl Into<String>) -> Self {
        let coordinator = Arc::new(PodCoordinator::new(client.clone()));
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            client,
            coordinator,
        }
    }

    /// Returns the pod's unique identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the hub name reported by the device (e.g. `"Pod 4"`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the identifier for one side of this pod, as used by the
    /// set-schedule service (`"<pod-id>_<side>"`).
    #[must_use]
    pub fn side_id(&self, side: Side) -> String {
        format!("{}_{side}", self.id)
    }

    /// Returns the client this pod talks through.
    #[must_use]
    pub fn client(&self) -> &PodClient {
        &self.client
    }

    /// Returns the coordinator owning this pod's snapshot.
    #[must_use]
    pub fn coordinator(&self) -> &Arc<PodCoordinator> {
        &self.coordinator
    }

    // =========================================================================
    // Snapshot readers
    // =========================================================================

    /// Returns the current snapshot, if one exists.
    #[must_use]
    pub fn data(&self) -> Option<Arc<PodState>> {
        self.coordinator.data()
    }

    /// Returns the cached operational status for one side.
    #[must_use]
    pub fn side_status(&self, side: Side) -> Option<SideStatus> {
        self.data().map(|state| state.status.side(side).clone())
    }

    /// Returns the cached settings for one side.
    #[must_use]
    pub fn side_settings(&self, side: Side) -> Option<SideSettings> {
        self.data().map(|state| state.settings.side(side).clone())
    }

    /// Returns the cached vitals for one side.
    #[must_use]
    pub fn side_vitals(&self, side: Side) -> Option<Vitals> {
        self.data().map(|state| state.vitals.side(side).clone())
    }

    /// Re-fetches all tracked state on demand.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError`](crate::error::RefreshError) on failure; the
    /// previous snapshot is retained.
    pub async fn refresh(&self) -> Result<Arc<PodState>, Error> {
        Ok(self.coordinator.refresh().await?)
    }

    // =========================================================================
    // Side-scoped write-through actions
    // =========================================================================

    /// Turns temperature control on or off for one side.
    ///
    /// # Errors
    ///
    /// Propagates the request error; the cache is left untouched on failure.
    pub async fn set_active(&self, side: Side, active: bool) -> Result<(), RequestError> {
        let body = json!({ side.as_str(): { "isOn": active } });
        self.client.update_status(&body).await?;

        self.coordinator
            .apply_patch(|state| state.status.side_mut(side).is_on = active);
        Ok(())
    }

    /// Sets the target temperature for one side, in Fahrenheit.
    ///
    /// The device accepts 55-110 F in 0.5 F steps and clamps out-of-range
    /// values itself.
    ///
    /// # Errors
    ///
    /// Propagates the request error; the cache is left untouched on failure.
    pub async fn set_target_temperature(
        &self,
        side: Side,
        temperature_f: f64,
    ) -> Result<(), RequestError> {
        let body = json!({ side.as_str(): { "targetTemperatureF": temperature_f } });
        self.client.update_status(&body).await?;

        self.coordinator
            .apply_patch(|state| state.status.side_mut(side).target_temperature_f = temperature_f);
        Ok(())
    }

    /// Enables or disables away mode for one side.
    ///
    /// # Errors
    ///
    /// Propagates the request error; the cache is left untouched on failure.
    pub async fn set_away_mode(&self, side: Side, enabled: bool) -> Result<(), RequestError> {
        let body = json!({ side.as_str(): { "awayMode": enabled } });
        self.client.update_settings(&body).await?;

        self.coordinator
            .apply_patch(|state| state.settings.side_mut(side).away_mode = enabled);
        Ok(())
    }

    /// Replaces the sleep schedule for one side on the given days.
    ///
    /// The schedule must already be in Fahrenheit; use
    /// [`schedule_to_fahrenheit`](crate::schedule::schedule_to_fahrenheit)
    /// first when the caller's unit differs. Schedules are not part of the
    /// snapshot, so there is nothing to patch.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn set_schedule(
        &self,
        side: Side,
        days: &[DayOfWeek],
        schedule: &Value,
    ) -> Result<(), RequestError> {
        let mut by_day = serde_json::Map::new();
        for day in days {
            by_day.insert(day.as_str().to_string(), schedule.clone());
        }

        let body = json!({ side.as_str(): Value::Object(by_day) });
        self.client.update_schedule(&body).await
    }

    // =========================================================================
    // Pod-scoped write-through actions
    // =========================================================================

    /// Sets the hub LED brightness.
    ///
    /// # Errors
    ///
    /// Propagates the request error; the cache is left untouched on failure.
    pub async fn set_led_brightness(&self, brightness: Brightness) -> Result<(), RequestError> {
        let body = json!({ "settings": { "ledBrightness": brightness.value() } });
        self.client.update_status(&body).await?;

        self.coordinator
            .apply_patch(|state| state.status.settings.led_brightness = brightness.value());
        Ok(())
    }

    /// Enables or disables daily priming.
    ///
    /// # Errors
    ///
    /// Propagates the request error; the cache is left untouched on failure.
    pub async fn set_prime_daily(&self, enabled: bool) -> Result<(), RequestError> {
        let body = json!({ "primePodDaily": { "enabled": enabled } });
        self.client.update_settings(&body).await?;

        self.coordinator
            .apply_patch(|state| state.settings.prime_pod_daily.enabled = enabled);
        Ok(())
    }

    /// Sets the daily priming time (`HH:MM`).
    ///
    /// # Errors
    ///
    /// Propagates the request error; the cache is left untouched on failure.
    pub async fn set_prime_daily_time(&self, time: &str) -> Result<(), RequestError> {
        let body = json!({ "primePodDaily": { "time": time } });
        self.client.update_settings(&body).await?;

        let time = time.to_string();
        self.coordinator
            .apply_patch(move |state| state.settings.prime_pod_daily.time = time);
        Ok(())
    }

    /// Enables or disables the daily reboot.
    ///
    /// # Errors
    ///
    /// Propagates the request error; the cache is left untouched on failure.
    pub async fn set_reboot_daily(&self, enabled: bool) -> Result<(), RequestError> {
        let body = json!({ "rebootDaily": enabled });
        self.client.update_settings(&body).await?;

        self.coordinator
            .apply_patch(|state| state.settings.reboot_daily = enabled);
        Ok(())
    }

    /// Enables or disables the biometrics service.
    ///
    /// # Errors
    ///
    /// Propagates the request error; the cache is left untouched on failure.
    pub async fn set_biometrics(&self, enabled: bool) -> Result<(), RequestError> {
        let body = json!({ "biometrics": { "enabled": enabled } });
        self.client.update_services(&body).await?;

        self.coordinator.apply_patch(|state| {
            state
                .services
                .entry("biometrics".to_string())
                .or_insert_with(|| ServiceHealth {
                    enabled,
                    jobs: std::collections::HashMap::new(),
                })
                .enabled = enabled;
        });
        Ok(())
    }

    /// Reboots the pod.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn reboot(&self) -> Result<(), RequestError> {
        self.client.run_jobs(&["reboot"]).await
    }

    /// Starts a firmware update on the pod.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn install_firmware_update(&self) -> Result<(), RequestError> {
        self.client.run_jobs(&["update"]).await
    }
}

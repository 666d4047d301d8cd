// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed snapshot model of a pod's remote state.
//!
//! A [`PodState`] is the single aggregate the coordinator caches: status,
//! settings, per-side vitals, and service health, decoded from the four
//! device endpoints of one refresh batch. It is only ever built from a fully
//! successful batch - both sides are always present, and there is no such
//! thing as a partial snapshot.
//!
//! [`FirmwareState`] is a second, much smaller aggregate on its own refresh
//! schedule, since the latest-version source is a remote service.

mod services;
mod settings;
mod status;
mod vitals;

pub use services::{JobHealth, JobStatus, ServiceHealth, Services};
pub use settings::{PrimePodDaily, Settings, SideSettings};
pub use status::{DeviceStatus, FirmwareInfo, HubSettings, SideStatus};
pub use vitals::{SideVitals, Vitals};

use serde::{Deserialize, Serialize};

/// Complete cached state of one pod at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodState {
    /// Operational status per side plus hub fields.
    pub status: DeviceStatus,
    /// Per-side and global configuration.
    pub settings: Settings,
    /// Biometric summaries for both sides.
    pub vitals: SideVitals,
    /// Background service health.
    pub services: Services,
}

/// Firmware version aggregate, refreshed on its own (hourly) schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FirmwareState {
    /// Version currently installed on the pod.
    pub current_version: Option<String>,
    /// Latest version published upstream, if known.
    pub latest_version: Option<String>,
}

impl FirmwareState {
    /// Returns `true` if both versions are known and differ.
    #[must_use]
    pub fn update_available(&self) -> bool {
        match (&self.current_version, &self.latest_version) {
            (Some(current), Some(latest)) => current != latest,
            _ => false,
        }
    }
}

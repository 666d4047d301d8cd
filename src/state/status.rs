// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device status aggregate, as reported by `/api/deviceStatus`.

use serde::{Deserialize, Serialize};

use crate::types::Side;

/// Operational status of one side of the pod.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideStatus {
    /// Whether temperature control is active on this side.
    pub is_on: bool,
    /// Current water temperature in Fahrenheit.
    pub current_temperature_f: f64,
    /// Target water temperature in Fahrenheit.
    pub target_temperature_f: f64,
    /// Raw temperature level (-100 to 100) the firmware steers by.
    #[serde(default)]
    pub current_temperature_level: i32,
    /// Seconds until temperature control turns itself off.
    #[serde(default)]
    pub seconds_remaining: u32,
    /// Whether the alarm is currently vibrating.
    #[serde(default)]
    pub is_alarm_vibrating: bool,
}

/// Hub-level tuning block embedded in the status response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubSettings {
    /// LED brightness (0-100).
    #[serde(default)]
    pub led_brightness: u8,
    /// Sensor gain for the left side.
    #[serde(default)]
    pub gain_left: u32,
    /// Sensor gain for the right side.
    #[serde(default)]
    pub gain_right: u32,
    /// Settings schema version.
    #[serde(default)]
    pub v: u32,
}

/// Free Sleep firmware identification block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmwareInfo {
    /// Installed Free Sleep version.
    pub version: String,
    /// Branch the firmware was built from.
    #[serde(default)]
    pub branch: String,
}

/// Full device status snapshot.
///
/// Both sides are always present; the device reports them together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    /// Left-side status.
    pub left: SideStatus,
    /// Right-side status.
    pub right: SideStatus,
    /// Hub hardware model, e.g. `"Pod 4"`.
    pub hub_version: String,
    /// Cover hardware model.
    #[serde(default)]
    pub cover_version: String,
    /// Free Sleep firmware identification.
    pub free_sleep: FirmwareInfo,
    /// Water reservoir level indicator. The firmware reports this as a
    /// string (`"true"` when full).
    #[serde(default)]
    pub water_level: String,
    /// Whether the pod is currently priming.
    #[serde(default)]
    pub is_priming: bool,
    /// Hub tuning block.
    pub settings: HubSettings,
    /// WiFi signal strength (0-100).
    #[serde(default)]
    pub wifi_strength: u8,
}

impl DeviceStatus {
    /// Returns the status block for the given side.
    #[must_use]
    pub fn side(&self, side: Side) -> &SideStatus {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Returns a mutable reference to the status block for the given side.
    pub fn side_mut(&mut self, side: Side) -> &mut SideStatus {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pod settings aggregate, as reported by `/api/settings`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Side;

/// Daily priming configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimePodDaily {
    /// Whether the pod primes itself once a day.
    pub enabled: bool,
    /// Priming time in `HH:MM`.
    #[serde(default)]
    pub time: String,
}

/// Per-side configuration.
///
/// Schedule overrides and tap behaviors are open-ended documents the device
/// owns; they are carried verbatim rather than modeled field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideSettings {
    /// Display name for this side.
    #[serde(default)]
    pub name: String,
    /// Whether away mode is active on this side.
    pub away_mode: bool,
    /// Temporary schedule/alarm overrides.
    #[serde(default)]
    pub schedule_overrides: Value,
    /// Double/triple/quad tap behaviors.
    #[serde(default)]
    pub taps: Value,
}

/// Full settings snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Settings document identifier.
    #[serde(default)]
    pub id: String,
    /// IANA timezone of the pod.
    #[serde(default)]
    pub time_zone: String,
    /// Display format the pod itself is configured for.
    #[serde(default)]
    pub temperature_format: String,
    /// Whether the pod reboots itself once a day.
    #[serde(default)]
    pub reboot_daily: bool,
    /// Left-side configuration.
    pub left: SideSettings,
    /// Right-side configuration.
    pub right: SideSettings,
    /// Daily priming configuration.
    pub prime_pod_daily: PrimePodDaily,
}

impl Settings {
    /// Returns the settings block for the given side.
    #[must_use]
    pub fn side(&self, side: Side) -> &SideSettings {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Returns a mutable reference to the settings block for the given side.
    pub fn side_mut(&mut self, side: Side) -> &mut SideSettings {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

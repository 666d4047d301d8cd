// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Biometric vitals, as reported by `/api/metrics/vitals/summary`.

use serde::{Deserialize, Serialize};

use crate::types::Side;

/// Biometric summary for one side of the pod.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    /// Heart rate in beats per minute.
    #[serde(default)]
    pub heart_rate: Option<f64>,
    /// Respiration rate in breaths per minute.
    #[serde(default)]
    pub respiration_rate: Option<f64>,
}

/// Vitals for both sides, fetched per side but stored together so a snapshot
/// is never half-populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideVitals {
    /// Left-side vitals.
    pub left: Vitals,
    /// Right-side vitals.
    pub right: Vitals,
}

impl SideVitals {
    /// Returns the vitals for the given side.
    #[must_use]
    pub fn side(&self, side: Side) -> &Vitals {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

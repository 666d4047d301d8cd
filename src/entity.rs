// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static entity descriptor tables for host rendering.
//!
//! A host platform renders a pod as a set of entities (climate, switch,
//! sensor, time, update). Each descriptor pairs a stable key with a pure
//! getter over the snapshot; writable entities additionally carry a kind
//! that [`Pod`] dispatches on. Plain tables and `fn` pointers - no dynamic
//! dispatch, nothing to allocate.

use crate::error::RequestError;
use crate::pod::Pod;
use crate::state::PodState;
use crate::types::{Side, MAX_TEMPERATURE_F, MIN_TEMPERATURE_F, TEMPERATURE_STEP_F};

/// Writable pod-level booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchKind {
    /// Biometrics service on/off.
    Biometrics,
    /// Daily priming on/off.
    PrimeDaily,
    /// Daily reboot on/off.
    RebootDaily,
}

/// Writable side-level booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideSwitchKind {
    /// Away mode on/off for one side.
    AwayMode,
}

/// A pod-level switch entity.
#[derive(Debug, Clone, Copy)]
pub struct SwitchDescriptor {
    /// Stable entity key.
    pub key: &'static str,
    /// Which write-through action this switch drives.
    pub kind: SwitchKind,
    /// Reads the current value from a snapshot.
    pub get: fn(&PodState) -> Option<bool>,
}

impl SwitchDescriptor {
    /// Applies a new value through the matching pod action.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn set(&self, pod: &Pod, value: bool) -> Result<(), RequestError> {
        match self.kind {
            SwitchKind::Biometrics => pod.set_biometrics(value).await,
            SwitchKind::PrimeDaily => pod.set_prime_daily(value).await,
            SwitchKind::RebootDaily => pod.set_reboot_daily(value).await,
        }
    }
}

/// A side-level switch entity.
#[derive(Debug, Clone, Copy)]
pub struct SideSwitchDescriptor {
    /// Stable entity key.
    pub key: &'static str,
    /// Which write-through action this switch drives.
    pub kind: SideSwitchKind,
    /// Reads the current value for one side from a snapshot.
    pub get: fn(&PodState, Side) -> Option<bool>,
}

impl SideSwitchDescriptor {
    /// Applies a new value through the matching pod action.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn set(&self, pod: &Pod, side: Side, value: bool) -> Result<(), RequestError> {
        match self.kind {
            SideSwitchKind::AwayMode => pod.set_away_mode(side, value).await,
        }
    }
}

/// Pod-level switches.
pub const POD_SWITCHES: &[SwitchDescriptor] = &[
    SwitchDescriptor {
        key: "biometrics",
        kind: SwitchKind::Biometrics,
        get: |state| state.services.get("biometrics").map(|s| s.enabled),
    },
    SwitchDescriptor {
        key: "prime_daily",
        kind: SwitchKind::PrimeDaily,
        get: |state| Some(state.settings.prime_pod_daily.enabled),
    },
    SwitchDescriptor {
        key: "reboot_daily",
        kind: SwitchKind::RebootDaily,
        get: |state| Some(state.settings.reboot_daily),
    },
];

/// Side-level switches.
pub const SIDE_SWITCHES: &[SideSwitchDescriptor] = &[SideSwitchDescriptor {
    key: "away_mode",
    kind: SideSwitchKind::AwayMode,
    get: |state, side| Some(state.settings.side(side).away_mode),
}];

/// A read-only numeric entity.
#[derive(Debug, Clone, Copy)]
pub struct SensorDescriptor {
    /// Stable entity key.
    pub key: &'static str,
    /// Reads the current value from a snapshot.
    pub get: fn(&PodState) -> Option<f64>,
}

/// A read-only numeric entity scoped to one side.
#[derive(Debug, Clone, Copy)]
pub struct SideSensorDescriptor {
    /// Stable entity key.
    pub key: &'static str,
    /// Reads the current value for one side from a snapshot.
    pub get: fn(&PodState, Side) -> Option<f64>,
}

/// Pod-level sensors.
pub const POD_SENSORS: &[SensorDescriptor] = &[
    SensorDescriptor {
        key: "wifi_strength",
        get: |state| Some(f64::from(state.status.wifi_strength)),
    },
    SensorDescriptor {
        key: "led_brightness",
        get: |state| Some(f64::from(state.status.settings.led_brightness)),
    },
];

/// Side-level sensors.
pub const SIDE_SENSORS: &[SideSensorDescriptor] = &[
    SideSensorDescriptor {
        key: "heart_rate",
        get: |state, side| state.vitals.side(side).heart_rate,
    },
    SideSensorDescriptor {
        key: "respiration_rate",
        get: |state, side| state.vitals.side(side).respiration_rate,
    },
    SideSensorDescriptor {
        key: "current_temperature",
        get: |state, side| Some(state.status.side(side).current_temperature_f),
    },
    SideSensorDescriptor {
        key: "seconds_remaining",
        get: |state, side| Some(f64::from(state.status.side(side).seconds_remaining)),
    },
];

/// A read-only boolean entity.
#[derive(Debug, Clone, Copy)]
pub struct BinarySensorDescriptor {
    /// Stable entity key.
    pub key: &'static str,
    /// Reads the current value from a snapshot.
    pub get: fn(&PodState) -> Option<bool>,
}

/// A read-only boolean entity scoped to one side.
#[derive(Debug, Clone, Copy)]
pub struct SideBinarySensorDescriptor {
    /// Stable entity key.
    pub key: &'static str,
    /// Reads the current value for one side from a snapshot.
    pub get: fn(&PodState, Side) -> Option<bool>,
}

/// Pod-level binary sensors.
pub const POD_BINARY_SENSORS: &[BinarySensorDescriptor] = &[
    BinarySensorDescriptor {
        key: "priming",
        get: |state| Some(state.status.is_priming),
    },
    BinarySensorDescriptor {
        key: "water_level",
        get: |state| Some(state.status.water_level == "true"),
    },
];

/// Side-level binary sensors.
pub const SIDE_BINARY_SENSORS: &[SideBinarySensorDescriptor] = &[SideBinarySensorDescriptor {
    key: "alarm_vibrating",
    get: |state, side| Some(state.status.side(side).is_alarm_vibrating),
}];

/// Climate surface for one side, as host climate entities render it.
///
/// Writes go through [`Pod::set_active`] and [`Pod::set_target_temperature`];
/// bounds are [`MIN_TEMPERATURE_F`]..=[`MAX_TEMPERATURE_F`] in
/// [`TEMPERATURE_STEP_F`] steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateView {
    /// Current water temperature in Fahrenheit.
    pub current_temperature: f64,
    /// Target water temperature in Fahrenheit.
    pub target_temperature: f64,
    /// Whether temperature control is active.
    pub is_on: bool,
}

impl ClimateView {
    /// Minimum settable temperature.
    pub const MIN_TEMPERATURE: f64 = MIN_TEMPERATURE_F;
    /// Maximum settable temperature.
    pub const MAX_TEMPERATURE: f64 = MAX_TEMPERATURE_F;
    /// Target temperature step.
    pub const TEMPERATURE_STEP: f64 = TEMPERATURE_STEP_F;

    /// Reads the climate surface for one side from a snapshot.
    #[must_use]
    pub fn read(state: &PodState, side: Side) -> Self {
        let status = state.status.side(side);
        Self {
            current_temperature: status.current_temperature_f,
            target_temperature: status.target_temperature_f,
            is_on: status.is_on,
        }
    }
}

/// Reads the daily priming time (`HH:MM`), the value behind the host's time
/// entity. Writes go through [`Pod::set_prime_daily_time`].
#[must_use]
pub fn prime_daily_time(state: &PodState) -> &str {
    &state.settings.prime_pod_daily.time
}

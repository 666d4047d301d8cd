// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-facing `set_schedule` service.
//!
//! A host platform exposes one service call that targets sides across any
//! number of registered pods. [`PodRegistry`] keeps the live pods and routes
//! each `<pod-id>_<side>` target to the owning [`Pod`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Error, ValueError};
use crate::pod::Pod;
use crate::schedule::schedule_to_fahrenheit;
use crate::types::{DayOfWeek, Side, TemperatureUnit};

/// One value or a list of values, accepted interchangeably.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single value.
    One(T),
    /// A list of values.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Flattens into a list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// A `set_schedule` service call as the host hands it over.
#[derive(Debug, Clone, Deserialize)]
pub struct SetScheduleCommand {
    /// Target side ids, each `<pod-id>_<side>`.
    pub side: OneOrMany<String>,
    /// Days to apply the schedule to. Absent means every day.
    #[serde(default)]
    pub day_of_week: Option<OneOrMany<DayOfWeek>>,
    /// Schedule document in the caller's temperature unit.
    pub schedule: Value,
}

/// Splits a `<pod-id>_<side>` target into its parts.
///
/// # Errors
///
/// Returns [`ValueError::InvalidSideId`] when the id does not parse.
pub fn parse_side_id(side_id: &str) -> Result<(Uuid, Side), ValueError> {
    let invalid = || ValueError::InvalidSideId(side_id.to_owned());

    let (pod_id, side) = side_id.rsplit_once('_').ok_or_else(invalid)?;
    let pod_id = Uuid::parse_str(pod_id).map_err(|_| invalid())?;
    let side = side.parse().map_err(|_| invalid())?;
    Ok((pod_id, side))
}

/// Live pods known to the service layer, keyed by pod id.
#[derive(Debug, Default)]
pub struct PodRegistry {
    pods: RwLock<HashMap<Uuid, Arc<Pod>>>,
}

impl PodRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pod, replacing any previous entry with the same id.
    pub fn register(&self, pod: Arc<Pod>) {
        self.pods.write().insert(pod.id(), pod);
    }

    /// Removes a pod, returning it if it was registered.
    pub fn remove(&self, id: Uuid) -> Option<Arc<Pod>> {
        self.pods.write().remove(&id)
    }

    /// Looks up a pod by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<Arc<Pod>> {
        self.pods.read().get(&id).cloned()
    }

    /// Number of registered pods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pods.read().len()
    }

    /// Whether no pods are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pods.read().is_empty()
    }

    /// Applies a `set_schedule` call to every targeted side.
    ///
    /// The schedule is converted from `unit` to Fahrenheit once, then written
    /// to each target in turn. All targets are validated before the first
    /// write so a typo cannot leave the call half applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Value`] for a malformed side id, [`Error::PodNotFound`]
    /// for an unknown pod, and [`Error::Request`] when a write fails.
    pub async fn handle_set_schedule(
        &self,
        command: SetScheduleCommand,
        unit: TemperatureUnit,
    ) -> Result<(), Error> {
        let days: Vec<DayOfWeek> = command
            .day_of_week
            .map_or_else(|| DayOfWeek::ALL.to_vec(), OneOrMany::into_vec);

        let mut targets = Vec::new();
        for side_id in command.side.into_vec() {
            let (pod_id, side) = parse_side_id(&side_id)?;
            let pod = self
                .get(pod_id)
                .ok_or_else(|| Error::PodNotFound(side_id.clone()))?;
            targets.push((pod, side));
        }

        let schedule = schedule_to_fahrenheit(unit, &command.schedule);
        for (pod, side) in targets {
            pod.set_schedule(side, &days, &schedule).await?;
        }
        Ok(())
    }
}

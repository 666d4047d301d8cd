// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Background service health, as reported by `/api/services`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Health of a single background job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobHealth {
    /// The job last completed successfully.
    Healthy,
    /// The job last failed.
    Failed,
    /// Any status string this library does not know.
    #[serde(other)]
    Unknown,
}

/// Status report for one device-side background job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    /// Human-readable job name.
    #[serde(default)]
    pub name: String,
    /// Last status message, often empty.
    #[serde(default)]
    pub message: String,
    /// Health classification.
    pub status: JobHealth,
    /// What the job does.
    #[serde(default)]
    pub description: String,
    /// When the job last ran. The firmware reports an empty string when the
    /// job has never run.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Health block for one service (e.g. `biometrics`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    /// Whether the service is enabled.
    pub enabled: bool,
    /// Job status reports, keyed by job name.
    #[serde(default)]
    pub jobs: HashMap<String, JobStatus>,
}

/// All service health blocks, keyed by service name.
pub type Services = HashMap<String, ServiceHealth>;

/// Deserializes an RFC 3339 timestamp, treating an empty string as absent.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<DateTime<Utc>>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

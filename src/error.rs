// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Free Sleep library.
//!
//! This module provides the error hierarchy used across the library:
//! value validation, single HTTP requests, refresh batches, and setup-time
//! configuration.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A single HTTP request against the pod failed.
    #[error("request failed: {0}")]
    Request(#[from] RequestError),

    /// A refresh batch failed as a whole.
    #[error("refresh failed: {0}")]
    Refresh(#[from] RefreshError),

    /// Setup-time configuration was invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pod was not found in the registry.
    #[error("pod not found: {0}")]
    PodNotFound(String),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// An invalid pod side string was provided.
    #[error("invalid pod side: {0}")]
    InvalidSide(String),

    /// An invalid day-of-week string was provided.
    #[error("invalid day of week: {0}")]
    InvalidDay(String),

    /// An invalid side device identifier was provided to a service call.
    #[error("invalid side identifier: {0}")]
    InvalidSideId(String),
}

/// Errors from a single HTTP request against the pod (or the remote
/// server-info file).
///
/// Non-2xx statuses and transport-level failures both end up here. The two
/// documented tolerated conditions - a 204 response and an unparseable body -
/// are *not* errors and yield an empty result instead.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Transport-level failure, including connection errors and timeouts.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The pod answered with a non-2xx status.
    #[error("unexpected HTTP status {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error for a failed refresh batch.
///
/// Any timeout, connection error, or decode failure inside a scheduled or
/// on-demand refresh is wrapped here, so callers have exactly one failure
/// type to handle. The previous snapshot is always retained unchanged.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// One of the constituent fetches failed.
    #[error("refresh batch failed: {0}")]
    Request(#[source] RequestError),
}

impl From<RequestError> for RefreshError {
    fn from(error: RequestError) -> Self {
        Self::Request(error)
    }
}

/// Setup-time configuration errors.
///
/// These are surfaced to the user during setup and are not retried
/// automatically.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured host is not a well-formed HTTP(S) URL.
    #[error("invalid host URL: {0}")]
    InvalidUrl(String),

    /// The pod could not be reached during initial validation.
    #[error("cannot connect to pod: {0}")]
    CannotConnect(#[source] RequestError),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

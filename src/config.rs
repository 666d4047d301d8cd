// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pod connection configuration and setup-time validation.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::client::PodClient;
use crate::error::ConfigError;

/// Configuration for connecting to a Free Sleep pod.
///
/// The host is validated as a well-formed HTTP(S) URL at construction time,
/// before any connection attempt.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use freesleep_lib::PodConfig;
///
/// let config = PodConfig::new("http://192.168.1.50:3000")
///     .unwrap()
///     .with_timeout(Duration::from_secs(5));
///
/// assert!(PodConfig::new("ftp://example.com").is_err());
/// assert!(PodConfig::new("not a url").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PodConfig {
    base_url: String,
    timeout: Duration,
}

impl PodConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the pod at `host`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] unless `host` is a well-formed
    /// `http` or `https` URL.
    pub fn new(host: impl AsRef<str>) -> Result<Self, ConfigError> {
        let host = host.as_ref();
        let url =
            Url::parse(host).map_err(|_| ConfigError::InvalidUrl(host.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(host.to_string()));
        }

        Ok(Self {
            base_url: host.trim_end_matches('/').to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the validated base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds a [`PodClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the HTTP client cannot be
    /// constructed.
    pub fn into_client(self) -> Result<PodClient, ConfigError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|_| ConfigError::InvalidUrl(self.base_url.clone()))?;

        Ok(PodClient::from_parts(self.base_url, client))
    }
}

/// Validates that a pod is reachable and returns its hub name.
///
/// This is the setup-time check run before an entry is created: it fetches
/// the device status once and hands back `hubVersion` (e.g. `"Pod 4"`) for
/// use as the entry title.
///
/// # Errors
///
/// Returns [`ConfigError::CannotConnect`] if the status fetch fails.
pub async fn validate_connection(client: &PodClient) -> Result<String, ConfigError> {
    match client.fetch_status().await {
        Ok(status) => Ok(status.hub_version),
        Err(error) => {
            tracing::error!(host = %client.base_url(), %error, "Pod validation failed");
            Err(ConfigError::CannotConnect(error))
        }
    }
}

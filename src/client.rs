// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the Free Sleep device API.
//!
//! The pod exposes a small JSON REST API on the local network. This client is
//! a thin wrapper over it: each fetcher and mutator is a fixed-shape call
//! against one endpoint, with no business logic. Two response conditions are
//! tolerated by design: a 204 status and a body that fails to parse as JSON
//! both yield an empty result (the firmware is sloppy with content types).

use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RequestError;
use crate::state::{DeviceStatus, Services, Settings, Vitals};
use crate::types::Side;

/// Device status endpoint.
pub const DEVICE_STATUS_ENDPOINT: &str = "/api/deviceStatus";
/// Settings endpoint.
pub const SETTINGS_ENDPOINT: &str = "/api/settings";
/// Sleep schedules endpoint.
pub const SCHEDULES_ENDPOINT: &str = "/api/schedules";
/// Service health endpoint.
pub const SERVICES_ENDPOINT: &str = "/api/services";
/// Job trigger endpoint.
pub const JOBS_ENDPOINT: &str = "/api/jobs";
/// Arbitrary command execution endpoint.
pub const EXECUTE_ENDPOINT: &str = "/api/execute";
/// Vitals summary endpoint (takes a `side` query parameter).
pub const VITALS_SUMMARY_ENDPOINT: &str = "/api/metrics/vitals/summary";

/// Remote static JSON file holding the latest published release metadata.
///
/// This is not the pod; it lives on a rate-sensitive remote host and is only
/// queried by the (hourly) firmware coordinator.
pub const SERVER_INFO_URL: &str = "https://raw.githubusercontent.com/throwaway31265/free-sleep/refs/heads/main/server/src/serverInfo.json";

/// HTTP client for one Free Sleep pod.
///
/// Stateless apart from the connection pool; all cached state lives in the
/// coordinator.
///
/// # Examples
///
/// ```no_run
/// use freesleep_lib::{PodClient, PodConfig};
///
/// # async fn example() -> freesleep_lib::Result<()> {
/// let client = PodConfig::new("http://192.168.1.50:3000")?.into_client()?;
/// let status = client.fetch_status().await?;
/// println!("left side on: {}", status.left.is_on);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PodClient {
    base_url: String,
    client: Client,
    server_info_url: String,
}

impl PodClient {
    /// Creates a client from an already-validated base URL and a configured
    /// reqwest client. Use [`PodConfig`](crate::PodConfig) instead of calling
    /// this directly.
    pub(crate) fn from_parts(base_url: String, client: Client) -> Self {
        Self {
            base_url,
            client,
            server_info_url: SERVER_INFO_URL.to_string(),
        }
    }

    /// Overrides the remote server-info URL.
    ///
    /// Useful for forks that publish their own release metadata.
    #[must_use]
    pub fn with_server_info_url(mut self, url: impl Into<String>) -> Self {
        self.server_info_url = url.into();
        self
    }

    /// Returns the base URL of the pod.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET request against a device endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Status`] for non-2xx responses and
    /// [`RequestError::Http`] for transport failures (including timeouts).
    pub async fn get(
        &self,
        path: &str,
        query: Option<&[(&str, &str)]>,
    ) -> Result<Value, RequestError> {
        let url = format!("{}{path}", self.base_url);
        self.request(Method::GET, &url, query, None::<&Value>).await
    }

    /// Sends a POST request with a JSON body against a device endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn post<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, RequestError> {
        let url = format!("{}{path}", self.base_url);
        self.request(Method::POST, &url, None, Some(body)).await
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        query: Option<&[(&str, &str)]>,
        body: Option<&B>,
    ) -> Result<Value, RequestError> {
        tracing::debug!(%method, %url, "Sending request");

        let mut request = self.client.request(method, url);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(RequestError::Http)?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            tracing::debug!(%url, "No content");
            return Ok(Value::Object(Map::new()));
        }

        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(RequestError::Http)?;
        tracing::debug!(%url, body = %text, "Received response");

        // The firmware does not always set a JSON content type, and some
        // endpoints answer 200 with an empty body. Treat anything that is
        // not JSON as an empty result.
        Ok(serde_json::from_str(&text).unwrap_or_else(|_| Value::Object(Map::new())))
    }

    // =========================================================================
    // Fetchers
    // =========================================================================

    /// Fetches the current device status.
    ///
    /// # Errors
    ///
    /// Returns an error on request failure or if the response does not match
    /// the status shape.
    pub async fn fetch_status(&self) -> Result<DeviceStatus, RequestError> {
        let value = self.get(DEVICE_STATUS_ENDPOINT, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetches the current settings.
    ///
    /// # Errors
    ///
    /// Returns an error on request failure or decode failure.
    pub async fn fetch_settings(&self) -> Result<Settings, RequestError> {
        let value = self.get(SETTINGS_ENDPOINT, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetches the vitals summary for one side.
    ///
    /// # Errors
    ///
    /// Returns an error on request failure or decode failure.
    pub async fn fetch_vitals(&self, side: Side) -> Result<Vitals, RequestError> {
        let value = self
            .get(VITALS_SUMMARY_ENDPOINT, Some(&[("side", side.as_str())]))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetches the health of the device-side background services.
    ///
    /// # Errors
    ///
    /// Returns an error on request failure or decode failure.
    pub async fn fetch_services(&self) -> Result<Services, RequestError> {
        let value = self.get(SERVICES_ENDPOINT, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetches the Free Sleep version currently installed on the pod.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingField`] if the status response carries
    /// no `freeSleep.version`.
    pub async fn fetch_current_version(&self) -> Result<String, RequestError> {
        let value = self.get(DEVICE_STATUS_ENDPOINT, None).await?;

        value
            .pointer("/freeSleep/version")
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| RequestError::MissingField("freeSleep.version".to_string()))
    }

    /// Fetches the latest published version from the remote server-info file.
    ///
    /// Best-effort: an absent `version` field yields `None`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the request itself fails.
    pub async fn fetch_latest_version(&self) -> Result<Option<String>, RequestError> {
        let url = self.server_info_url.clone();
        let value = self.request(Method::GET, &url, None, None::<&Value>).await?;

        Ok(value
            .get("version")
            .and_then(Value::as_str)
            .map(ToString::to_string))
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Posts a partial device status update, e.g. `{"left": {"isOn": true}}`.
    ///
    /// # Errors
    ///
    /// Returns an error on request failure.
    pub async fn update_status(&self, body: &Value) -> Result<(), RequestError> {
        self.post(DEVICE_STATUS_ENDPOINT, body).await?;
        Ok(())
    }

    /// Posts a partial settings update.
    ///
    /// # Errors
    ///
    /// Returns an error on request failure.
    pub async fn update_settings(&self, body: &Value) -> Result<(), RequestError> {
        self.post(SETTINGS_ENDPOINT, body).await?;
        Ok(())
    }

    /// Posts a sleep schedule update.
    ///
    /// # Errors
    ///
    /// Returns an error on request failure.
    pub async fn update_schedule(&self, body: &Value) -> Result<(), RequestError> {
        self.post(SCHEDULES_ENDPOINT, body).await?;
        Ok(())
    }

    /// Posts a partial service configuration update, e.g.
    /// `{"biometrics": {"enabled": false}}`.
    ///
    /// # Errors
    ///
    /// Returns an error on request failure.
    pub async fn update_services(&self, body: &Value) -> Result<(), RequestError> {
        self.post(SERVICES_ENDPOINT, body).await?;
        Ok(())
    }

    /// Triggers the named jobs on the pod (e.g. `reboot`, `update`).
    ///
    /// The body is a bare JSON array of job names.
    ///
    /// # Errors
    ///
    /// Returns an error on request failure.
    pub async fn run_jobs(&self, jobs: &[&str]) -> Result<(), RequestError> {
        self.post(JOBS_ENDPOINT, jobs).await?;
        Ok(())
    }

    /// Executes an arbitrary command on the pod and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error on request failure.
    pub async fn execute(&self, body: &Value) -> Result<Value, RequestError> {
        self.post(EXECUTE_ENDPOINT, body).await
    }
}

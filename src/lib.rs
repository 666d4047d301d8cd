// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `FreeSleep` Lib - A Rust library to control Free Sleep mattress pods.
//!
//! This library talks to the local HTTP API of a pod running the Free Sleep
//! server and keeps a periodically refreshed in-memory snapshot of its state.
//!
//! # Supported Features
//!
//! - **Climate control**: Per-side temperature control, on/off, away mode
//! - **Schedules**: Replace a side's sleep schedule for any set of days
//! - **Maintenance**: Daily priming, daily reboot, LED brightness, firmware
//! - **Vitals**: Per-side heart rate and respiration rate readings
//!
//! # Quick Start
//!
//! ## Connect and read state
//!
//! ```no_run
//! use freesleep_lib::{Pod, PodConfig, Side};
//!
//! #[tokio::main]
//! async fn main() -> freesleep_lib::Result<()> {
//!     let config = PodConfig::new("http://192.168.1.50:3000")?;
//!     let pod = Pod::connect(config).await?;
//!
//!     if let Some(state) = pod.data() {
//!         let status = state.status.side(Side::Left);
//!         println!("left side: {}F", status.current_temperature_f);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Background polling
//!
//! Refreshing by hand is fine for one-shot tools; long-running hosts spawn
//! the coordinator loop instead and watch for new snapshots:
//!
//! ```no_run
//! use std::sync::Arc;
//! use freesleep_lib::coordinator::DEFAULT_REFRESH_INTERVAL;
//! use freesleep_lib::{Pod, PodConfig};
//!
//! #[tokio::main]
//! async fn main() -> freesleep_lib::Result<()> {
//!     let config = PodConfig::new("http://192.168.1.50:3000")?;
//!     let pod = Pod::connect(config).await?;
//!
//!     let mut rx = pod.coordinator().subscribe();
//!     Arc::clone(pod.coordinator()).spawn_polling(DEFAULT_REFRESH_INTERVAL);
//!
//!     while rx.changed().await.is_ok() {
//!         if let Some(state) = rx.borrow().clone() {
//!             println!("water level: {}", state.status.water_level);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Write-through actions
//!
//! Mutations post to the pod and patch the cached snapshot in place, so
//! readers see the new value without waiting for the next poll:
//!
//! ```no_run
//! use freesleep_lib::{Pod, PodConfig, Side};
//!
//! #[tokio::main]
//! async fn main() -> freesleep_lib::Result<()> {
//!     let config = PodConfig::new("http://192.168.1.50:3000")?;
//!     let pod = Pod::connect(config).await?;
//!
//!     pod.set_active(Side::Left, true).await?;
//!     pod.set_target_temperature(Side::Left, 72.0).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod coordinator;
pub mod entity;
pub mod error;
pub mod pod;
pub mod schedule;
pub mod service;
pub mod state;
pub mod types;

pub use client::PodClient;
pub use config::{validate_connection, PodConfig};
pub use coordinator::{FirmwareCoordinator, PodCoordinator};
pub use error::{ConfigError, Error, RefreshError, RequestError, Result, ValueError};
pub use pod::Pod;
pub use schedule::schedule_to_fahrenheit;
pub use service::{PodRegistry, SetScheduleCommand};
pub use state::{
    DeviceStatus, FirmwareState, PodState, Services, Settings, SideSettings, SideStatus,
    SideVitals, Vitals,
};
pub use types::{Brightness, DayOfWeek, Side, TemperatureUnit};

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Free Sleep pod control.
//!
//! This module provides type-safe representations of values used in device
//! requests. Constrained types validate their values at construction time,
//! preventing out-of-range request bodies.
//!
//! # Types
//!
//! - [`Side`] - Addressing for the two halves of the pod
//! - [`DayOfWeek`] - Schedule day keys
//! - [`TemperatureUnit`] - Ambient host unit, with [`to_fahrenheit`]
//! - [`Brightness`] - Hub LED brightness (0-100%)

mod brightness;
mod day;
mod side;
mod temperature;

pub use brightness::Brightness;
pub use day::DayOfWeek;
pub use side::Side;
pub use temperature::{
    MAX_TEMPERATURE_F, MIN_TEMPERATURE_F, TEMPERATURE_STEP_F, TemperatureUnit, to_fahrenheit,
};

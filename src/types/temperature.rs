// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature units and conversion.
//!
//! The device API is Fahrenheit-only, while the host platform may be
//! configured for Celsius or Kelvin. [`to_fahrenheit`] is the single
//! conversion used everywhere a user-supplied temperature crosses into a
//! request body.

/// Minimum supported bed temperature in Fahrenheit.
pub const MIN_TEMPERATURE_F: f64 = 55.0;

/// Maximum supported bed temperature in Fahrenheit.
pub const MAX_TEMPERATURE_F: f64 = 110.0;

/// Target temperature step in Fahrenheit.
pub const TEMPERATURE_STEP_F: f64 = 0.5;

/// Ambient temperature unit of the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    Celsius,
    /// Kelvin.
    Kelvin,
    /// Degrees Fahrenheit.
    #[default]
    Fahrenheit,
}

/// Converts a temperature value in the given unit to Fahrenheit, rounded to
/// the nearest integer.
///
/// Fahrenheit input is rounded but otherwise passed through.
///
/// # Examples
///
/// ```
/// use freesleep_lib::types::{TemperatureUnit, to_fahrenheit};
///
/// assert_eq!(to_fahrenheit(TemperatureUnit::Celsius, 20.0), 68);
/// assert_eq!(to_fahrenheit(TemperatureUnit::Kelvin, 293.15), 68);
/// assert_eq!(to_fahrenheit(TemperatureUnit::Fahrenheit, 68.4), 68);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_fahrenheit(unit: TemperatureUnit, value: f64) -> i32 {
    let celsius = match unit {
        TemperatureUnit::Fahrenheit => return value.round() as i32,
        TemperatureUnit::Kelvin => value - 273.15,
        TemperatureUnit::Celsius => value,
    };

    (celsius * 1.8 + 32.0).round() as i32
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schedule temperature conversion.
//!
//! Sleep schedules are open-ended JSON documents; only three places in them
//! carry temperatures: `alarm.alarmTemperature`, `power.onTemperature`, and
//! the values of the `temperatures` map. The device expects all of them in
//! Fahrenheit, while callers may supply them in the host's ambient unit.

use serde_json::Value;

use crate::types::{TemperatureUnit, to_fahrenheit};

/// Converts the temperature-bearing fields of a schedule to Fahrenheit.
///
/// Returns a new schedule with `alarm.alarmTemperature`, `power.onTemperature`
/// and every value of `temperatures` converted; all other fields pass through
/// unchanged, and absent optional sub-objects are tolerated. When the ambient
/// unit is already Fahrenheit the schedule is returned as-is.
///
/// # Examples
///
/// ```
/// use freesleep_lib::schedule::schedule_to_fahrenheit;
/// use freesleep_lib::types::TemperatureUnit;
/// use serde_json::json;
///
/// let schedule = json!({"alarm": {"alarmTemperature": 20}});
/// let converted = schedule_to_fahrenheit(TemperatureUnit::Celsius, &schedule);
/// assert_eq!(converted, json!({"alarm": {"alarmTemperature": 68}}));
/// ```
#[must_use]
pub fn schedule_to_fahrenheit(unit: TemperatureUnit, schedule: &Value) -> Value {
    if unit == TemperatureUnit::Fahrenheit {
        return schedule.clone();
    }

    let mut converted = schedule.clone();

    if let Some(alarm) = converted.get_mut("alarm") {
        convert_field(unit, alarm, "alarmTemperature");
    }

    if let Some(power) = converted.get_mut("power") {
        convert_field(unit, power, "onTemperature");
    }

    if let Some(Value::Object(temperatures)) = converted.get_mut("temperatures") {
        for value in temperatures.values_mut() {
            convert_in_place(unit, value);
        }
    }

    converted
}

/// Converts `object[key]` if the key holds a number.
fn convert_field(unit: TemperatureUnit, object: &mut Value, key: &str) {
    if let Some(value) = object.get_mut(key) {
        convert_in_place(unit, value);
    }
}

/// Replaces a numeric JSON value with its Fahrenheit equivalent.
///
/// Non-numeric values are left untouched rather than rejected; the device
/// validates its own payloads.
fn convert_in_place(unit: TemperatureUnit, value: &mut Value) {
    if let Some(number) = value.as_f64() {
        *value = Value::from(to_fahrenheit(unit, number));
    }
}

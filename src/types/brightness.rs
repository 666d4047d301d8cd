// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LED brightness value type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Hub LED brightness level (0-100%).
///
/// The value is validated at construction time, so a `Brightness` is always
/// in range when it reaches a request body.
///
/// # Examples
///
/// ```
/// use freesleep_lib::types::Brightness;
///
/// let level = Brightness::new(75).unwrap();
/// assert_eq!(level.value(), 75);
///
/// assert!(Brightness::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Brightness(u8);

impl Brightness {
    /// Maximum brightness level.
    pub const MAX: u8 = 100;

    /// Creates a new brightness level.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the value is greater than 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > Self::MAX {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u16::from(Self::MAX),
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_range() {
        for value in [0, 1, 50, 99, 100] {
            assert_eq!(Brightness::new(value).unwrap().value(), value);
        }
    }

    #[test]
    fn out_of_range() {
        let result = Brightness::new(101);
        assert!(matches!(
            result,
            Err(ValueError::OutOfRange { actual: 101, .. })
        ));
    }

    #[test]
    fn display() {
        assert_eq!(Brightness::new(42).unwrap().to_string(), "42%");
    }
}

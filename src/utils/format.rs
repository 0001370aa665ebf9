//! Formatting utilities for file sizes.

use std::fmt;

use serde::Serialize;

use crate::config::{SIZE_STEP, SIZE_UNITS};

/// Size normalized to an appropriate unit, e.g. `1 MB` instead of `1048576 B`.
///
/// `value` stays below 1024 unless the largest unit has been reached.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HumanSize {
    pub value: f64,
    pub unit: &'static str,
}

impl HumanSize {
    /// Normalize a byte count by repeated division by 1024.
    pub fn from_bytes(bytes: u64) -> Self {
        let mut value = bytes as f64;
        let mut units = SIZE_UNITS.iter();
        let mut unit = units.next().copied().unwrap_or("B");

        while value >= SIZE_STEP {
            match units.next() {
                Some(next) => {
                    unit = *next;
                    value /= SIZE_STEP;
                }
                None => break,
            }
        }

        Self { value, unit }
    }

    /// Compact display rounded to one decimal (e.g., "1.5 KB").
    pub fn rounded(&self) -> String {
        let rounded = (self.value * 10.0).round() / 10.0;
        format!("{} {}", rounded, self.unit)
    }
}

impl fmt::Display for HumanSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

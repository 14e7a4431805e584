//! Input-side data models: page records and length windows.

use serde::{Deserialize, Serialize};

/// The recognized fields of one input row. Absent or blank columns coerce to
/// empty strings; an all-empty record is valid and flows through generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub title: String,
    pub existing_description: String,
    pub primary_kw: String,
    pub secondary_kw: String,
    pub tertiary_kw: String,
}

/// Inclusive character-count range a generated field must try to satisfy.
///
/// Two instances exist per run: one for titles, one for descriptions.
/// Counts are Unicode scalar counts, not byte lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthWindow {
    pub min: usize,
    pub max: usize,
}

impl LengthWindow {
    pub const TITLE: LengthWindow = LengthWindow { min: 50, max: 60 };
    pub const DESCRIPTION: LengthWindow = LengthWindow { min: 150, max: 160 };

    pub fn contains(&self, len: usize) -> bool {
        self.min <= len && len <= self.max
    }

    pub fn status_of(&self, len: usize) -> LengthStatus {
        if len < self.min {
            LengthStatus::BelowMinimum
        } else if len > self.max {
            LengthStatus::AboveMaximum
        } else {
            LengthStatus::WithinWindow
        }
    }

    /// Rejects inverted or degenerate windows coming from operator input.
    pub fn validate(&self) -> Result<(), String> {
        if self.max == 0 {
            return Err("length window maximum must be at least 1".to_string());
        }
        if self.min > self.max {
            return Err(format!(
                "length window minimum {} exceeds maximum {}",
                self.min, self.max
            ));
        }
        Ok(())
    }
}

/// Length verdict for one generated field relative to its window.
///
/// The preview client maps this to cell coloring: below minimum is a warning,
/// above maximum an error, within the window a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthStatus {
    BelowMinimum,
    WithinWindow,
    AboveMaximum,
}

//! Value objects: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.
//! Every constructor here validates its input, so a constructed value is always valid.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one from new inputs.
///
/// The trait requires:
/// - **Clone**: value objects are values, not references
/// - **PartialEq**: compared by their attribute values
/// - **Debug**: helpful for logging and tests
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// A non-negative, finite amount: a quantity, a unit price or a money total.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PositiveNumber(f64);

impl PositiveNumber {
    pub const ZERO: PositiveNumber = PositiveNumber(0.0);

    /// Validate and wrap `value`. Negative, NaN and infinite values are rejected.
    pub fn create(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::new(format!(
                "value must be a positive number (got {value})"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn add(&self, other: PositiveNumber) -> Result<Self, ValidationError> {
        Self::create(self.0 + other.0)
    }

    pub fn multiply(&self, other: PositiveNumber) -> Result<Self, ValidationError> {
        Self::create(self.0 * other.0)
    }
}

impl ValueObject for PositiveNumber {}

impl core::fmt::Display for PositiveNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<f64> for PositiveNumber {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::create(value)
    }
}

impl<'de> Deserialize<'de> for PositiveNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        Self::create(raw).map_err(serde::de::Error::custom)
    }
}

/// A shipping destination. Stored trimmed; never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn create(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new("address must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Address {}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::create(raw).map_err(serde::de::Error::custom)
    }
}

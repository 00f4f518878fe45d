//! Catalog models

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unit of measure a product is sold in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitOfMeasure {
    Milliliter,
    Liter,
    Milligram,
    Gram,
    Centimeter,
    Meter,
    #[default]
    Unit,
}

impl UnitOfMeasure {
    pub const ALL: [UnitOfMeasure; 7] = [
        UnitOfMeasure::Milliliter,
        UnitOfMeasure::Liter,
        UnitOfMeasure::Milligram,
        UnitOfMeasure::Gram,
        UnitOfMeasure::Centimeter,
        UnitOfMeasure::Meter,
        UnitOfMeasure::Unit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitOfMeasure::Milliliter => "milliliter",
            UnitOfMeasure::Liter => "liter",
            UnitOfMeasure::Milligram => "milligram",
            UnitOfMeasure::Gram => "gram",
            UnitOfMeasure::Centimeter => "centimeter",
            UnitOfMeasure::Meter => "meter",
            UnitOfMeasure::Unit => "unit",
        }
    }
}

impl std::fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or submitted unit is not one of the known variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown unit of measure: {0}")]
pub struct UnknownUnit(pub String);

impl std::str::FromStr for UnitOfMeasure {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitOfMeasure::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| UnknownUnit(s.to_string()))
    }
}

impl TryFrom<String> for UnitOfMeasure {
    type Error = UnknownUnit;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Currency recorded on new products when none is given
pub const DEFAULT_CURRENCY: &str = "USD";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_round_trips_through_str() {
        for unit in UnitOfMeasure::ALL {
            assert_eq!(unit.as_str().parse::<UnitOfMeasure>().unwrap(), unit);
        }
    }

    #[test]
    fn test_unit_serializes_lowercase() {
        let json = serde_json::to_string(&UnitOfMeasure::Milliliter).unwrap();
        assert_eq!(json, "\"milliliter\"");
        let unit: UnitOfMeasure = serde_json::from_str("\"gram\"").unwrap();
        assert_eq!(unit, UnitOfMeasure::Gram);
    }

    #[test]
    fn test_unknown_unit_rejected() {
        assert!("kilogram".parse::<UnitOfMeasure>().is_err());
        assert!(UnitOfMeasure::try_from("UNIT".to_string()).is_err());
    }

    #[test]
    fn test_default_unit() {
        assert_eq!(UnitOfMeasure::default(), UnitOfMeasure::Unit);
    }
}

//! Consumption-related types.
//!
//! This module contains the types produced by a consumption query:
//! - [`ConsumptionRecord`] - One gas day of consumption
//! - [`YearOverYear`] - Two record sets a year apart

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Consumption Record
// ============================================================================

/// Consumption measured over one gas day.
///
/// Field names map to the portal's wire format (`journeeGaziere`,
/// `energieConsomme`). Records are read-only once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    /// The gas day the reading covers.
    #[serde(rename = "journeeGaziere")]
    pub gas_day: NaiveDate,

    /// Energy consumed over the gas day, in kWh.
    #[serde(rename = "energieConsomme")]
    pub energy_kwh: f64,
}

/// Sums the energy of a record set, in kWh.
pub fn total_energy_kwh(records: &[ConsumptionRecord]) -> f64 {
    records.iter().map(|r| r.energy_kwh).sum()
}

// ============================================================================
// Year-over-year Comparison
// ============================================================================

/// The result of a year-over-year comparison fetch.
///
/// `previous` covers the same window as `current`, shifted back 365 days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearOverYear {
    /// Records for the current window.
    pub current: Vec<ConsumptionRecord>,
    /// Records for the same window one year earlier.
    pub previous: Vec<ConsumptionRecord>,
}

impl YearOverYear {
    /// Total consumption of the current window, in kWh.
    pub fn current_total_kwh(&self) -> f64 {
        total_energy_kwh(&self.current)
    }

    /// Total consumption of the prior-year window, in kWh.
    pub fn previous_total_kwh(&self) -> f64 {
        total_energy_kwh(&self.previous)
    }

    /// Difference between the current and prior-year totals, in kWh.
    ///
    /// Positive means this year consumed more.
    pub fn delta_kwh(&self) -> f64 {
        self.current_total_kwh() - self.previous_total_kwh()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: &str, kwh: f64) -> ConsumptionRecord {
        ConsumptionRecord {
            gas_day: day.parse().unwrap(),
            energy_kwh: kwh,
        }
    }

    #[test]
    fn test_deserialize_wire_format() {
        let json = r#"{"journeeGaziere": "2024-01-01", "energieConsomme": 12.5}"#;
        let parsed: ConsumptionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, record("2024-01-01", 12.5));
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let json = r#"{
            "journeeGaziere": "2024-01-02",
            "energieConsomme": 7.0,
            "volumeBrutConsomme": 0.64,
            "qualificationReleve": "Mesuré"
        }"#;
        let parsed: ConsumptionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, record("2024-01-02", 7.0));
    }

    #[test]
    fn test_total_energy() {
        let records = vec![record("2024-01-01", 12.5), record("2024-01-02", 7.5)];
        assert!((total_energy_kwh(&records) - 20.0).abs() < f64::EPSILON);
        assert!(total_energy_kwh(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_year_over_year_delta() {
        let comparison = YearOverYear {
            current: vec![record("2024-01-01", 10.0)],
            previous: vec![record("2023-01-01", 14.0), record("2023-01-02", 2.0)],
        };
        assert!((comparison.current_total_kwh() - 10.0).abs() < f64::EPSILON);
        assert!((comparison.previous_total_kwh() - 16.0).abs() < f64::EPSILON);
        assert!((comparison.delta_kwh() + 6.0).abs() < f64::EPSILON);
    }
}

//! Processed IDF curve points, derived per request from a station's raw IDF table.

use crate::types::idf_record::ReturnPeriod;
use serde::Serialize;
use std::collections::BTreeMap;

/// A point of the live API curves: whole-minute duration plus intensity per return period.
///
/// Serializes flat, e.g. `{"duration": 10, "2": 30.0, "5": 42.6}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePoint {
    /// Storm duration in minutes, always positive.
    pub duration: u32,
    #[serde(flatten)]
    pub intensities: BTreeMap<ReturnPeriod, f64>,
}

impl CurvePoint {
    pub fn intensity(&self, return_period: ReturnPeriod) -> Option<f64> {
        self.intensities.get(&return_period).copied()
    }
}

/// A point of the report curves, which keep fractional durations in both minutes and hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPoint {
    pub duration_minutes: f64,
    pub duration_hours: f64,
    #[serde(flatten)]
    pub intensities: BTreeMap<ReturnPeriod, f64>,
}

impl ReportPoint {
    pub fn intensity(&self, return_period: ReturnPeriod) -> Option<f64> {
        self.intensities.get(&return_period).copied()
    }
}

//! Turns a station's raw depth table into intensity curves.
//!
//! Two builders exist and deliberately differ:
//!
//! * [`build_curves`] feeds the live API. It keys rows by whole minutes (loose parser),
//!   always divides the depth by the duration in hours, and keeps duplicate durations as
//!   separate points.
//! * [`build_report_curves`] feeds tabular reports. It uses the strict parser and the
//!   dual-formula [`compute_intensity`], and merges rows with identical durations
//!   (last row wins per return period).

use crate::idf::duration::{duration_to_minutes, parse_duration_text};
use crate::idf::intensity::{compute_intensity, mm_to_inch};
use crate::types::curve_point::{CurvePoint, ReportPoint};
use crate::types::idf_record::{IdfRecord, ReturnPeriod};
use crate::types::intensity_unit::IntensityUnit;
use log::{debug, warn};
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

/// Builds the live API curves for a station.
///
/// Rows whose duration does not parse to a positive number of minutes are skipped, as are
/// rows without any depth. The result is sorted by duration; rows sharing a duration stay
/// separate, in source order.
pub fn build_curves(record: &IdfRecord, unit: IntensityUnit) -> Vec<CurvePoint> {
    let mut points: Vec<CurvePoint> = record
        .entries()
        .iter()
        .filter_map(|entry| {
            let minutes = match duration_to_minutes(&entry.duration) {
                Some(m) if m > 0 => m,
                _ => {
                    debug!("Skipping IDF row with unusable duration '{}'", entry.duration);
                    return None;
                }
            };
            let minutes = u32::try_from(minutes).ok()?;
            let hours = f64::from(minutes) / 60.0;

            let intensities: BTreeMap<ReturnPeriod, f64> = entry
                .depths()
                .map(|(rp, depth)| {
                    let intensity = depth / hours;
                    let intensity = match unit {
                        IntensityUnit::MillimetersPerHour => intensity,
                        IntensityUnit::InchesPerHour => mm_to_inch(intensity),
                    };
                    (rp, intensity)
                })
                .collect();

            (!intensities.is_empty()).then_some(CurvePoint {
                duration: minutes,
                intensities,
            })
        })
        .collect();

    points.sort_by_key(|p| p.duration);
    points
}

/// Builds the report curves for a station.
///
/// A row with a malformed duration is logged and skipped; it never aborts the whole table.
pub fn build_report_curves(record: &IdfRecord, unit: IntensityUnit) -> Vec<ReportPoint> {
    let mut merged: BTreeMap<OrderedFloat<f64>, ReportPoint> = BTreeMap::new();

    for entry in record.entries() {
        let duration = match parse_duration_text(&entry.duration) {
            Ok(d) => d,
            Err(e) => {
                warn!("Skipping IDF row: {e}");
                continue;
            }
        };

        let point = merged
            .entry(OrderedFloat(duration.minutes))
            .or_insert_with(|| ReportPoint {
                duration_minutes: duration.minutes,
                duration_hours: duration.hours,
                intensities: BTreeMap::new(),
            });
        for rp in ReturnPeriod::ALL {
            if let Some(intensity) =
                compute_intensity(entry.depth(rp), duration.minutes, duration.hours, unit)
            {
                point.intensities.insert(rp, intensity);
            }
        }
    }

    merged
        .into_values()
        .filter(|p| !p.intensities.is_empty())
        .collect()
}

use crate::types::intensity_unit::IntensityUnit;

pub const MM_PER_INCH: f64 = 25.4;

pub fn mm_to_inch(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

pub fn inch_to_mm(inch: f64) -> f64 {
    inch * MM_PER_INCH
}

/// Converts a rainfall depth (mm) accumulated over a duration into an hourly intensity.
///
/// Durations of an hour or less scale the depth up to an hourly rate
/// (`depth * 60 / minutes`); longer durations divide it by the number of hours.
/// An absent depth stays absent. For [`IntensityUnit::InchesPerHour`] the metric
/// intensity is converted afterwards.
///
/// Both durations must be positive, which [`crate::parse_duration_text`] guarantees.
pub fn compute_intensity(
    depth: Option<f64>,
    duration_minutes: f64,
    duration_hours: f64,
    unit: IntensityUnit,
) -> Option<f64> {
    let depth = depth?;
    let intensity = if duration_minutes <= 60.0 {
        depth * (60.0 / duration_minutes)
    } else {
        depth / duration_hours
    };
    Some(match unit {
        IntensityUnit::MillimetersPerHour => intensity,
        IntensityUnit::InchesPerHour => mm_to_inch(intensity),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MM: IntensityUnit = IntensityUnit::MillimetersPerHour;

    #[test]
    fn absent_depth_stays_absent() {
        assert_eq!(compute_intensity(None, 10.0, 10.0 / 60.0, MM), None);
        assert_eq!(compute_intensity(None, 120.0, 2.0, IntensityUnit::InchesPerHour), None);
    }

    #[test]
    fn sub_hour_durations_scale_up() {
        assert_eq!(compute_intensity(Some(5.0), 10.0, 10.0 / 60.0, MM), Some(30.0));
        assert_eq!(compute_intensity(Some(12.0), 60.0, 1.0, MM), Some(12.0));
    }

    #[test]
    fn longer_durations_divide_by_hours() {
        assert_eq!(compute_intensity(Some(48.0), 1440.0, 24.0, MM), Some(2.0));
        assert_eq!(compute_intensity(Some(30.0), 120.0, 2.0, MM), Some(15.0));
    }

    #[test]
    fn converts_to_inches_after_computing() {
        let inches = compute_intensity(Some(25.4), 60.0, 1.0, IntensityUnit::InchesPerHour).unwrap();
        assert!((inches - 1.0).abs() < 1e-12);
        assert!((inch_to_mm(mm_to_inch(7.0)) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn zero_depth_is_a_value_not_absence() {
        assert_eq!(compute_intensity(Some(0.0), 30.0, 0.5, MM), Some(0.0));
    }
}

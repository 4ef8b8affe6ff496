//! Parsing of the storm duration labels found in IDF tables ("5 min", "1 h", "24 h", ...).
//!
//! Two parsers exist. The strict one ([`parse_duration_text`], [`parse_duration_tokens`])
//! yields both minutes and hours and rejects anything it does not understand; it feeds the
//! dual-formula intensity computation. The loose one ([`duration_to_minutes`]) only extracts
//! a whole number of minutes and is used as a sort key for the live curves.

use crate::idf::error::DurationError;

/// A storm duration in both minutes and hours, `minutes == hours * 60`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StormDuration {
    pub minutes: f64,
    pub hours: f64,
}

impl StormDuration {
    pub fn from_minutes(minutes: f64) -> Self {
        Self {
            minutes,
            hours: minutes / 60.0,
        }
    }

    pub fn from_hours(hours: f64) -> Self {
        Self {
            minutes: hours * 60.0,
            hours,
        }
    }
}

/// Parses a `"<number> <unit>"` label.
///
/// Accepted units are `min`, and `h`, `hr`, `hour`, `hours`. The value must be a finite,
/// positive number.
///
/// # Errors
///
/// Returns [`DurationError::MalformedDuration`] when the label does not split into exactly
/// two whitespace-separated tokens, the value is not a positive number, or the unit is unknown.
pub fn parse_duration_text(input: &str) -> Result<StormDuration, DurationError> {
    let mut parts = input.split_whitespace();
    let (Some(value), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(DurationError::malformed(
            input,
            "expected exactly '<number> <unit>'",
        ));
    };

    let value: f64 = value
        .parse()
        .map_err(|_| DurationError::malformed(input, format!("'{value}' is not a number")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(DurationError::malformed(input, "duration must be positive"));
    }

    match unit {
        "min" => Ok(StormDuration::from_minutes(value)),
        "h" | "hr" | "hour" | "hours" => Ok(StormDuration::from_hours(value)),
        other => Err(DurationError::malformed(
            input,
            format!("unknown duration unit '{other}'"),
        )),
    }
}

/// Parses a duration given as separate tokens, e.g. `["10", "min"]`.
///
/// The tokens are joined with single spaces and handed to [`parse_duration_text`].
pub fn parse_duration_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<StormDuration, DurationError> {
    let joined = tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    parse_duration_text(&joined)
}

/// Extracts a whole number of minutes from a duration label, case-insensitively.
///
/// Labels containing `min` are read as an integer minute count. Otherwise labels
/// containing `h` are read as a (possibly fractional) hour count and truncated to whole
/// minutes. Anything else, including a label whose number does not parse, gives `None`.
pub fn duration_to_minutes(input: &str) -> Option<i64> {
    let label = input.trim().to_lowercase();
    if label.contains("min") {
        label.replace("min", "").trim().parse::<i64>().ok()
    } else if label.contains('h') {
        let hours = label.replace('h', "").trim().parse::<f64>().ok()?;
        let minutes = (hours * 60.0).trunc();
        minutes.is_finite().then_some(minutes as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minutes_and_hours() {
        assert_eq!(
            parse_duration_text("10 min"),
            Ok(StormDuration { minutes: 10.0, hours: 10.0 / 60.0 })
        );
        assert_eq!(
            parse_duration_text("24 h"),
            Ok(StormDuration { minutes: 1440.0, hours: 24.0 })
        );
        assert_eq!(parse_duration_text("1.5 hours").unwrap().minutes, 90.0);
    }

    #[test]
    fn minutes_are_hours_times_sixty_for_every_unit() {
        for label in ["5 min", "15 min", "30 min", "1 h", "2 hr", "6 hour", "12 hours", "0.5 h"] {
            let d = parse_duration_text(label).unwrap();
            assert!((d.minutes - d.hours * 60.0).abs() < 1e-9, "{label}");
        }
    }

    #[test]
    fn rejects_malformed_labels() {
        for label in ["", "10", "10min", "10 min extra", "ten min", "10 days", "10 MIN", "0 min", "-5 h", "inf h"] {
            assert!(
                matches!(parse_duration_text(label), Err(DurationError::MalformedDuration { .. })),
                "{label:?} should be rejected"
            );
        }
    }

    #[test]
    fn token_entry_point_joins_tokens() {
        assert_eq!(parse_duration_tokens(&["2", "h"]).unwrap().minutes, 120.0);
        assert_eq!(
            parse_duration_tokens(&[String::from("30"), String::from("min")]).unwrap().hours,
            0.5
        );
        assert!(parse_duration_tokens(&["2"]).is_err());
    }

    #[test]
    fn loose_parser_extracts_minutes() {
        assert_eq!(duration_to_minutes("10 min"), Some(10));
        assert_eq!(duration_to_minutes(" 5 MIN "), Some(5));
        assert_eq!(duration_to_minutes("1 h"), Some(60));
        assert_eq!(duration_to_minutes("24 H"), Some(1440));
        assert_eq!(duration_to_minutes("0.5h"), Some(30));
    }

    #[test]
    fn loose_parser_gives_none_instead_of_failing() {
        assert_eq!(duration_to_minutes("1 hr"), None);
        assert_eq!(duration_to_minutes("2 days"), None);
        assert_eq!(duration_to_minutes("ten min"), None);
        assert_eq!(duration_to_minutes(""), None);
    }
}

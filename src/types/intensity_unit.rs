use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Unit in which rainfall intensities are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntensityUnit {
    /// Millimetres per hour.
    #[default]
    MillimetersPerHour,
    /// Inches per hour.
    InchesPerHour,
}

impl IntensityUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntensityUnit::MillimetersPerHour => "mm/hr",
            IntensityUnit::InchesPerHour => "in/hr",
        }
    }
}

impl fmt::Display for IntensityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IntensityUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromStr for IntensityUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm/hr" | "mm/h" | "mm" | "metric" => Ok(IntensityUnit::MillimetersPerHour),
            "in/hr" | "in/h" | "in" | "imperial" => Ok(IntensityUnit::InchesPerHour),
            _ => Err(format!("unknown intensity unit '{s}', expected 'mm/hr' or 'in/hr'")),
        }
    }
}

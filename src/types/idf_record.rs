//! Raw IDF tables as stored in the per-province `idf_data_by_station*.json` files.
//!
//! Each station maps to a list of rows, one per storm duration. A row holds the duration
//! label (e.g. "10 min", "1 h") and one rainfall depth in millimetres per return period:
//!
//! ```json
//! [{"duration": "5 min", "2": 6.1, "5": 8.3, "10": 9.8, "25": 11.7, "50": 13.1, "100": 14.5}]
//! ```

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Statistical recurrence interval of a storm, in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReturnPeriod {
    TwoYear,
    FiveYear,
    TenYear,
    TwentyFiveYear,
    FiftyYear,
    HundredYear,
}

impl ReturnPeriod {
    pub const ALL: [ReturnPeriod; 6] = [
        ReturnPeriod::TwoYear,
        ReturnPeriod::FiveYear,
        ReturnPeriod::TenYear,
        ReturnPeriod::TwentyFiveYear,
        ReturnPeriod::FiftyYear,
        ReturnPeriod::HundredYear,
    ];

    /// The label used as a column key in the data files and API responses.
    pub fn label(&self) -> &'static str {
        match self {
            ReturnPeriod::TwoYear => "2",
            ReturnPeriod::FiveYear => "5",
            ReturnPeriod::TenYear => "10",
            ReturnPeriod::TwentyFiveYear => "25",
            ReturnPeriod::FiftyYear => "50",
            ReturnPeriod::HundredYear => "100",
        }
    }

    pub fn years(&self) -> u32 {
        match self {
            ReturnPeriod::TwoYear => 2,
            ReturnPeriod::FiveYear => 5,
            ReturnPeriod::TenYear => 10,
            ReturnPeriod::TwentyFiveYear => 25,
            ReturnPeriod::FiftyYear => 50,
            ReturnPeriod::HundredYear => 100,
        }
    }
}

impl fmt::Display for ReturnPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReturnPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReturnPeriod::ALL
            .into_iter()
            .find(|rp| rp.label() == s)
            .ok_or_else(|| format!("'{s}' is not a return period label"))
    }
}

impl Serialize for ReturnPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One row of a station's IDF table.
///
/// Depths missing from the source (null, absent, or not numeric) stay absent; they mark
/// insufficient data quality and are never filled in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "HashMap<String, Value>")]
pub struct DurationEntry {
    /// Raw duration label, e.g. "10 min" or "24 h". Empty when the source row had none.
    pub duration: String,
    depths: BTreeMap<ReturnPeriod, f64>,
}

impl DurationEntry {
    pub fn new(
        duration: impl Into<String>,
        depths: impl IntoIterator<Item = (ReturnPeriod, f64)>,
    ) -> Self {
        Self {
            duration: duration.into(),
            depths: depths.into_iter().collect(),
        }
    }

    /// Rainfall depth in millimetres for a return period, if the table has one.
    pub fn depth(&self, return_period: ReturnPeriod) -> Option<f64> {
        self.depths.get(&return_period).copied()
    }

    /// Present depths in ascending return period order.
    pub fn depths(&self) -> impl Iterator<Item = (ReturnPeriod, f64)> + '_ {
        self.depths.iter().map(|(rp, depth)| (*rp, *depth))
    }
}

impl From<HashMap<String, Value>> for DurationEntry {
    fn from(mut row: HashMap<String, Value>) -> Self {
        let duration = match row.remove("duration") {
            Some(Value::String(s)) => s,
            // Some extraction runs wrote the label as ["10", "min"].
            Some(Value::Array(parts)) => parts
                .iter()
                .map(|part| match part {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" "),
            _ => String::new(),
        };

        let depths = ReturnPeriod::ALL
            .into_iter()
            .filter_map(|rp| {
                let depth = match row.get(rp.label())? {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                }?;
                depth.is_finite().then_some((rp, depth))
            })
            .collect();

        Self { duration, depths }
    }
}

impl Serialize for DurationEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + ReturnPeriod::ALL.len()))?;
        map.serialize_entry("duration", &self.duration)?;
        for rp in ReturnPeriod::ALL {
            map.serialize_entry(rp.label(), &self.depth(rp))?;
        }
        map.end()
    }
}

/// The full IDF table of one station, in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdfRecord {
    entries: Vec<DurationEntry>,
}

impl IdfRecord {
    pub fn new(entries: Vec<DurationEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DurationEntry] {
        &self.entries
    }
}

/// IDF tables keyed by station identifier.
pub type IdfIndex = HashMap<String, IdfRecord>;

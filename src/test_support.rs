//! Shared fixtures for unit tests: a small Canadian station catalog and IDF tables.

use crate::idf_service::IdfService;
use crate::types::idf_record::{DurationEntry, IdfIndex, IdfRecord, ReturnPeriod};
use crate::types::station::Station;

pub(crate) fn fixture_stations() -> Vec<Station> {
    vec![
        Station::new("6144475", "LONDON A", "ON", 43.0330, -81.1510),
        Station::new("6144478", "LONDON CS", "ON", 43.0110, -81.1530),
        Station::new("6158355", "TORONTO CITY", "ON", 43.6667, -79.4000),
        Station::new("6048261", "THUNDER BAY A", "ON", 48.3700, -89.3200),
        Station::new("6000001", "SPRINGFIELD", "ON", 48.0000, -86.0000),
        Station::new("7025250", "MONTREAL/PIERRE ELLIOTT TRUDEAU INTL", "QC", 45.4700, -73.7400),
        Station::new("6105976", "OTTAWA CDA", "ON (Ontario)", 45.3800, -75.7200),
        Station::new("1108447", "VANCOUVER INTL A", "BC", 49.1900, -123.1800),
        Station::new("1108395", "VANCOUVER HARBOUR CS", "BC", 49.2950, -123.1200),
    ]
}

/// A typical table: sub-hour and multi-hour rows plus one row with no usable depths.
pub(crate) fn fixture_record() -> IdfRecord {
    use ReturnPeriod::*;
    IdfRecord::new(vec![
        DurationEntry::new(
            "5 min",
            [(TwoYear, 6.0), (FiveYear, 8.4), (TenYear, 10.0), (TwentyFiveYear, 12.0), (FiftyYear, 13.5), (HundredYear, 15.0)],
        ),
        DurationEntry::new(
            "10 min",
            [(TwoYear, 9.0), (FiveYear, 12.6), (TenYear, 15.0), (TwentyFiveYear, 18.0), (FiftyYear, 20.3), (HundredYear, 22.5)],
        ),
        DurationEntry::new("1 h", [(TwoYear, 20.0), (FiveYear, 28.0), (HundredYear, 50.0)]),
        DurationEntry::new("2 h", Vec::new()),
        DurationEntry::new("24 h", [(TwoYear, 48.0), (HundredYear, 120.0)]),
    ])
}

pub(crate) fn fixture_idf_index() -> IdfIndex {
    [
        "6144478", "6158355", "6048261", "6000001", "7025250", "6105976", "1108395",
    ]
    .into_iter()
    .map(|id| (id.to_string(), fixture_record()))
    .collect()
}

pub(crate) fn fixture_service() -> IdfService {
    IdfService::new(fixture_stations(), fixture_idf_index())
}

//! Period-indexed market-cap series for charting.

use std::collections::{BTreeMap, BTreeSet};

use super::aggregate::aggregate;
use super::period::{LabelStyle, PeriodUnit};
use super::record::Record;

/// Raw currency units per display unit (hundred-millions).
pub const DISPLAY_DIVISOR: f64 = 100_000_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub sector: String,
    /// Aligned with [`TimeSeries::index`]; `None` where the sector has no
    /// data for that period.
    pub values: Vec<Option<f64>>,
}

/// Pivot of period label × sector, in display units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    pub index: Vec<String>,
    pub series: Vec<Series>,
}

impl TimeSeries {
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn get(&self, sector: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.sector == sector)
    }

    /// Smallest and largest plotted value.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().flatten().copied())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Build the chart pivot from filtered records.
///
/// When `sectors` is given only those sectors are charted. The index is
/// sorted by its label text; series are in sector-name order.
pub fn build_time_series(
    records: &[&Record],
    unit: PeriodUnit,
    divisor: f64,
    sectors: Option<&[String]>,
) -> TimeSeries {
    let selected: Vec<&Record> = match sectors {
        Some(keep) => records
            .iter()
            .copied()
            .filter(|r| keep.iter().any(|s| *s == r.sector))
            .collect(),
        None => records.to_vec(),
    };

    let mut pivot: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    let mut names: BTreeSet<String> = BTreeSet::new();
    for row in aggregate(&selected, unit) {
        *pivot
            .entry(row.period.label(LabelStyle::ChartIndex))
            .or_default()
            .entry(row.sector.clone())
            .or_insert(0.0) += row.market_cap;
        names.insert(row.sector);
    }

    let series = names
        .into_iter()
        .map(|sector| Series {
            values: pivot
                .values()
                .map(|cells| cells.get(&sector).map(|v| v / divisor))
                .collect(),
            sector,
        })
        .collect();

    TimeSeries {
        index: pivot.into_keys().collect(),
        series,
    }
}

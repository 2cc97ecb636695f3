//! Per-period, per-sector market-cap aggregation.

use std::collections::BTreeMap;

use super::period::{PeriodKey, PeriodUnit};
use super::record::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    pub period: PeriodKey,
    pub sector: String,
    pub market_cap: f64,
}

/// Sum market cap per `(period, sector)`.
///
/// Rows come back ordered by period, then sector. Records without a date
/// are skipped; range filtering normally removes them already.
pub fn aggregate(records: &[&Record], unit: PeriodUnit) -> Vec<AggregatedRow> {
    let mut sums: BTreeMap<(PeriodKey, &str), f64> = BTreeMap::new();

    for record in records {
        let Some(date) = record.date else {
            continue;
        };
        *sums
            .entry((unit.key_for(date), record.sector.as_str()))
            .or_insert(0.0) += record.market_cap;
    }

    sums.into_iter()
        .map(|((period, sector), market_cap)| AggregatedRow {
            period,
            sector: sector.to_string(),
            market_cap,
        })
        .collect()
}

/// Aggregated values regrouped per sector, each series in period order.
pub fn series_by_sector(rows: &[AggregatedRow]) -> BTreeMap<&str, Vec<(PeriodKey, f64)>> {
    let mut by_sector: BTreeMap<&str, Vec<(PeriodKey, f64)>> = BTreeMap::new();
    for row in rows {
        by_sector
            .entry(row.sector.as_str())
            .or_default()
            .push((row.period, row.market_cap));
    }
    for series in by_sector.values_mut() {
        series.sort_by_key(|(period, _)| *period);
    }
    by_sector
}

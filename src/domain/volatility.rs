//! End-to-end and incremental percentage changes per sector.
//!
//! Percentages are whole numbers: positive changes round up, everything
//! else rounds down. A change measured from a zero base is
//! [`Change::Undefined`] rather than an infinity.

use std::cmp::Ordering;
use std::fmt;

use super::aggregate::{series_by_sector, AggregatedRow};
use super::period::{parse_period_label, LabelStyle};

pub const TRANSITION_ARROW: char = '→';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Percent(i64),
    Undefined,
}

impl Change {
    pub fn between(from: f64, to: f64) -> Self {
        if from == 0.0 {
            return Change::Undefined;
        }
        let raw = (to - from) / from * 100.0;
        if !raw.is_finite() {
            return Change::Undefined;
        }
        let rounded = if raw > 0.0 { raw.ceil() } else { raw.floor() };
        Change::Percent(rounded as i64)
    }

    pub fn percent(&self) -> Option<i64> {
        match self {
            Change::Percent(p) => Some(*p),
            Change::Undefined => None,
        }
    }

    /// Descending by percent, undefined last.
    fn rank_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Change::Percent(a), Change::Percent(b)) => b.cmp(a),
            (Change::Percent(_), Change::Undefined) => Ordering::Less,
            (Change::Undefined, Change::Percent(_)) => Ordering::Greater,
            (Change::Undefined, Change::Undefined) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Percent(p) => write!(f, "{p}"),
            Change::Undefined => f.write_str("n/a"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorChange {
    pub sector: String,
    pub change: Change,
}

/// First-to-last change per sector, ranked highest first.
///
/// Ties keep alphabetical sector order.
pub fn end_to_end(rows: &[AggregatedRow]) -> Vec<SectorChange> {
    let mut changes: Vec<SectorChange> = series_by_sector(rows)
        .into_iter()
        .filter_map(|(sector, series)| {
            let first = series.first()?.1;
            let last = series.last()?.1;
            Some(SectorChange {
                sector: sector.to_string(),
                change: Change::between(first, last),
            })
        })
        .collect();
    changes.sort_by(|a, b| a.change.rank_cmp(&b.change));
    changes
}

/// The `n` best performers of an already ranked list.
pub fn top_growth(ranked: &[SectorChange], n: usize) -> &[SectorChange] {
    &ranked[..n.min(ranked.len())]
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncrementalRow {
    pub sector: String,
    /// One cell per table column; `None` where the sector has no such
    /// transition.
    pub cells: Vec<Option<Change>>,
}

/// Wide table of period-over-period changes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncrementalTable {
    pub columns: Vec<String>,
    pub rows: Vec<IncrementalRow>,
}

impl IncrementalTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, sector: &str) -> Option<&IncrementalRow> {
        self.rows.iter().find(|r| r.sector == sector)
    }
}

fn transition_label(from: &str, to: &str) -> String {
    format!("{from}{TRANSITION_ARROW}{to}")
}

/// Sort key for a transition column: the start of its left period, with
/// unparseable labels after every dated one.
fn column_sort_key(label: &str) -> (bool, Option<chrono::NaiveDate>) {
    let left = label
        .split_once(TRANSITION_ARROW)
        .map(|(l, _)| l)
        .unwrap_or(label);
    match parse_period_label(left) {
        Some(date) => (false, Some(date)),
        None => (true, None),
    }
}

/// Change between each pair of adjacent periods, one row per sector.
pub fn incremental(rows: &[AggregatedRow]) -> IncrementalTable {
    let by_sector = series_by_sector(rows);

    let mut columns: Vec<String> = Vec::new();
    let mut per_sector: Vec<(String, Vec<(String, Change)>)> = Vec::with_capacity(by_sector.len());

    for (sector, series) in &by_sector {
        let transitions: Vec<(String, Change)> = series
            .windows(2)
            .map(|pair| {
                let (from_key, from_val) = pair[0];
                let (to_key, to_val) = pair[1];
                let label = transition_label(
                    &from_key.label(LabelStyle::Table),
                    &to_key.label(LabelStyle::Table),
                );
                (label, Change::between(from_val, to_val))
            })
            .collect();
        for (label, _) in &transitions {
            if !columns.contains(label) {
                columns.push(label.clone());
            }
        }
        per_sector.push((sector.to_string(), transitions));
    }

    columns.sort_by_key(|label| column_sort_key(label));

    let rows = per_sector
        .into_iter()
        .map(|(sector, transitions)| IncrementalRow {
            sector,
            cells: columns
                .iter()
                .map(|col| {
                    transitions
                        .iter()
                        .find(|(label, _)| label == col)
                        .map(|(_, change)| *change)
                })
                .collect(),
        })
        .collect();

    IncrementalTable { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::period::PeriodUnit;
    use chrono::NaiveDate;

    fn month_row(month: u32, sector: &str, value: f64) -> AggregatedRow {
        AggregatedRow {
            period: PeriodUnit::Month.key_for(NaiveDate::from_ymd_opt(2024, month, 1).unwrap()),
            sector: sector.to_string(),
            market_cap: value,
        }
    }

    #[test]
    fn gains_round_up_and_losses_round_down() {
        assert_eq!(Change::between(100.0, 104.2), Change::Percent(5));
        assert_eq!(Change::between(100.0, 95.8), Change::Percent(-5));
        assert_eq!(Change::between(150.0, 200.0), Change::Percent(34));
        assert_eq!(Change::between(90.0, 80.0), Change::Percent(-12));
    }

    #[test]
    fn exact_changes_stay_exact() {
        assert_eq!(Change::between(100.0, 150.0), Change::Percent(50));
        assert_eq!(Change::between(100.0, 100.0), Change::Percent(0));
        assert_eq!(Change::between(100.0, 80.0), Change::Percent(-20));
    }

    #[test]
    fn zero_base_is_undefined() {
        assert_eq!(Change::between(0.0, 10.0), Change::Undefined);
        assert_eq!(Change::between(0.0, 0.0), Change::Undefined);
        assert_eq!(Change::Undefined.to_string(), "n/a");
        assert_eq!(Change::Percent(-3).to_string(), "-3");
    }

    #[test]
    fn end_to_end_ranks_descending() {
        let rows = vec![
            month_row(1, "A", 100.0),
            month_row(1, "B", 100.0),
            month_row(2, "A", 150.0),
            month_row(2, "B", 90.0),
            month_row(3, "A", 200.0),
            month_row(3, "B", 80.0),
        ];
        let ranked = end_to_end(&rows);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].sector, "A");
        assert_eq!(ranked[0].change, Change::Percent(100));
        assert_eq!(ranked[1].sector, "B");
        assert_eq!(ranked[1].change, Change::Percent(-20));
    }

    #[test]
    fn ties_keep_alphabetical_order_and_undefined_sorts_last() {
        let rows = vec![
            month_row(1, "Zinc", 100.0),
            month_row(1, "Autos", 100.0),
            month_row(1, "Media", 0.0),
            month_row(2, "Zinc", 110.0),
            month_row(2, "Autos", 110.0),
            month_row(2, "Media", 50.0),
        ];
        let ranked = end_to_end(&rows);
        let order: Vec<&str> = ranked.iter().map(|c| c.sector.as_str()).collect();
        assert_eq!(order, vec!["Autos", "Zinc", "Media"]);
        assert_eq!(ranked[2].change, Change::Undefined);
    }

    #[test]
    fn top_growth_caps_length() {
        let rows: Vec<AggregatedRow> = (0..7)
            .flat_map(|i| {
                let name = format!("S{i}");
                vec![month_row(1, &name, 100.0), month_row(2, &name, 100.0 + i as f64)]
            })
            .collect();
        let ranked = end_to_end(&rows);
        let top = top_growth(&ranked, 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].sector, "S6");
        assert!(top.iter().all(|c| c.change.percent() >= ranked[5].change.percent()));
        assert_eq!(top_growth(&ranked[..2], 5).len(), 2);
    }

    #[test]
    fn incremental_scenario() {
        let rows = vec![
            month_row(1, "A", 100.0),
            month_row(1, "B", 100.0),
            month_row(2, "A", 150.0),
            month_row(2, "B", 90.0),
            month_row(3, "A", 200.0),
            month_row(3, "B", 80.0),
        ];
        let table = incremental(&rows);
        assert_eq!(table.columns, vec!["2024-01→2024-02", "2024-02→2024-03"]);
        assert_eq!(
            table.row("A").unwrap().cells,
            vec![Some(Change::Percent(50)), Some(Change::Percent(34))]
        );
        assert_eq!(
            table.row("B").unwrap().cells,
            vec![Some(Change::Percent(-10)), Some(Change::Percent(-12))]
        );
    }

    #[test]
    fn incremental_columns_union_in_chronological_order() {
        // Alpha's transition is discovered first but happens later.
        let rows = vec![
            month_row(3, "Alpha", 10.0),
            month_row(4, "Alpha", 20.0),
            month_row(1, "Beta", 10.0),
            month_row(2, "Beta", 10.0),
        ];
        let table = incremental(&rows);
        assert_eq!(table.columns, vec!["2024-01→2024-02", "2024-03→2024-04"]);
        assert_eq!(
            table.row("Alpha").unwrap().cells,
            vec![None, Some(Change::Percent(100))]
        );
        assert_eq!(
            table.row("Beta").unwrap().cells,
            vec![Some(Change::Percent(0)), None]
        );
    }

    #[test]
    fn single_period_sector_has_no_transitions() {
        let rows = vec![month_row(1, "A", 10.0)];
        let table = incremental(&rows);
        assert!(table.columns.is_empty());
        assert_eq!(table.rows.len(), 1);
        assert!(table.rows[0].cells.is_empty());
    }

    #[test]
    fn unparseable_labels_sort_last() {
        assert!(column_sort_key("misc→other") > column_sort_key("2030-01→2030-02"));
        assert!(column_sort_key("2024-01→2024-02") < column_sort_key("2024-02→2024-03"));
    }
}

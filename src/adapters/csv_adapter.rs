//! CSV export of the sector market-cap spreadsheet.

use crate::domain::error::SectorcapError;
use crate::domain::record::{parse_date_code, MarketData, Record};
use crate::domain::settings::ColumnNames;
use crate::ports::data_port::DataPort;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

pub struct CsvAdapter {
    path: PathBuf,
    columns: ColumnNames,
}

impl CsvAdapter {
    pub fn new(path: PathBuf, columns: ColumnNames) -> Self {
        Self { path, columns }
    }

    /// Parse a whole CSV document. Any malformed row fails the load.
    pub fn read_from<R: Read>(reader: R, columns: &ColumnNames) -> Result<MarketData, SectorcapError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| SectorcapError::DataParse {
                line: 1,
                reason: format!("unreadable header: {}", e),
            })?
            .clone();
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
                .ok_or_else(|| SectorcapError::MissingColumn {
                    column: name.to_string(),
                })
        };
        let date_idx = position(&columns.date)?;
        let sector_idx = position(&columns.sector)?;
        let cap_idx = position(&columns.market_cap)?;

        let mut records = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| SectorcapError::DataParse {
                line: e.position().map(|p| p.line()).unwrap_or(0),
                reason: format!("CSV parse error: {}", e),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let date = record.get(date_idx).and_then(parse_date_code);

            let sector = record
                .get(sector_idx)
                .ok_or_else(|| SectorcapError::DataParse {
                    line,
                    reason: format!("missing {} value", columns.sector),
                })?;

            let market_cap: f64 = record
                .get(cap_idx)
                .ok_or_else(|| SectorcapError::DataParse {
                    line,
                    reason: format!("missing {} value", columns.market_cap),
                })?
                .parse()
                .map_err(|e| SectorcapError::DataParse {
                    line,
                    reason: format!("invalid {} value: {}", columns.market_cap, e),
                })?;

            records.push(Record::new(date, sector, market_cap));
        }

        Ok(MarketData::new(records))
    }
}

impl DataPort for CsvAdapter {
    fn load(&self) -> Result<MarketData, SectorcapError> {
        let file = File::open(&self.path).map_err(|e| SectorcapError::DataLoad {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        let data = Self::read_from(file, &self.columns)?;

        tracing::info!(
            source = %self.path.display(),
            rows = data.len(),
            sectors = data.sectors().len(),
            "loaded market data"
        );
        let null_dates = data.null_date_count();
        if null_dates > 0 {
            tracing::warn!(rows = null_dates, "rows with unparseable dates will never match a range");
        }
        Ok(data)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = "DATE,IDX_IND_NM,MKTCAP\n\
        20240102,Banks,1000000000\n\
        20240102,Steel,2500000000\n\
        20240103,Banks,1100000000\n\
        bogus,Steel,2600000000\n";

    #[test]
    fn read_from_parses_rows() {
        let data = CsvAdapter::read_from(SAMPLE.as_bytes(), &ColumnNames::default()).unwrap();

        assert_eq!(data.len(), 4);
        let first = &data.records()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(first.sector, "Banks");
        assert_eq!(first.market_cap, 1_000_000_000.0);
    }

    #[test]
    fn unparseable_date_becomes_null() {
        let data = CsvAdapter::read_from(SAMPLE.as_bytes(), &ColumnNames::default()).unwrap();
        assert_eq!(data.records()[3].date, None);
        assert_eq!(data.null_date_count(), 1);
    }

    #[test]
    fn columns_are_found_by_name() {
        let content = "MKTCAP,extra,IDX_IND_NM,DATE\n5,x,Chips,20240105\n";
        let data = CsvAdapter::read_from(content.as_bytes(), &ColumnNames::default()).unwrap();
        assert_eq!(data.records()[0].sector, "Chips");
        assert_eq!(data.records()[0].market_cap, 5.0);
    }

    #[test]
    fn custom_column_names() {
        let columns = ColumnNames {
            date: "d".into(),
            sector: "s".into(),
            market_cap: "m".into(),
        };
        let data = CsvAdapter::read_from("d,s,m\n20240105,Chips,7.5\n".as_bytes(), &columns).unwrap();
        assert_eq!(data.records()[0].market_cap, 7.5);
    }

    #[test]
    fn missing_column_fails() {
        let err = CsvAdapter::read_from("DATE,IDX_IND_NM\n20240102,Banks\n".as_bytes(), &ColumnNames::default())
            .unwrap_err();
        assert!(matches!(err, SectorcapError::MissingColumn { column } if column == "MKTCAP"));
    }

    #[test]
    fn bad_market_cap_fails_whole_load() {
        let content = "DATE,IDX_IND_NM,MKTCAP\n20240102,Banks,100\n20240103,Banks,lots\n";
        let err = CsvAdapter::read_from(content.as_bytes(), &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, SectorcapError::DataParse { line: 3, .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sectors.csv");
        fs::write(&path, SAMPLE).unwrap();

        let adapter = CsvAdapter::new(path.clone(), ColumnNames::default());
        let data = adapter.load().unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(adapter.describe(), path.display().to_string());
    }

    #[test]
    fn load_missing_file_fails() {
        let adapter = CsvAdapter::new(PathBuf::from("/nonexistent/sectors.csv"), ColumnNames::default());
        assert!(matches!(adapter.load(), Err(SectorcapError::DataLoad { .. })));
    }
}

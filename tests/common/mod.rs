#![allow(dead_code)]

use chrono::NaiveDate;
use sectorcap::domain::record::{MarketData, Record};
use std::io::Write;
use tempfile::NamedTempFile;

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Two sectors over three months: A grows 1.0e10 → 1.5e10 → 2.0e10 while
/// B shrinks 1.0e10 → 9.0e9 → 8.0e9.
pub fn two_sector_data() -> MarketData {
    MarketData::new(vec![
        Record::new(Some(ymd(2024, 1, 2)), "A", 1.0e10),
        Record::new(Some(ymd(2024, 1, 2)), "B", 1.0e10),
        Record::new(Some(ymd(2024, 2, 1)), "A", 1.5e10),
        Record::new(Some(ymd(2024, 2, 1)), "B", 9.0e9),
        Record::new(Some(ymd(2024, 3, 4)), "A", 2.0e10),
        Record::new(Some(ymd(2024, 3, 4)), "B", 8.0e9),
    ])
}

/// Same rows as [`two_sector_data`], plus one row with an unparseable date.
pub const TWO_SECTOR_CSV: &str = "DATE,IDX_IND_NM,MKTCAP\n\
    20240102,A,10000000000\n\
    20240102,B,10000000000\n\
    20240201,A,15000000000\n\
    20240201,B,9000000000\n\
    20240304,A,20000000000\n\
    20240304,B,8000000000\n\
    n/a,B,1\n";

/// Seven sectors in one year so the top list has to cut.
pub fn seven_sector_data() -> MarketData {
    let growth = [
        ("Autos", 1.10),
        ("Banks", 0.95),
        ("Chemicals", 1.40),
        ("Chips", 2.00),
        ("Media", 1.05),
        ("Steel", 0.80),
        ("Telecom", 1.20),
    ];
    let mut records = Vec::new();
    for (sector, factor) in growth {
        records.push(Record::new(Some(ymd(2023, 1, 3)), sector, 1.0e11));
        records.push(Record::new(Some(ymd(2023, 12, 28)), sector, 1.0e11 * factor));
    }
    MarketData::new(records)
}

pub fn write_temp_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

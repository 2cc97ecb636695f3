//! Runtime settings resolved from configuration (see `sectorcap.ini`).

use std::path::PathBuf;

use super::error::SectorcapError;
use super::view::{ViewOptions, DEFAULT_TOP_N};
use super::timeseries::DISPLAY_DIVISOR;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_DATA_PATH: &str = "data/KRX_sector_mktcap.csv";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";

/// Header names of the three columns the loader reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub date: String,
    pub sector: String,
    pub market_cap: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: "DATE".into(),
            sector: "IDX_IND_NM".into(),
            market_cap: "MKTCAP".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_path: PathBuf,
    pub columns: ColumnNames,
    pub view: ViewOptions,
    pub listen: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            columns: ColumnNames::default(),
            view: ViewOptions::default(),
            listen: DEFAULT_LISTEN.to_string(),
        }
    }
}

impl Settings {
    /// Read every key, falling back to defaults for missing ones.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, SectorcapError> {
        let defaults = Self::default();
        let columns = ColumnNames {
            date: config.get_string_or("data", "date_column", &defaults.columns.date),
            sector: config.get_string_or("data", "sector_column", &defaults.columns.sector),
            market_cap: config.get_string_or(
                "data",
                "market_cap_column",
                &defaults.columns.market_cap,
            ),
        };

        let divisor = config
            .get_double("display", "unit_divisor")?
            .unwrap_or(DISPLAY_DIVISOR);
        if !(divisor.is_finite() && divisor > 0.0) {
            return Err(SectorcapError::ConfigInvalid {
                section: "display".into(),
                key: "unit_divisor".into(),
                reason: "must be a positive number".into(),
            });
        }

        let top_n = config
            .get_int("display", "top_n")?
            .unwrap_or(DEFAULT_TOP_N as i64);
        if top_n < 1 {
            return Err(SectorcapError::ConfigInvalid {
                section: "display".into(),
                key: "top_n".into(),
                reason: "must be at least 1".into(),
            });
        }

        Ok(Self {
            data_path: config
                .get_string("data", "path")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            columns,
            view: ViewOptions {
                divisor,
                top_n: top_n as usize,
            },
            listen: config.get_string_or("web", "listen", &defaults.listen),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let settings = Settings::from_config(&make_config("")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.data_path, PathBuf::from("data/KRX_sector_mktcap.csv"));
        assert_eq!(settings.columns.sector, "IDX_IND_NM");
        assert_eq!(settings.view.top_n, 5);
    }

    #[test]
    fn overrides_are_applied() {
        let settings = Settings::from_config(&make_config(
            r#"
[data]
path = /srv/sectors.csv
date_column = trade_date
sector_column = sector
market_cap_column = cap

[display]
unit_divisor = 1000000
top_n = 3

[web]
listen = 0.0.0.0:8080
"#,
        ))
        .unwrap();
        assert_eq!(settings.data_path, PathBuf::from("/srv/sectors.csv"));
        assert_eq!(
            settings.columns,
            ColumnNames {
                date: "trade_date".into(),
                sector: "sector".into(),
                market_cap: "cap".into(),
            }
        );
        assert_eq!(settings.view.divisor, 1_000_000.0);
        assert_eq!(settings.view.top_n, 3);
        assert_eq!(settings.listen, "0.0.0.0:8080");
    }

    #[test]
    fn blank_column_name_falls_back() {
        let settings = Settings::from_config(&make_config("[data]\ndate_column =\n")).unwrap();
        assert_eq!(settings.columns.date, "DATE");
    }

    #[test]
    fn non_positive_divisor_fails() {
        let err = Settings::from_config(&make_config("[display]\nunit_divisor = 0\n")).unwrap_err();
        assert!(matches!(err, SectorcapError::ConfigInvalid { key, .. } if key == "unit_divisor"));
    }

    #[test]
    fn unparseable_numbers_fail() {
        for (content, bad_key) in [
            ("[display]\ntop_n = abc\n", "top_n"),
            ("[display]\nunit_divisor = lots\n", "unit_divisor"),
        ] {
            let err = Settings::from_config(&make_config(content)).unwrap_err();
            assert!(
                matches!(&err, SectorcapError::ConfigInvalid { key, .. } if key == bad_key),
                "{err}"
            );
            assert_eq!(err.exit_status(), 2);
        }
    }

    #[test]
    fn zero_top_n_fails() {
        let err = Settings::from_config(&make_config("[display]\ntop_n = 0\n")).unwrap_err();
        assert!(matches!(err, SectorcapError::ConfigInvalid { key, .. } if key == "top_n"));
    }
}

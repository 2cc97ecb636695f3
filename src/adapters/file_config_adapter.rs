//! INI file configuration adapter.

use crate::domain::error::SectorcapError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SectorcapError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| SectorcapError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, SectorcapError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| SectorcapError::ConfigParse {
                file: "<string>".into(),
                reason,
            })?;
        Ok(Self { config })
    }

    /// Empty configuration: every lookup returns its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, SectorcapError> {
        self.config
            .getint(section, key)
            .map_err(|reason| invalid(section, key, reason))
    }

    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, SectorcapError> {
        self.config
            .getfloat(section, key)
            .map_err(|reason| invalid(section, key, reason))
    }
}

fn invalid(section: &str, key: &str, reason: String) -> SectorcapError {
    SectorcapError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}

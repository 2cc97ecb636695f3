//! Configuration access port trait.

use crate::domain::error::SectorcapError;

/// Read-only access to sectioned key/value settings.
///
/// Numeric getters return `Ok(None)` for a missing key and
/// [`SectorcapError::ConfigInvalid`] for a value that does not parse.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, SectorcapError>;
    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, SectorcapError>;

    /// Like [`get_string`](Self::get_string), treating blank values as missing.
    fn get_string_or(&self, section: &str, key: &str, default: &str) -> String {
        self.get_string(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    }
}

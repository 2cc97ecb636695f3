//! Report rendering port trait.

use crate::domain::error::SectorcapError;
use crate::domain::view::{Selection, View};

/// Turns a computed view into a document.
pub trait ReportPort {
    fn render(&self, view: &View, selection: &Selection) -> Result<String, SectorcapError>;

    /// Render and write to `output_path`, creating parent directories.
    fn write(
        &self,
        view: &View,
        selection: &Selection,
        output_path: &std::path::Path,
    ) -> Result<(), SectorcapError> {
        let document = self.render(view, selection)?;
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_path, document)?;
        Ok(())
    }
}

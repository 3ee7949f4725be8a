//! Upload form validation.

use crate::error::DashboardError;

/// What the user has entered on the upload page.
///
/// `F` is whatever stands for the selected file: a name in tests and
/// tooling, the browser's `File` handle in the web UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadForm<F = String> {
    /// The selected file, `None` when nothing is selected.
    pub file: Option<F>,
    /// Output directory exactly as typed.
    pub output_dir: String,
}

/// A form that passed validation and may be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUpload<F = String> {
    pub file: F,
    pub output_dir: String,
}

impl<F> UploadForm<F> {
    pub fn new(file: Option<F>, output_dir: impl Into<String>) -> Self {
        Self {
            file,
            output_dir: output_dir.into(),
        }
    }

    /// Check the form before anything is sent.
    ///
    /// The file is checked before the directory. The directory is checked
    /// trimmed but forwarded as typed.
    pub fn validate(self) -> Result<ValidUpload<F>, DashboardError> {
        let file = self.file.ok_or(DashboardError::MissingFile)?;

        if self.output_dir.trim().is_empty() {
            return Err(DashboardError::MissingOutputDir);
        }

        Ok(ValidUpload {
            file,
            output_dir: self.output_dir,
        })
    }
}

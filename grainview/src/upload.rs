//! Excel-file selection for sieve-data uploads.
//!
//! Only `.xlsx` and `.xls` names are accepted, case-insensitively. A
//! rejected selection is cleared and reported to the user; nothing is read
//! from disk here.

use thiserror::Error;

/// Upload validation error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("please upload an Excel file (.xlsx or .xls)")]
    BadExtension { path: String },
}

/// Validate a selected path and return the bare file name to display.
pub fn validate_upload(path: &str) -> Result<String, UploadError> {
    let lower = path.to_lowercase();
    if !(lower.ends_with(".xlsx") || lower.ends_with(".xls")) {
        return Err(UploadError::BadExtension {
            path: path.to_string(),
        });
    }

    // Bare name, whichever separator the picker used
    let name = path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(path)
        .to_string();
    Ok(name)
}

/// Current file-input state: the selected path and the label shown next to
/// the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadState {
    selected: Option<String>,
    label: String,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            selected: None,
            label: "No file chosen".to_string(),
        }
    }
}

impl UploadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a selection. On rejection the input is cleared and the error
    /// is returned for the caller to surface.
    pub fn select(&mut self, path: &str) -> Result<(), UploadError> {
        match validate_upload(path) {
            Ok(name) => {
                log::debug!("[upload] accepted {path}");
                self.selected = Some(path.to_string());
                self.label = name;
                Ok(())
            }
            Err(err) => {
                log::debug!("[upload] rejected {path}");
                self.clear();
                Err(err)
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xlsx_accepted_and_label_updated() {
        let mut state = UploadState::new();
        state.select("report.xlsx").unwrap();
        assert_eq!(state.selected(), Some("report.xlsx"));
        assert_eq!(state.label(), "report.xlsx");
    }

    #[test]
    fn test_csv_rejected_and_cleared() {
        let mut state = UploadState::new();
        state.select("report.xlsx").unwrap();

        let err = state.select("report.csv").unwrap_err();
        assert!(matches!(err, UploadError::BadExtension { .. }));
        assert_eq!(state.selected(), None);
        assert_eq!(state.label(), "No file chosen");
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(validate_upload("REPORT.XLSX").is_ok());
        assert!(validate_upload("legacy.XLS").is_ok());
    }

    #[test]
    fn test_extension_must_be_final() {
        assert!(validate_upload("archive.xlsx.txt").is_err());
        assert!(validate_upload("xlsx").is_err());
    }

    #[test]
    fn test_label_is_bare_file_name() {
        assert_eq!(
            validate_upload("/srv/uploads/north_beach.xlsx").unwrap(),
            "north_beach.xlsx"
        );
        assert_eq!(
            validate_upload("C:\\data\\harbor.xls").unwrap(),
            "harbor.xls"
        );
    }
}

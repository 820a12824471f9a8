use crate::errors::AppError;
use crate::models::{AnalysisReport, UploadOutcome};

/// Lifecycle of a document upload, as shown to the user.
///
/// Legal transitions: `Idle -> Uploading` on an accepted file, then
/// `Uploading -> Complete` or `Uploading -> Failed`. A terminal state may
/// start a new upload; a second upload while one is in flight is rejected.
#[derive(Debug, Clone)]
pub enum UploadPhase {
    /// No upload started.
    Idle,
    /// Upload in flight for the named document.
    Uploading {
        /// File name shown next to the spinner.
        document_name: String,
    },
    /// Upload finished; analysis available.
    Complete(UploadOutcome),
    /// Upload failed with a user-visible reason.
    Failed(String),
}

impl UploadPhase {
    /// Starts an upload. Errors if one is already in flight; there is no
    /// queuing of concurrent uploads.
    pub fn begin(&mut self, document_name: impl Into<String>) -> Result<(), AppError> {
        if let UploadPhase::Uploading { document_name } = self {
            return Err(AppError::BadRequest(format!(
                "Upload of '{}' is still in progress",
                document_name
            )));
        }
        *self = UploadPhase::Uploading {
            document_name: document_name.into(),
        };
        Ok(())
    }

    /// Marks the in-flight upload as complete.
    pub fn complete(&mut self, outcome: UploadOutcome) -> Result<(), AppError> {
        if !matches!(self, UploadPhase::Uploading { .. }) {
            return Err(AppError::InternalError(
                "No upload in progress to complete".to_string(),
            ));
        }
        *self = UploadPhase::Complete(outcome);
        Ok(())
    }

    /// Marks the in-flight upload as failed.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), AppError> {
        if !matches!(self, UploadPhase::Uploading { .. }) {
            return Err(AppError::InternalError(
                "No upload in progress to fail".to_string(),
            ));
        }
        *self = UploadPhase::Failed(reason.into());
        Ok(())
    }
}

/// The locally held list of stored reports, plus the currently viewed one.
///
/// Reports are read-only on the client; the only local mutation is removal
/// after a successful backend delete.
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    entries: Vec<AnalysisReport>,
    selected: Option<String>,
}

impl HistoryState {
    pub fn new(entries: Vec<AnalysisReport>) -> Self {
        Self {
            entries,
            selected: None,
        }
    }

    pub fn entries(&self) -> &[AnalysisReport] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The currently viewed report, if any.
    pub fn selected(&self) -> Option<&AnalysisReport> {
        let id = self.selected.as_deref()?;
        self.entries.iter().find(|r| r.id == id)
    }

    /// Selects a report for viewing.
    pub fn select(&mut self, id: &str) -> Result<(), AppError> {
        if !self.entries.iter().any(|r| r.id == id) {
            return Err(AppError::NotFound(format!("No report with id '{}'", id)));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Removes exactly the entry with the given id, leaving the others
    /// unchanged. Clears the selection if it pointed at the removed report.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|r| r.id != id);
        let removed = self.entries.len() < before;
        if removed && self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: &str) -> AnalysisReport {
        AnalysisReport {
            id: id.to_string(),
            ..AnalysisReport::sample()
        }
    }

    #[test]
    fn upload_phase_walks_the_happy_path() {
        let mut phase = UploadPhase::Idle;
        phase.begin("form16.pdf").unwrap();
        assert!(matches!(phase, UploadPhase::Uploading { .. }));
        phase
            .complete(UploadOutcome::Suggestion("ok".into()))
            .unwrap();
        assert!(matches!(phase, UploadPhase::Complete(_)));
    }

    #[test]
    fn concurrent_upload_is_rejected() {
        let mut phase = UploadPhase::Idle;
        phase.begin("a.pdf").unwrap();
        let err = phase.begin("b.pdf").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        // the in-flight upload is untouched
        assert!(matches!(
            phase,
            UploadPhase::Uploading { ref document_name } if document_name == "a.pdf"
        ));
    }

    #[test]
    fn completion_requires_an_upload_in_flight() {
        let mut phase = UploadPhase::Idle;
        assert!(phase.fail("network down").is_err());
        assert!(phase
            .complete(UploadOutcome::Suggestion("x".into()))
            .is_err());
    }

    #[test]
    fn failed_upload_can_be_retried() {
        let mut phase = UploadPhase::Idle;
        phase.begin("a.pdf").unwrap();
        phase.fail("timeout").unwrap();
        assert!(phase.begin("a.pdf").is_ok());
    }

    #[test]
    fn remove_deletes_exactly_one_entry() {
        let mut history = HistoryState::new(vec![report("a"), report("b"), report("c")]);
        assert!(history.remove("b"));
        let ids: Vec<&str> = history.entries().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(!history.remove("b"));
    }

    #[test]
    fn removing_the_selected_report_clears_the_selection() {
        let mut history = HistoryState::new(vec![report("a"), report("b")]);
        history.select("b").unwrap();
        assert_eq!(history.selected().map(|r| r.id.as_str()), Some("b"));
        history.remove("b");
        assert!(history.selected().is_none());
    }

    #[test]
    fn removing_another_report_keeps_the_selection() {
        let mut history = HistoryState::new(vec![report("a"), report("b")]);
        history.select("b").unwrap();
        history.remove("a");
        assert_eq!(history.selected().map(|r| r.id.as_str()), Some("b"));
    }

    #[test]
    fn selecting_an_unknown_id_is_not_found() {
        let mut history = HistoryState::new(vec![report("a")]);
        assert!(matches!(
            history.select("zzz"),
            Err(AppError::NotFound(_))
        ));
    }
}

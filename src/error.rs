use thiserror::Error;

/// Failures a scoring call can report. Text content never fails: empty or
/// degenerate submissions still produce a (grade F) result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// Strict mode only: no exemplars exist for the requested subject.
    #[error("no exemplars for subject '{subject}' (supported: {supported})")]
    UnsupportedSubject { subject: String, supported: String },
}

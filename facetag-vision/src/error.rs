use thiserror::Error;

/// Failure classes a detector capability can report.
///
/// The orchestrator absorbs all of these into "this pass found nothing";
/// they exist so detector backends outside this crate can say what went
/// wrong in their logs.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("detector backend error: {0}")]
    Backend(String),

    #[error("observation data error: {0}")]
    Observations(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// CampusError: error taxonomy for scene build and animation
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised while building or animating the campus scene.
///
/// `InvalidSpec` is recovered locally (the offending spec is skipped and the
/// build continues); the others are surfaced to the caller of the affected
/// operation only.
#[derive(Debug)]
pub enum CampusError {
    /// A building/road/agent spec with non-positive or degenerate dimensions.
    InvalidSpec { subject: String, reason: String },
    /// The scene host lacks a node the operation depends on (e.g. no camera).
    MissingHostCapability(String),
    /// File I/O at the driver boundary (layout tables, captures).
    ExternalIo(std::io::Error),
    /// A layout table could not be parsed.
    Config(String),
}

impl CampusError {
    pub fn invalid(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        CampusError::InvalidSpec {
            subject: subject.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CampusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampusError::InvalidSpec { subject, reason } => {
                write!(f, "Invalid spec '{subject}': {reason}")
            }
            CampusError::MissingHostCapability(what) => {
                write!(f, "Scene host is missing required capability: {what}")
            }
            CampusError::ExternalIo(e) => write!(f, "I/O error: {e}"),
            CampusError::Config(msg) => write!(f, "Layout config error: {msg}"),
        }
    }
}

impl std::error::Error for CampusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CampusError::ExternalIo(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CampusError {
    fn from(e: std::io::Error) -> Self {
        CampusError::ExternalIo(e)
    }
}

impl From<serde_json::Error> for CampusError {
    fn from(e: serde_json::Error) -> Self {
        CampusError::Config(e.to_string())
    }
}

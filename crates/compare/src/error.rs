use std::fmt;
use std::path::PathBuf;

/// Errors from scoring captures and writing the comparison report.
#[derive(Debug)]
pub enum CompareError {
    /// Reading a capture directory or writing an output file failed.
    Io(std::io::Error),
    /// An image could not be decoded or encoded.
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    /// The report could not be serialised.
    Serialize(serde_json::Error),
    /// No real/virtual image pairs were found under the captures directory.
    NoPairs(PathBuf),
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::Io(e) => write!(f, "I/O error: {e}"),
            CompareError::Image { path, source } => write!(f, "{}: {source}", path.display()),
            CompareError::Serialize(e) => write!(f, "report serialisation failed: {e}"),
            CompareError::NoPairs(dir) => {
                write!(f, "no image pairs to compare under {}", dir.display())
            }
        }
    }
}

impl std::error::Error for CompareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompareError::Io(e) => Some(e),
            CompareError::Image { source, .. } => Some(source),
            CompareError::Serialize(e) => Some(e),
            CompareError::NoPairs(_) => None,
        }
    }
}

impl From<std::io::Error> for CompareError {
    fn from(e: std::io::Error) -> Self {
        CompareError::Io(e)
    }
}

impl From<serde_json::Error> for CompareError {
    fn from(e: serde_json::Error) -> Self {
        CompareError::Serialize(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_no_pairs_names_directory() {
        let err = CompareError::NoPairs(PathBuf::from("captures"));
        assert_eq!(err.to_string(), "no image pairs to compare under captures");
    }

    #[test]
    fn test_io_error_has_source() {
        let err = CompareError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("gone"));
    }
}

use std::fmt::{self, Display};
use std::io;

/// Provides `OutbreakError` and maps other errors to
/// convert to an `OutbreakError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum OutbreakError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CSVError(csv::Error),
    /// The requested population cannot be built. Nothing is created when this is returned.
    InvalidConfiguration(String),
    /// A history sample was offered after the recorder reached its resolution.
    RecorderExhausted {
        resolution: usize,
    },
    ReportError(String),
}

impl From<io::Error> for OutbreakError {
    fn from(error: io::Error) -> Self {
        OutbreakError::IoError(error)
    }
}

impl From<serde_json::Error> for OutbreakError {
    fn from(error: serde_json::Error) -> Self {
        OutbreakError::JsonError(error)
    }
}

impl From<csv::Error> for OutbreakError {
    fn from(error: csv::Error) -> Self {
        OutbreakError::CSVError(error)
    }
}

impl std::error::Error for OutbreakError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutbreakError::IoError(error) => Some(error),
            OutbreakError::JsonError(error) => Some(error),
            OutbreakError::CSVError(error) => Some(error),
            _ => None,
        }
    }
}

impl Display for OutbreakError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutbreakError::IoError(error) => write!(f, "I/O error: {error}"),
            OutbreakError::JsonError(error) => write!(f, "could not parse JSON: {error}"),
            OutbreakError::CSVError(error) => write!(f, "could not write CSV: {error}"),
            OutbreakError::InvalidConfiguration(message) => {
                write!(f, "invalid configuration: {message}")
            }
            OutbreakError::RecorderExhausted { resolution } => write!(
                f,
                "history recorder is complete after {resolution} samples"
            ),
            OutbreakError::ReportError(message) => write!(f, "report error: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OutbreakError;
    use std::error::Error;
    use std::io;

    #[test]
    fn io_errors_convert_and_keep_their_source() {
        let error: OutbreakError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(error, OutbreakError::IoError(_)));
        assert!(error.source().is_some());
    }

    #[test]
    fn display_includes_the_reason() {
        let error = OutbreakError::InvalidConfiguration("quarantine rate 1.5".to_string());
        assert_eq!(
            error.to_string(),
            "invalid configuration: quarantine rate 1.5"
        );

        let error = OutbreakError::RecorderExhausted { resolution: 600 };
        assert_eq!(
            error.to_string(),
            "history recorder is complete after 600 samples"
        );
    }
}

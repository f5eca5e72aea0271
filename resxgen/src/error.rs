//! All error types for the resxgen crate.
//!
//! [`Error`] is returned from the reader, the emitter and every other fallible
//! operation. [`GenerationFailure`] is the single error a generation run reports
//! to its caller; it wraps whichever [`Error`] stopped the run.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not find file '{}'", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("malformed resource document: {0}")]
    MalformedInput(String),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("cannot write output file '{}': {source}", .path.display())]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown dialect `{0}`")]
    UnknownDialect(String),
}

impl Error {
    /// Creates a new malformed input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedInput(message.into())
    }
}

/// The one failure a generation run surfaces.
///
/// The display text is the line written to the build log; the underlying
/// [`Error`] stays reachable through [`GenerationFailure::cause`] and
/// [`std::error::Error::source`].
#[derive(Error, Debug)]
#[error("Failed to generate the resource code with error:\n{cause}")]
pub struct GenerationFailure {
    #[source]
    cause: Error,
}

impl GenerationFailure {
    /// The error that stopped the run.
    pub fn cause(&self) -> &Error {
        &self.cause
    }

    /// Consumes the failure, returning the error that stopped the run.
    pub fn into_cause(self) -> Error {
        self.cause
    }
}

impl From<Error> for GenerationFailure {
    fn from(cause: Error) -> Self {
        GenerationFailure { cause }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_input_not_found_error() {
        let error = Error::InputNotFound {
            path: PathBuf::from("missing/Strings.resx"),
        };
        assert_eq!(
            error.to_string(),
            "could not find file 'missing/Strings.resx'"
        );
    }

    #[test]
    fn test_malformed_error() {
        let error = Error::malformed("missing root element");
        assert_eq!(
            error.to_string(),
            "malformed resource document: missing root element"
        );
    }

    #[test]
    fn test_output_not_writable_error() {
        let error = Error::OutputNotWritable {
            path: PathBuf::from("/read-only/SR.cs"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let display = error.to_string();
        assert!(display.contains("/read-only/SR.cs"));
        assert!(display.contains("permission denied"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let error = Error::from(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_unknown_dialect_error() {
        let error = Error::UnknownDialect("fsharp".to_string());
        assert_eq!(error.to_string(), "unknown dialect `fsharp`");
    }

    #[test]
    fn test_generation_failure_message_carries_cause() {
        let failure = GenerationFailure::from(Error::malformed("data element missing <value>"));
        assert_eq!(
            failure.to_string(),
            "Failed to generate the resource code with error:\n\
             malformed resource document: data element missing <value>"
        );
        assert!(matches!(failure.cause(), Error::MalformedInput(_)));
        assert!(std::error::Error::source(&failure).is_some());
        assert!(matches!(failure.into_cause(), Error::MalformedInput(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownDialect("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownDialect"));
        assert!(debug.contains("test"));
    }
}

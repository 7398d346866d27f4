//! Error helpers for the command-line tool.
use std::fmt;
use std::io;
use std::path::Path;

use crate::Lz2Error;

#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Format a user friendly I/O error message with suggestions.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    use io::ErrorKind::*;
    let suggestion = match err.kind() {
        NotFound => "Check that the file exists and the path is correct.",
        PermissionDenied => "Check permissions or run as a different user.",
        _ => "Check the path and permissions.",
    };
    format!(
        "Error {} '{}': {}. {}",
        operation,
        path.display(),
        err,
        suggestion
    )
}

/// Convert an I/O error into a CLI error with context.
pub fn io_cli_error(operation: &str, path: &Path, err: io::Error) -> CliError {
    CliError {
        msg: format_io_error(operation, path, &err),
        source: Some(Box::new(err)),
    }
}

pub fn simple_cli_error(msg: &str) -> CliError {
    CliError {
        msg: msg.to_string(),
        source: None,
    }
}

/// Convert a codec error into a CLI error with a hint.
pub fn lz2_cli_error(context: &str, err: Lz2Error) -> CliError {
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for a codec error variant.
pub fn cli_hint(err: &Lz2Error) -> String {
    use crate::Lz2Error::*;
    match err {
        MalformedStream { .. } => format!("{err}. Check that the input is an LC_LZ2 stream and the --format flag."),
        SizeMismatch { .. } => format!("{err}. Check the asset type."),
        BackReferenceOutOfRange { .. } => {
            format!("{err}. The stream may use the other offset byte order, try --format.")
        }
        OutputLimitExceeded { .. } => format!("{err}. Raise --limit if the asset is larger."),
        InvalidPiece(_) => format!("{err}."),
        CompressionInternalInconsistency(_) => format!("{err}. This is a bug."),
    }
}

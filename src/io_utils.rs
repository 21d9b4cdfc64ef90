use std::fmt;
use std::io;
use std::path::Path;

use crate::container::ContainerError;
use crate::CodecError;

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
        UnexpectedEof => "File appears truncated or corrupted.",
        WriteZero => "Disk may be full. Free up space and try again.",
        InvalidData => "Expected a CSV sample file or a .phic container.",
        _ => "Check the path and that the file is a CSV sample file or a .phic container.",
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

/// Invalid file extension error.
pub fn extension_error(path: &Path, expected: &str) -> CliError {
    CliError {
        msg: format!(
            "Invalid file extension for '{}'. Expected .{}. Check the input file.",
            path.display(),
            expected
        ),
        source: None,
    }
}

/// True when `path` ends in `.ext`, ignoring case.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case(ext))
}

/// Convert a codec error into a CLI error with a hint.
pub fn codec_cli_error(context: &str, err: CodecError) -> CliError {
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for a codec error variant.
pub fn cli_hint(err: &CodecError) -> String {
    use CodecError::*;
    match err {
        InvalidInput(msg) => format!("{msg}. Check the input samples."),
        Config(msg) => format!("{msg}. Invalid configuration."),
        InvalidDecodeInput => "nothing to decode, the encode did not succeed".to_string(),
        LengthMismatch { expected, actual } => {
            format!(
                "expected {expected} samples, got {actual}. Pass the sequence that was encoded."
            )
        }
        Container(ContainerError::ChecksumMismatch) | Container(ContainerError::TooShort) => {
            format!("{err}. Verify the file is intact.")
        }
        Container(e) => format!("{e}. Likely not a .phic file, try re-encoding."),
        Io(io) => format!("{io}"),
        Serialization(msg) => msg.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_hints_name_the_expected_files() {
        let path = Path::new("signal.phic");
        let err = io::Error::new(io::ErrorKind::Other, "boom");
        let msg = format_io_error("reading", path, &err);
        assert!(msg.starts_with("Error reading 'signal.phic': boom."));
        assert!(msg.contains(".phic container"));
        assert!(!msg.contains("disk space"));

        let err = io::Error::new(io::ErrorKind::NotFound, "missing");
        assert!(format_io_error("opening", path, &err).contains("file exists"));
    }
}

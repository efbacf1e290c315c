//! Failures of a `surface-stream` invocation and the exit status each maps to.
//!
//! clap exits with 2 on its own for malformed arguments. Everything after
//! parsing lands in [`CliError`]; a `SurfaceError::Io` from the core is
//! reported as an output failure rather than a surface failure.

use surface_stream_core::SurfaceError;
use thiserror::Error;

/// Exit status for a rejected pattern, resolution, or config range.
pub const EXIT_SURFACE: i32 = 10;
/// Exit status when a PNG or stdout write fails.
pub const EXIT_OUTPUT: i32 = 11;
/// Exit status for an unparsable `--config`.
pub const EXIT_INPUT: i32 = 12;
/// Exit status when a JSON report cannot be encoded.
pub const EXIT_ENCODE: i32 = 13;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Surface(SurfaceError),

    #[error("output failed: {0}")]
    Output(String),

    #[error("{0}")]
    Input(String),

    #[error("could not encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Surface(_) => EXIT_SURFACE,
            CliError::Output(_) => EXIT_OUTPUT,
            CliError::Input(_) => EXIT_INPUT,
            CliError::Encode(_) => EXIT_ENCODE,
        }
    }
}

impl From<SurfaceError> for CliError {
    fn from(e: SurfaceError) -> Self {
        match e {
            SurfaceError::Io(msg) => CliError::Output(msg),
            other => CliError::Surface(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Output(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_pattern_keeps_core_message() {
        let err = CliError::from(SurfaceError::InvalidPattern("spiral".into()));
        assert_eq!(err.exit_code(), EXIT_SURFACE);
        assert_eq!(err.to_string(), "unknown pattern: spiral");
    }

    #[test]
    fn core_io_failure_is_an_output_error() {
        let err = CliError::from(SurfaceError::Io("disk full".into()));
        assert_eq!(err.exit_code(), EXIT_OUTPUT);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn broken_stdout_is_an_output_error() {
        let err = CliError::from(std::io::Error::other("broken pipe"));
        assert!(matches!(err, CliError::Output(_)));
    }

    #[test]
    fn encode_failure_has_its_own_status() {
        let bad = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        assert_eq!(CliError::from(bad).exit_code(), EXIT_ENCODE);
    }

    #[test]
    fn exit_statuses_are_distinct_and_clear_of_clap() {
        let codes = [EXIT_SURFACE, EXIT_OUTPUT, EXIT_INPUT, EXIT_ENCODE];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 2);
            assert!(codes[i + 1..].iter().all(|b| b != a));
        }
    }
}

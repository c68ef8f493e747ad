//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::GpuInitError;

/// Errors produced by the gyre crate.
///
/// Camera, input and scene operations are total and never fail; only the
/// outer surfaces (GPU setup, options I/O, the windowed viewer) report
/// errors through this type.
#[derive(Debug)]
pub enum GyreError {
    /// GPU context initialization failure.
    Gpu(GpuInitError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for GyreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for GyreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GpuInitError> for GyreError {
    fn from(e: GpuInitError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for GyreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_includes_message() {
        let err = GyreError::OptionsParse("bad key".into());
        assert_eq!(err.to_string(), "options parse error: bad key");
    }

    #[test]
    fn io_error_is_source() {
        let err: GyreError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(GyreError::Viewer("closed".into()).source().is_none());
    }
}

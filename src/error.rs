//! Error type shared by every stage of favicon generation.

use std::path::{Path, PathBuf};

/// Boxed error kept as the `source()` of a [`FaviconError::Generator`].
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience alias used throughout the crate.
pub type Result<T, E = FaviconError> = std::result::Result<T, E>;

/// Everything that can go wrong while producing a favicon bundle.
///
/// Leaf operations (color parsing, size-table resolution, tile layout) return
/// the specific variants. The generator wraps anything that reaches it into
/// [`FaviconError::Generator`] together with the path of the artifact being
/// produced, so callers always learn *where* a run stopped.
#[derive(Debug, thiserror::Error)]
pub enum FaviconError {
    /// Invalid configuration, size table, or tile specification.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The source file is not a PNG, JPEG, or GIF.
    #[error("unsupported image format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// A color string that is not 3 or 6 hex digits.
    #[error("invalid hex color {input:?}: expected 3 or 6 hexadecimal digits")]
    InvalidFormat { input: String },

    /// Codec support that was not compiled in.
    #[error("missing capability: {}", .0.join(", "))]
    MissingCapability(Vec<String>),

    /// Filesystem, write-verification, or wrapped downstream failure.
    #[error("{message}: {}", path.display())]
    Generator {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<BoxedError>,
    },
}

impl FaviconError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a generator error with no underlying cause.
    pub fn generator(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Generator {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
            source: None,
        }
    }

    /// Wraps a lower-level error into a generator error naming `path`.
    pub fn wrap<E>(path: impl AsRef<Path>, message: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxedError>,
    {
        Self::Generator {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the path carried by this error, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::UnsupportedFormat { path } | Self::Generator { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Returns the wrapped crate error of a [`FaviconError::Generator`].
    ///
    /// Useful to tell an unsupported source apart from a failed write after
    /// the generator has added its context.
    pub fn cause(&self) -> Option<&FaviconError> {
        match self {
            Self::Generator {
                source: Some(source),
                ..
            } => source.downcast_ref::<FaviconError>(),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn generator_message_names_path() {
        let err = FaviconError::generator("/tmp/out/favicon.ico", "file was not written");
        assert_eq!(err.to_string(), "file was not written: /tmp/out/favicon.ico");
        assert_eq!(err.path(), Some(Path::new("/tmp/out/favicon.ico")));
        assert!(err.source().is_none());
    }

    #[test]
    fn wrapped_crate_error_is_recoverable() {
        let inner = FaviconError::InvalidFormat {
            input: "#12".into(),
        };
        let err = FaviconError::wrap("config.json", "bad tile color", inner);

        assert!(err.source().is_some());
        assert!(matches!(
            err.cause(),
            Some(FaviconError::InvalidFormat { input }) if input == "#12"
        ));
    }

    #[test]
    fn wrapped_io_error_has_no_crate_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = FaviconError::wrap("/root", "cannot create directory", io);
        assert!(err.cause().is_none());
        assert!(err.source().is_some());
    }

    #[test]
    fn missing_capability_lists_everything() {
        let err = FaviconError::MissingCapability(vec!["GIF decoder".into(), "PNG encoder".into()]);
        assert_eq!(err.to_string(), "missing capability: GIF decoder, PNG encoder");
    }
}

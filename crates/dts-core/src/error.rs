//! Error types for gRPC declaration generation.
//!
//! Every failure a generation pass can report is a variant of [`Error`].
//! Errors are returned to the caller, never unwound, and a failed pass is
//! never retried.
//!
//! # Examples
//!
//! ```
//! use grpc_dts_core::{Error, Result};
//!
//! fn check_key(key: &str) -> Result<()> {
//!     if key.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "option key cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_key("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

/// Main error type for declaration generation.
///
/// All crates in the workspace report failures through this type so the
/// orchestrator can hand a single human-readable message back to the host.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    ///
    /// Raised while parsing the generator parameter string, before any
    /// output artifact is opened.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Emission error.
    ///
    /// Raised when one of the declaration emitters fails for a service.
    /// The remaining sequence for the schema file is aborted.
    #[error("Emission failed for service '{service}': {message}")]
    EmitError {
        /// Service whose block was being emitted
        service: String,
        /// Description of the failure
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The destination context could not open or write an artifact.
    #[error("Failed to open output '{path}': {message}")]
    OutputError {
        /// Artifact path that was being opened
        path: String,
        /// Description of the failure
        message: String,
    },

    /// Serialization/deserialization error.
    ///
    /// Raised when a schema model cannot be decoded from JSON.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Writing into the text sink failed.
    #[error("Failed to write generated text")]
    Format(#[from] std::fmt::Error),
}

impl Error {
    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpc_dts_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "empty key".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this error was raised while emitting declarations.
    ///
    /// Text sink write failures count as emission errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpc_dts_core::Error;
    ///
    /// let err = Error::EmitError {
    ///     service: "Greeter".to_string(),
    ///     message: "sink closed".to_string(),
    ///     source: None,
    /// };
    /// assert!(err.is_emit_error());
    /// assert!(Error::from(std::fmt::Error).is_emit_error());
    /// ```
    #[must_use]
    pub const fn is_emit_error(&self) -> bool {
        matches!(self, Self::EmitError { .. } | Self::Format(_))
    }

    /// Returns `true` if this is an output error.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpc_dts_core::Error;
    ///
    /// let err = Error::OutputError {
    ///     path: "pkg/foo_grpc_pb.d.ts".to_string(),
    ///     message: "invalid path".to_string(),
    /// };
    /// assert!(err.is_output_error());
    /// ```
    #[must_use]
    pub const fn is_output_error(&self) -> bool {
        matches!(self, Self::OutputError { .. })
    }

    /// Returns `true` if this is a serialization error.
    #[must_use]
    pub const fn is_serialization_error(&self) -> bool {
        matches!(self, Self::SerializationError { .. })
    }
}

/// Result type alias for generation operations.
///
/// # Examples
///
/// ```
/// use grpc_dts_core::{Error, Result};
///
/// fn non_empty(value: &str) -> Result<&str> {
///     if value.is_empty() {
///         return Err(Error::ConfigError {
///             message: "value must not be empty".to_string(),
///         });
///     }
///     Ok(value)
/// }
///
/// assert!(non_empty("a").is_ok());
/// assert!(non_empty("").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

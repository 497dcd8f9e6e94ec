use thiserror::Error;

/// Result type for quote generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning quote text into images.
///
/// The set is closed on purpose: callers can match exhaustively and map each
/// variant to a stable failure code. Pure layout stages (segmenting,
/// tokenizing, wrapping, positioning) never fail and therefore have no
/// variant here.
#[derive(Error, Debug)]
pub enum Error {
    /// Input was rejected at the generator boundary, before the pipeline ran.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Name of the offending input field.
        field: &'static str,
        reason: String,
    },

    /// A template background or template configuration could not be loaded.
    #[error("template '{key}' could not be loaded")]
    Template {
        /// The template key (or config path) that failed to resolve.
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A font family could not be registered or resolved.
    ///
    /// Fatal for width-table construction: without resolved fonts there is
    /// nothing to measure with.
    #[error("font family '{family}' unavailable: {reason}")]
    Font { family: String, reason: String },

    /// Any other failure while producing the final image.
    #[error("image generation failed ({code})")]
    Generation {
        /// Stable machine-readable failure code.
        code: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn template(
        key: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Template {
            key: key.into(),
            source: source.into(),
        }
    }

    pub(crate) fn font(family: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Font {
            family: family.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn generation(
        code: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Generation {
            code,
            source: source.into(),
        }
    }
}

/// Convenience result type used across Quirl.
pub type QuirlResult<T> = Result<T, QuirlError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only [`QuirlError::InvalidInput`] and [`QuirlError::Encoding`] abort a
/// composition; the other conditions are recovered internally and degrade the
/// output instead of suppressing it.
#[derive(thiserror::Error, Debug)]
pub enum QuirlError {
    /// Invalid user-provided request data (empty payload, payload over
    /// capacity, non-positive render size).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Malformed color string. Recovered at the validator boundary and never
    /// surfaced through the composition API.
    #[error("unsupported color: {0}")]
    UnsupportedColor(String),

    /// Frame artwork failed to load or decode. Recovered by composing the
    /// unframed render instead.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// The external QR encoder rejected the request. Not recoverable.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuirlError {
    /// Build a [`QuirlError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`QuirlError::UnsupportedColor`] value.
    pub fn unsupported_color(msg: impl Into<String>) -> Self {
        Self::UnsupportedColor(msg.into())
    }

    /// Build a [`QuirlError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`QuirlError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

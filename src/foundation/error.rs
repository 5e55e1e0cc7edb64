/// Result alias used across the crate.
pub type DecodeFxResult<T> = Result<T, DecodeFxError>;

/// Crate error type.
///
/// Nothing in this crate is fatal to the interactive loop: callers log or display these and keep
/// running.
#[derive(thiserror::Error, Debug)]
pub enum DecodeFxError {
    /// Invalid input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure while drawing or reading back a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Failure while writing an exported file.
    #[error("export error: {0}")]
    Export(String),

    /// Failure while loading or playing the audio cue.
    #[error("audio error: {0}")]
    Audio(String),

    /// Failure while (de)serializing settings.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DecodeFxError {
    /// Build a [`DecodeFxError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DecodeFxError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DecodeFxError::Export`].
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`DecodeFxError::Audio`].
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`DecodeFxError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

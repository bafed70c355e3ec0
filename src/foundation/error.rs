/// Convenience result type used across the engine.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// A texture was referenced by a builder but never preloaded.
    #[error("asset missing: {0}")]
    AssetMissing(String),

    /// A registry lookup missed; indicates a build/wiring bug.
    #[error("lookup error: no renderable registered as '{0}'")]
    Lookup(String),

    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures inside a render backend.
    #[error("render error: {0}")]
    Render(String),

    /// Failures while writing rendered frames out.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::AssetMissing`] value.
    pub fn asset_missing(name: impl Into<String>) -> Self {
        Self::AssetMissing(name.into())
    }

    /// Build a [`SceneError::Lookup`] value.
    pub fn lookup(key: impl Into<String>) -> Self {
        Self::Lookup(key.into())
    }

    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SceneError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the error comes from a registry miss (fatal for the frame loop).
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

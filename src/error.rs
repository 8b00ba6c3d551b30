//! Structured error types for toby.
//!
//! Lifecycle misuse (attaching twice, destroying an unattached engine) is
//! reported through these errors but never leaves the engine unusable.

/// All errors that can occur while loading data or driving the engine.
#[derive(Debug, thiserror::Error)]
pub enum TobyError {
    /// `attach_to` called while the engine already manages a target.
    #[error("engine is already attached to a render target")]
    AlreadyAttached,

    /// Operation that needs an attached target was called while unattached.
    #[error("engine is not attached to a render target")]
    NotAttached,

    /// Dataset JSON could not be decoded.
    #[error("Dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    /// Invalid engine configuration.
    #[error("Config: {0}")]
    Config(String),

    /// The render target failed to create or mutate an element.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TobyError>;

impl TobyError {
    /// True for attach/destroy misuse, which callers may treat as a diagnostic.
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::AlreadyAttached | Self::NotAttached)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<TobyError> for wasm_bindgen::JsValue {
    fn from(e: TobyError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for TobyError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Render(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_classification() {
        assert!(TobyError::AlreadyAttached.is_lifecycle());
        assert!(TobyError::NotAttached.is_lifecycle());
        assert!(!TobyError::Render("boom".to_string()).is_lifecycle());
    }

    #[test]
    fn test_dataset_error_message() {
        let err = serde_json::from_str::<serde_json::Value>("[1,").map(|_| ());
        let Err(e) = err else {
            panic!("expected decode failure");
        };
        let wrapped = TobyError::from(e);
        assert!(wrapped.to_string().starts_with("Dataset: "));
    }
}

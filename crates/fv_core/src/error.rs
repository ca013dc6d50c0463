use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid cell width: {0} (must be a positive, finite number)")]
    InvalidCellWidth(f64),

    #[error("Invalid iteration count: {0} (must be at least 1)")]
    InvalidIterationCount(u32),

    #[error("Malformed event (type {event_type}): {reason}")]
    MalformedEvent { event_type: u32, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Configuration errors are rejected before any computation starts.
    pub fn is_config_error(&self) -> bool {
        matches!(self, CoreError::InvalidCellWidth(_) | CoreError::InvalidIterationCount(_))
    }

    pub(crate) fn malformed(event_type: u32, reason: impl Into<String>) -> Self {
        CoreError::MalformedEvent { event_type, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

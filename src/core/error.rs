/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Local, pre-submission validation failure; never reaches the network
    #[error("{0}")]
    Validation(String),

    /// Non-2xx response from the invoice API
    #[error("{message}")]
    Remote { message: String, status: u16 },

    /// No response obtained (offline, DNS, transport timeout)
    #[error("Something went wrong")]
    Transport(#[source] reqwest::Error),

    /// 2xx response whose body could not be read as the expected shape
    #[error("Unexpected response from invoice API: {0}")]
    Decode(String),

    /// Lifecycle transition not allowed from the current state
    #[error("{0}")]
    InvalidTransition(String),

    /// Another mutating action for the same invoice has not settled yet
    #[error("{0} is already in progress")]
    Busy(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where a failure is shown to the person who triggered the action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSurface {
    /// Next to the offending field or form
    Inline,
    /// Dismissible banner; the action is abandoned
    Banner,
    /// Generic message with an explicit retry affordance
    Retry,
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn remote(message: impl Into<String>, status: u16) -> Self {
        AppError::Remote {
            message: message.into(),
            status,
        }
    }

    /// A money computation left the representable decimal range
    pub fn amount_too_large() -> Self {
        AppError::Validation("Amount is too large".to_string())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        AppError::InvalidTransition(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        AppError::Decode(msg.into())
    }

    /// HTTP status associated with the failure; 0 when no response exists
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Remote { status, .. } => *status,
            _ => 0,
        }
    }

    pub fn surface(&self) -> ErrorSurface {
        match self {
            AppError::Validation(_) | AppError::InvalidTransition(_) | AppError::Busy(_) => {
                ErrorSurface::Inline
            }
            AppError::Transport(_) => ErrorSurface::Retry,
            AppError::Remote { .. }
            | AppError::Decode(_)
            | AppError::Configuration(_)
            | AppError::Json(_) => ErrorSurface::Banner,
        }
    }

    /// Only transport failures invite a retry, and only a user-triggered one
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Transport(_))
    }
}

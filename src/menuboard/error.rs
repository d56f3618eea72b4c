use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuboardError {
    /// A form failed local checks; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// A request failed, either in transport or with `success: false`.
    #[error("Failed to {action}: {reason}")]
    Request { action: String, reason: String },

    /// `success: false` from the API.
    #[error("{0}")]
    Application(String),

    /// Non-2xx response; the message comes from the response body.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response format")]
    InvalidResponse,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// Terminal output could not be produced.
    #[error("Render error: {0}")]
    Render(String),
}

impl MenuboardError {
    /// Wraps a failure with the action the user attempted, e.g. "save menu".
    pub fn during(action: impl Into<String>, err: MenuboardError) -> Self {
        let reason = match err {
            MenuboardError::Application(msg) => msg,
            MenuboardError::Server { message, .. } => message,
            MenuboardError::Http(_) => "Server error".to_string(),
            MenuboardError::Request { reason, .. } => reason,
            other => other.to_string(),
        };
        MenuboardError::Request {
            action: action.into(),
            reason,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, MenuboardError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, MenuboardError>;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Pipeline service error ({status}): {message}")]
    ExternalService { status: u16, message: String },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Timed out after {attempts} status checks")]
    Timeout { attempts: u32 },

    #[error("Polling cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl PipelineError {
    /// Server-side or connection-level failures that a poll loop may retry.
    /// Client errors (4xx) and malformed bodies are never transient.
    pub fn is_transient(&self) -> bool {
        match self {
            PipelineError::ExternalService { status, .. } => (500..600).contains(status),
            PipelineError::Transport(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let server = PipelineError::ExternalService {
            status: 503,
            message: "unavailable".to_string(),
        };
        let client = PipelineError::ExternalService {
            status: 404,
            message: "not found".to_string(),
        };
        assert!(server.is_transient());
        assert!(!client.is_transient());
        assert!(!PipelineError::Protocol("missing run_id".to_string()).is_transient());
        assert!(!PipelineError::Cancelled.is_transient());
        assert!(!PipelineError::Timeout { attempts: 60 }.is_transient());
    }
}

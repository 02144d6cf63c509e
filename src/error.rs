/// Client-level errors
///
/// None of these are fatal to the page: every request path converts them into
/// a placeholder or an empty list before anything reaches the view.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Backend error: {0}")]
    ExternalApi(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Validation failures are handled locally and never reach the network
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::InvalidInput(_))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::MalformedPayload(e.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

use axum::http::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

pub const MISSING_PARAMETERS: &str = "Missing required parameters";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Carries the offending field names; they are logged, never returned.
    #[error("{}", MISSING_PARAMETERS)]
    Validation(Vec<String>),

    #[error("Network error reaching model API: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Model API request failed with status {status}: {detail}")]
    UpstreamRequest { status: u16, detail: String },

    #[error("Malformed model API response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("Invalid JSON response from model API: {0}")]
    InvalidContentFormat(#[source] serde_json::Error),

    #[error("{0}")]
    UnexpectedShape(String),
}

impl Error {
    /// Short stable name used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Validation(_) => "validation",
            Error::Network(_) => "network",
            Error::UpstreamRequest { .. } => "upstream_request",
            Error::MalformedUpstreamResponse(_) => "malformed_upstream_response",
            Error::InvalidContentFormat(_) => "invalid_content_format",
            Error::UnexpectedShape(_) => "unexpected_shape",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errs: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errs
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort();
        Error::Validation(fields)
    }
}

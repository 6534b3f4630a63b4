use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Sending the request or reading the body failed.
    Network { endpoint: String, detail: String },
    /// Non-success status.
    HttpStatus { endpoint: String, status: u16 },
    /// Body is not JSON, or not the expected shape.
    Parse { endpoint: String, detail: String },
    /// Success status, but the body carries an `error` field.
    Application { endpoint: String, message: String },
}

impl ApiError {
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Network { endpoint, .. }
            | ApiError::HttpStatus { endpoint, .. }
            | ApiError::Parse { endpoint, .. }
            | ApiError::Application { endpoint, .. } => endpoint,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network { .. } => "network",
            ApiError::HttpStatus { .. } => "http_status",
            ApiError::Parse { .. } => "parse",
            ApiError::Application { .. } => "application",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network { endpoint, detail } => {
                write!(f, "request to {endpoint} failed: {detail}")
            }
            ApiError::HttpStatus { endpoint, status } => {
                write!(f, "{endpoint} returned HTTP {status}")
            }
            ApiError::Parse { endpoint, detail } => {
                write!(f, "invalid response from {endpoint}: {detail}")
            }
            ApiError::Application { message, .. } => f.write_str(message),
        }
    }
}

impl std::error::Error for ApiError {}

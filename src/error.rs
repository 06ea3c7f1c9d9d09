use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Non-2xx answer other than 429. Never retried.
    #[error("{status} {status_text} → {body}")]
    RemoteError {
        status: u16,
        status_text: String,
        body: String,
    },

    /// 429 still returned after every rate-limit retry was spent.
    #[error("{status} {status_text} → {body} (rate limited after {retries} retries)")]
    RateLimited {
        status: u16,
        status_text: String,
        body: String,
        retries: u32,
    },

    #[error("HTTP error after {attempts} attempts: {message}")]
    HttpError { attempts: u32, message: String },

    #[error("Invalid Riot ID format. Use format: Name#TAG (got \"{0}\")")]
    InvalidRiotId(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

impl AppError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::RemoteError { status, .. } | AppError::RateLimited { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

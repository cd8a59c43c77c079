use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("could not build http client: {0}")]
    Client(String),

    #[error("request timed out")]
    Timeout,

    #[error("too many redirects")]
    RedirectLimit,

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("io error: {0}")]
    Io(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl FetchError {
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_redirect() {
            Self::RedirectLimit
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else {
            // DNS, connect and TLS failures all land here
            Self::Request(err.to_string())
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing API key: set the {var} environment variable")]
    ApiKeyMissing { var: String },

    #[error("missing --channel argument")]
    ChannelMissing,

    #[error("YouTube API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

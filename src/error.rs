use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid chart payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid endpoint `{0}`")]
    Endpoint(String),
}

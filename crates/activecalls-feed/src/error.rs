use thiserror::Error;

/// Failures that abort a run: nothing is emitted when the table cannot be
/// fetched or located.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("could not find the data table in the page")]
    TableNotFound,
}

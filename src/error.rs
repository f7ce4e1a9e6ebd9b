use thiserror::Error;

/// Missing or invalid required setting; fatal at startup, before the
/// monitoring loop is entered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not defined")]
    MissingVariable(&'static str),
}

/// The cluster inventory could not be listed (transport or auth failure).
/// Aborts the current cycle; the next scheduled cycle is the retry.
#[derive(Debug, Error)]
#[error("failed to retrieve pods: {0}")]
pub struct FetchError(#[from] kube::Error);

/// The notification webhook could not be delivered to. The dedup state is
/// left unchanged on this error so the same content is retried next cycle.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to send webhook request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("webhook returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

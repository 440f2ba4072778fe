use thiserror::Error;

/// Failures surfaced by the purge engines and the wp-cli runner.
///
/// Every failure is fail-fast: nothing here is retried, and the first error
/// terminates the current logical operation.
#[derive(Debug, Error)]
pub enum Error {
    /// A flag value was rejected before any remote call was made.
    #[error("{0}")]
    Validation(String),

    /// A remote call succeeded but its output was not the expected JSON.
    #[error("Failed to decode JSON: {reason}")]
    Decode { reason: String },

    /// A wp-cli invocation failed outright.
    #[error("`{command}` failed: {reason}")]
    RemoteExecution { command: String, reason: String },

    /// The network site listing could not be retrieved; aborts a multi-site
    /// operation before any site is processed.
    #[error("could not list network sites: {reason}")]
    DirectoryUnavailable { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

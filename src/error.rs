use std::error::Error as StdError;

/// Errors that occurred while sending an event.
///
/// These never reach the caller of [`crate::Client::track_event`]; they are reported through
/// `tracing` at error level.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The event failed to serialize to JSON.
    ///
    /// Note: This is an error in this crate. If you spot this, please open an issue.
    #[error("serializing event failed with {0}")]
    SerializeEvent(serde_json::Error),

    /// Could not complete the HTTP request to the collector.
    #[error("sending event failed with {0}")]
    Connection(Box<dyn StdError + Send + Sync + 'static>),

    /// The collector answered with a non-success status.
    #[error("event rejected with status {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, lossily decoded as UTF-8.
        body: String,
    },
}

//! Error types for provsync-grist.

use thiserror::Error;

/// All errors that can arise from destination calls.
#[derive(Debug, Error)]
pub enum GristError {
    /// The destination answered with a non-success status.
    ///
    /// Carries the response payload so failed passes can log exactly what
    /// the destination complained about.
    #[error("destination returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Transport-level failure (DNS, TLS, connection, proxy).
    #[error("destination transport error: {0}")]
    Transport(#[source] Box<ureq::Error>),

    /// The response body could not be decoded as JSON.
    #[error("destination response decode error: {0}")]
    Decode(#[from] std::io::Error),

    /// The configured forward proxy URL is not usable.
    #[error("invalid proxy configuration: {0}")]
    Proxy(#[source] Box<ureq::Error>),
}

/// Map a `ureq` error, capturing the response payload on HTTP errors.
pub(crate) fn api_err(err: ureq::Error) -> GristError {
    match err {
        ureq::Error::Status(status, response) => GristError::Api {
            status,
            body: response
                .into_string()
                .unwrap_or_else(|_| String::from("<unreadable body>")),
        },
        other => GristError::Transport(Box::new(other)),
    }
}

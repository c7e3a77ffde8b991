use std::error::Error as _;
use std::io;

use reqwest::StatusCode;
use thiserror::Error;

/// Error returned by a [`Provider`](crate::Provider) when an address could not be resolved.
///
/// Every variant carries the label of the service that failed, which is used as the message prefix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The request could not be sent or no response was received
    #[error("{label}: {msg}")]
    Request { label: &'static str, msg: String },
    /// The service answered with a status outside of `200..300`
    #[error("{label}: Status code is not in success range: {code}")]
    Status { label: &'static str, code: u16 },
    /// The response body could not be read in full
    #[error("{label}: {msg}")]
    Read { label: &'static str, msg: String },
}

impl ProviderError {
    pub(crate) fn request(label: &'static str, err: &reqwest::Error) -> ProviderError {
        ProviderError::Request {
            label,
            msg: transport_message(err),
        }
    }

    pub(crate) fn status(label: &'static str, status: StatusCode) -> ProviderError {
        ProviderError::Status {
            label,
            code: status.as_u16(),
        }
    }

    pub(crate) fn read(label: &'static str, err: &reqwest::Error) -> ProviderError {
        ProviderError::Read {
            label,
            msg: transport_message(err),
        }
    }

    /// The HTTP status code, if the service responded with one outside the success range
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProviderError::Status { code, .. } => Some(*code),
            ProviderError::Request { .. } | ProviderError::Read { .. } => None,
        }
    }

    /// Label of the service that produced this error
    pub fn label(&self) -> &'static str {
        match self {
            ProviderError::Request { label, .. }
            | ProviderError::Status { label, .. }
            | ProviderError::Read { label, .. } => label,
        }
    }
}

// reqwest only prints the outermost error ("error sending request for url (...)"),
// the actual cause lives further down the source chain.
// OS errors are rendered by kind so the message does not end in a platform specific errno.
fn transport_message(err: &reqwest::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let part = match cause.downcast_ref::<io::Error>() {
            Some(io_err) if io_err.raw_os_error().is_some() => io_err.kind().to_string(),
            _ => cause.to_string(),
        };
        // some layers repeat their inner error verbatim
        if parts.last() != Some(&part) {
            parts.push(part);
        }
        source = cause.source();
    }
    parts.join(": ")
}

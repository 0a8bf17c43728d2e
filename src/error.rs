//! Errors reported by the client.

use crate::request::ParseError;
use std::fmt;

/// An error that prevented a request from producing a response.
#[derive(Debug)]
pub enum Error {
    /// The command line could not be turned into a request. Nothing was sent.
    Parse(ParseError),
    /// No connection could be established to the service.
    Unreachable {
        /// The address that was tried.
        remote: String,
        /// Why the connection failed.
        source: tonic::transport::Error,
    },
    /// The address of the service is not usable as an endpoint.
    InvalidRemote {
        /// The address that was given.
        remote: String,
        /// Why the address was rejected.
        source: tonic::transport::Error,
    },
    /// The service answered with an error status instead of a response.
    Remote(tonic::Status),
}

impl Error {
    /// Whether the error was detected without contacting the service.
    #[inline]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::InvalidRemote { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => fmt::Display::fmt(err, f),
            Self::Unreachable { remote, .. } => write!(f, "Couldn't connect to {remote}"),
            Self::InvalidRemote { remote, .. } => write!(f, "invalid remote address `{remote}`"),
            Self::Remote(status) => {
                write!(f, "the tree service rejected the request: {}", status.message())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Unreachable { source, .. } | Self::InvalidRemote { source, .. } => Some(source),
            Self::Remote(status) => Some(status),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<tonic::Status> for Error {
    fn from(status: tonic::Status) -> Self {
        Self::Remote(status)
    }
}

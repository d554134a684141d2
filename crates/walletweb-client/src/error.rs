//! Error types for walletweb-client

use thiserror::Error;

/// Errors from the remote transaction API.
///
/// The dashboard collapses every variant into one generic message per
/// operation; the variants exist so logs can tell a transport failure
/// from a server rejection.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

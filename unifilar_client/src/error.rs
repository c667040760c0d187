// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use unifilar_model::Endpoint;

/// A request to the authority did not succeed.
///
/// `status` is `None` when no response arrived at all (connection refused,
/// timeout, TLS failure); `body` then holds the transport error text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}{body}", .status.map(|s| format!("{s} ")).unwrap_or_default())]
pub struct CommandError {
    /// HTTP status of a non-2xx response.
    pub status: Option<u16>,
    /// Response body, or the transport error message.
    pub body: String,
}

impl CommandError {
    /// A failure with no HTTP response.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            body: message.into(),
        }
    }

    /// A non-2xx response.
    #[must_use]
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: body.into(),
        }
    }
}

/// A read (`topology`, `state`, `health`) failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The request itself failed.
    #[error(transparent)]
    Request(#[from] CommandError),
    /// The response arrived but was not the expected JSON.
    #[error("malformed {} response: {message}", .endpoint.path())]
    Decode {
        /// The endpoint that was read.
        endpoint: Endpoint,
        /// Parser message.
        message: String,
    },
}

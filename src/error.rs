//! Error taxonomy shared by both transports.
//!
//! Every failed call returns a [`PayError`] tagged with the [`Operation`] that failed.
//! The variant tells the caller which layer failed:
//!
//! - [`PayError::Transport`]: the request did not complete (network, HTTP status,
//!   RPC status, deadline, closed client).
//! - [`PayError::Gateway`]: the gateway answered with a non-success frame code.
//! - [`PayError::Codec`]: the frame payload did not decrypt.
//! - [`PayError::Decode`]: a body or decrypted payload did not parse.
//! - [`PayError::Encode`]: the request could not be sealed; nothing was sent.

use std::time::Duration;
use xmpay_types::operation::Operation;

use crate::cipher::CipherError;

#[derive(Debug, thiserror::Error)]
pub enum PayError {
    #[error("{operation}: transport failure: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: TransportError,
    },
    #[error("{operation}: gateway returned code {code}: {message}")]
    Gateway {
        operation: Operation,
        code: i32,
        message: String,
    },
    #[error("{operation}: failed to decrypt response payload: {source}")]
    Codec {
        operation: Operation,
        #[source]
        source: CipherError,
    },
    #[error("{operation}: failed to decode {context}: {source}")]
    Decode {
        operation: Operation,
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{operation}: failed to encode request: {source}")]
    Encode {
        operation: Operation,
        #[source]
        source: EncodeError,
    },
}

/// Coarse classification of a [`PayError`], independent of the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Gateway,
    Codec,
    Decode,
    Encode,
}

impl PayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PayError::Transport { .. } => ErrorKind::Transport,
            PayError::Gateway { .. } => ErrorKind::Gateway,
            PayError::Codec { .. } => ErrorKind::Codec,
            PayError::Decode { .. } => ErrorKind::Decode,
            PayError::Encode { .. } => ErrorKind::Encode,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            PayError::Transport { operation, .. }
            | PayError::Gateway { operation, .. }
            | PayError::Codec { operation, .. }
            | PayError::Decode { operation, .. }
            | PayError::Encode { operation, .. } => *operation,
        }
    }

    pub(crate) fn transport(operation: Operation, source: TransportError) -> Self {
        PayError::Transport { operation, source }
    }
}

/// Why a request failed to complete.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),
    #[error("unexpected HTTP status {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),
    #[error("RPC failed: {0}")]
    Rpc(#[source] tonic::Status),
    #[error("deadline of {0:?} exceeded")]
    Timeout(Duration),
    #[error("client is closed")]
    Closed,
}

/// Why a request could not be sealed into an envelope.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("request serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("request encryption failed: {0}")]
    Encrypt(#[from] CipherError),
}

/// Errors raised while constructing a client.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to derive envelope key: {0}")]
    Cipher(#[from] CipherError),
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        context: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("invalid gRPC endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },
    #[error("failed to configure TLS: {0}")]
    Tls(#[source] tonic::transport::Error),
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },
}

use huddle_core::ConnectionId;
use std::path::PathBuf;
use thiserror::Error;

/// Why a join request was refused. Reported to the requester only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    #[error("Username already taken")]
    NameTaken,

    #[error("connection already joined a room")]
    AlreadyJoined,

    #[error("connection is not registered")]
    NotConnected,
}

/// Faults on the relay and broadcast paths. Never surfaced to a client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("recipient {0} is not connected")]
    UnknownRecipient(ConnectionId),

    #[error("malformed {kind} envelope: missing {missing}")]
    MalformedEnvelope {
        kind: &'static str,
        missing: &'static str,
    },

    #[error("connection {0} has not joined a room")]
    NotJoined(ConnectionId),
}

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("session recorder queue is full")]
    QueueFull,

    #[error("session recorder is shut down")]
    Closed,

    #[error("session recorder backend failed: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum TlsError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid PEM in {}: {source}", .path.display())]
    Pem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no certificates found in {}", .0.display())]
    NoCertificates(PathBuf),

    #[error("no private key found in {}", .0.display())]
    NoPrivateKey(PathBuf),

    #[error("certificate and key rejected: {0}")]
    Rejected(#[from] rustls::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HubError {
    #[error("signaling hub is not running")]
    Closed,
}

//! Deployer credentials.
//!
//! The deployment wallet is unlocked by a BIP-39 mnemonic that never lives in
//! the project configuration. It is read once at startup from a
//! [`SecretSource`] and handed opaquely to the wallet provider.

mod mnemonic;
mod source;

pub use mnemonic::Mnemonic;
pub use source::{load_first, SecretSource, DEFAULT_SECRET_FILE};

use std::{io, path::PathBuf};
use thiserror::Error;

/// Reasons the deployer mnemonic could not be obtained.
///
/// Every variant means the same thing to callers: there are no credentials
/// and nothing should touch the network.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// Secret file does not exist
    #[error("missing credentials: secret file {} not found", .path.display())]
    NotFound { path: PathBuf },

    /// Secret file exists but cannot be opened
    #[error("missing credentials: permission denied reading {}", .path.display())]
    PermissionDenied { path: PathBuf },

    /// Secret file could not be read for another reason
    #[error("missing credentials: failed to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Environment variable is unset
    #[error("missing credentials: environment variable {0} is not set")]
    EnvNotSet(String),

    /// Environment variable is set but does not hold valid unicode
    #[error("missing credentials: environment variable {0} is not valid unicode")]
    EnvNotUnicode(String),

    /// Source was found but holds only whitespace
    #[error("missing credentials: {0} is empty")]
    Empty(String),

    /// No source in the chain produced a secret
    #[error("missing credentials: none of [{0}] provided a mnemonic")]
    NoSource(String),
}

impl CredentialsError {
    /// The I/O error kind this failure corresponds to.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::NotFound { .. } | Self::EnvNotSet(_) | Self::NoSource(_) => io::ErrorKind::NotFound,
            Self::PermissionDenied { .. } => io::ErrorKind::PermissionDenied,
            Self::Empty(_) | Self::EnvNotUnicode(_) => io::ErrorKind::InvalidData,
            Self::Unreadable { source, .. } => source.kind(),
        }
    }

    /// Whether the source was simply absent, so the next one may be tried.
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::EnvNotSet(_))
    }
}

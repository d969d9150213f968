//! Backend error values delivered on the response channel.

use std::fmt;

/// Error reported by the wallet backend alongside (or instead of) a
/// wallet-info payload.
///
/// `DatabaseInUse` is the one unrecoverable case: the wallet database
/// is already held open by another process instance, so this instance
/// can never load it. Everything else is recoverable and displayed
/// inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The wallet database is locked by another running instance.
    DatabaseInUse,
    /// Any other backend failure, carried as the backend's message.
    Backend(String),
}

impl WalletError {
    /// Creates a generic backend error from a message.
    pub fn backend(message: impl Into<String>) -> Self {
        WalletError::Backend(message.into())
    }
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::DatabaseInUse => {
                write!(f, "wallet database is in use by another process")
            }
            WalletError::Backend(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for WalletError {}

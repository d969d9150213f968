//! Backend error triage.

use vireo_wallet::WalletError;

/// How the dispatcher responds to a backend error.
///
/// Binary on purpose: the system has exactly two failure behaviors
/// (inline display plus retry, or terminal shutdown), so a finer
/// taxonomy would add no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Recoverable; displayed inline, retried while still loading.
    Transient,
    /// Unrecoverable; escalates to full shutdown.
    Fatal,
}

/// Classifies a backend error.
///
/// The only fatal condition is the database-in-use sentinel: another
/// process instance holds the wallet database and this one can never
/// load it.
pub fn classify(error: &WalletError) -> ErrorKind {
    match error {
        WalletError::DatabaseInUse => ErrorKind::Fatal,
        WalletError::Backend(_) => ErrorKind::Transient,
    }
}

//! Aggregate wallet status payloads.

use serde::{Deserialize, Serialize};

/// Seconds per day, for sync-age derivation.
const DAY_SECS: f64 = 86_400.0;

/// Aggregate status of all loaded wallets, as reported by the backend
/// on the response channel.
///
/// This is a point-in-time sample; the dispatcher copies it into the
/// UI snapshot and never reads it again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiWalletInfo {
    /// Number of wallets currently loaded. Zero routes the UI to the
    /// create/restore flow.
    pub loaded_wallets: u32,
    /// Combined spendable balance across wallets, in atoms.
    pub total_balance: i64,
    /// Height of the best known block.
    pub best_block_height: u32,
    /// Timestamp of the best known block, unix seconds.
    pub best_block_time: i64,
    /// Whether the backend considers itself fully synced.
    pub synced: bool,
    /// Whether a sync run is in progress.
    pub syncing: bool,
}

/// Converts a second count into fractional days.
///
/// Used to derive how far behind the chain tip the wallet is from
/// `best_block_time`.
pub fn seconds_to_days(secs: i64) -> f64 {
    secs as f64 / DAY_SECS
}

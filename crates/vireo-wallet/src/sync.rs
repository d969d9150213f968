//! Sync-stage notification types.
//!
//! The backend reports progress through the blockchain sync pipeline
//! as a stream of tagged updates on a dedicated channel. Variants are
//! serializable so collaborators can log or replay a sync session.

use serde::{Deserialize, Serialize};

/// A notification on the sync channel, marking progress through the
/// synchronization pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum SyncUpdate {
    /// Sync finished; the wallet is at the chain tip.
    Completed,

    /// A sync run has started. The backend may re-emit this without a
    /// matching `Completed`, so consumers must treat it as idempotent.
    Started,

    /// Sync was canceled before completion.
    Canceled,

    /// Progress through the headers-fetch stage.
    HeadersFetchProgress(HeadersFetchReport),

    /// Progress through the address-discovery stage.
    AddressDiscoveryProgress(AddressDiscoveryReport),

    /// Progress through the headers-rescan stage.
    HeadersRescanProgress(HeadersRescanReport),

    /// Peer count changed.
    PeersConnected(u32),

    /// A new block was attached to the chain.
    BlockAttached(BlockInfo),

    /// A wallet transaction reached its confirmation threshold.
    BlockConfirmed(ConfirmedTx),
}

/// Headers-fetch stage sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadersFetchReport {
    /// Headers downloaded so far.
    pub fetched_headers: u32,
    /// Total headers expected for this run.
    pub total_headers: u32,
    /// Stage progress, 0-100.
    pub progress: u8,
    /// Estimated seconds until the stage completes.
    pub time_remaining_secs: i64,
}

/// Address-discovery stage sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDiscoveryReport {
    /// Stage progress, 0-100.
    pub progress: u8,
    /// Estimated seconds until the stage completes.
    pub time_remaining_secs: i64,
}

/// Headers-rescan stage sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadersRescanReport {
    /// Height rescanned through so far.
    pub rescanned_through: u32,
    /// Stage progress, 0-100.
    pub progress: u8,
    /// Estimated seconds until the stage completes.
    pub time_remaining_secs: i64,
}

/// A block attached to the chain after initial sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Height of the attached block.
    pub height: u32,
    /// Block timestamp, unix seconds.
    pub timestamp: i64,
}

/// A wallet transaction that reached its confirmation threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedTx {
    /// Transaction hash, hex encoded.
    pub hash: String,
    /// Height of the confirming block.
    pub block_height: u32,
}

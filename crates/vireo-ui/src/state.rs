//! The authoritative UI state snapshot.
//!
//! `StateSnapshot` is written only by the dispatcher task and read by
//! the renderer during a frame. The single-writer rule is what makes
//! the rest of the design race-free: no locks, no atomics, no torn
//! reads.
//!
//! UI mode is never stored. It is derived per frame from snapshot
//! fields by [`StateSnapshot::mode`], with the precedence
//! loading > dialog > normal. Storing it separately is exactly the
//! boolean-drift trap this replaces.

use vireo_wallet::MultiWalletInfo;
use vireo_wallet::sync::{
    AddressDiscoveryReport, BlockInfo, ConfirmedTx, HeadersFetchReport, HeadersRescanReport,
};

use crate::render::DialogAction;

/// Identifier of a page in the page registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Overview,
    Transactions,
    Wallets,
    Receive,
    Send,
    CreateRestore,
}

/// Last-seen sync progress sample. Overwritten, never queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    HeadersFetch(HeadersFetchReport),
    AddressDiscovery(AddressDiscoveryReport),
    HeadersRescan(HeadersRescanReport),
    Block(BlockInfo),
    Confirmed(ConfirmedTx),
}

/// What the window presents this frame, derived from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// First wallet-info response not yet received.
    Loading,
    /// A modal dialog is active over the current page.
    Dialog,
    /// The current page, nothing else.
    Normal,
}

/// The authoritative record of wallet/sync/UI status.
///
/// Created once at startup, mutated exclusively by the dispatcher,
/// sampled by the renderer once per frame.
pub struct StateSnapshot {
    /// Number of wallets currently loaded. Zero forces navigation to
    /// the create/restore flow on every frame.
    pub loaded_wallets: u32,
    /// Combined spendable balance, in atoms.
    pub total_balance: i64,
    /// Height of the best known block.
    pub best_block_height: u32,
    /// Timestamp of the best known block, unix seconds.
    pub best_block_time: i64,
    /// Days since `best_block_time`; recomputed every frame, never
    /// persisted.
    pub last_sync_age_days: f64,
    /// Whether the wallet is at the chain tip. `synced` implies
    /// `!syncing`.
    pub synced: bool,
    /// Whether a sync run is in progress.
    pub syncing: bool,
    /// Connected peer count.
    pub connected_peers: u32,
    /// Most recent sync progress sample.
    pub progress: Option<Progress>,
    /// Page currently displayed.
    pub current_page: PageId,
    /// Active modal dialog, if any.
    pub dialog: Option<DialogAction>,
    /// Last transient backend error, for inline display.
    pub last_error: Option<String>,
    /// True only before the first successful wallet-info response.
    pub loading: bool,
}

impl StateSnapshot {
    /// Creates the startup snapshot: loading, Overview page, nothing
    /// else known yet.
    pub fn new() -> Self {
        Self {
            loaded_wallets: 0,
            total_balance: 0,
            best_block_height: 0,
            best_block_time: 0,
            last_sync_age_days: 0.0,
            synced: false,
            syncing: false,
            connected_peers: 0,
            progress: None,
            current_page: PageId::Overview,
            dialog: None,
            last_error: None,
            loading: true,
        }
    }

    /// Derives the UI mode for this frame.
    pub fn mode(&self) -> UiMode {
        if self.loading {
            UiMode::Loading
        } else if self.dialog.is_some() {
            UiMode::Dialog
        } else {
            UiMode::Normal
        }
    }

    /// Applies a successful wallet-info response.
    ///
    /// Clears the loading flag and the inline error: a fresh payload
    /// means the backend has recovered from whatever it last reported.
    pub fn apply_wallet_info(&mut self, info: &MultiWalletInfo) {
        self.loaded_wallets = info.loaded_wallets;
        self.total_balance = info.total_balance;
        self.best_block_height = info.best_block_height;
        self.best_block_time = info.best_block_time;
        self.synced = info.synced;
        self.syncing = info.syncing;
        self.last_error = None;
        self.loading = false;
    }
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

//! Reducers: the single source of truth for how events modify the
//! snapshot.
//!
//! Both functions are pure apart from the snapshot fields they name:
//! no I/O, no blocking, no channel sends. The dispatcher serializes
//! calls, so no internal locking is needed.

use tracing::{error, warn};
use vireo_wallet::SyncUpdate;
use vireo_wallet::wallet::WalletResponse;

use crate::classify::{ErrorKind, classify};
use crate::effects::UiEffect;
use crate::state::{Progress, StateSnapshot};

/// Applies a backend response event.
///
/// Errors are classified at the point of receipt, never deferred. A
/// fatal error mutates nothing: the snapshot the unloaded screen sees
/// is the snapshot from before the failure.
pub fn handle_response(snapshot: &mut StateSnapshot, response: WalletResponse) -> Vec<UiEffect> {
    match response {
        Ok(info) => {
            snapshot.apply_wallet_info(&info);
            vec![]
        }
        Err(err) => {
            error!("wallet backend error: {err}");
            match classify(&err) {
                ErrorKind::Fatal => vec![UiEffect::Unload],
                ErrorKind::Transient => {
                    snapshot.last_error = Some(err.to_string());
                    let mut effects = Vec::new();
                    if snapshot.loading {
                        // One retry per failure; the backend either
                        // succeeds or repeats the error signal.
                        warn!("initial wallet load failed, re-requesting wallet info");
                        effects.push(UiEffect::FetchWalletInfo);
                    }
                    effects.push(UiEffect::Invalidate);
                    effects
                }
            }
        }
    }
}

/// Applies a sync-stage update. This is the sync-state machine.
pub fn handle_sync_update(snapshot: &mut StateSnapshot, update: SyncUpdate) -> Vec<UiEffect> {
    match update {
        SyncUpdate::Completed => set_sync_status(snapshot, false, true),
        SyncUpdate::Started => {
            // The backend re-emits Started without a matching
            // Completed; once synced, spurious starts are ignored.
            if !snapshot.synced {
                set_sync_status(snapshot, true, false);
            }
        }
        SyncUpdate::Canceled => set_sync_status(snapshot, false, false),
        SyncUpdate::HeadersFetchProgress(report) => {
            snapshot.progress = Some(Progress::HeadersFetch(report));
        }
        SyncUpdate::AddressDiscoveryProgress(report) => {
            snapshot.progress = Some(Progress::AddressDiscovery(report));
        }
        SyncUpdate::HeadersRescanProgress(report) => {
            snapshot.progress = Some(Progress::HeadersRescan(report));
        }
        SyncUpdate::PeersConnected(count) => snapshot.connected_peers = count,
        SyncUpdate::BlockAttached(block) => {
            // Tip tracking is suppressed while still catching up;
            // refreshing wallet info per block during initial sync is
            // redundant.
            if snapshot.synced {
                snapshot.progress = Some(Progress::Block(block));
                return vec![UiEffect::FetchWalletInfo];
            }
        }
        SyncUpdate::BlockConfirmed(tx) => snapshot.progress = Some(Progress::Confirmed(tx)),
    }
    vec![]
}

fn set_sync_status(snapshot: &mut StateSnapshot, syncing: bool, synced: bool) {
    snapshot.syncing = syncing;
    snapshot.synced = synced;
}

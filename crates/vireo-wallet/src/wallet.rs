//! Channel handles crossing the backend/UI boundary.
//!
//! `channels` builds both sides of the contract at once: the
//! dispatcher side (`Wallet` plus the two inbound receivers) and the
//! backend side (`WalletFeed` plus the command receiver). The backend
//! driver runs on its own tasks and talks to the dispatcher only
//! through these handles.

use tokio::sync::mpsc;
use tracing::trace;

use crate::error::WalletError;
use crate::info::MultiWalletInfo;
use crate::sync::SyncUpdate;

/// A backend response: either a fresh wallet-info payload or an error.
pub type WalletResponse = Result<MultiWalletInfo, WalletError>;

/// Commands the dispatcher sends to the backend driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletCommand {
    /// Request a fresh `MultiWalletInfo` payload on the response channel.
    FetchWalletInfo,
}

/// Dispatcher-side handle to the wallet backend.
///
/// Commands go over an unbounded channel so the event loop never
/// waits on the backend. A backend that has gone away is ignored;
/// teardown is signaled elsewhere.
#[derive(Debug, Clone)]
pub struct Wallet {
    commands: mpsc::UnboundedSender<WalletCommand>,
}

impl Wallet {
    /// Asks the backend for a fresh wallet-info payload.
    pub fn fetch_wallet_info(&self) {
        if self.commands.send(WalletCommand::FetchWalletInfo).is_err() {
            trace!("wallet command channel closed, dropping fetch request");
        }
    }
}

/// Backend-side handle for pushing notifications to the dispatcher.
#[derive(Debug, Clone)]
pub struct WalletFeed {
    responses: mpsc::Sender<WalletResponse>,
    sync_updates: mpsc::Sender<SyncUpdate>,
}

impl WalletFeed {
    /// Delivers a wallet-info response (or error) to the dispatcher.
    ///
    /// Suspends while the response channel is full; FIFO order within
    /// the channel is preserved.
    pub async fn send_response(&self, response: WalletResponse) {
        if self.responses.send(response).await.is_err() {
            trace!("response channel closed, dropping wallet response");
        }
    }

    /// Delivers a sync-stage update to the dispatcher.
    pub async fn send_sync_update(&self, update: SyncUpdate) {
        if self.sync_updates.send(update).await.is_err() {
            trace!("sync channel closed, dropping sync update");
        }
    }
}

/// Receivers handed to the dispatcher.
#[derive(Debug)]
pub struct WalletReceivers {
    /// Response channel: wallet-info payloads and backend errors.
    pub responses: mpsc::Receiver<WalletResponse>,
    /// Sync channel: sync-stage notifications.
    pub sync_updates: mpsc::Receiver<SyncUpdate>,
}

/// Builds the paired channel handles for one backend/dispatcher pair.
///
/// `buffer` bounds the response and sync channels; producers suspend
/// when the dispatcher falls behind, which keeps memory bounded
/// during sync bursts.
pub fn channels(
    buffer: usize,
) -> (
    Wallet,
    WalletReceivers,
    WalletFeed,
    mpsc::UnboundedReceiver<WalletCommand>,
) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (response_tx, response_rx) = mpsc::channel(buffer);
    let (sync_tx, sync_rx) = mpsc::channel(buffer);

    (
        Wallet {
            commands: command_tx,
        },
        WalletReceivers {
            responses: response_rx,
            sync_updates: sync_rx,
        },
        WalletFeed {
            responses: response_tx,
            sync_updates: sync_tx,
        },
        command_rx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_wallet_info_enqueues_command() {
        let (wallet, _receivers, _feed, mut commands) = channels(4);
        wallet.fetch_wallet_info();
        assert_eq!(commands.recv().await, Some(WalletCommand::FetchWalletInfo));
    }

    #[tokio::test]
    async fn fetch_wallet_info_ignores_gone_backend() {
        let (wallet, _receivers, _feed, commands) = channels(4);
        drop(commands);
        // Must not panic or block.
        wallet.fetch_wallet_info();
    }

    #[tokio::test]
    async fn feed_preserves_sync_order() {
        let (_wallet, mut receivers, feed, _commands) = channels(4);
        feed.send_sync_update(SyncUpdate::Started).await;
        feed.send_sync_update(SyncUpdate::Completed).await;
        assert_eq!(receivers.sync_updates.recv().await, Some(SyncUpdate::Started));
        assert_eq!(
            receivers.sync_updates.recv().await,
            Some(SyncUpdate::Completed)
        );
    }
}

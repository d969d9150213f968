//! Wallet-backend contract layer for Vireo.
//!
//! Defines the data types and channel handles that cross the boundary
//! between the wallet backend and the UI event dispatcher, plus the
//! ambient config and logging modules shared by both sides. The sync
//! engine and transaction storage live behind this boundary; nothing
//! in this crate talks to the network.

pub mod config;
pub mod error;
pub mod info;
pub mod logging;
pub mod sync;
pub mod wallet;

pub use error::WalletError;
pub use info::MultiWalletInfo;
pub use sync::SyncUpdate;
pub use wallet::{Wallet, WalletFeed, WalletResponse};

//! Effects returned by the reducers for the runtime to execute.
//!
//! Reducers only mutate snapshot fields; anything that touches a
//! channel or another component is returned as an effect and executed
//! by the dispatcher after the reducer returns. This keeps every
//! transition rule testable without channels.

/// A command for the dispatcher runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    /// Ask the backend for a fresh wallet-info payload.
    FetchWalletInfo,
    /// Request an out-of-band repaint from the windowing layer.
    Invalidate,
    /// Fatal backend error: close the shutdown signal and enter the
    /// terminal unloaded display state.
    Unload,
}

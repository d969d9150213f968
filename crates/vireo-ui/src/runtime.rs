//! The dispatcher: owns the snapshot, runs the event loop, executes
//! effects.
//!
//! One task, one select loop, no internal synchronization. Every
//! inbound event is applied through the reducers; everything with a
//! side effect (backend requests, repaint requests, shutdown) happens
//! here, after the reducer returns.
//!
//! The loop has exactly two hard exits: a destroy event and a fatal
//! backend error. Every other path loops forever.

use anyhow::Result;
use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use vireo_wallet::SyncUpdate;
use vireo_wallet::wallet::{Wallet, WalletReceivers, WalletResponse};

use crate::effects::UiEffect;
use crate::events::{FrameRequest, KeyPress, WindowEvent, WindowHandle};
use crate::render::{PageRegistry, Placement, RenderPlan, prepare_frame};
use crate::state::StateSnapshot;
use crate::update;

/// Capacity of the key-forwarding channel. Keys beyond this are
/// dropped rather than stalling the loop on a slow consumer.
pub const KEY_BUFFER: usize = 32;

/// Hook run once per frame on the dispatcher task, after render
/// actions and before the frame acknowledgement. This is where page
/// widgets apply queued input and navigate; running it here keeps the
/// snapshot single-writer.
pub type InputHook = Box<dyn FnMut(&mut StateSnapshot) + Send>;

enum LoopFlow {
    Continue,
    Unloaded,
}

/// The event dispatcher.
///
/// Owns the snapshot and the inbound ends of all three channels.
/// Constructed once by the process bootstrap and consumed by
/// [`run`](Dispatcher::run).
pub struct Dispatcher {
    snapshot: StateSnapshot,
    registry: PageRegistry,
    wallet: Wallet,
    window: WindowHandle,
    responses: mpsc::Receiver<WalletResponse>,
    sync_updates: mpsc::Receiver<SyncUpdate>,
    window_events: mpsc::Receiver<WindowEvent>,
    keys_tx: mpsc::Sender<KeyPress>,
    keys_rx: Option<mpsc::Receiver<KeyPress>>,
    input_hook: Option<InputHook>,
    shutdown: CancellationToken,
}

impl Dispatcher {
    /// Creates a dispatcher over the given channel ends.
    ///
    /// `shutdown` is the write-once teardown signal: the dispatcher
    /// cancels it on either terminal condition and never sends on it
    /// otherwise.
    pub fn new(
        wallet: Wallet,
        receivers: WalletReceivers,
        window_events: mpsc::Receiver<WindowEvent>,
        window: WindowHandle,
        registry: PageRegistry,
        shutdown: CancellationToken,
    ) -> Self {
        let (keys_tx, keys_rx) = mpsc::channel(KEY_BUFFER);
        Self {
            snapshot: StateSnapshot::new(),
            registry,
            wallet,
            window,
            responses: receivers.responses,
            sync_updates: receivers.sync_updates,
            window_events,
            keys_tx,
            keys_rx: Some(keys_rx),
            input_hook: None,
            shutdown,
        }
    }

    /// Takes the key-event receiver for the input-consuming
    /// collaborator. Can only be taken once.
    pub fn take_key_events(&mut self) -> Option<mpsc::Receiver<KeyPress>> {
        self.keys_rx.take()
    }

    /// Installs the per-frame input hook.
    pub fn set_input_hook(&mut self, hook: InputHook) {
        self.input_hook = Some(hook);
    }

    /// Read access for collaborators wired up before the loop starts.
    pub fn snapshot(&self) -> &StateSnapshot {
        &self.snapshot
    }

    /// Runs the event loop until a destroy event or a fatal backend
    /// error.
    pub async fn run(mut self) -> Result<()> {
        // Kick off the initial wallet load; the loading flag stays set
        // until the first successful response.
        self.wallet.fetch_wallet_info();

        loop {
            tokio::select! {
                response = self.responses.recv() => {
                    let Some(response) = response else {
                        return self.teardown("response channel closed");
                    };
                    let effects = update::handle_response(&mut self.snapshot, response);
                    if matches!(self.execute_effects(effects), LoopFlow::Unloaded) {
                        self.shutdown.cancel();
                        self.unloaded().await;
                        return Ok(());
                    }
                }
                sync_update = self.sync_updates.recv() => {
                    let Some(sync_update) = sync_update else {
                        return self.teardown("sync channel closed");
                    };
                    let effects = update::handle_sync_update(&mut self.snapshot, sync_update);
                    // The sync path never unloads.
                    let _ = self.execute_effects(effects);
                }
                event = self.window_events.recv() => {
                    let Some(event) = event else {
                        return self.teardown("window channel closed");
                    };
                    match event {
                        WindowEvent::Destroy => {
                            self.shutdown.cancel();
                            return Ok(());
                        }
                        WindowEvent::Frame(frame) => self.handle_frame(frame),
                        WindowEvent::Key(key) => self.forward_key(key),
                        WindowEvent::Other => trace!("ignoring unrecognized window event"),
                    }
                }
            }
        }
    }

    /// Terminal display state after a fatal backend error: the
    /// shutdown signal is already closed, and only the unloaded notice
    /// renders until the window is destroyed. Backend channels are no
    /// longer read.
    async fn unloaded(&mut self) {
        debug!("entering unloaded display state");
        while let Some(event) = self.window_events.recv().await {
            match event {
                WindowEvent::Destroy => return,
                WindowEvent::Frame(frame) => {
                    let ctx = frame.context();
                    self.registry.render_unloaded(&ctx);
                    frame.ack();
                }
                WindowEvent::Key(_) | WindowEvent::Other => {}
            }
        }
    }

    /// One frame: prepare the snapshot, invoke the selected render
    /// actions, run the input hook, acknowledge.
    fn handle_frame(&mut self, frame: FrameRequest) {
        let plan = prepare_frame(&mut self.snapshot, Utc::now().timestamp());
        let ctx = frame.context();
        match plan {
            RenderPlan::Loading => self.registry.render_loading(&ctx),
            RenderPlan::Modal(page) => {
                self.registry.render_page(page, &ctx);
                if let Some(dialog) = self.snapshot.dialog.as_mut() {
                    dialog(&ctx, Placement::Centered);
                }
            }
            RenderPlan::Page(page) => self.registry.render_page(page, &ctx),
        }

        if let Some(hook) = self.input_hook.as_mut() {
            hook(&mut self.snapshot);
        }

        frame.ack();
    }

    /// Forwards a key press to the bounded key channel. Drop-if-full:
    /// input consumers may lag or be absent, and the loop never waits
    /// on them.
    fn forward_key(&mut self, key: KeyPress) {
        if self.keys_tx.try_send(key).is_err() {
            trace!("dropping key event, buffer full or no consumer");
        }
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) -> LoopFlow {
        let mut flow = LoopFlow::Continue;
        for effect in effects {
            match effect {
                UiEffect::FetchWalletInfo => self.wallet.fetch_wallet_info(),
                UiEffect::Invalidate => self.window.invalidate(),
                UiEffect::Unload => flow = LoopFlow::Unloaded,
            }
        }
        flow
    }

    /// All senders dropping is only legal at teardown; treat it like a
    /// destroy so the loop cannot spin on a closed channel.
    fn teardown(&self, reason: &str) -> Result<()> {
        debug!("dispatcher stopping: {reason}");
        self.shutdown.cancel();
        Ok(())
    }
}

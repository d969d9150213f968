//! End-to-end dispatcher loop tests over real channels.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use vireo_ui::render::RenderAction;
use vireo_ui::runtime::InputHook;
use vireo_ui::{
    Dispatcher, FrameRequest, KeyPress, PageId, PageRegistry, Placement, WindowEvent, WindowHandle,
};
use vireo_wallet::wallet::{self, WalletCommand, WalletFeed};
use vireo_wallet::{MultiWalletInfo, SyncUpdate, WalletError};

const WAIT: Duration = Duration::from_secs(5);

/// Settle time for cross-channel ordering: within one channel order is
/// FIFO, but a frame sent immediately after a backend event could win
/// the select race.
const SETTLE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rendered {
    Loading,
    Unloaded,
    Page(PageId),
    Dialog(Placement),
}

type RenderLog = Arc<Mutex<Vec<Rendered>>>;

fn record(log: &RenderLog, what: Rendered) -> RenderAction {
    let log = Arc::clone(log);
    Box::new(move |_ctx| log.lock().unwrap().push(what.clone()))
}

struct Harness {
    feed: WalletFeed,
    window_tx: mpsc::Sender<WindowEvent>,
    commands: mpsc::UnboundedReceiver<WalletCommand>,
    window: WindowHandle,
    shutdown: CancellationToken,
    rendered: RenderLog,
    keys: mpsc::Receiver<KeyPress>,
    task: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    fn spawn() -> Self {
        Self::spawn_with_hook(None)
    }

    fn spawn_with_hook(hook: Option<InputHook>) -> Self {
        let rendered: RenderLog = Arc::default();
        let mut registry = PageRegistry::new(
            record(&rendered, Rendered::Loading),
            record(&rendered, Rendered::Unloaded),
        );
        for page in [
            PageId::Overview,
            PageId::Transactions,
            PageId::CreateRestore,
        ] {
            registry.register(page, record(&rendered, Rendered::Page(page)));
        }

        let (wallet, receivers, feed, commands) = wallet::channels(16);
        let (window_tx, window_rx) = mpsc::channel(16);
        let window = WindowHandle::new();
        let shutdown = CancellationToken::new();

        let mut dispatcher = Dispatcher::new(
            wallet,
            receivers,
            window_rx,
            window.clone(),
            registry,
            shutdown.clone(),
        );
        let keys = dispatcher.take_key_events().unwrap();
        if let Some(hook) = hook {
            dispatcher.set_input_hook(hook);
        }

        Self {
            feed,
            window_tx,
            commands,
            window,
            shutdown,
            rendered,
            keys,
            task: tokio::spawn(dispatcher.run()),
        }
    }

    /// Sends a frame event and returns the acknowledgement receiver.
    async fn send_frame(&self) -> oneshot::Receiver<()> {
        let (frame, acked) = FrameRequest::new(800, 600);
        self.window_tx
            .send(WindowEvent::Frame(frame))
            .await
            .unwrap();
        acked
    }

    /// Sends a frame and waits for its acknowledgement.
    async fn frame(&self) {
        let acked = self.send_frame().await;
        timeout(WAIT, acked).await.unwrap().unwrap();
    }

    fn rendered(&self) -> Vec<Rendered> {
        self.rendered.lock().unwrap().clone()
    }

    async fn destroy(self) -> anyhow::Result<()> {
        self.window_tx.send(WindowEvent::Destroy).await.unwrap();
        timeout(WAIT, self.task).await.unwrap().unwrap()
    }
}

fn loaded_info() -> MultiWalletInfo {
    MultiWalletInfo {
        loaded_wallets: 1,
        total_balance: 1_000_000,
        best_block_height: 100,
        best_block_time: 1_700_000_000,
        synced: true,
        syncing: false,
    }
}

#[tokio::test]
async fn issues_initial_wallet_info_request() {
    let mut harness = Harness::spawn();
    let command = timeout(WAIT, harness.commands.recv()).await.unwrap();
    assert_eq!(command, Some(WalletCommand::FetchWalletInfo));
    harness.destroy().await.unwrap();
}

#[tokio::test]
async fn loading_frame_renders_loading_view() {
    let harness = Harness::spawn();
    harness.frame().await;
    assert_eq!(harness.rendered(), vec![Rendered::Loading]);
    harness.destroy().await.unwrap();
}

#[tokio::test]
async fn first_response_unblocks_loading() {
    // Scenario A: response with one wallet, then a frame, renders the
    // Overview page rather than the loading view.
    let harness = Harness::spawn();
    harness.feed.send_response(Ok(loaded_info())).await;
    tokio::time::sleep(SETTLE).await;

    harness.frame().await;
    assert_eq!(harness.rendered(), vec![Rendered::Page(PageId::Overview)]);
    harness.destroy().await.unwrap();
}

#[tokio::test]
async fn zero_wallets_forces_create_restore() {
    let harness = Harness::spawn();
    harness
        .feed
        .send_response(Ok(MultiWalletInfo::default()))
        .await;
    tokio::time::sleep(SETTLE).await;

    harness.frame().await;
    harness.frame().await;
    assert_eq!(
        harness.rendered(),
        vec![
            Rendered::Page(PageId::CreateRestore),
            Rendered::Page(PageId::CreateRestore),
        ]
    );
    harness.destroy().await.unwrap();
}

#[tokio::test]
async fn transient_error_retries_and_invalidates() {
    let mut harness = Harness::spawn();
    // Initial load request.
    assert_eq!(
        timeout(WAIT, harness.commands.recv()).await.unwrap(),
        Some(WalletCommand::FetchWalletInfo)
    );

    harness
        .feed
        .send_response(Err(WalletError::backend("peer timeout")))
        .await;

    // Still loading, so the failure triggers exactly one more request
    // and an out-of-band repaint.
    assert_eq!(
        timeout(WAIT, harness.commands.recv()).await.unwrap(),
        Some(WalletCommand::FetchWalletInfo)
    );
    timeout(WAIT, harness.window.repaint_requested())
        .await
        .unwrap();

    harness.destroy().await.unwrap();
}

#[tokio::test]
async fn fatal_error_closes_shutdown_and_enters_unloaded() {
    // Scenario C / fatal escalation: the database-in-use sentinel
    // closes the shutdown signal and the normal render path is gone.
    let harness = Harness::spawn();
    harness.feed.send_response(Ok(loaded_info())).await;
    tokio::time::sleep(SETTLE).await;

    harness
        .feed
        .send_response(Err(WalletError::DatabaseInUse))
        .await;
    timeout(WAIT, harness.shutdown.cancelled()).await.unwrap();

    // Backend events after the failure fall on deaf ears.
    harness.feed.send_sync_update(SyncUpdate::Completed).await;

    // Frames still get acknowledged, but only the unloaded notice
    // renders.
    harness.frame().await;
    assert_eq!(harness.rendered(), vec![Rendered::Unloaded]);

    harness.destroy().await.unwrap();
}

#[tokio::test]
async fn destroy_closes_shutdown_and_exits() {
    let harness = Harness::spawn();
    let shutdown = harness.shutdown.clone();
    harness.destroy().await.unwrap();
    assert!(shutdown.is_cancelled());
}

#[tokio::test]
async fn every_frame_is_acknowledged_once() {
    let harness = Harness::spawn();
    let first = harness.send_frame().await;
    let second = harness.send_frame().await;
    timeout(WAIT, first).await.unwrap().unwrap();
    timeout(WAIT, second).await.unwrap().unwrap();
    // One render per frame, never zero, never two.
    assert_eq!(harness.rendered().len(), 2);
    harness.destroy().await.unwrap();
}

#[tokio::test]
async fn keys_are_forwarded_in_order() {
    let mut harness = Harness::spawn();
    for code in [10, 20] {
        harness
            .window_tx
            .send(WindowEvent::Key(KeyPress::new(code)))
            .await
            .unwrap();
    }
    assert_eq!(
        timeout(WAIT, harness.keys.recv()).await.unwrap(),
        Some(KeyPress::new(10))
    );
    assert_eq!(
        timeout(WAIT, harness.keys.recv()).await.unwrap(),
        Some(KeyPress::new(20))
    );
    harness.destroy().await.unwrap();
}

#[tokio::test]
async fn absent_key_consumer_never_stalls_the_loop() {
    let mut harness = Harness::spawn();
    drop(std::mem::replace(&mut harness.keys, mpsc::channel(1).1));

    for code in 0..100 {
        harness
            .window_tx
            .send(WindowEvent::Key(KeyPress::new(code)))
            .await
            .unwrap();
    }
    // Frames still flow; dropped keys never block the select loop.
    harness
        .window_tx
        .send(WindowEvent::Other)
        .await
        .unwrap();
    let (frame, acked) = FrameRequest::new(800, 600);
    harness
        .window_tx
        .send(WindowEvent::Frame(frame))
        .await
        .unwrap();
    timeout(WAIT, acked).await.unwrap().unwrap();

    harness.window_tx.send(WindowEvent::Destroy).await.unwrap();
    timeout(WAIT, harness.task).await.unwrap().unwrap().unwrap();
}

#[tokio::test]
async fn input_hook_can_open_a_dialog() {
    let log: RenderLog = Arc::default();
    let dialog_log = Arc::clone(&log);
    let mut opened = false;
    let hook: InputHook = Box::new(move |snapshot| {
        if !opened {
            opened = true;
            let log = Arc::clone(&dialog_log);
            snapshot.dialog = Some(Box::new(move |_ctx, placement| {
                log.lock().unwrap().push(Rendered::Dialog(placement));
            }));
        }
    });

    let harness = Harness::spawn_with_hook(Some(hook));
    harness.feed.send_response(Ok(loaded_info())).await;
    tokio::time::sleep(SETTLE).await;

    // First frame renders the page and installs the dialog via the
    // hook; the second renders page-then-dialog, centered.
    harness.frame().await;
    harness.frame().await;
    assert_eq!(
        harness.rendered(),
        vec![
            Rendered::Page(PageId::Overview),
            Rendered::Page(PageId::Overview),
        ]
    );
    assert_eq!(
        log.lock().unwrap().clone(),
        vec![Rendered::Dialog(Placement::Centered)]
    );
    harness.destroy().await.unwrap();
}

#[tokio::test]
async fn sync_burst_interleaved_with_frames_converges() {
    // Scenario B at loop level: a frame sampled mid-burst is fine
    // (frames are samples, not transactions), and the final frame
    // reflects the completed sync.
    let harness = Harness::spawn();
    harness.feed.send_response(Ok(MultiWalletInfo {
        synced: false,
        ..loaded_info()
    }))
    .await;

    harness.feed.send_sync_update(SyncUpdate::Started).await;
    harness.frame().await;
    harness.feed.send_sync_update(SyncUpdate::Completed).await;
    tokio::time::sleep(SETTLE).await;
    harness.frame().await;

    assert_eq!(harness.rendered().len(), 2);
    harness.destroy().await.unwrap();
}

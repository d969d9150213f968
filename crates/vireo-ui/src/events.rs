//! Window-layer event types.
//!
//! One closed union per channel; the dispatcher matches exhaustively,
//! so a new event kind is a compile error at every consumer.

use std::sync::Arc;

use tokio::sync::{Notify, oneshot};

use crate::render::LayoutContext;

/// Events delivered by the windowing layer.
#[derive(Debug)]
pub enum WindowEvent {
    /// The window is being torn down; the loop must exit.
    Destroy,
    /// Produce one rendered frame.
    Frame(FrameRequest),
    /// A key press, forwarded to page widgets between frames.
    Key(KeyPress),
    /// Anything the dispatcher has no use for.
    Other,
}

/// A request for one rendered frame.
///
/// Acknowledgement consumes the request, so exactly-once delivery is
/// enforced by move semantics: the dispatcher cannot ack twice, and
/// dropping a request without acking is visible to the windowing
/// layer as a closed channel.
#[derive(Debug)]
pub struct FrameRequest {
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    ack: oneshot::Sender<()>,
}

impl FrameRequest {
    /// Creates a frame request and the receiver the windowing layer
    /// awaits before presenting the frame.
    pub fn new(width: u32, height: u32) -> (Self, oneshot::Receiver<()>) {
        let (ack, acked) = oneshot::channel();
        (Self { width, height, ack }, acked)
    }

    /// Layout context handed to render actions.
    pub fn context(&self) -> LayoutContext {
        LayoutContext {
            width: self.width,
            height: self.height,
        }
    }

    /// Acknowledges the frame, consuming the request.
    pub fn ack(self) {
        let _ = self.ack.send(());
    }
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub logo: bool,
}

/// A key press from the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// Platform keycode.
    pub code: u32,
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    pub fn new(code: u32) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::default(),
        }
    }
}

/// Handle for requesting an out-of-band repaint.
///
/// Cloneable; the windowing layer awaits [`repaint_requested`] and
/// schedules a frame event when it fires. Multiple invalidations
/// before the next frame coalesce into one wakeup.
///
/// [`repaint_requested`]: WindowHandle::repaint_requested
#[derive(Debug, Clone, Default)]
pub struct WindowHandle {
    repaint: Arc<Notify>,
}

impl WindowHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a repaint without waiting for the next frame event.
    pub fn invalidate(&self) {
        self.repaint.notify_one();
    }

    /// Resolves when a repaint has been requested since the last call.
    pub async fn repaint_requested(&self) {
        self.repaint.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ack_resolves_receiver() {
        let (frame, acked) = FrameRequest::new(800, 600);
        frame.ack();
        assert!(acked.await.is_ok());
    }

    #[tokio::test]
    async fn dropped_frame_closes_receiver() {
        let (frame, acked) = FrameRequest::new(800, 600);
        drop(frame);
        assert!(acked.await.is_err());
    }

    #[tokio::test]
    async fn invalidations_coalesce() {
        let window = WindowHandle::new();
        window.invalidate();
        window.invalidate();
        // One wakeup is pending regardless of how many requests came in.
        window.repaint_requested().await;
    }
}

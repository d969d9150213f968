//! Event-dispatch core for the Vireo desktop wallet.
//!
//! A single dispatcher task merges three asynchronous streams (backend
//! responses, sync-stage updates, window events) into one single-writer
//! state snapshot, and decides once per frame what the external
//! renderer should present.
//!
//! Architecture mirrors an Elm-style split:
//! - `state` - the snapshot the renderer samples each frame
//! - `update` - pure reducers: events in, field updates + effects out
//! - `classify` - transient/fatal triage of backend errors
//! - `render` - the render-gate policy (which screen, which dialog)
//! - `runtime` - the event loop that owns the snapshot and executes
//!   effects; all side effects happen here

pub mod classify;
pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod update;

pub use events::{FrameRequest, KeyPress, WindowEvent, WindowHandle};
pub use render::{LayoutContext, PageRegistry, Placement, RenderPlan};
pub use runtime::Dispatcher;
pub use state::{PageId, StateSnapshot, UiMode};

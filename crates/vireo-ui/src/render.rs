//! The render gate: which screen to present for the current snapshot.
//!
//! Rendering itself belongs to the external renderer; this module only
//! selects. The registry maps page identifiers to render actions and
//! is pre-populated by the collaborator before the loop starts.

use std::collections::HashMap;

use tracing::trace;
use vireo_wallet::info::seconds_to_days;

use crate::state::{PageId, StateSnapshot, UiMode};

/// Layout context handed to render actions, from the frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutContext {
    pub width: u32,
    pub height: u32,
}

/// Positioning directive for dialog actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Centered over the underlying page.
    Centered,
}

/// A render action for a page or full-screen view.
pub type RenderAction = Box<dyn FnMut(&LayoutContext) + Send>;

/// A render action for a modal dialog.
pub type DialogAction = Box<dyn FnMut(&LayoutContext, Placement) + Send>;

/// What the render gate selected for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPlan {
    /// Full-screen loading view; no page underneath.
    Loading,
    /// The page, with the active dialog centered over it.
    Modal(PageId),
    /// Just the page.
    Page(PageId),
}

/// Registry of render actions, keyed by page identifier.
pub struct PageRegistry {
    loading: RenderAction,
    unloaded: RenderAction,
    pages: HashMap<PageId, RenderAction>,
}

impl PageRegistry {
    /// Creates a registry with the two full-screen views every build
    /// carries: the initial loading view and the terminal unloaded
    /// notice.
    pub fn new(loading: RenderAction, unloaded: RenderAction) -> Self {
        Self {
            loading,
            unloaded,
            pages: HashMap::new(),
        }
    }

    /// Registers the render action for a page.
    pub fn register(&mut self, page: PageId, action: RenderAction) {
        self.pages.insert(page, action);
    }

    /// Returns whether a page has a registered action.
    pub fn contains(&self, page: PageId) -> bool {
        self.pages.contains_key(&page)
    }

    pub(crate) fn render_loading(&mut self, ctx: &LayoutContext) {
        (self.loading)(ctx);
    }

    pub(crate) fn render_unloaded(&mut self, ctx: &LayoutContext) {
        (self.unloaded)(ctx);
    }

    pub(crate) fn render_page(&mut self, page: PageId, ctx: &LayoutContext) {
        if let Some(action) = self.pages.get_mut(&page) {
            action(ctx);
        } else {
            trace!("no render action registered for page {page:?}");
        }
    }
}

/// Per-frame snapshot preparation and screen selection.
///
/// Recomputes the derived sync age, forces the create/restore page
/// while no wallets are loaded (overriding any other navigation), and
/// selects the screen by UI-mode precedence. The only fields touched
/// are the two named here; everything else is read-only.
pub fn prepare_frame(snapshot: &mut StateSnapshot, now_unix: i64) -> RenderPlan {
    snapshot.last_sync_age_days = seconds_to_days(now_unix - snapshot.best_block_time);

    if snapshot.loaded_wallets == 0 {
        snapshot.current_page = PageId::CreateRestore;
    }

    match snapshot.mode() {
        UiMode::Loading => RenderPlan::Loading,
        UiMode::Dialog => RenderPlan::Modal(snapshot.current_page),
        UiMode::Normal => RenderPlan::Page(snapshot.current_page),
    }
}

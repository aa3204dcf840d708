//! Actions — the app's internal message vocabulary.
//!
//! Key events and background state changes are both funneled into actions,
//! so the main loop has a single processing path.

use storefront_core::ProductId;

use crate::screen::ScreenId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Stop the event loop.
    Quit,
    /// Draw a frame.
    Render,
    /// Periodic housekeeping (throbber animation, staleness checks).
    Tick,
    /// Terminal resized to (cols, rows).
    Resize(u16, u16),

    /// Navigate to a screen.
    SwitchScreen(ScreenId),
    /// Pop back to the product list.
    Back,

    /// Trigger a catalog fetch (initial load, `r`, or the offline Retry).
    Refresh,
    /// Toggle favorite membership for a product.
    ToggleFavorite(ProductId),
    /// Open the detail screen for a product.
    OpenDetail(ProductId),

    /// Core state changed (products, fetch state, favorites, connectivity) —
    /// emitted by the data bridge so the next frame reflects it.
    StateChanged,
}

//! Host surface abstraction
//!
//! The motion controller never touches markup. It drives each column
//! through a [`ScrollSurface`] - the pair of handles the page structure
//! exposes (a fixed-size clipping viewport wrapping a scrollable list)
//! reduced to the four operations the controller actually needs.
//!
//! Resolution happens once at startup through [`MarqueeHost`]: a selector
//! either yields a fully usable surface or a definitive absent result,
//! never a partially initialized handle. A missing column is skipped, not
//! an error.

/// One column's animatable subtree, measured and written by the controller.
///
/// Implementations are expected to be cheap: every frame reads nothing and
/// writes exactly one offset; geometry is only read during construction and
/// on resize.
pub trait ScrollSurface {
    /// Visible length of the clipping viewport, in pixels.
    fn viewport_extent(&self) -> f32;

    /// Total scrollable length of the list content, in pixels.
    fn content_extent(&self) -> f32;

    /// Clone the list's current children and append the clones, doubling
    /// the rendered content. Used once at startup to pad the loop.
    fn duplicate_content(&mut self);

    /// Write the current scroll offset as the column's visual transform.
    ///
    /// `offset` is always in `[0, loop length)`; the host renders it as a
    /// negative translation along the scroll axis.
    fn set_scroll_offset(&mut self, offset: f32);
}

/// The listener-group environment hosting all columns.
pub trait MarqueeHost {
    /// Resolve a column selector to its surface, or report it absent.
    ///
    /// Absent columns (a selector not present on the current page variant)
    /// must return `None`; the controller tolerates any subset of columns.
    fn resolve_surface(&mut self, selector: &str) -> Option<Box<dyn ScrollSurface>>;

    /// Reference length for speed-based autoscroll rates, in pixels
    /// (the window height on a web host).
    fn reference_extent(&self) -> f32;

    /// Toggle the host's dragging state (a CSS state class on a web host)
    /// for the duration of a mouse drag.
    fn set_drag_active(&mut self, active: bool);
}

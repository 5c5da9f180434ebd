//! Platform-neutral input events
//!
//! The host environment owns the native gesture listeners (wheel, touch,
//! pointer) and forwards each one as an [`InputEvent`]. The controller
//! answers with an [`EventResponse`] telling the host whether the native
//! event should be default-prevented or left alone.
//!
//! All events are scoped to one listener group (by default the whole page
//! body); the controller broadcasts the resulting impulses to every active
//! column, so the host never needs to route events per column.

/// What produced a pointer event.
///
/// Touch-originated pointer events are ignored by the drag handler so a
/// single finger gesture is not counted by both the touch and the pointer
/// paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

/// A gesture or lifecycle event forwarded by the host.
///
/// All coordinates are in the host's pixel space; only the vertical axis
/// matters to the marquee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Wheel scroll; `delta_y` is the native wheel delta.
    Wheel { delta_y: f32 },
    /// First touch of a touch session.
    TouchStart { y: f32 },
    /// Touch moved within a session.
    TouchMove { y: f32 },
    /// Touch session ended.
    TouchEnd,
    /// Pointer button pressed.
    PointerDown { y: f32, kind: PointerKind },
    /// Pointer moved (with or without a held button).
    PointerMove { y: f32 },
    /// Pointer button released.
    PointerUp,
    /// Pointer interaction aborted by the host.
    PointerCancel,
    /// Native drag-and-drop started; `target_is_image` is true when the
    /// dragged element is an image.
    DragStart { target_is_image: bool },
    /// Viewport or content geometry changed; metrics must be re-measured.
    Resize,
}

/// The controller's verdict on a forwarded native event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Suppress the native default (page scroll, image drag affordance).
    PreventDefault,
    /// Leave the native event untouched.
    Passthrough,
}

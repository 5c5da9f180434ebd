//! Gesture-to-impulse translation
//!
//! Converts the host's forwarded gestures into signed vertical impulses.
//! Wheel deltas pass through directly; touch and mouse drags report the
//! distance travelled since the previous sample of their session. One
//! translator serves the whole listener group; the resulting impulse is
//! broadcast to every column, which applies its own direction inversion.
//!
//! Only mouse pointers start a drag session. Touch-originated pointer
//! events are ignored here because the touch path already counts them.

use marquee_core::{EventResponse, InputEvent, PointerKind};

/// Mouse-drag session state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { last_y: f32 },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// Outcome of translating one forwarded event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation {
    /// Velocity impulse to broadcast to every column, if any.
    pub impulse: Option<f32>,
    /// What the host should do with the native event.
    pub response: EventResponse,
    /// Drag session edge: `Some(true)` when a mouse drag starts,
    /// `Some(false)` when it ends. The host mirrors this into its
    /// dragging state class.
    pub drag_transition: Option<bool>,
}

impl Translation {
    fn passthrough() -> Self {
        Self {
            impulse: None,
            response: EventResponse::Passthrough,
            drag_transition: None,
        }
    }

    fn impulse(delta_y: f32) -> Self {
        Self {
            impulse: Some(delta_y),
            response: EventResponse::PreventDefault,
            drag_transition: None,
        }
    }
}

/// Stateful translator for one listener group.
#[derive(Debug, Default)]
pub struct InputTranslator {
    /// Last sampled Y of the active touch session.
    touch_last_y: Option<f32>,
    drag: DragState,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Translate one forwarded event.
    ///
    /// `InputEvent::Resize` is geometry, not a gesture; it always passes
    /// through here and is handled by the controller.
    pub fn translate(&mut self, event: InputEvent) -> Translation {
        match event {
            InputEvent::Wheel { delta_y } => Translation::impulse(delta_y),

            InputEvent::TouchStart { y } => {
                self.touch_last_y = Some(y);
                Translation::passthrough()
            }
            InputEvent::TouchMove { y } => match self.touch_last_y.replace(y) {
                Some(last_y) => Translation::impulse(last_y - y),
                // A move with no armed session arms it; the gesture is
                // still ours, so the native scroll stays suppressed.
                None => Translation {
                    impulse: None,
                    response: EventResponse::PreventDefault,
                    drag_transition: None,
                },
            },
            InputEvent::TouchEnd => {
                self.touch_last_y = None;
                Translation::passthrough()
            }

            InputEvent::PointerDown { y, kind } => {
                if kind != PointerKind::Mouse {
                    return Translation::passthrough();
                }
                self.drag = DragState::Dragging { last_y: y };
                Translation {
                    impulse: None,
                    response: EventResponse::Passthrough,
                    drag_transition: Some(true),
                }
            }
            InputEvent::PointerMove { y } => match self.drag {
                DragState::Dragging { last_y } => {
                    self.drag = DragState::Dragging { last_y: y };
                    Translation::impulse(last_y - y)
                }
                DragState::Idle => Translation::passthrough(),
            },
            InputEvent::PointerUp | InputEvent::PointerCancel => {
                let was_dragging = self.drag.is_dragging();
                self.drag = DragState::Idle;
                Translation {
                    impulse: None,
                    response: EventResponse::Passthrough,
                    drag_transition: was_dragging.then_some(false),
                }
            }

            InputEvent::DragStart { target_is_image } => Translation {
                impulse: None,
                response: if target_is_image {
                    EventResponse::PreventDefault
                } else {
                    EventResponse::Passthrough
                },
                drag_transition: None,
            },

            InputEvent::Resize => Translation::passthrough(),
        }
    }
}

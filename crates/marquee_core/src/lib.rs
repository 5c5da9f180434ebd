//! Marquee Core
//!
//! Foundational primitives for the marquee gallery runtime:
//!
//! - **Offset math**: modulo wrapping that keeps scroll offsets inside one
//!   loop cycle
//! - **Input events**: platform-neutral gesture events forwarded by the host
//! - **Host surfaces**: the narrow handle abstraction the motion controller
//!   drives instead of touching markup directly

pub mod events;
pub mod math;
pub mod surface;

pub use events::{EventResponse, InputEvent, PointerKind};
pub use math::wrap;
pub use surface::{MarqueeHost, ScrollSurface};

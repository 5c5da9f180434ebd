//! Marquee Motion Controller
//!
//! The kinematic runtime behind the scrolling project gallery: one state
//! machine per visible column combining autoscroll, user impulses,
//! friction decay, and modulo-wrapped looping.
//!
//! # Features
//!
//! - **Per-column kinematics**: wrapped offsets, clamped velocities,
//!   frame-rate-independent friction
//! - **Shared frame loop**: one scheduler advances every column in
//!   registration order from the host's refresh callback
//! - **Input translation**: wheel, touch-drag, and mouse-drag gestures
//!   become velocity impulses broadcast to all columns, with per-column
//!   direction inversion so paired columns mirror each other
//! - **Soft-failing construction**: absent columns are skipped; degenerate
//!   geometry stays inert until a resize recomputes it
//!
//! # Example
//!
//! ```ignore
//! use marquee_motion::{init, MarqueeConfig};
//!
//! // Host implements marquee_core::MarqueeHost over its page structure.
//! let mut host = WebHost::new(document);
//! let Some(mut marquee) = init(MarqueeConfig::default(), &mut host) else {
//!     return; // no columns on this page variant
//! };
//!
//! // Forward gestures and frame callbacks:
//! marquee.handle_event(event, &mut host);
//! let keep_going = marquee.tick(now);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use marquee_core::MarqueeHost;
use tracing::debug;

pub mod column;
pub mod config;
pub mod controller;
pub mod input;
pub mod scheduler;

pub use column::{MarqueeColumn, MarqueeDirection};
pub use config::{AutoRate, ConfigError, MarqueeConfig, Selectors};
pub use controller::Marquee;
pub use input::{DragState, InputTranslator, Translation};
pub use scheduler::{ColumnId, MarqueeScheduler, MotionTuning};

/// Process-wide initialization guard: set by the first successful [`init`]
/// and cleared only on full page teardown, i.e. never during this
/// system's actual lifetime.
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Idempotent entry point.
///
/// Page-ready can fire more than once (hot reloads, duplicate script
/// tags); only the first successful invocation builds a controller. Repeat
/// calls return `None` without touching the host. An unsuccessful attempt
/// (no columns resolved) releases the guard so a later layout can try
/// again.
pub fn init(config: MarqueeConfig, host: &mut dyn MarqueeHost) -> Option<Marquee> {
    if INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        debug!("marquee already initialized; re-entry ignored");
        return None;
    }
    let marquee = Marquee::new(config, host);
    if marquee.is_none() {
        INITIALIZED.store(false, Ordering::SeqCst);
    }
    marquee
}

//! The assembled marquee controller
//!
//! [`Marquee`] wires the pieces together: it resolves the configured
//! column selectors against the host (tolerating absent columns), owns the
//! shared scheduler and the input translator, and exposes the two entry
//! points the host drives it through - `handle_event` for forwarded
//! gestures and `tick` for frame callbacks.
//!
//! Everything runs on one cooperative timeline: gesture handling completes
//! synchronously before any frame update can observe its effects, so no
//! locking exists anywhere in the controller.

use std::time::Instant;

use marquee_core::{EventResponse, InputEvent, MarqueeHost};
use smallvec::SmallVec;
use tracing::debug;

use crate::column::{MarqueeColumn, MarqueeDirection};
use crate::config::MarqueeConfig;
use crate::input::{DragState, InputTranslator};
use crate::scheduler::{MarqueeScheduler, MotionTuning};

/// One page's marquee runtime: all resolved columns plus the shared input
/// and frame machinery.
pub struct Marquee {
    config: MarqueeConfig,
    scheduler: MarqueeScheduler,
    input: InputTranslator,
    /// Cached window-height analog; refreshed on resize.
    reference_extent: f32,
}

impl Marquee {
    /// Resolve the configured columns and build the controller.
    ///
    /// Absent columns are skipped; returns `None` only when no column at
    /// all resolved (nothing to animate on this page variant).
    pub fn new(config: MarqueeConfig, host: &mut dyn MarqueeHost) -> Option<Self> {
        let mut scheduler = MarqueeScheduler::new(MotionTuning::from(&config));
        let reference_extent = host.reference_extent();

        let mut roles: SmallVec<[(String, MarqueeDirection); 3]> = SmallVec::new();
        roles.push((config.selectors.left.clone(), MarqueeDirection::Forward));
        roles.push((config.selectors.right.clone(), MarqueeDirection::Reverse));
        if config.include_mobile {
            roles.push((config.selectors.mobile.clone(), MarqueeDirection::Forward));
        }

        for (selector, direction) in roles {
            let Some(column) =
                MarqueeColumn::attach(host, &selector, direction, config.auto_rate)
            else {
                continue;
            };
            if config.debug {
                debug!(
                    selector = %selector,
                    "column attached: loop_extent={:.1} auto_speed={:.4}",
                    column.loop_extent(),
                    column.auto_speed(),
                );
            }
            scheduler.register(column);
        }

        if scheduler.is_empty() {
            debug!("no marquee columns resolved; controller not built");
            return None;
        }

        Some(Self {
            config,
            scheduler,
            input: InputTranslator::new(),
            reference_extent,
        })
    }

    /// Handle one forwarded host event.
    ///
    /// Gestures become velocity impulses broadcast to every column (and
    /// mark the frame loop runnable); resize re-measures every column. The
    /// returned response tells the host whether to default-prevent the
    /// native event.
    pub fn handle_event(&mut self, event: InputEvent, host: &mut dyn MarqueeHost) -> EventResponse {
        if let InputEvent::Resize = event {
            self.reference_extent = host.reference_extent();
            self.scheduler
                .refresh_metrics(self.config.auto_rate, self.reference_extent);
            if self.config.debug {
                debug!(
                    "metrics refreshed: reference_extent={:.0}",
                    self.reference_extent
                );
            }
            return EventResponse::Passthrough;
        }

        let translation = self.input.translate(event);
        if let Some(active) = translation.drag_transition {
            host.set_drag_active(active);
        }
        if let Some(delta_y) = translation.impulse {
            self.scheduler.apply_impulse(delta_y);
        }
        translation.response
    }

    /// Host frame callback; returns whether another frame should be
    /// scheduled.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.scheduler.tick(now)
    }

    /// Deterministic frame step (the `tick` core), exposed for hosts with
    /// their own clocks.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        self.scheduler.advance(dt_ms)
    }

    /// Whether the frame loop currently wants callbacks.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn column_count(&self) -> usize {
        self.scheduler.len()
    }

    pub fn drag_state(&self) -> DragState {
        self.input.drag_state()
    }

    pub fn config(&self) -> &MarqueeConfig {
        &self.config
    }
}

//! Per-column kinematic state
//!
//! Each visible column owns one [`MarqueeColumn`]: a scroll offset wrapped
//! into `[0, loop extent)`, a user-driven velocity decaying under friction,
//! and the derived metrics (loop extent, automatic speed). The shared
//! scheduler advances every column each frame; a column never mutates
//! another column's state.
//!
//! Construction fails soft: a selector the host cannot resolve yields no
//! column, and a column whose geometry measures to a zero loop stays inert
//! until a resize recomputes a positive extent.

use marquee_core::{wrap, MarqueeHost, ScrollSurface};
use tracing::{debug, trace};

use crate::config::AutoRate;

/// Friction decay reference frame: one 60 Hz frame, in milliseconds.
/// `friction^(dt / REFERENCE)` makes decay independent of refresh rate.
const FRICTION_REFERENCE_FRAME_MS: f32 = 16.67;

/// Upper bound on loop-padding duplication rounds. Guards against
/// pathological near-zero content duplicating forever.
const MAX_PADDING_ROUNDS: u32 = 5;

/// Which way a column auto-scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarqueeDirection {
    /// Content translates forward (+1).
    Forward,
    /// Content translates backward (-1).
    Reverse,
}

impl MarqueeDirection {
    pub fn sign(self) -> f32 {
        match self {
            MarqueeDirection::Forward => 1.0,
            MarqueeDirection::Reverse => -1.0,
        }
    }

    pub fn inverted(self) -> Self {
        match self {
            MarqueeDirection::Forward => MarqueeDirection::Reverse,
            MarqueeDirection::Reverse => MarqueeDirection::Forward,
        }
    }
}

/// One column's motion state, exclusively owned by the scheduler.
pub struct MarqueeColumn {
    surface: Box<dyn ScrollSurface>,
    auto_direction: MarqueeDirection,
    /// Sign applied to user impulses; the inverse of `auto_direction`, so
    /// paired columns mirror each other under one shared gesture.
    input_direction: MarqueeDirection,
    /// Half the scrollable content length; 0 means the column is inert.
    loop_extent: f32,
    /// Current scroll position, always in `[0, loop_extent)`.
    offset: f32,
    /// User-driven speed in px/ms, decaying toward zero under friction.
    velocity: f32,
    /// Automatic speed in px/ms derived from the configured rate.
    auto_speed: f32,
}

impl MarqueeColumn {
    /// Resolve `selector` on the host and build the column's motion state.
    ///
    /// Returns `None` when the host reports the column absent; callers
    /// tolerate any subset of columns.
    pub fn attach(
        host: &mut dyn MarqueeHost,
        selector: &str,
        auto_direction: MarqueeDirection,
        auto_rate: AutoRate,
    ) -> Option<Self> {
        let Some(surface) = host.resolve_surface(selector) else {
            debug!(selector, "marquee column absent; skipped");
            return None;
        };
        let reference_extent = host.reference_extent();

        let mut column = Self {
            surface,
            auto_direction,
            input_direction: auto_direction.inverted(),
            loop_extent: 0.0,
            offset: 0.0,
            velocity: 0.0,
            auto_speed: 0.0,
        };
        column.pad_loop();
        column.refresh_metrics(auto_rate, reference_extent);
        Some(column)
    }

    /// Build a column directly from an already-resolved surface.
    pub fn from_surface(
        surface: Box<dyn ScrollSurface>,
        auto_direction: MarqueeDirection,
        auto_rate: AutoRate,
        reference_extent: f32,
    ) -> Self {
        let mut column = Self {
            surface,
            auto_direction,
            input_direction: auto_direction.inverted(),
            loop_extent: 0.0,
            offset: 0.0,
            velocity: 0.0,
            auto_speed: 0.0,
        };
        column.pad_loop();
        column.refresh_metrics(auto_rate, reference_extent);
        column
    }

    /// Duplicate the rendered content until it is long enough to loop
    /// without a visible seam (at least twice the viewport), bounded by
    /// [`MAX_PADDING_ROUNDS`].
    fn pad_loop(&mut self) {
        let min_extent = self.surface.viewport_extent() * 2.0;
        let mut rounds = 0;
        while self.surface.content_extent() < min_extent && rounds < MAX_PADDING_ROUNDS {
            self.surface.duplicate_content();
            rounds += 1;
        }
        trace!(
            "loop padding done: content={:.0} min={:.0} rounds={rounds}",
            self.surface.content_extent(),
            min_extent,
        );
    }

    /// Recompute loop extent and automatic speed from live geometry, then
    /// re-write the transform. Called at construction and on every
    /// viewport/content size change.
    pub fn refresh_metrics(&mut self, auto_rate: AutoRate, reference_extent: f32) {
        // Content is duplicated once, so wrapping at half its length loops
        // seamlessly.
        self.loop_extent = self.surface.content_extent() / 2.0;
        self.offset = wrap(self.offset, self.loop_extent);
        self.auto_speed = auto_rate.speed_px_per_ms(self.loop_extent, reference_extent);
        self.surface.set_scroll_offset(self.offset);
        trace!(
            "metrics: loop_extent={:.1} auto_speed={:.4}",
            self.loop_extent,
            self.auto_speed,
        );
    }

    /// One frame step: automatic movement plus integrated user velocity,
    /// wrapped into the loop, with friction decay applied after.
    ///
    /// Returns false when the column has no measured loop and contributed
    /// nothing.
    pub fn advance(&mut self, dt_ms: f32, friction: f32) -> bool {
        if self.loop_extent <= 0.0 {
            return false;
        }
        let base_move = self.auto_speed * self.auto_direction.sign() * dt_ms;
        let user_move = self.velocity * dt_ms;
        self.offset = wrap(self.offset + base_move + user_move, self.loop_extent);
        self.velocity *= friction.powf(dt_ms / FRICTION_REFERENCE_FRAME_MS);
        self.surface.set_scroll_offset(self.offset);
        true
    }

    /// Fold a gesture delta into the velocity, applying this column's input
    /// direction and clamping into the allowed band immediately.
    pub fn apply_impulse(&mut self, delta_y: f32, wheel_force: f32, max_velocity: f32) {
        let gain = delta_y * wheel_force * self.input_direction.sign();
        self.velocity = (self.velocity + gain).clamp(-max_velocity, max_velocity);
    }

    pub fn auto_direction(&self) -> MarqueeDirection {
        self.auto_direction
    }

    pub fn loop_extent(&self) -> f32 {
        self.loop_extent
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn auto_speed(&self) -> f32 {
        self.auto_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Surface double with externally inspectable state.
    #[derive(Clone)]
    struct TestSurface(Rc<RefCell<SurfaceState>>);

    struct SurfaceState {
        viewport: f32,
        content: f32,
        offset: Option<f32>,
        duplications: u32,
    }

    impl TestSurface {
        fn new(viewport: f32, content: f32) -> Self {
            Self(Rc::new(RefCell::new(SurfaceState {
                viewport,
                content,
                offset: None,
                duplications: 0,
            })))
        }

        fn written_offset(&self) -> Option<f32> {
            self.0.borrow().offset
        }

        fn duplications(&self) -> u32 {
            self.0.borrow().duplications
        }

        fn content(&self) -> f32 {
            self.0.borrow().content
        }
    }

    impl ScrollSurface for TestSurface {
        fn viewport_extent(&self) -> f32 {
            self.0.borrow().viewport
        }

        fn content_extent(&self) -> f32 {
            self.0.borrow().content
        }

        fn duplicate_content(&mut self) {
            let mut state = self.0.borrow_mut();
            state.content *= 2.0;
            state.duplications += 1;
        }

        fn set_scroll_offset(&mut self, offset: f32) {
            self.0.borrow_mut().offset = Some(offset);
        }
    }

    fn column(surface: &TestSurface, direction: MarqueeDirection, rate: AutoRate) -> MarqueeColumn {
        MarqueeColumn::from_surface(Box::new(surface.clone()), direction, rate, 1000.0)
    }

    #[test]
    fn test_padding_reaches_twice_viewport() {
        // 300 px viewport needs 600 px of content; 200 doubles twice to 800.
        let surface = TestSurface::new(300.0, 200.0);
        let col = column(&surface, MarqueeDirection::Forward, AutoRate::default());
        assert_eq!(surface.duplications(), 2);
        assert_eq!(surface.content(), 800.0);
        assert_eq!(col.loop_extent(), 400.0);
    }

    #[test]
    fn test_padding_skipped_when_content_is_tall_enough() {
        let surface = TestSurface::new(300.0, 900.0);
        column(&surface, MarqueeDirection::Forward, AutoRate::default());
        assert_eq!(surface.duplications(), 0);
    }

    #[test]
    fn test_padding_terminates_on_pathological_geometry() {
        // A huge viewport over near-zero content stops at exactly 5 rounds.
        let surface = TestSurface::new(1_000_000.0, 1.0);
        column(&surface, MarqueeDirection::Forward, AutoRate::default());
        assert_eq!(surface.duplications(), 5);
    }

    #[test]
    fn test_zero_content_column_is_inert() {
        let surface = TestSurface::new(400.0, 0.0);
        let mut col = column(&surface, MarqueeDirection::Forward, AutoRate::default());
        assert_eq!(col.loop_extent(), 0.0);
        assert!(!col.advance(16.67, 0.9));
        assert_eq!(col.offset(), 0.0);
    }

    #[test]
    fn test_initial_transform_written() {
        let surface = TestSurface::new(300.0, 900.0);
        column(&surface, MarqueeDirection::Forward, AutoRate::default());
        assert_eq!(surface.written_offset(), Some(0.0));
    }

    #[test]
    fn test_one_tick_matches_the_kinematic_formula() {
        let surface = TestSurface::new(300.0, 900.0);
        let mut col = column(&surface, MarqueeDirection::Forward, AutoRate::Speed(0.15));
        col.apply_impulse(40.0, 0.03, 2.2);

        let loop_extent = col.loop_extent();
        let expected = wrap(
            col.offset() + col.auto_speed() * 1.0 * 16.0 + col.velocity() * 16.0,
            loop_extent,
        );
        assert!(col.advance(16.0, 0.9));
        assert!((col.offset() - expected).abs() < 1e-5);
        assert_eq!(surface.written_offset(), Some(col.offset()));
    }

    #[test]
    fn test_reverse_direction_wraps_negative_movement() {
        let surface = TestSurface::new(300.0, 900.0);
        let mut col = column(&surface, MarqueeDirection::Reverse, AutoRate::Speed(0.15));
        // Starting at 0, a reverse auto move lands just below the loop extent.
        col.advance(16.0, 0.9);
        let loop_extent = col.loop_extent();
        assert!(col.offset() > 0.0 && col.offset() < loop_extent);
        assert!((col.offset() - (loop_extent - col.auto_speed() * 16.0)).abs() < 1e-4);
    }

    #[test]
    fn test_friction_is_frame_rate_independent() {
        let make = || {
            let surface = TestSurface::new(300.0, 900.0);
            let mut col = column(&surface, MarqueeDirection::Forward, AutoRate::Speed(0.0));
            col.apply_impulse(50.0, 0.03, 2.2);
            col
        };

        let mut split = make();
        split.advance(25.0, 0.9);
        split.advance(25.0, 0.9);

        let mut whole = make();
        whole.advance(50.0, 0.9);

        assert!((split.velocity() - whole.velocity()).abs() < 1e-5);
        // Closed form: v0 * f^(T / 16.67).
        let expected = -50.0 * 0.03 * 0.9f32.powf(50.0 / 16.67);
        assert!((whole.velocity() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_impulses_never_exceed_velocity_band() {
        let surface = TestSurface::new(300.0, 900.0);
        let mut col = column(&surface, MarqueeDirection::Forward, AutoRate::default());
        for _ in 0..100 {
            col.apply_impulse(10_000.0, 0.03, 2.2);
            assert!(col.velocity().abs() <= 2.2);
        }
        assert_eq!(col.velocity(), -2.2);
        for _ in 0..100 {
            col.apply_impulse(-10_000.0, 0.03, 2.2);
            assert!(col.velocity().abs() <= 2.2);
        }
        assert_eq!(col.velocity(), 2.2);
    }

    #[test]
    fn test_input_direction_mirrors_auto_direction() {
        let forward_surface = TestSurface::new(300.0, 900.0);
        let reverse_surface = TestSurface::new(300.0, 900.0);
        let mut forward = column(&forward_surface, MarqueeDirection::Forward, AutoRate::Speed(0.0));
        let mut reverse = column(&reverse_surface, MarqueeDirection::Reverse, AutoRate::Speed(0.0));

        forward.apply_impulse(40.0, 0.03, 2.2);
        reverse.apply_impulse(40.0, 0.03, 2.2);
        assert_eq!(forward.velocity(), -reverse.velocity());
    }

    #[test]
    fn test_refresh_metrics_rewraps_offset() {
        let surface = TestSurface::new(300.0, 900.0);
        let mut col = column(&surface, MarqueeDirection::Forward, AutoRate::Speed(0.15));
        col.apply_impulse(200.0, 0.03, 2.2);
        for _ in 0..20 {
            col.advance(16.67, 0.9);
        }
        // Content shrinks; the offset must fold back into the new loop.
        surface.0.borrow_mut().content = 100.0;
        col.refresh_metrics(AutoRate::Speed(0.15), 1000.0);
        assert_eq!(col.loop_extent(), 50.0);
        assert!((0.0..50.0).contains(&col.offset()));
        assert_eq!(surface.written_offset(), Some(col.offset()));
    }
}

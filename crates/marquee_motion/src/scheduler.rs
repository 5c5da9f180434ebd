//! Shared frame scheduler
//!
//! One scheduler drives every registered column from the host's display
//! refresh callback. Columns are updated in registration order each frame;
//! their states are fully independent, so the order only matters for
//! determinism. The scheduler also broadcasts gesture impulses, which is
//! what (re)starts the frame loop after it has gone idle.

use std::time::Instant;

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

use crate::column::MarqueeColumn;
use crate::config::{AutoRate, MarqueeConfig};

/// Frame-to-frame delta cap. A tab coming back from suspension resumes
/// with one ordinary step instead of a lurch.
const MAX_FRAME_DELTA_MS: f32 = 50.0;

new_key_type! {
    /// Unique identifier of a registered column.
    pub struct ColumnId;
}

/// Gesture and friction tuning shared by every column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionTuning {
    pub wheel_force: f32,
    pub friction: f32,
    pub max_velocity: f32,
}

impl From<&MarqueeConfig> for MotionTuning {
    fn from(config: &MarqueeConfig) -> Self {
        Self {
            wheel_force: config.wheel_force,
            friction: config.friction,
            max_velocity: config.max_velocity,
        }
    }
}

/// The frame loop driving all active columns.
pub struct MarqueeScheduler {
    columns: SlotMap<ColumnId, MarqueeColumn>,
    /// Registration order; per-frame updates follow it deterministically.
    order: Vec<ColumnId>,
    tuning: MotionTuning,
    last_frame: Option<Instant>,
    running: bool,
}

impl MarqueeScheduler {
    pub fn new(tuning: MotionTuning) -> Self {
        Self {
            columns: SlotMap::with_key(),
            order: Vec::new(),
            tuning,
            last_frame: None,
            running: false,
        }
    }

    /// Register a column; the frame loop becomes runnable.
    pub fn register(&mut self, column: MarqueeColumn) -> ColumnId {
        let id = self.columns.insert(column);
        self.order.push(id);
        self.running = true;
        id
    }

    pub fn column(&self, id: ColumnId) -> Option<&MarqueeColumn> {
        self.columns.get(id)
    }

    pub fn column_ids(&self) -> impl Iterator<Item = ColumnId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether the host should keep scheduling frame callbacks.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tuning(&self) -> MotionTuning {
        self.tuning
    }

    /// Host frame callback. Computes the clamped frame delta and advances
    /// every column; returns whether another frame should be scheduled.
    pub fn tick(&mut self, now: Instant) -> bool {
        let dt_ms = match self.last_frame {
            Some(last) => {
                let elapsed = now.saturating_duration_since(last);
                (elapsed.as_secs_f32() * 1000.0).min(MAX_FRAME_DELTA_MS)
            }
            None => 0.0,
        };
        self.last_frame = Some(now);
        self.advance(dt_ms)
    }

    /// Deterministic core of the frame update: advance every column by
    /// `dt_ms` in registration order.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        let friction = self.tuning.friction;
        let mut active = false;
        for &id in &self.order {
            if let Some(column) = self.columns.get_mut(id) {
                active |= column.advance(dt_ms, friction);
            }
        }
        self.running = active;
        active
    }

    /// Broadcast one gesture impulse to every column (each applies its own
    /// direction inversion) and mark the loop runnable.
    pub fn apply_impulse(&mut self, delta_y: f32) {
        trace!("impulse delta_y={:.2}", delta_y);
        for &id in &self.order {
            if let Some(column) = self.columns.get_mut(id) {
                column.apply_impulse(delta_y, self.tuning.wheel_force, self.tuning.max_velocity);
            }
        }
        self.running = true;
    }

    /// Re-measure every column after a viewport or content size change.
    pub fn refresh_metrics(&mut self, auto_rate: AutoRate, reference_extent: f32) {
        for &id in &self.order {
            if let Some(column) = self.columns.get_mut(id) {
                column.refresh_metrics(auto_rate, reference_extent);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::MarqueeDirection;
    use marquee_core::ScrollSurface;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Clone)]
    struct TestSurface(Rc<RefCell<(f32, f32, Option<f32>)>>);

    impl TestSurface {
        fn new(viewport: f32, content: f32) -> Self {
            Self(Rc::new(RefCell::new((viewport, content, None))))
        }

        fn written_offset(&self) -> Option<f32> {
            self.0.borrow().2
        }
    }

    impl ScrollSurface for TestSurface {
        fn viewport_extent(&self) -> f32 {
            self.0.borrow().0
        }

        fn content_extent(&self) -> f32 {
            self.0.borrow().1
        }

        fn duplicate_content(&mut self) {
            self.0.borrow_mut().1 *= 2.0;
        }

        fn set_scroll_offset(&mut self, offset: f32) {
            self.0.borrow_mut().2 = Some(offset);
        }
    }

    fn tuning() -> MotionTuning {
        MotionTuning {
            wheel_force: 0.03,
            friction: 0.9,
            max_velocity: 2.2,
        }
    }

    fn scheduler_with_columns(surfaces: &[&TestSurface]) -> MarqueeScheduler {
        let mut scheduler = MarqueeScheduler::new(tuning());
        for (i, surface) in surfaces.iter().enumerate() {
            let direction = if i % 2 == 0 {
                MarqueeDirection::Forward
            } else {
                MarqueeDirection::Reverse
            };
            scheduler.register(MarqueeColumn::from_surface(
                Box::new((*surface).clone()),
                direction,
                AutoRate::Speed(0.15),
                1000.0,
            ));
        }
        scheduler
    }

    #[test]
    fn test_registration_order_is_preserved() {
        let a = TestSurface::new(300.0, 900.0);
        let b = TestSurface::new(300.0, 900.0);
        let c = TestSurface::new(300.0, 900.0);
        let mut scheduler = MarqueeScheduler::new(tuning());
        let ids: Vec<ColumnId> = [&a, &b, &c]
            .iter()
            .map(|s| {
                scheduler.register(MarqueeColumn::from_surface(
                    Box::new((*s).clone()),
                    MarqueeDirection::Forward,
                    AutoRate::default(),
                    1000.0,
                ))
            })
            .collect();
        let listed: Vec<ColumnId> = scheduler.column_ids().collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn test_impulse_broadcasts_with_mirrored_signs() {
        let left = TestSurface::new(300.0, 900.0);
        let right = TestSurface::new(300.0, 900.0);
        let mut scheduler = scheduler_with_columns(&[&left, &right]);

        scheduler.apply_impulse(40.0);
        let velocities: Vec<f32> = scheduler
            .column_ids()
            .filter_map(|id| scheduler.column(id).map(|c| c.velocity()))
            .collect();
        assert_eq!(velocities.len(), 2);
        assert_eq!(velocities[0], -velocities[1]);
        assert!(velocities[0] < 0.0);
    }

    #[test]
    fn test_impulse_restarts_the_loop() {
        let surface = TestSurface::new(300.0, 0.0);
        let mut scheduler = scheduler_with_columns(&[&surface]);
        // Zero-loop column goes idle on the first frame.
        assert!(!scheduler.advance(16.0));
        assert!(!scheduler.is_running());

        scheduler.apply_impulse(10.0);
        assert!(scheduler.is_running());
    }

    #[test]
    fn test_tick_clamps_long_suspensions() {
        let surface = TestSurface::new(300.0, 900.0);
        let mut scheduler = scheduler_with_columns(&[&surface]);

        let start = Instant::now();
        assert!(scheduler.tick(start));
        // First tick advances by nothing.
        assert_eq!(surface.written_offset(), Some(0.0));

        // Five seconds of suspension collapse to one 50 ms step.
        scheduler.tick(start + Duration::from_secs(5));
        let auto_speed = scheduler
            .column(scheduler.column_ids().next().unwrap())
            .unwrap()
            .auto_speed();
        let expected = auto_speed * MAX_FRAME_DELTA_MS;
        assert!((surface.written_offset().unwrap() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_advance_reports_activity() {
        let live = TestSurface::new(300.0, 900.0);
        let dead = TestSurface::new(300.0, 0.0);
        let mut scheduler = scheduler_with_columns(&[&live, &dead]);
        assert!(scheduler.advance(16.0));

        let mut empty = MarqueeScheduler::new(tuning());
        assert!(!empty.advance(16.0));
    }
}

//! Headless marquee demo: builds the item feed from a catalog, simulates a
//! two-column page, and drives the motion controller for a few seconds.
//!
//! Run with logging to watch metrics and impulses:
//!
//! ```sh
//! RUST_LOG=trace cargo run -p marquee_motion --example headless
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use marquee_core::{InputEvent, MarqueeHost, ScrollSurface};
use marquee_feed::{AssetLibrary, ColumnSeeds, ProjectCatalog};
use marquee_motion::MarqueeConfig;

const ITEM_EXTENT: f32 = 180.0;
const VIEWPORT_EXTENT: f32 = 640.0;

#[derive(Clone)]
struct SimSurface {
    state: Rc<RefCell<(f32, Option<f32>)>>,
}

impl SimSurface {
    fn new(item_count: usize) -> Self {
        let content = item_count as f32 * ITEM_EXTENT;
        Self {
            state: Rc::new(RefCell::new((content, None))),
        }
    }

    fn offset(&self) -> f32 {
        self.state.borrow().1.unwrap_or(0.0)
    }
}

impl ScrollSurface for SimSurface {
    fn viewport_extent(&self) -> f32 {
        VIEWPORT_EXTENT
    }

    fn content_extent(&self) -> f32 {
        self.state.borrow().0
    }

    fn duplicate_content(&mut self) {
        self.state.borrow_mut().0 *= 2.0;
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        self.state.borrow_mut().1 = Some(offset);
    }
}

struct SimHost {
    surfaces: HashMap<String, SimSurface>,
}

impl MarqueeHost for SimHost {
    fn resolve_surface(&mut self, selector: &str) -> Option<Box<dyn ScrollSurface>> {
        self.surfaces
            .get(selector)
            .map(|surface| Box::new(surface.clone()) as Box<dyn ScrollSurface>)
    }

    fn reference_extent(&self) -> f32 {
        900.0
    }

    fn set_drag_active(&mut self, active: bool) {
        println!("drag active: {active}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // The feed: a small catalog against a pretend bundler output.
    let catalog = ProjectCatalog::from_toml_str(
        r#"
        [[projects]]
        asset_group = "gh-62nd"
        label = "62nd Golden Horse Award Ceremony Website"

        [[projects]]
        asset_group = "reporter"
        label = "The Reporter"
        "#,
    )
    .expect("demo catalog is valid");

    let mut library = AssetLibrary::new();
    for group in ["gh-62nd", "reporter"] {
        for index in 1..=4 {
            let path = format!("{group}/img-{index}.webp");
            library.insert(path.clone(), format!("/assets/{path}"));
        }
    }

    let mut rng = rand::rng();
    let seeds = ColumnSeeds::from_catalog(&catalog, &library, &mut rng);
    println!(
        "feed: {} items -> left {}, right {}",
        seeds.full.len(),
        seeds.left.len(),
        seeds.right.len()
    );

    // The simulated page: each column renders its seed items.
    let left = SimSurface::new(seeds.left.len());
    let right = SimSurface::new(seeds.right.len());
    let config = MarqueeConfig {
        include_mobile: false,
        ..MarqueeConfig::default()
    };
    let mut host = SimHost {
        surfaces: HashMap::from([
            (config.selectors.left.clone(), left.clone()),
            (config.selectors.right.clone(), right.clone()),
        ]),
    };

    let Some(mut marquee) = marquee_motion::init(config, &mut host) else {
        println!("no columns resolved");
        return;
    };
    println!("marquee running with {} columns", marquee.column_count());

    // A wheel flick, then ~two seconds of frames.
    marquee.handle_event(InputEvent::Wheel { delta_y: 240.0 }, &mut host);
    for frame in 0..120 {
        marquee.tick(Instant::now());
        if frame % 30 == 0 {
            println!(
                "frame {frame:>3}: left {:7.1}  right {:7.1}",
                left.offset(),
                right.offset()
            );
        }
        std::thread::sleep(Duration::from_millis(16));
    }
}

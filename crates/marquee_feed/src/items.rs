//! Display items and column sequences
//!
//! Flattens the catalog into renderable items (one per discovered image,
//! project declaration order, per-image order preserved) and derives the
//! column seed sequences: left and right halves of a midpoint split, plus
//! the full sequence for the single mobile column.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::ProjectCatalog;
use crate::library::{AssetLibrary, ImageHandle};

/// Inclusive percentage range for item widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct WidthRange {
    pub min: u8,
    pub max: u8,
}

impl Default for WidthRange {
    fn default() -> Self {
        Self { min: 50, max: 100 }
    }
}

impl WidthRange {
    /// Sample a width uniformly from the range. A degenerate range
    /// collapses to `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        if self.min >= self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }
}

/// One renderable marquee item.
///
/// Width is purely visual variety; it has no effect on motion.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub image: ImageHandle,
    pub label: String,
    pub alt: String,
    /// Relative width in percent, sampled from the configured range.
    pub relative_width: u8,
    /// Index of the owning project in the catalog.
    pub project_index: usize,
    /// Index of the image within its project.
    pub image_index: usize,
}

/// Flatten the catalog into display items.
///
/// Emits one item per discovered image, keeping project declaration order
/// and per-image order, each with a freshly sampled relative width.
/// Projects whose asset group has no matching images contribute nothing.
pub fn flatten_catalog<R: Rng + ?Sized>(
    catalog: &ProjectCatalog,
    library: &AssetLibrary,
    rng: &mut R,
) -> Vec<DisplayItem> {
    let range = catalog.feed.width_range;
    let mut items = Vec::new();
    for (project_index, project) in catalog.projects.iter().enumerate() {
        let images = library.discover(&project.asset_group);
        if images.is_empty() {
            debug!(group = %project.asset_group, "no marquee images discovered; project skipped");
            continue;
        }
        for (image_index, image) in images.into_iter().enumerate() {
            items.push(DisplayItem {
                image: image.handle,
                label: project.label.clone(),
                alt: project.alt_text().to_string(),
                relative_width: range.sample(rng),
                project_index,
                image_index,
            });
        }
    }
    items
}

/// Fisher-Yates shuffle of an item sequence.
pub fn shuffle_items<R: Rng + ?Sized>(items: &mut [DisplayItem], rng: &mut R) {
    items.shuffle(rng);
}

/// The item sequence concatenated with itself.
///
/// For markup layers that pre-double the rendered list instead of relying
/// on the controller's runtime loop padding.
pub fn doubled(items: &[DisplayItem]) -> Vec<DisplayItem> {
    items.iter().chain(items.iter()).cloned().collect()
}

/// Column seed sequences derived from one flattened item list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSeeds {
    /// First `floor(N/2)` items.
    pub left: Vec<DisplayItem>,
    /// Remaining items.
    pub right: Vec<DisplayItem>,
    /// The untouched full sequence, for the single mobile column.
    pub full: Vec<DisplayItem>,
}

impl ColumnSeeds {
    /// Partition a flattened sequence at its midpoint.
    pub fn split(items: Vec<DisplayItem>) -> Self {
        let split_index = items.len() / 2;
        Self {
            left: items[..split_index].to_vec(),
            right: items[split_index..].to_vec(),
            full: items,
        }
    }

    /// Run the whole feed: flatten, optionally shuffle, split.
    pub fn from_catalog<R: Rng + ?Sized>(
        catalog: &ProjectCatalog,
        library: &AssetLibrary,
        rng: &mut R,
    ) -> Self {
        let mut items = flatten_catalog(catalog, library, rng);
        if catalog.feed.shuffle {
            shuffle_items(&mut items, rng);
        }
        Self::split(items)
    }
}

//! Marquee Item Feed
//!
//! Turns a portfolio description into the ordered item sequences the
//! marquee columns render:
//!
//! - **Catalog**: the declared project list (TOML-loadable)
//! - **Discovery**: `img-<N>.<ext>` lookup inside each project's asset group
//! - **Items**: flattening into [`DisplayItem`]s with randomized relative
//!   widths, optional shuffling, and the left/right/mobile column split
//!
//! The feed is a pure data transform: no markup, no clocks. Everything is
//! computed once at startup and immutable afterwards.

pub mod catalog;
pub mod items;
pub mod library;

pub use catalog::{CatalogError, FeedOptions, Project, ProjectCatalog};
pub use items::{doubled, flatten_catalog, shuffle_items, ColumnSeeds, DisplayItem, WidthRange};
pub use library::{AssetLibrary, DiscoveredImage, ImageHandle};

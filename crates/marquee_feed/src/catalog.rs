//! Project catalog (marquee content description)
//!
//! The catalog declares which projects appear in the marquee and where
//! their images live. It is usually loaded from a small TOML file kept next
//! to the page content:
//!
//! ```toml
//! [[projects]]
//! asset_group = "gh-62nd"
//! label = "62nd Golden Horse Award Ceremony Website"
//!
//! [[projects]]
//! asset_group = "reporter"
//! label = "The Reporter"
//! alt = "Screenshots of The Reporter's longform layouts"
//!
//! [feed]
//! shuffle = true
//! ```

use serde::{Deserialize, Serialize};

use crate::items::WidthRange;

/// One declared project: an asset group plus its display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Project {
    /// Asset group id; images are expected under `<asset_group>/img-<N>.<ext>`.
    pub asset_group: String,
    /// Display title attached to every item of this project.
    pub label: String,
    /// Optional alt text; falls back to the label when absent or empty.
    #[serde(default)]
    pub alt: Option<String>,
}

impl Project {
    /// Alt text for this project's images.
    pub fn alt_text(&self) -> &str {
        self.alt
            .as_deref()
            .filter(|alt| !alt.is_empty())
            .unwrap_or(&self.label)
    }
}

/// Feed construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeedOptions {
    /// Relative width sampling range for items, in percent.
    #[serde(default)]
    pub width_range: WidthRange,
    /// Shuffle the flattened sequence (Fisher-Yates) instead of keeping
    /// project declaration order.
    #[serde(default)]
    pub shuffle: bool,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            width_range: WidthRange::default(),
            shuffle: false,
        }
    }
}

/// The ordered project list plus feed options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProjectCatalog {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub feed: FeedOptions,
}

/// Catalog loading failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid project catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid width range: min {min} > max {max}")]
    InvalidWidthRange { min: u8, max: u8 },
}

impl ProjectCatalog {
    /// Parse a catalog from TOML and validate its options.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let catalog: ProjectCatalog = toml::from_str(content)?;
        let range = catalog.feed.width_range;
        if range.min > range.max {
            return Err(CatalogError::InvalidWidthRange {
                min: range.min,
                max: range.max,
            });
        }
        Ok(catalog)
    }
}

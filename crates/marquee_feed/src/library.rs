//! Resolved asset library and image discovery
//!
//! The static-site bundler resolves every eligible image to a loadable
//! handle at build time; the feed only sees the finished mapping from
//! asset-relative paths (`"gh-62nd/img-1.jpeg"`) to handles. Discovery
//! finds the images of one asset group by the `img-<N>.<ext>` naming
//! convention and orders them by `<N>`.

use std::sync::Arc;

use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Opaque handle to a loadable image (a URL on a web host).
///
/// Cheap to clone; the feed never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(Arc<str>);

impl ImageHandle {
    pub fn new(uri: impl Into<Arc<str>>) -> Self {
        Self(uri.into())
    }

    /// The resolved resource identifier.
    pub fn uri(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageHandle {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for ImageHandle {
    fn from(uri: String) -> Self {
        Self::new(uri)
    }
}

/// One image found by [`AssetLibrary::discover`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredImage {
    /// Asset-relative path the image was registered under.
    pub path: String,
    /// The `<N>` of `img-<N>`, used for ordering.
    pub index: u32,
    pub handle: ImageHandle,
}

/// The resolved `path -> handle` mapping for all eligible images.
#[derive(Debug, Clone, Default)]
pub struct AssetLibrary {
    images: FxHashMap<String, ImageHandle>,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one resolved image under its asset-relative path.
    pub fn insert(&mut self, path: impl Into<String>, handle: impl Into<ImageHandle>) {
        self.images.insert(path.into(), handle.into());
    }

    pub fn get(&self, path: &str) -> Option<&ImageHandle> {
        self.images.get(path)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Find all images of `group` matching `img-<N>.<jpg|jpeg|png|webp>`,
    /// ordered by ascending `<N>`.
    ///
    /// Non-matching entries (wrong prefix, wrong extension, non-numeric
    /// index) are excluded, not errors. The result is deterministic
    /// regardless of the map's enumeration order.
    pub fn discover(&self, group: &str) -> Vec<DiscoveredImage> {
        let pattern = format!(r"^{}/img-(\d+)\.(jpg|jpeg|png|webp)$", regex::escape(group));
        let Ok(regex) = Regex::new(&pattern) else {
            debug!(group, "unusable asset group id; discovery skipped");
            return Vec::new();
        };

        let mut matches: Vec<DiscoveredImage> = self
            .images
            .iter()
            .filter_map(|(path, handle)| {
                let captures = regex.captures(path)?;
                let index: u32 = captures[1].parse().ok()?;
                Some(DiscoveredImage {
                    path: path.clone(),
                    index,
                    handle: handle.clone(),
                })
            })
            .collect();

        // Path as tiebreak so duplicate indices across extensions stay stable.
        matches.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.path.cmp(&b.path)));
        matches
    }
}

impl FromIterator<(String, ImageHandle)> for AssetLibrary {
    fn from_iter<I: IntoIterator<Item = (String, ImageHandle)>>(iter: I) -> Self {
        Self {
            images: iter.into_iter().collect(),
        }
    }
}

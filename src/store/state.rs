//! Application state snapshots.

use std::collections::HashMap;

/// Marker trait for state slices.
///
/// Slices should be:
/// - Immutable (Clone to create new snapshots)
/// - Comparable (PartialEq for detecting changes)
/// - Defaultable (Default is the state before any action ran)
pub trait StateSlice: Clone + PartialEq + Default + 'static {}

/// A single photo from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Image URL; doubles as the unique identifier.
    pub image_url: String,
    pub author: String,
    pub favorited: bool,
}

impl Image {
    pub fn new(image_url: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            author: author.into(),
            favorited: false,
        }
    }
}

/// Images in arrival order plus a lookup by URL.
///
/// Every id in `image_list` has exactly one entry in `image_map`. Ids are
/// never removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageCollection {
    pub image_list: Vec<String>,
    pub image_map: HashMap<String, Image>,
}

impl StateSlice for ImageCollection {}

impl StateSlice for bool {}

impl ImageCollection {
    pub fn len(&self) -> usize {
        self.image_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_list.is_empty()
    }

    pub fn contains(&self, image_url: &str) -> bool {
        self.image_map.contains_key(image_url)
    }

    pub fn get(&self, image_url: &str) -> Option<&Image> {
        self.image_map.get(image_url)
    }

    /// Images in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Image> + '_ {
        self.image_list
            .iter()
            .filter_map(|url| self.image_map.get(url))
    }

    pub fn favorite_count(&self) -> usize {
        self.image_map.values().filter(|image| image.favorited).count()
    }
}

/// Aggregate state tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub images: ImageCollection,
    pub only_favorites: bool,
}

impl StateSlice for AppState {}

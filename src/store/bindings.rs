//! View bindings: state projections plus the actions each view dispatches.

use crate::store::action::{toggle_display_favorites, toggle_favorite_image};
use crate::store::container::Dispatch;
use crate::store::selectors::{show_only_favorites, visible_images};
use crate::store::state::{AppState, Image};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageListProps {
    pub images: Vec<Image>,
}

impl ImageListProps {
    pub fn position(&self, image_url: &str) -> Option<usize> {
        self.images.iter().position(|image| image.image_url == image_url)
    }
}

/// Binding for the image grid.
pub struct VisibleImageList;

impl VisibleImageList {
    pub fn map_state(state: &AppState) -> ImageListProps {
        ImageListProps {
            images: visible_images(state).into_iter().cloned().collect(),
        }
    }

    pub fn on_image_click<D: Dispatch + ?Sized>(dispatch: &mut D, image_url: &str) {
        dispatch.dispatch(toggle_favorite_image(image_url));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FavoritesToggleProps {
    pub show_only_favorites: bool,
}

/// Binding for the favorites filter button.
pub struct FavoritesToggle;

impl FavoritesToggle {
    pub fn map_state(state: &AppState) -> FavoritesToggleProps {
        FavoritesToggleProps {
            show_only_favorites: show_only_favorites(state),
        }
    }

    pub fn on_click<D: Dispatch + ?Sized>(dispatch: &mut D) {
        dispatch.dispatch(toggle_display_favorites());
    }
}

/// Everything the views render, recomputed after each dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewProps {
    pub image_list: ImageListProps,
    pub favorites_toggle: FavoritesToggleProps,
    pub total_images: usize,
    pub total_favorites: usize,
}

impl ViewProps {
    pub fn project(state: &AppState) -> Self {
        Self {
            image_list: VisibleImageList::map_state(state),
            favorites_toggle: FavoritesToggle::map_state(state),
            total_images: state.images.len(),
            total_favorites: state.images.favorite_count(),
        }
    }
}

//! Pure projections from [`AppState`].

use crate::store::state::{AppState, Image};

/// Images to show, in arrival order, honoring the favorites filter.
pub fn visible_images(state: &AppState) -> Vec<&Image> {
    state
        .images
        .iter()
        .filter(|image| !state.only_favorites || image.favorited)
        .collect()
}

pub fn show_only_favorites(state: &AppState) -> bool {
    state.only_favorites
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::state::ImageCollection;

    fn state_with(favorites: &[(&str, bool)], only_favorites: bool) -> AppState {
        let mut images = ImageCollection::default();
        for (url, favorited) in favorites {
            images.image_list.push(url.to_string());
            let mut image = Image::new(*url, "someone");
            image.favorited = *favorited;
            images.image_map.insert(url.to_string(), image);
        }
        AppState {
            images,
            only_favorites,
        }
    }

    fn urls(images: Vec<&Image>) -> Vec<&str> {
        images.into_iter().map(|i| i.image_url.as_str()).collect()
    }

    #[test]
    fn filter_on_keeps_favorites_in_order() {
        let state = state_with(&[("a", true), ("b", false), ("c", true)], true);
        assert_eq!(urls(visible_images(&state)), vec!["a", "c"]);
    }

    #[test]
    fn filter_off_keeps_everything() {
        let state = state_with(&[("a", true), ("b", false), ("c", true)], false);
        assert_eq!(urls(visible_images(&state)), vec!["a", "b", "c"]);
        assert!(!show_only_favorites(&state));
    }
}

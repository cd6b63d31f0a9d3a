//! Actions describing intended state changes.

/// Every state change goes through one of these.
///
/// Actions represent:
/// - Feed arrivals (a new image from the poller)
/// - User interactions (favorite toggle, filter toggle)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddImage { image_url: String, author: String },
    ToggleFavoriteImage { image_url: String },
    ToggleDisplayFavorites,
}

impl Action {
    /// Stable tag used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddImage { .. } => "ADD_IMAGE",
            Action::ToggleFavoriteImage { .. } => "TOGGLE_FAVORITE_IMAGE",
            Action::ToggleDisplayFavorites => "TOGGLE_DISPLAY_FAVORITES",
        }
    }
}

pub fn add_image(image_url: impl Into<String>, author: impl Into<String>) -> Action {
    Action::AddImage {
        image_url: image_url.into(),
        author: author.into(),
    }
}

pub fn toggle_favorite_image(image_url: impl Into<String>) -> Action {
    Action::ToggleFavoriteImage {
        image_url: image_url.into(),
    }
}

pub fn toggle_display_favorites() -> Action {
    Action::ToggleDisplayFavorites
}

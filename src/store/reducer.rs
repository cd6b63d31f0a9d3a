//! Pure state transitions.

use crate::store::action::Action;
use crate::store::state::{AppState, Image, ImageCollection, StateSlice};

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, &Action) -> State
pub trait Reducer {
    /// The state slice this reducer operates on.
    type State: StateSlice;

    /// Process an action and return the new state.
    fn reduce(state: Self::State, action: &Action) -> Self::State;

    /// Same as [`Reducer::reduce`], starting from the initial state when
    /// there is none yet.
    fn reduce_or_init(state: Option<Self::State>, action: &Action) -> Self::State {
        Self::reduce(state.unwrap_or_default(), action)
    }
}

pub struct ImagesReducer;

impl Reducer for ImagesReducer {
    type State = ImageCollection;

    fn reduce(mut state: Self::State, action: &Action) -> Self::State {
        match action {
            Action::AddImage { image_url, author } => {
                if state.contains(image_url) {
                    return state;
                }
                state.image_list.push(image_url.clone());
                state
                    .image_map
                    .insert(image_url.clone(), Image::new(image_url.as_str(), author.as_str()));
                state
            }
            Action::ToggleFavoriteImage { image_url } => {
                // Unknown ids fall through unchanged; the store reports them.
                if let Some(image) = state.image_map.get_mut(image_url) {
                    image.favorited = !image.favorited;
                }
                state
            }
            Action::ToggleDisplayFavorites => state,
        }
    }
}

pub struct FilterReducer;

impl Reducer for FilterReducer {
    type State = bool;

    fn reduce(state: Self::State, action: &Action) -> Self::State {
        match action {
            Action::ToggleDisplayFavorites => !state,
            Action::AddImage { .. } | Action::ToggleFavoriteImage { .. } => state,
        }
    }
}

/// Runs every slice reducer against the same action.
pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;

    fn reduce(state: Self::State, action: &Action) -> Self::State {
        let AppState {
            images,
            only_favorites,
        } = state;
        AppState {
            images: ImagesReducer::reduce(images, action),
            only_favorites: FilterReducer::reduce(only_favorites, action),
        }
    }
}

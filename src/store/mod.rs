//! Unidirectional state flow for the photo grid.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ AppState ──→ Selectors ──→ View
//!    ↑                                               │
//!    └───────────────────────────────────────────────┘
//! ```
//!
//! - **Action**: feed arrivals or user interactions
//! - **Reducer**: pure function producing the next snapshot
//! - **Store**: holds the snapshot, dispatches, notifies observers
//! - **Bindings**: map state to view props and clicks to actions

pub mod action;
pub mod bindings;
mod container;
pub mod reducer;
pub mod selectors;
pub mod state;

pub use action::{add_image, toggle_display_favorites, toggle_favorite_image, Action};
pub use bindings::{
    FavoritesToggle, FavoritesToggleProps, ImageListProps, ViewProps, VisibleImageList,
};
pub use container::{Dispatch, Store, SubscriptionId};
pub use reducer::{AppReducer, FilterReducer, ImagesReducer, Reducer};
pub use state::{AppState, Image, ImageCollection, StateSlice};

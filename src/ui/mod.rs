//! Terminal front end: a header with the favorites filter button and feed
//! status, a grid of photo tiles, and a footer with key hints.

pub mod app;
pub mod events;
pub mod favorites_button;
pub mod footer;
pub mod grid;
pub mod header;
pub mod input;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
pub mod tile;

pub use runtime::run;

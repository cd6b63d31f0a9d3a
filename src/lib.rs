pub mod cli;
pub mod clipboard;
pub mod config;
pub mod feed;
pub mod logging;
pub mod shutdown;
pub mod store;
pub mod ui;

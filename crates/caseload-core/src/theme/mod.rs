//! Theme domain module.
//!
//! Themes are the weekly or monthly topics ("Ocean Animals", "Winter") that
//! game content is grouped under.

mod model;
pub mod client;

pub use client::ThemeClient;
pub use model::{NewTheme, Theme, ThemeUpdate};

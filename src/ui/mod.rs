//! Interactive terminal reader.
//!
//! [`ReaderUi`] wires a [`ContentSource`](crate::api::ContentSource), a
//! [`Session`](crate::session::Session) and the refresh timer into an
//! [`App`]. The remaining submodules implement the event loop, key handling,
//! rendering and the widgets they draw.

mod actions;
mod builder;
mod components;
mod config;
pub mod input;
mod overlay;
mod render;
mod runtime;
mod state;
pub mod theme;

pub use builder::ReaderUi;
pub use config::UiConfig;
pub use state::App;
pub use theme::Theme;

//! Core crate exports for the `frontpage` Hacker News reader.
//!
//! The building blocks are usable without the terminal UI: [`api`] talks to
//! the content service, [`feed`] keeps the paged and filtered story list,
//! [`scheduler`] drives periodic refreshes and [`session`] holds the
//! simulated account. [`ui`] puts them together behind [`ReaderUi`].

pub mod api;
pub mod app_dirs;
pub mod feed;
pub mod format;
pub mod logging;
pub mod scheduler;
pub mod session;
pub mod ui;

pub use api::{ContentSource, HnClient, Item, Section};
pub use feed::{Feed, FeedError, FeedUpdate, filter};
pub use scheduler::{RefreshSlot, RefreshStatus, Scheduler};
pub use session::{Session, SessionError, UserRecord};
pub use ui::{ReaderUi, Theme, UiConfig};

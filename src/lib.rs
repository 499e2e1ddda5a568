//! `vitrine` is the core of a widget showcase.
//!
//! It holds everything the showcase needs that is not tied to a particular
//! front end: the item model, the sectioned list protocol and its reuse pool,
//! a virtualizing recycler frame, tweens, the view factory registry, layout
//! resources, and process-wide platform settings.

pub mod animation;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod recycler;
pub mod registry;
pub mod settings;

pub use config::Config;
pub use error::Error;

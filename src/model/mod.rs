//! Structs describing the items shown by the showcase.

pub mod pokemon;
pub mod roster;

pub use pokemon::Pokemon;
pub use roster::Roster;

//! The showcase UI.
//!
//! The screen holds a stack of [`Activity`]s, of which only the top one is
//! drawn and receives input. The first activity is a tab frame with one tab
//! per showcase screen; picking a Pokemon from the recycling list pushes a
//! page for it on top.
//!
//! Every activity is a tree of components inflated from a layout document.
//! Each node in the tree is either:
//! - A leaf widget, such as a label, a slider or a cell.
//! - A box that stacks its children vertically or horizontally.
//! - A screen that wraps an inflated tree of its own and reacts to what its
//!   widgets report.
//!
//! Exactly one leaf has focus at a time. Keys only travel down the focused
//! path; what widgets report travels back up, stamped with their ids, for the
//! owning screen to react to. Rendering is done recursively every frame.
//!
//! [`Activity`]: activity::Activity

pub mod activity;
pub mod component;
pub mod inflate;
pub mod resources;
pub mod tab;
pub mod util;
pub mod view;
pub mod views;
pub mod widgets;

//! Composite views, built out of components and layout documents.

pub mod captioned_image;
pub mod pokemon;
pub mod transform_box;

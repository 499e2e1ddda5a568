//! Errors produced while loading resources and building views.

use std::io;

/// A `vitrine` error.
///
/// Everything here is an initialization failure; contract violations such as
/// out-of-range list indices panic instead.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
  #[error(transparent)]
  Io(#[from] io::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),

  #[error("no layout resource named `{0}`")]
  UnknownLayout(String),

  #[error("no view registered under `{0}`")]
  UnknownView(String),

  #[error("a view is already registered under `{0}`")]
  DuplicateView(String),

  #[error("layout `{layout}` has no view with id `{id}`")]
  MissingView { layout: String, id: String },
}

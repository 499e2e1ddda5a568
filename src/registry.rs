//! Named view constructors.

use std::collections::BTreeMap;
use std::fmt;

use crate::Error;

/// Maps view type names, as they appear in layout documents, to zero-argument
/// constructors.
pub struct ViewRegistry<V> {
  factories: BTreeMap<String, fn() -> V>,
}

impl<V> Default for ViewRegistry<V> {
  fn default() -> Self {
    Self {
      factories: BTreeMap::new(),
    }
  }
}

impl<V> fmt::Debug for ViewRegistry<V> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_set().entries(self.factories.keys()).finish()
  }
}

impl<V> ViewRegistry<V> {
  /// Creates an empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `factory` under `name`.
  ///
  /// Each name can only be registered once.
  pub fn register(
    &mut self,
    name: impl Into<String>,
    factory: fn() -> V,
  ) -> Result<(), Error> {
    let name = name.into();
    if self.factories.contains_key(&name) {
      return Err(Error::DuplicateView(name));
    }
    log::debug!("registered view {}", name);
    self.factories.insert(name, factory);
    Ok(())
  }

  /// Returns whether `name` has been registered.
  pub fn contains(&self, name: &str) -> bool {
    self.factories.contains_key(name)
  }

  /// Constructs a fresh view of type `name`.
  pub fn create(&self, name: &str) -> Result<V, Error> {
    match self.factories.get(name) {
      Some(factory) => Ok(factory()),
      None => Err(Error::UnknownView(name.to_string())),
    }
  }

  /// Returns every registered name, in sorted order.
  pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
    self.factories.keys().map(String::as_str)
  }
}

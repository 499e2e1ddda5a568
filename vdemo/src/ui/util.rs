//! Miscellaneous utility data structures.

use std::iter::FromIterator;
use std::ops::Deref;
use std::ops::DerefMut;

/// A vector with a specifically selected element.
///
/// This type backs the tab bar and dropdowns, which both scroll a selection
/// through a list of options.
#[derive(Clone, Debug)]
pub struct SelectedVec<T> {
  vec: Vec<T>,

  // NOTE: Always in range when vec is non-empty.
  selection: usize,
}

impl<T> SelectedVec<T> {
  /// Returns the currently selected index in `self`.
  pub fn selection(&self) -> usize {
    self.selection
  }

  /// Returns the currently selected index in `self`, shifted by `delta` such
  /// that it is still a valid selection.
  pub fn shifted_selection(&self, delta: isize) -> usize {
    (self.selection as isize)
      .saturating_add(delta)
      .clamp(0, self.vec.len().saturating_sub(1) as isize) as usize
  }

  /// Returns a reference to the selected element if `self` is nonempty.
  #[cfg(test)]
  pub fn selected(&self) -> Option<&T> {
    self.vec.get(self.selection)
  }

  /// Returns a mutable reference to the selected element if `self` is nonempty.
  pub fn selected_mut(&mut self) -> Option<&mut T> {
    self.vec.get_mut(self.selection)
  }

  /// Changes the selection index.
  ///
  /// Returns true when the selection was changed; that is, if the new index
  /// was valid and different from the current one.
  pub fn select(&mut self, selection: usize) -> bool {
    if self.selection == selection || selection >= self.vec.len() {
      return false;
    }

    self.selection = selection;
    true
  }

  /// Shifts the selected index by `delta`, clamping to the index bounds of
  /// the internal vector.
  ///
  /// Returns true when the new, clamped index differs from the current one.
  pub fn shift(&mut self, delta: isize) -> bool {
    let new_index = self.shifted_selection(delta);
    if new_index == self.selection {
      return false;
    }

    self.selection = new_index;
    true
  }

  /// Appends an element, keeping the selection where it is.
  pub fn push(&mut self, value: T) {
    self.vec.push(value)
  }
}

impl<T> Default for SelectedVec<T> {
  fn default() -> Self {
    Self {
      vec: Vec::new(),
      selection: 0,
    }
  }
}

impl<T, V: Into<Vec<T>>> From<V> for SelectedVec<T> {
  fn from(v: V) -> Self {
    Self {
      vec: v.into(),
      selection: 0,
    }
  }
}

impl<T> Deref for SelectedVec<T> {
  type Target = [T];
  fn deref(&self) -> &[T] {
    &self.vec
  }
}

impl<T> DerefMut for SelectedVec<T> {
  fn deref_mut(&mut self) -> &mut [T] {
    &mut self.vec
  }
}

impl<A> FromIterator<A> for SelectedVec<A> {
  fn from_iter<T>(iter: T) -> Self
  where
    T: IntoIterator<Item = A>,
  {
    Vec::<A>::from_iter(iter).into()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn shifting_clamps() {
    let mut v = (0..3).collect::<SelectedVec<_>>();
    assert!(!v.shift(-1));
    assert!(v.shift(5));
    assert_eq!(v.selection(), 2);
    assert_eq!(v.selected(), Some(&2));
    assert!(!v.select(3));
    assert!(v.select(0));
  }

  #[test]
  fn empty_vectors_select_nothing() {
    let mut v = SelectedVec::<u8>::default();
    assert_eq!(v.selected(), None);
    assert!(!v.shift(1));
    v.push(7);
    assert_eq!(v.selected_mut(), Some(&mut 7));
  }
}

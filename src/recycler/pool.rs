//! Per-identifier pools of reusable cells.

use std::collections::HashMap;
use std::fmt;

use crate::recycler::RecyclerCell;

/// A handle to a cell owned by a [`ReusePool`].
///
/// Handles are only meaningful for the pool that issued them, and only until
/// the cell is enqueued again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(usize);

impl CellId {
  /// Returns the raw slot index of this handle.
  pub fn index(self) -> usize {
    self.0
  }
}

struct Slot<C> {
  identifier: String,
  cell: C,
  in_use: bool,
}

struct Kind<C> {
  factory: Box<dyn FnMut() -> C>,
  free: Vec<CellId>,
  created: usize,
}

/// Owns every cell a list has ever created, grouped by reuse identifier.
///
/// Cells are created lazily through the factory registered for their
/// identifier and are never destroyed until the pool itself is dropped.
pub struct ReusePool<C> {
  slots: Vec<Slot<C>>,
  kinds: HashMap<String, Kind<C>>,
}

impl<C> Default for ReusePool<C> {
  fn default() -> Self {
    Self {
      slots: Vec::new(),
      kinds: HashMap::new(),
    }
  }
}

impl<C> fmt::Debug for ReusePool<C> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("ReusePool")
      .field("live", &self.live_count())
      .field("in_use", &self.in_use_count())
      .field("kinds", &self.kinds.keys().collect::<Vec<_>>())
      .finish()
  }
}

impl<C: RecyclerCell> ReusePool<C> {
  /// Creates an empty pool.
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `factory` as the way to create cells for `identifier`.
  ///
  /// Registering the same identifier twice replaces the factory; cells that
  /// were already created stay in the pool.
  pub fn register_cell(
    &mut self,
    identifier: impl Into<String>,
    factory: impl FnMut() -> C + 'static,
  ) {
    let identifier = identifier.into();
    if let Some(kind) = self.kinds.get_mut(&identifier) {
      log::warn!("replacing cell factory for {:?}", identifier);
      kind.factory = Box::new(factory);
      return;
    }

    self.kinds.insert(
      identifier,
      Kind {
        factory: Box::new(factory),
        free: Vec::new(),
        created: 0,
      },
    );
  }

  /// Returns whether a factory is registered for `identifier`.
  pub fn is_registered(&self, identifier: &str) -> bool {
    self.kinds.contains_key(identifier)
  }

  /// Hands out a cell for `identifier`, reusing a free one if there is one.
  ///
  /// # Panics
  ///
  /// Panics if no factory was registered for `identifier`.
  pub fn dequeue_reusable_cell(&mut self, identifier: &str) -> CellId {
    let kind = match self.kinds.get_mut(identifier) {
      Some(kind) => kind,
      None => panic!("no cell registered for identifier {:?}", identifier),
    };

    if let Some(id) = kind.free.pop() {
      self.slots[id.0].in_use = true;
      return id;
    }

    let cell = (kind.factory)();
    kind.created += 1;
    let id = CellId(self.slots.len());
    log::debug!("created {:?} cell #{}", identifier, kind.created);
    self.slots.push(Slot {
      identifier: identifier.to_string(),
      cell,
      in_use: true,
    });
    id
  }

  /// Gives a cell back to the pool so it can be handed out again.
  ///
  /// Enqueuing a cell that is already free does nothing.
  pub fn enqueue(&mut self, id: CellId) {
    let slot = &mut self.slots[id.0];
    if !slot.in_use {
      return;
    }
    slot.in_use = false;
    slot.cell.prepare_for_reuse();
    if let Some(kind) = self.kinds.get_mut(&slot.identifier) {
      kind.free.push(id);
    }
  }

  /// Returns every handed-out cell to the pool.
  pub fn recycle_all(&mut self) {
    for i in 0..self.slots.len() {
      self.enqueue(CellId(i));
    }
  }
}

impl<C> ReusePool<C> {
  /// Returns the cell behind `id`.
  pub fn cell(&self, id: CellId) -> &C {
    &self.slots[id.0].cell
  }

  /// Returns the cell behind `id` mutably.
  pub fn cell_mut(&mut self, id: CellId) -> &mut C {
    &mut self.slots[id.0].cell
  }

  /// Returns the reuse identifier `id` was created for.
  pub fn identifier(&self, id: CellId) -> &str {
    &self.slots[id.0].identifier
  }

  /// Returns the number of cells this pool owns, free or not.
  pub fn live_count(&self) -> usize {
    self.slots.len()
  }

  /// Returns the number of cells currently handed out.
  pub fn in_use_count(&self) -> usize {
    self.slots.iter().filter(|s| s.in_use).count()
  }

  /// Returns how many cells the factory for `identifier` has created.
  pub fn created_count(&self, identifier: &str) -> usize {
    self.kinds.get(identifier).map(|k| k.created).unwrap_or(0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Default)]
  struct Cell {
    text: String,
    reused: usize,
  }

  impl RecyclerCell for Cell {
    fn prepare_for_reuse(&mut self) {
      self.reused += 1;
    }
  }

  #[test]
  fn dequeue_reuses_free_cells() {
    let mut pool = ReusePool::<Cell>::new();
    pool.register_cell("Cell", Cell::default);

    let a = pool.dequeue_reusable_cell("Cell");
    pool.cell_mut(a).text = "a".into();
    pool.enqueue(a);
    let b = pool.dequeue_reusable_cell("Cell");

    assert_eq!(a, b);
    assert_eq!(pool.cell(b).reused, 1);
    assert_eq!(pool.created_count("Cell"), 1);
    assert_eq!(pool.live_count(), 1);
  }

  #[test]
  fn double_enqueue_is_ignored() {
    let mut pool = ReusePool::<Cell>::new();
    pool.register_cell("Cell", Cell::default);
    let a = pool.dequeue_reusable_cell("Cell");
    pool.enqueue(a);
    pool.enqueue(a);

    let b = pool.dequeue_reusable_cell("Cell");
    let c = pool.dequeue_reusable_cell("Cell");
    assert_ne!(b, c);
    assert_eq!(pool.cell(a).reused, 1);
  }

  #[test]
  fn identifiers_have_separate_free_lists() {
    let mut pool = ReusePool::<Cell>::new();
    pool.register_cell("Cell", Cell::default);
    pool.register_cell("Header", Cell::default);

    let cell = pool.dequeue_reusable_cell("Cell");
    pool.enqueue(cell);
    let header = pool.dequeue_reusable_cell("Header");

    assert_ne!(cell, header);
    assert_eq!(pool.identifier(header), "Header");
    assert_eq!(pool.in_use_count(), 1);
  }

  #[test]
  fn reregistering_replaces_the_factory() {
    let mut pool = ReusePool::<Cell>::new();
    pool.register_cell("Cell", Cell::default);
    pool.register_cell("Cell", || Cell {
      text: "fresh".into(),
      reused: 0,
    });

    let id = pool.dequeue_reusable_cell("Cell");
    assert_eq!(pool.cell(id).text, "fresh");
  }

  #[test]
  #[should_panic(expected = "no cell registered")]
  fn unregistered_identifier_panics() {
    let mut pool = ReusePool::<Cell>::new();
    pool.dequeue_reusable_cell("Cell");
  }
}

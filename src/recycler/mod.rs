//! Virtualized lists built out of reusable cells.
//!
//! A list is described by a [`DataSource`]: how many sections there are, how
//! many rows each section has, what each section's header says, and how to
//! fill a cell for a given [`IndexPath`].
//!
//! A [`RecyclerFrame`] hosts a data source. It lays the sections out as a flat
//! run of entries, works out which entries intersect the viewport, and asks
//! the data source for cells for exactly those entries (plus a small prefetch
//! margin). Cells come out of a [`ReusePool`]; when an entry scrolls out of
//! view its cell goes back to the pool and is handed out again for whichever
//! entry scrolls in next. The number of live cells therefore depends on the
//! size of the viewport, never on the number of items.

use std::fmt;

mod frame;
mod pool;

pub use frame::Entry;
pub use frame::RecyclerFrame;
pub use frame::VisibleCell;
pub use pool::CellId;
pub use pool::ReusePool;

/// The identifier that header cells are registered under.
pub const HEADER: &str = "Header";

/// The conventional identifier for ordinary row cells.
pub const CELL: &str = "Cell";

/// A position in a sectioned list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
  /// The zero-based section index.
  pub section: usize,
  /// The zero-based row index within `section`.
  pub row: usize,
}

impl IndexPath {
  /// Creates a new [`IndexPath`].
  pub fn new(section: usize, row: usize) -> Self {
    Self { section, row }
  }
}

impl fmt::Display for IndexPath {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}:{}", self.section, self.row)
  }
}

/// A cell that can live in a [`ReusePool`].
pub trait RecyclerCell {
  /// Called when the cell leaves the visible window and goes back into the
  /// pool. Content is overwritten on the next dequeue anyway.
  fn prepare_for_reuse(&mut self) {}

  /// Fills in a header cell. Only called on cells registered under
  /// [`HEADER`].
  fn set_header_title(&mut self, title: &str) {
    let _ = title;
  }
}

/// The contract between a list and whatever knows about its contents.
///
/// `Ctx` is whatever context a selection needs to act on; the host passes it
/// explicitly to [`DataSource::did_select_row_at()`].
///
/// Section and row queries must be pure between explicit mutations of the
/// backing collection, and must be answerable in any order. Out-of-range
/// sections or rows are contract violations; implementations are expected to
/// panic on them rather than return garbage.
pub trait DataSource<C, Ctx = ()> {
  /// Returns the number of sections in the list.
  fn number_of_sections(&self) -> usize;

  /// Returns the number of rows in `section`.
  fn number_of_rows(&self, section: usize) -> usize;

  /// Returns the title for `section`'s header. An empty string means the
  /// section has no header at all.
  fn title_for_header(&self, section: usize) -> String {
    let _ = section;
    String::new()
  }

  /// Produces a cell showing the item at `index`.
  ///
  /// Implementations must obtain the cell from `pool` with
  /// [`ReusePool::dequeue_reusable_cell()`], overwrite its content, and return
  /// its handle. The returned handle may later be returned again for another
  /// index.
  fn cell_for_row(&mut self, pool: &mut ReusePool<C>, index: IndexPath)
    -> CellId;

  /// Called exactly once each time the user selects the row at `index`.
  fn did_select_row_at(&mut self, ctx: &mut Ctx, index: IndexPath) {
    let _ = (ctx, index);
  }
}

/// A policy for spreading a flat collection over sections.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SectionPolicy {
  /// Every one of `sections` sections shows the whole collection.
  Mirror { sections: usize },
  /// Consecutive runs of `size` items form a section each; the last section
  /// may be shorter.
  Chunks { size: usize },
}

impl SectionPolicy {
  /// Returns the number of sections for a collection of `len` items.
  pub fn sections(self, len: usize) -> usize {
    match self {
      SectionPolicy::Mirror { sections } => sections,
      SectionPolicy::Chunks { size } => {
        let size = size.max(1);
        (len + size - 1) / size
      }
    }
  }

  /// Returns the number of rows in `section` for a collection of `len` items.
  ///
  /// # Panics
  ///
  /// Panics if `section` is out of range.
  pub fn rows(self, len: usize, section: usize) -> usize {
    let sections = self.sections(len);
    assert!(
      section < sections,
      "section {} out of range ({} sections)",
      section,
      sections
    );

    match self {
      SectionPolicy::Mirror { .. } => len,
      SectionPolicy::Chunks { size } => {
        let size = size.max(1);
        (len - section * size).min(size)
      }
    }
  }

  /// Maps `index` to an index into the flat collection.
  ///
  /// # Panics
  ///
  /// Panics if `index` is out of range.
  pub fn item_index(self, len: usize, index: IndexPath) -> usize {
    let rows = self.rows(len, index.section);
    assert!(
      index.row < rows,
      "row {} out of range ({} rows in section {})",
      index.row,
      rows,
      index.section
    );

    match self {
      SectionPolicy::Mirror { .. } => index.row,
      SectionPolicy::Chunks { size } => index.section * size.max(1) + index.row,
    }
  }
}

//! The virtualizing host of a [`DataSource`].

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use crate::recycler::CellId;
use crate::recycler::DataSource;
use crate::recycler::IndexPath;
use crate::recycler::RecyclerCell;
use crate::recycler::ReusePool;
use crate::recycler::HEADER;

/// One slot in the flattened list: a section header or a row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Entry {
  /// The header of `section`; only present for sections with a title.
  Header { section: usize },
  /// An ordinary row.
  Row(IndexPath),
}

impl Entry {
  /// Returns the index path, if this is a row.
  pub fn index_path(self) -> Option<IndexPath> {
    match self {
      Entry::Row(index) => Some(index),
      Entry::Header { .. } => None,
    }
  }
}

#[derive(Copy, Clone, Debug)]
struct Placed {
  entry: Entry,
  y: u32,
  height: u32,
}

/// A cell that is at least partially inside the viewport.
#[derive(Debug)]
pub struct VisibleCell<'a, C> {
  /// What the cell is showing.
  pub entry: Entry,
  /// The handle of the cell; only valid until the next layout pass.
  pub id: CellId,
  /// The cell itself.
  pub cell: &'a C,
  /// Offset of the cell's top edge from the viewport's top edge. Negative
  /// when the cell is cut off at the top.
  pub y: i64,
  /// The cell's height.
  pub height: u32,
  /// Whether this is the focused row.
  pub focused: bool,
}

/// A scrolling, virtualizing list.
///
/// Heights are in abstract layout units; the host decides what a unit is.
/// Only entries intersecting the viewport, plus `prefetch` entries past its
/// bottom edge, are bound to cells at any time.
pub struct RecyclerFrame<C, Ctx = ()> {
  pool: ReusePool<C>,
  data_source: Option<Box<dyn DataSource<C, Ctx>>>,

  row_height: u32,
  header_height: u32,
  prefetch: usize,

  entries: Vec<Placed>,
  rows: Vec<usize>,
  content_height: u32,

  offset: u32,
  viewport: u32,
  bound: BTreeMap<usize, CellId>,
  focus: Option<usize>,
}

impl<C, Ctx> fmt::Debug for RecyclerFrame<C, Ctx> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("RecyclerFrame")
      .field("entries", &self.entries.len())
      .field("offset", &self.offset)
      .field("viewport", &self.viewport)
      .field("bound", &self.bound.len())
      .field("focus", &self.focus)
      .field("pool", &self.pool)
      .finish()
  }
}

impl<C: RecyclerCell, Ctx> Default for RecyclerFrame<C, Ctx> {
  fn default() -> Self {
    Self::new()
  }
}

impl<C: RecyclerCell, Ctx> RecyclerFrame<C, Ctx> {
  /// Creates an empty frame with no data source.
  pub fn new() -> Self {
    Self {
      pool: ReusePool::new(),
      data_source: None,
      row_height: 1,
      header_height: 1,
      prefetch: 1,
      entries: Vec::new(),
      rows: Vec::new(),
      content_height: 0,
      offset: 0,
      viewport: 0,
      bound: BTreeMap::new(),
      focus: None,
    }
  }

  /// Returns the height every row is laid out with.
  pub fn estimated_row_height(&self) -> u32 {
    self.row_height
  }

  /// Sets the height every row is laid out with, and reloads.
  pub fn set_estimated_row_height(&mut self, height: u32) {
    self.row_height = height.max(1);
    self.reload_data();
  }

  /// Returns the height of section headers.
  pub fn header_height(&self) -> u32 {
    self.header_height
  }

  /// Sets the height of section headers, and reloads.
  pub fn set_header_height(&mut self, height: u32) {
    self.header_height = height.max(1);
    self.reload_data();
  }

  /// Returns how many entries past the bottom of the viewport stay bound.
  pub fn prefetch(&self) -> usize {
    self.prefetch
  }

  /// Sets how many entries past the bottom of the viewport stay bound.
  pub fn set_prefetch(&mut self, prefetch: usize) {
    self.prefetch = prefetch;
    self.relayout();
  }

  /// Registers a cell factory with this frame's pool.
  pub fn register_cell(
    &mut self,
    identifier: impl Into<String>,
    factory: impl FnMut() -> C + 'static,
  ) {
    self.pool.register_cell(identifier, factory);
  }

  /// Replaces the data source and reloads.
  pub fn set_data_source(&mut self, source: Box<dyn DataSource<C, Ctx>>) {
    self.data_source = Some(source);
    self.offset = 0;
    self.focus = None;
    self.reload_data();
  }

  /// Returns the current data source.
  pub fn data_source(&self) -> Option<&dyn DataSource<C, Ctx>> {
    self.data_source.as_deref()
  }

  /// Returns the current data source mutably. Call [`Self::reload_data()`]
  /// after changing what it reports.
  pub fn data_source_mut(
    &mut self,
  ) -> Option<&mut (dyn DataSource<C, Ctx> + 'static)> {
    self.data_source.as_deref_mut()
  }

  /// Re-queries the data source for the shape of the list and rebinds every
  /// visible entry.
  pub fn reload_data(&mut self) {
    let ids = std::mem::take(&mut self.bound);
    for id in ids.values() {
      self.pool.enqueue(*id);
    }
    self.entries.clear();
    self.rows.clear();

    let mut y = 0;
    if let Some(source) = &self.data_source {
      for section in 0..source.number_of_sections() {
        if !source.title_for_header(section).is_empty() {
          self.entries.push(Placed {
            entry: Entry::Header { section },
            y,
            height: self.header_height,
          });
          y += self.header_height;
        }

        for row in 0..source.number_of_rows(section) {
          self.rows.push(self.entries.len());
          self.entries.push(Placed {
            entry: Entry::Row(IndexPath::new(section, row)),
            y,
            height: self.row_height,
          });
          y += self.row_height;
        }
      }
    }
    self.content_height = y;
    log::debug!(
      "reloaded list: {} entries, {} rows, height {}",
      self.entries.len(),
      self.rows.len(),
      y
    );

    self.focus = match self.focus {
      _ if self.rows.is_empty() => None,
      Some(f) => Some(f.min(self.rows.len() - 1)),
      None => None,
    };
    self.relayout();
  }

  /// Lays the list out for a viewport of the given height, binding cells to
  /// entries that came into view and recycling those of entries that left.
  pub fn layout(&mut self, viewport: u32) {
    self.viewport = viewport;
    self.relayout();
  }

  fn relayout(&mut self) {
    self.offset = self.offset.min(self.max_offset());
    let window = self.window();

    let stale = self
      .bound
      .keys()
      .copied()
      .filter(|i| !window.contains(i))
      .collect::<Vec<_>>();
    for i in stale {
      if let Some(id) = self.bound.remove(&i) {
        self.pool.enqueue(id);
      }
    }

    for i in window {
      if self.bound.contains_key(&i) {
        continue;
      }
      let id = match self.entries[i].entry {
        Entry::Header { section } => {
          let title = match &self.data_source {
            Some(source) => source.title_for_header(section),
            None => continue,
          };
          let id = self.pool.dequeue_reusable_cell(HEADER);
          self.pool.cell_mut(id).set_header_title(&title);
          id
        }
        Entry::Row(index) => match &mut self.data_source {
          Some(source) => source.cell_for_row(&mut self.pool, index),
          None => continue,
        },
      };
      self.bound.insert(i, id);
    }
  }

  fn visible_range(&self) -> Range<usize> {
    if self.viewport == 0 {
      return 0..0;
    }
    let top = self.offset;
    let bottom = self.offset + self.viewport;
    let first = self.entries.partition_point(|p| p.y + p.height <= top);
    let last = self.entries.partition_point(|p| p.y < bottom);
    first..last.max(first)
  }

  fn window(&self) -> Range<usize> {
    let visible = self.visible_range();
    if visible.start == visible.end {
      return visible;
    }
    let end = (visible.end + self.prefetch).min(self.entries.len());
    visible.start..end
  }

  fn max_offset(&self) -> u32 {
    self.content_height.saturating_sub(self.viewport)
  }

  /// Scrolls so that `offset` is at the top of the viewport.
  pub fn scroll_to(&mut self, offset: u32) {
    self.offset = offset;
    self.relayout();
  }

  /// Scrolls by `delta` units; negative values scroll up.
  pub fn scroll_by(&mut self, delta: i64) {
    let offset = (self.offset as i64 + delta).max(0);
    self.scroll_to(offset.min(u32::MAX as i64) as u32);
  }

  /// Jumps so that the row at `index` is at the top of the viewport.
  ///
  /// # Panics
  ///
  /// Panics if the list has no row at `index`.
  pub fn scroll_to_index(&mut self, index: IndexPath) {
    let entry = match self.entry_index(index) {
      Some(i) => i,
      None => panic!("no row at index path {}", index),
    };
    self.scroll_to(self.entries[entry].y);
  }

  fn entry_index(&self, index: IndexPath) -> Option<usize> {
    self
      .rows
      .iter()
      .copied()
      .find(|&i| self.entries[i].entry == Entry::Row(index))
  }

  /// Returns the focused row, if any.
  pub fn focused(&self) -> Option<IndexPath> {
    let entry = self.rows[self.focus?];
    self.entries[entry].entry.index_path()
  }

  /// Moves focus by `delta` rows, skipping headers, and scrolls to keep the
  /// focused row in view. Returns whether focus moved.
  ///
  /// Focus movement never selects anything.
  pub fn move_focus(&mut self, delta: isize) -> bool {
    if self.rows.is_empty() {
      return false;
    }

    let next = match self.focus {
      None => self.first_visible_row(),
      Some(f) => {
        let last = self.rows.len() as isize - 1;
        (f as isize + delta).max(0).min(last) as usize
      }
    };
    if self.focus == Some(next) {
      return false;
    }
    self.focus_row(next);
    true
  }

  /// Focuses the row at `index`, scrolling it into view. Returns `false` if
  /// the list has no such row.
  pub fn focus_index(&mut self, index: IndexPath) -> bool {
    let row = self
      .rows
      .iter()
      .position(|&i| self.entries[i].entry == Entry::Row(index));
    match row {
      Some(row) => {
        self.focus_row(row);
        true
      }
      None => false,
    }
  }

  /// Drops focus without scrolling.
  pub fn clear_focus(&mut self) {
    self.focus = None;
  }

  fn first_visible_row(&self) -> usize {
    let visible = self.visible_range();
    self
      .rows
      .iter()
      .position(|&i| i >= visible.start)
      .unwrap_or(0)
  }

  fn focus_row(&mut self, row: usize) {
    self.focus = Some(row);
    let entry = self.rows[row];
    let placed = self.entries[entry];

    // A section's first row pulls its header into view with it.
    let top = match entry.checked_sub(1).map(|i| self.entries[i].entry) {
      Some(Entry::Header { .. }) => self.entries[entry - 1].y,
      _ => placed.y,
    };
    if top < self.offset {
      self.offset = top;
    } else if placed.y + placed.height > self.offset + self.viewport {
      self.offset = (placed.y + placed.height).saturating_sub(self.viewport);
    }
    self.relayout();
  }

  /// Selects the focused row, telling the data source about it. Returns
  /// whether there was a row to select.
  pub fn select(&mut self, ctx: &mut Ctx) -> bool {
    let index = match self.focused() {
      Some(index) => index,
      None => return false,
    };
    match &mut self.data_source {
      Some(source) => {
        log::debug!("selected row {}", index);
        source.did_select_row_at(ctx, index);
        true
      }
      None => false,
    }
  }

  /// Focuses and selects the row under `y`, measured from the top of the
  /// viewport. Clicking a header selects nothing.
  pub fn select_at(&mut self, ctx: &mut Ctx, y: u32) -> bool {
    match self.entry_at_y(y) {
      Some(Entry::Row(index)) => {
        self.focus_index(index);
        self.select(ctx)
      }
      _ => false,
    }
  }

  /// Returns the entry under `y`, measured from the top of the viewport.
  pub fn entry_at_y(&self, y: u32) -> Option<Entry> {
    if y >= self.viewport {
      return None;
    }
    let y = self.offset + y;
    let i = self.entries.partition_point(|p| p.y + p.height <= y);
    self.entries.get(i).filter(|p| p.y <= y).map(|p| p.entry)
  }

  /// Returns the cells intersecting the viewport, top to bottom.
  pub fn visible(&self) -> impl Iterator<Item = VisibleCell<'_, C>> + '_ {
    let focused = self.focus.map(|f| self.rows[f]);
    self.visible_range().filter_map(move |i| {
      let id = *self.bound.get(&i)?;
      let placed = &self.entries[i];
      Some(VisibleCell {
        entry: placed.entry,
        id,
        cell: self.pool.cell(id),
        y: placed.y as i64 - self.offset as i64,
        height: placed.height,
        focused: focused == Some(i),
      })
    })
  }

  /// Returns the number of entries currently bound to cells.
  pub fn bound_count(&self) -> usize {
    self.bound.len()
  }

  /// Returns the total number of entries, headers included.
  pub fn entry_count(&self) -> usize {
    self.entries.len()
  }

  /// Returns the pool backing this frame.
  pub fn pool(&self) -> &ReusePool<C> {
    &self.pool
  }

  /// Returns the pool backing this frame mutably.
  pub fn pool_mut(&mut self) -> &mut ReusePool<C> {
    &mut self.pool
  }

  /// Returns the height of the whole list.
  pub fn content_height(&self) -> u32 {
    self.content_height
  }

  /// Returns the current scroll offset.
  pub fn offset(&self) -> u32 {
    self.offset
  }

  /// Returns the height of the viewport from the last layout pass.
  pub fn viewport(&self) -> u32 {
    self.viewport
  }
}

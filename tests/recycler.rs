//! Behavior of a recycler frame hosting a roster-backed data source.

use vitrine::model::Pokemon;
use vitrine::model::Roster;
use vitrine::recycler::CellId;
use vitrine::recycler::DataSource;
use vitrine::recycler::Entry;
use vitrine::recycler::IndexPath;
use vitrine::recycler::RecyclerCell;
use vitrine::recycler::RecyclerFrame;
use vitrine::recycler::ReusePool;
use vitrine::recycler::SectionPolicy;
use vitrine::recycler::CELL;
use vitrine::recycler::HEADER;

#[derive(Default, Debug)]
struct Cell {
  label: String,
  image: String,
}

impl RecyclerCell for Cell {
  fn prepare_for_reuse(&mut self) {
    self.label.clear();
    self.image.clear();
  }

  fn set_header_title(&mut self, title: &str) {
    self.label = title.to_string();
  }
}

struct RosterSource {
  roster: Roster,
  policy: SectionPolicy,
}

impl RosterSource {
  fn new(roster: Roster, policy: SectionPolicy) -> Self {
    Self { roster, policy }
  }

  fn pokemon(&self, index: IndexPath) -> &Pokemon {
    &self.roster[self.policy.item_index(self.roster.len(), index)]
  }
}

impl DataSource<Cell, Vec<String>> for RosterSource {
  fn number_of_sections(&self) -> usize {
    self.policy.sections(self.roster.len())
  }

  fn number_of_rows(&self, section: usize) -> usize {
    self.policy.rows(self.roster.len(), section)
  }

  fn title_for_header(&self, section: usize) -> String {
    if section == 0 {
      String::new()
    } else {
      format!("Section #{}", section + 1)
    }
  }

  fn cell_for_row(
    &mut self,
    pool: &mut ReusePool<Cell>,
    index: IndexPath,
  ) -> CellId {
    let pokemon = self.pokemon(index).clone();
    let id = pool.dequeue_reusable_cell(CELL);
    let cell = pool.cell_mut(id);
    cell.label = pokemon.name.clone();
    cell.image = pokemon.thumbnail_path();
    id
  }

  fn did_select_row_at(&mut self, ctx: &mut Vec<String>, index: IndexPath) {
    ctx.push(self.pokemon(index).id.clone());
  }
}

fn demo_source() -> RosterSource {
  RosterSource::new(
    Roster::builtin().unwrap(),
    SectionPolicy::Mirror { sections: 2 },
  )
}

fn frame(
  source: RosterSource,
  prefetch: usize,
) -> RecyclerFrame<Cell, Vec<String>> {
  let mut frame = RecyclerFrame::new();
  frame.register_cell(HEADER, Cell::default);
  frame.register_cell(CELL, Cell::default);
  frame.set_estimated_row_height(70);
  frame.set_header_height(30);
  frame.set_prefetch(prefetch);
  frame.set_data_source(Box::new(source));
  frame
}

#[test]
fn every_section_reports_the_whole_roster() {
  let source = demo_source();
  assert_eq!(source.number_of_sections(), 2);
  for section in 0..source.number_of_sections() {
    assert_eq!(source.number_of_rows(section), 9);
  }
}

#[test]
fn header_titles() {
  let source = demo_source();
  assert_eq!(source.title_for_header(0), "");
  assert_eq!(source.title_for_header(1), "Section #2");
  assert_eq!(source.title_for_header(4), "Section #5");
}

#[test]
fn cells_are_refilled_for_the_same_index() {
  let mut source = demo_source();
  let mut pool = ReusePool::new();
  pool.register_cell(CELL, Cell::default);

  for _ in 0..2 {
    let id = source.cell_for_row(&mut pool, IndexPath::new(0, 0));
    assert_eq!(pool.cell(id).label, "妙蛙种子");
    assert_eq!(pool.cell(id).image, "img/pokemon/thumbnails/001.png");
    pool.enqueue(id);
  }
  assert_eq!(pool.created_count(CELL), 1);
}

#[test]
fn cell_count_is_bounded_by_the_viewport() {
  let roster = (0..500)
    .map(|i| Pokemon::new(format!("{:03}", i), format!("#{}", i)))
    .collect::<Roster>();
  let prefetch = 2;
  let mut frame = frame(
    RosterSource::new(roster, SectionPolicy::Chunks { size: 50 }),
    prefetch,
  );

  // A 350-unit viewport fits five 70-unit rows, six when they straddle an
  // edge, and at most two headers can intrude on that.
  frame.layout(350);
  let mut max_visible = 0;
  while frame.offset() + frame.viewport() < frame.content_height() {
    max_visible = max_visible.max(frame.visible().count());
    assert!(frame.bound_count() <= frame.visible().count() + prefetch);
    frame.scroll_by(45);
  }

  let created = frame.pool().created_count(CELL);
  let headers = frame.pool().created_count(HEADER);
  assert!(max_visible <= 8, "{} visible", max_visible);
  assert!(created <= 6 + prefetch, "{} cells created", created);
  assert!(headers <= 2, "{} headers created", headers);
  assert_eq!(frame.pool().live_count(), created + headers);
}

#[test]
fn rows_are_bound_to_the_right_items_after_scrolling() {
  let mut frame = frame(demo_source(), 1);
  frame.layout(210);
  frame.scroll_to_index(IndexPath::new(1, 3));

  let first = frame.visible().next().unwrap();
  assert_eq!(first.entry, Entry::Row(IndexPath::new(1, 3)));
  assert_eq!(first.y, 0);
  assert_eq!(first.cell.label, "铁甲蛹");

  frame.scroll_by(-70 * 3 - 30);
  let first = frame.visible().next().unwrap();
  assert_eq!(first.entry, Entry::Header { section: 1 });
  assert_eq!(first.cell.label, "Section #2");
}

#[test]
fn selection_fires_once_per_confirm_and_never_on_focus() {
  let mut frame = frame(demo_source(), 1);
  frame.layout(210);
  let mut selected = Vec::new();

  assert!(!frame.select(&mut selected));
  for _ in 0..4 {
    frame.move_focus(1);
  }
  assert!(selected.is_empty());
  assert_eq!(frame.focused(), Some(IndexPath::new(0, 3)));

  assert!(frame.select(&mut selected));
  assert_eq!(selected, vec!["011"]);

  frame.move_focus(-1);
  assert!(frame.select(&mut selected));
  assert!(frame.select(&mut selected));
  assert_eq!(selected, vec!["011", "007", "007"]);
}

#[test]
fn reload_picks_up_a_mutated_collection() {
  let mut frame = frame(demo_source(), 0);
  frame.layout(700);
  assert_eq!(frame.entry_count(), 9 + 1 + 9);

  frame.set_data_source(Box::new(RosterSource::new(
    vec![Pokemon::default()].into(),
    SectionPolicy::Mirror { sections: 2 },
  )));
  assert_eq!(frame.entry_count(), 3);
  let labels = frame
    .visible()
    .map(|v| v.cell.label.clone())
    .collect::<Vec<_>>();
  assert_eq!(labels, vec!["默认宝可梦", "Section #2", "默认宝可梦"]);
}

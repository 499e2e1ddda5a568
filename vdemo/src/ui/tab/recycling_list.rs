//! The recycling list of Pokemon.

use vitrine::model::Roster;
use vitrine::recycler::CellId;
use vitrine::recycler::DataSource;
use vitrine::recycler::IndexPath;
use vitrine::recycler::ReusePool;
use vitrine::recycler::SectionPolicy;
use vitrine::recycler::CELL;
use vitrine::Error;

use crate::ui::component::recycler::ListCell;
use crate::ui::component::CommandBuffer;
use crate::ui::component::Component;
use crate::ui::component::Empty;
use crate::ui::component::EventArgs;
use crate::ui::component::RenderArgs;
use crate::ui::inflate::Inflater;
use crate::ui::view::pokemon::PokemonView;

const LAYOUT: &str = "tabs/recycling_list";

/// Lists a roster, one thumbnail and name per row. Picking a row opens the
/// Pokemon's page.
pub struct PokemonSource {
  roster: Roster,
  policy: SectionPolicy,
}

impl PokemonSource {
  /// Shows the whole roster in each of two sections.
  pub fn new(roster: Roster) -> Self {
    Self::with_policy(roster, SectionPolicy::Mirror { sections: 2 })
  }

  pub fn with_policy(roster: Roster, policy: SectionPolicy) -> Self {
    Self { roster, policy }
  }
}

impl DataSource<ListCell, CommandBuffer> for PokemonSource {
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
    pool: &mut ReusePool<ListCell>,
    index: IndexPath,
  ) -> CellId {
    let pokemon = &self.roster[self.policy.item_index(self.roster.len(), index)];
    let id = pool.dequeue_reusable_cell(CELL);
    pool
      .cell_mut(id)
      .set_item(pokemon.name.as_str(), pokemon.thumbnail_path());
    id
  }

  fn did_select_row_at(&mut self, ctx: &mut CommandBuffer, index: IndexPath) {
    let pokemon =
      self.roster[self.policy.item_index(self.roster.len(), index)].clone();
    log::info!("opening {} ({}) from {}", pokemon.name, pokemon.id, index);
    ctx.present(move |inflater| PokemonView::build(inflater, pokemon));
  }
}

pub struct RecyclingListTab {
  root: Box<dyn Component>,
}

impl Default for RecyclingListTab {
  fn default() -> Self {
    Self {
      root: Box::new(Empty),
    }
  }
}

impl Component for RecyclingListTab {
  delegate_to_root!();

  fn process_event(&mut self, args: &mut EventArgs) {
    self.root.process_event(args)
  }

  fn render(&mut self, args: &mut RenderArgs) {
    self.root.render(args)
  }

  fn render_overlay(&mut self, args: &mut RenderArgs) {
    self.root.render_overlay(args)
  }

  fn inflate(&mut self, inflater: &Inflater) -> Result<(), Error> {
    self.root = inflater.inflate_layout(LAYOUT, &["recycler"])?;
    let recycler = self
      .root
      .find_mut("recycler")
      .and_then(|c| c.as_recycler())
      .ok_or_else(|| Error::MissingView {
        layout: LAYOUT.to_string(),
        id: "recycler".to_string(),
      })?;
    recycler.set_data_source(Box::new(PokemonSource::new(Roster::builtin()?)));
    Ok(())
  }
}

//! The page a Pokemon opens into when picked from the list.

use crossterm::event::KeyCode;

use vitrine::model::Pokemon;
use vitrine::Error;

use crate::ui::component::Change;
use crate::ui::component::Component;
use crate::ui::component::Empty;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::inflate::Inflater;

const LAYOUT: &str = "views/pokemon";

/// A Pokemon's artwork and description, with a way back.
pub struct PokemonView {
  pokemon: Pokemon,
  root: Box<dyn Component>,
}

impl Default for PokemonView {
  fn default() -> Self {
    Self {
      pokemon: Pokemon::default(),
      root: Box::new(Empty),
    }
  }
}

impl PokemonView {
  /// Builds the page for `pokemon`.
  pub fn build(
    inflater: &Inflater,
    pokemon: Pokemon,
  ) -> Result<Box<dyn Component>, Error> {
    let mut view = Self {
      pokemon,
      root: Box::new(Empty),
    };
    view.inflate(inflater)?;
    Ok(Box::new(view))
  }

  fn show(&mut self) {
    let p = &self.pokemon;
    self.root.receive(&Message::SetTitle(p.name.clone()));
    self.root.send("image", &Message::SetImage(p.image_path()));
    self
      .root
      .send("description", &Message::SetText(p.description()));
  }
}

impl Component for PokemonView {
  fn wants_focus(&self) -> bool {
    true
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    self.root.process_event(args);
    let closed = args
      .commands
      .take_changes()
      .into_iter()
      .any(|(id, change)| id == "close_button" && change == Change::Clicked);
    if closed {
      args.commands.dismiss();
      return;
    }
    if args.commands.is_claimed() {
      return;
    }

    if let Event::Key(k) = args.event {
      if let KeyCode::Esc | KeyCode::Char(']') = k.code {
        args.commands.dismiss();
        args.commands.claim();
      }
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    self.root.render(args)
  }

  fn render_overlay(&mut self, args: &mut RenderArgs) {
    self.root.render_overlay(args)
  }

  fn inflate(&mut self, inflater: &Inflater) -> Result<(), Error> {
    self.root =
      inflater.inflate_layout(LAYOUT, &["image", "description", "close_button"])?;
    self.show();
    Ok(())
  }
}

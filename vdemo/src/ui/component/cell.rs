//! List cells: a title on the left, a detail on the right, and a separator
//! underneath.

use serde_json::Value;

use unicode_width::UnicodeWidthStr;

use crate::ui::component::button::is_activation;
use crate::ui::component::label::truncate;
use crate::ui::component::value_to_string;
use crate::ui::component::Change;
use crate::ui::component::Component;
use crate::ui::component::EventArgs;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::component::Size;

/// Draws the common parts of a cell: the focus marker, the title, the detail
/// and the separator.
pub fn draw_cell(args: &mut RenderArgs, title: &str, detail: Option<&str>) {
  let rect = args.rect;
  if rect.width < 4 || rect.height == 0 {
    return;
  }
  let sheet = args.style_sheet;

  if args.is_focused {
    for dy in 0..rect.height.saturating_sub(1).max(1) {
      args
        .output
        .get_mut(rect.x, rect.y + dy)
        .set_symbol("▌")
        .set_style(sheet.highlight);
    }
  }

  let inner = rect.width - 4;
  let detail = detail.unwrap_or("");
  let detail_width = (detail.width() as u16).min(inner / 2);
  if detail_width > 0 {
    let detail = truncate(detail, detail_width as usize);
    args.output.set_stringn(
      rect.x + 2 + inner - detail.width() as u16,
      rect.y,
      &detail,
      detail_width as usize,
      sheet.caption,
    );
  }

  let title_width = inner.saturating_sub(detail_width + 1);
  args.output.set_stringn(
    rect.x + 2,
    rect.y,
    truncate(title, title_width as usize),
    title_width as usize,
    sheet.base(args.is_focused),
  );

  if rect.height >= 2 {
    let y = rect.y + rect.height - 1;
    for dx in 2..rect.width - 2 {
      args
        .output
        .get_mut(rect.x + dx, y)
        .set_symbol("─")
        .set_style(sheet.dim);
    }
  }
}

fn apply_text(slot: &mut String, value: &Value) -> bool {
  match value_to_string(value) {
    Some(text) => {
      *slot = text;
      true
    }
    None => false,
  }
}

/// A cell with a title and a detail text, which reports
/// [`Change::Clicked`] when activated.
#[derive(Clone, Debug, Default)]
pub struct DetailCell {
  title: String,
  detail: String,
}

impl DetailCell {
  #[cfg(test)]
  pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      detail: detail.into(),
    }
  }
}

impl Component for DetailCell {
  fn wants_focus(&self) -> bool {
    true
  }

  fn layout_hint(&self, vertical: bool) -> Option<Size> {
    if vertical {
      Some(Size::Fixed(2))
    } else {
      None
    }
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    if is_activation(args.event, args.rect, args.is_focused) {
      args.commands.emit(Change::Clicked);
      args.commands.claim();
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    draw_cell(args, &self.title, Some(self.detail.as_str()));
  }

  fn receive(&mut self, message: &Message) -> bool {
    match message {
      Message::SetTitle(t) => self.title = t.clone(),
      Message::SetDetail(d) | Message::SetText(d) => self.detail = d.clone(),
      _ => return false,
    }
    true
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    match name {
      "title" => apply_text(&mut self.title, value),
      "detail" => apply_text(&mut self.detail, value),
      _ => false,
    }
  }
}

/// A cell with a check mark, toggled on activation. Reports
/// [`Change::Toggled`].
#[derive(Clone, Debug, Default)]
pub struct RadioCell {
  title: String,
  selected: bool,
}

impl Component for RadioCell {
  fn wants_focus(&self) -> bool {
    true
  }

  fn layout_hint(&self, vertical: bool) -> Option<Size> {
    if vertical {
      Some(Size::Fixed(2))
    } else {
      None
    }
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    if is_activation(args.event, args.rect, args.is_focused) {
      self.selected = !self.selected;
      args.commands.emit(Change::Toggled(self.selected));
      args.commands.claim();
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    let mark = if self.selected { "✓" } else { "" };
    draw_cell(args, &self.title, Some(mark));
  }

  fn receive(&mut self, message: &Message) -> bool {
    match message {
      Message::SetTitle(t) => self.title = t.clone(),
      Message::SetToggled(on) => self.selected = *on,
      _ => return false,
    }
    true
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    match (name, value.as_bool()) {
      ("title", _) => apply_text(&mut self.title, value),
      ("selected", Some(on)) => {
        self.selected = on;
        true
      }
      _ => false,
    }
  }
}

/// A cell with an on/off switch, flipped on activation. Reports
/// [`Change::Toggled`].
#[derive(Clone, Debug, Default)]
pub struct BooleanCell {
  title: String,
  on: bool,
}

impl BooleanCell {
  #[cfg(test)]
  pub fn is_on(&self) -> bool {
    self.on
  }
}

impl Component for BooleanCell {
  fn wants_focus(&self) -> bool {
    true
  }

  fn layout_hint(&self, vertical: bool) -> Option<Size> {
    if vertical {
      Some(Size::Fixed(2))
    } else {
      None
    }
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    if is_activation(args.event, args.rect, args.is_focused) {
      self.on = !self.on;
      args.commands.emit(Change::Toggled(self.on));
      args.commands.claim();
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    let state = if self.on { "开" } else { "关" };
    draw_cell(args, &self.title, Some(state));
  }

  fn receive(&mut self, message: &Message) -> bool {
    match message {
      Message::SetTitle(t) => self.title = t.clone(),
      Message::SetToggled(on) => self.on = *on,
      _ => return false,
    }
    true
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    match (name, value.as_bool()) {
      ("title", _) => apply_text(&mut self.title, value),
      ("on", Some(on)) => {
        self.on = on;
        true
      }
      _ => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crossterm::event::KeyCode;

  use crate::ui::component::testing;

  #[test]
  fn cells_draw_title_and_detail() {
    let mut cell = DetailCell::new("IP", "10.0.0.1");
    let buf = testing::render(&mut cell, 20, 2, true);
    assert_eq!(testing::line(&buf, 0), "▌ IP      10.0.0.1  ");
    assert_eq!(testing::line(&buf, 1), "  ────────────────  ");
  }

  #[test]
  fn boolean_cells_flip() {
    let mut cell = BooleanCell::default();
    let mut commands = testing::key(&mut cell, KeyCode::Enter);
    commands.stamp("debug");
    assert_eq!(
      commands.take_changes(),
      vec![("debug".into(), Change::Toggled(true))]
    );
    assert!(cell.is_on());

    testing::key(&mut cell, KeyCode::Enter);
    assert!(!cell.is_on());
  }

  #[test]
  fn radio_cells_follow_messages() {
    let mut cell = RadioCell::default();
    assert!(cell.receive(&Message::SetToggled(true)));
    let buf = testing::render(&mut cell, 12, 2, false);
    assert!(testing::contains(&buf, "✓"));
  }
}

//! Dropdowns, and the selector cells that open them.

use crossterm::event::KeyCode;
use crossterm::event::MouseButton;
use crossterm::event::MouseEventKind;

use serde_json::Value;

use tui::layout::Rect;
use tui::widgets::Block;
use tui::widgets::BorderType;
use tui::widgets::Borders;
use tui::widgets::Widget;

use unicode_width::UnicodeWidthStr;

use crate::ui::component::button::is_activation;
use crate::ui::component::cell::draw_cell;
use crate::ui::component::label::truncate;
use crate::ui::component::rect_contains;
use crate::ui::component::value_to_string;
use crate::ui::component::Change;
use crate::ui::component::Component;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::component::Size;
use crate::ui::util::SelectedVec;
use crate::ui::widgets;

/// What a [`Dropdown`] made of an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
  /// Still open.
  Pending,
  /// The option at this index was picked.
  Confirmed(usize),
  /// Closed without picking anything.
  Cancelled,
}

/// A modal list of options floating over the screen.
///
/// A dropdown swallows every event while it is open; its owner feeds it
/// events and closes it once it reports an [`Outcome`] other than
/// `Pending`.
#[derive(Clone, Debug)]
pub struct Dropdown {
  title: String,
  options: SelectedVec<String>,
  scroll: usize,
  last_rect: Rect,
}

impl Dropdown {
  pub fn new(
    title: impl Into<String>,
    options: impl IntoIterator<Item = String>,
    selected: usize,
  ) -> Self {
    let mut options = options.into_iter().collect::<SelectedVec<_>>();
    options.select(selected);
    Self {
      title: title.into(),
      options,
      scroll: 0,
      last_rect: Rect::default(),
    }
  }

  fn option_at(&self, x: u16, y: u16) -> Option<usize> {
    let list = Rect::new(
      self.last_rect.x + 1,
      self.last_rect.y + 1,
      self.last_rect.width.saturating_sub(2),
      self.last_rect.height.saturating_sub(2),
    );
    if !rect_contains(list, x, y) {
      return None;
    }
    let idx = self.scroll + (y - list.y) as usize;
    if idx < self.options.len() {
      Some(idx)
    } else {
      None
    }
  }

  pub fn process_event(&mut self, event: &Event) -> Outcome {
    match event {
      Event::Key(k) => match k.code {
        KeyCode::Up => {
          self.options.shift(-1);
        }
        KeyCode::Down => {
          self.options.shift(1);
        }
        KeyCode::PageUp => {
          self.options.shift(-10);
        }
        KeyCode::PageDown => {
          self.options.shift(10);
        }
        KeyCode::Enter if !self.options.is_empty() => {
          return Outcome::Confirmed(self.options.selection())
        }
        KeyCode::Esc | KeyCode::Backspace => return Outcome::Cancelled,
        _ => {}
      },
      Event::Mouse(m) => match m.kind {
        MouseEventKind::ScrollUp => {
          self.options.shift(-1);
        }
        MouseEventKind::ScrollDown => {
          self.options.shift(1);
        }
        MouseEventKind::Down(MouseButton::Left) => {
          return match self.option_at(m.column, m.row) {
            Some(idx) => {
              self.options.select(idx);
              Outcome::Confirmed(idx)
            }
            None if rect_contains(self.last_rect, m.column, m.row) => {
              Outcome::Pending
            }
            None => Outcome::Cancelled,
          };
        }
        _ => {}
      },
    }
    Outcome::Pending
  }

  /// Draws the dropdown centered on `args.rect`.
  pub fn render(&mut self, args: &mut RenderArgs) {
    let screen = args.rect;
    let widest = self
      .options
      .iter()
      .map(|o| o.width())
      .chain(Some(self.title.width()))
      .max()
      .unwrap_or(0) as u16;
    let width = (widest + 6).max(20).min(screen.width.saturating_sub(4));
    let height = (self.options.len() as u16 + 2)
      .min(screen.height.saturating_sub(4))
      .max(3.min(screen.height));
    let rect = Rect::new(
      screen.x + (screen.width - width) / 2,
      screen.y + (screen.height - height) / 2,
      width,
      height,
    );
    self.last_rect = rect;

    let sheet = args.style_sheet;
    widgets::clear(rect, args.output, sheet.unfocused);
    Block::default()
      .borders(Borders::ALL)
      .border_type(BorderType::Rounded)
      .border_style(sheet.highlight)
      .title(truncate(&self.title, width.saturating_sub(4) as usize))
      .render(rect, args.output);

    let rows = height.saturating_sub(2) as usize;
    let selection = self.options.selection();
    if selection < self.scroll {
      self.scroll = selection;
    } else if rows > 0 && selection >= self.scroll + rows {
      self.scroll = selection + 1 - rows;
    }

    let text_width = width.saturating_sub(6) as usize;
    for (i, option) in
      self.options.iter().enumerate().skip(self.scroll).take(rows)
    {
      let y = rect.y + 1 + (i - self.scroll) as u16;
      let (marker, style) = if i == selection {
        ("▶ ", sheet.focused.patch(sheet.selected).patch(sheet.highlight))
      } else {
        ("  ", sheet.unfocused)
      };
      args.output.set_stringn(rect.x + 2, y, marker, 2, style);
      args.output.set_stringn(
        rect.x + 4,
        y,
        truncate(option, text_width),
        text_width,
        style,
      );
    }
  }
}

/// A cell showing the current choice among several options. Activating it
/// opens a [`Dropdown`]; confirming one reports [`Change::Selected`].
#[derive(Clone, Debug, Default)]
pub struct SelectorCell {
  title: String,
  options: Vec<String>,
  selected: usize,
  open: Option<Dropdown>,
}

impl SelectorCell {
  #[cfg(test)]
  pub fn new(
    title: impl Into<String>,
    options: impl IntoIterator<Item = String>,
  ) -> Self {
    Self {
      title: title.into(),
      options: options.into_iter().collect(),
      selected: 0,
      open: None,
    }
  }

  #[cfg(test)]
  pub fn selected(&self) -> usize {
    self.selected
  }

  #[cfg(test)]
  pub fn is_open(&self) -> bool {
    self.open.is_some()
  }

  /// Replaces the options, keeping the selection if it is still in range.
  pub fn set_options(&mut self, options: Vec<String>) {
    self.options = options;
    if self.selected >= self.options.len() {
      self.selected = 0;
    }
  }
}

impl Component for SelectorCell {
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
    if let Some(dropdown) = &mut self.open {
      if !args.is_focused {
        return;
      }
      args.commands.claim();
      match dropdown.process_event(args.event) {
        Outcome::Pending => {}
        Outcome::Cancelled => self.open = None,
        Outcome::Confirmed(idx) => {
          self.open = None;
          self.selected = idx;
          args.commands.emit(Change::Selected(idx));
        }
      }
      return;
    }

    if is_activation(args.event, args.rect, args.is_focused)
      && !self.options.is_empty()
    {
      self.open = Some(Dropdown::new(
        self.title.clone(),
        self.options.iter().cloned(),
        self.selected,
      ));
      args.commands.claim();
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    let detail = self.options.get(self.selected).map(String::as_str);
    draw_cell(args, &self.title, detail);
  }

  fn render_overlay(&mut self, args: &mut RenderArgs) {
    if let Some(dropdown) = &mut self.open {
      dropdown.render(args);
    }
  }

  fn receive(&mut self, message: &Message) -> bool {
    match message {
      Message::SetTitle(t) => self.title = t.clone(),
      Message::SetSelected(idx) if *idx < self.options.len() => {
        self.selected = *idx
      }
      _ => return false,
    }
    true
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    match name {
      "title" => match value_to_string(value) {
        Some(t) => self.title = t,
        None => return false,
      },
      "options" => match value.as_array() {
        Some(options) => {
          self.set_options(options.iter().filter_map(value_to_string).collect())
        }
        None => return false,
      },
      "selected" => match value.as_u64() {
        Some(idx) if (idx as usize) < self.options.len() => {
          self.selected = idx as usize
        }
        _ => return false,
      },
      _ => return false,
    }
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::ui::component::testing;

  fn selector() -> SelectorCell {
    SelectorCell::new("风格", vec!["a".into(), "b".into(), "c".into()])
  }

  #[test]
  fn confirming_reports_the_choice() {
    let mut cell = selector();
    assert!(testing::key(&mut cell, KeyCode::Enter).is_claimed());
    assert!(cell.is_open());

    testing::key(&mut cell, KeyCode::Down);
    testing::key(&mut cell, KeyCode::Down);
    let mut commands = testing::key(&mut cell, KeyCode::Enter);
    commands.stamp("genre");

    assert!(!cell.is_open());
    assert_eq!(cell.selected(), 2);
    assert_eq!(
      commands.take_changes(),
      vec![("genre".into(), Change::Selected(2))]
    );
  }

  #[test]
  fn cancelling_keeps_the_choice() {
    let mut cell = selector();
    testing::key(&mut cell, KeyCode::Enter);
    testing::key(&mut cell, KeyCode::Down);
    let mut commands = testing::key(&mut cell, KeyCode::Esc);

    assert!(!cell.is_open());
    assert_eq!(cell.selected(), 0);
    assert!(commands.take_changes().is_empty());
  }

  #[test]
  fn open_dropdowns_draw_over_everything() {
    let mut cell = selector();
    testing::key(&mut cell, KeyCode::Enter);
    let buf = testing::render(&mut cell, 40, 12, true);
    assert!(testing::contains(&buf, "▶ a"));
  }

  #[test]
  fn dropdowns_scroll_to_the_selection() {
    let mut dropdown =
      Dropdown::new("Test", (1..=13).map(|i| format!("Test {}", i)), 12);
    let h = testing::Harness::new();
    let mut buf = tui::buffer::Buffer::empty(Rect::new(0, 0, 30, 10));
    dropdown.render(&mut RenderArgs {
      is_focused: true,
      rect: Rect::new(0, 0, 30, 10),
      output: &mut buf,
      frame_number: 0,
      time: Default::default(),
      style_sheet: Default::default(),
      resources: &h.resources,
      platform: &h.platform,
    });
    assert!(testing::contains(&buf, "▶ Test 13"));
    assert!(!testing::contains(&buf, "Test 1 "));
  }
}

//! Cells that take typed input.

use crossterm::event::KeyCode;
use crossterm::event::KeyModifiers;

use serde_json::Value;

use crate::ui::component::button::is_activation;
use crate::ui::component::cell::draw_cell;
use crate::ui::component::value_to_string;
use crate::ui::component::Change;
use crate::ui::component::Component;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::component::Size;

/// The editing state shared by the text and numeric cells.
#[derive(Clone, Debug, Default)]
struct Editor {
  title: String,
  value: String,
  placeholder: String,
  max_len: Option<usize>,
  editing: Option<String>,
}

enum Edit {
  Ignored,
  Handled,
  Committed(String),
}

impl Editor {
  fn process_event(
    &mut self,
    args: &mut EventArgs,
    accept: impl Fn(&str, char) -> bool,
  ) -> Edit {
    let buf = match &mut self.editing {
      Some(buf) => buf,
      None => {
        if is_activation(args.event, args.rect, args.is_focused) {
          self.editing = Some(self.value.clone());
          return Edit::Handled;
        }
        return Edit::Ignored;
      }
    };

    let k = match args.event {
      Event::Key(k) if args.is_focused => k,
      _ => return Edit::Ignored,
    };
    match k.code {
      KeyCode::Enter => {
        let committed = buf.clone();
        self.editing = None;
        self.value = committed.clone();
        return Edit::Committed(committed);
      }
      KeyCode::Esc => self.editing = None,
      KeyCode::Backspace => {
        buf.pop();
      }
      KeyCode::Char(c)
        if !k.modifiers.contains(KeyModifiers::CONTROL)
          && self.max_len.map_or(true, |max| buf.chars().count() < max)
          && accept(buf, c) =>
      {
        buf.push(c)
      }
      _ => {}
    }
    // Everything typed belongs to the editor.
    Edit::Handled
  }

  fn render(&self, args: &mut RenderArgs) {
    let detail = match &self.editing {
      Some(buf) => {
        let cursor = if args.frame_number / 30 % 2 == 0 {
          "▏"
        } else {
          " "
        };
        format!("{}{}", buf, cursor)
      }
      None if self.value.is_empty() => self.placeholder.clone(),
      None => self.value.clone(),
    };
    draw_cell(args, &self.title, Some(&detail));
  }

  fn receive(&mut self, message: &Message) -> bool {
    match message {
      Message::SetTitle(t) => self.title = t.clone(),
      Message::SetText(v) => self.value = v.clone(),
      _ => return false,
    }
    true
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    match name {
      "maxLength" => match value.as_u64() {
        Some(n) => self.max_len = Some(n as usize),
        None => return false,
      },
      "title" | "value" | "placeholder" => {
        let text = match value_to_string(value) {
          Some(text) => text,
          None => return false,
        };
        match name {
          "title" => self.title = text,
          "value" => self.value = text,
          _ => self.placeholder = text,
        }
      }
      _ => return false,
    }
    true
  }
}

/// A cell holding a line of text. Activating it starts editing; Enter
/// commits with [`Change::Text`] and Esc throws the edit away. Pressing `x`
/// while not editing reports [`Change::Open`].
#[derive(Clone, Debug, Default)]
pub struct InputCell {
  editor: Editor,
}

impl InputCell {
  #[cfg(test)]
  pub fn value(&self) -> &str {
    &self.editor.value
  }

  pub fn is_editing(&self) -> bool {
    self.editor.editing.is_some()
  }
}

impl Component for InputCell {
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
    if !self.is_editing() && args.is_focused {
      if let Event::Key(k) = args.event {
        if k.code == KeyCode::Char('x') {
          args.commands.emit(Change::Open);
          args.commands.claim();
          return;
        }
      }
    }

    match self.editor.process_event(args, |_, _| true) {
      Edit::Ignored => {}
      Edit::Handled => args.commands.claim(),
      Edit::Committed(text) => {
        args.commands.emit(Change::Text(text));
        args.commands.claim();
      }
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    self.editor.render(args)
  }

  fn receive(&mut self, message: &Message) -> bool {
    self.editor.receive(message)
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    self.editor.apply_attribute(name, value)
  }
}

/// A cell holding an integer; like [`InputCell`], but only digits (and a
/// leading minus) can be typed, and commits report [`Change::Number`].
#[derive(Clone, Debug, Default)]
pub struct InputNumericCell {
  editor: Editor,
}

impl InputNumericCell {
  #[cfg(test)]
  pub fn value(&self) -> Option<i64> {
    self.editor.value.parse().ok()
  }
}

impl Component for InputNumericCell {
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
    let accept =
      |buf: &str, c: char| c.is_ascii_digit() || (c == '-' && buf.is_empty());
    match self.editor.process_event(args, accept) {
      Edit::Ignored => {}
      Edit::Handled => args.commands.claim(),
      Edit::Committed(text) => {
        args.commands.claim();
        match text.parse() {
          Ok(n) => args.commands.emit(Change::Number(n)),
          Err(_) => {
            log::debug!("discarding non-numeric input {:?}", text);
            self.editor.value.clear();
          }
        }
      }
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    self.editor.render(args)
  }

  fn receive(&mut self, message: &Message) -> bool {
    self.editor.receive(message)
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    self.editor.apply_attribute(name, value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::ui::component::testing::Harness;

  fn type_str(h: &mut Harness, c: &mut dyn Component, s: &str) {
    for ch in s.chars() {
      h.key(c, KeyCode::Char(ch));
    }
  }

  #[test]
  fn text_commits_on_enter() {
    let mut h = Harness::new();
    let mut cell = InputCell::default();
    h.key(&mut cell, KeyCode::Enter);
    assert!(cell.is_editing());

    type_str(&mut h, &mut cell, "hex");
    h.key(&mut cell, KeyCode::Backspace);
    let mut commands = h.key(&mut cell, KeyCode::Enter);
    commands.stamp("input");

    assert_eq!(cell.value(), "he");
    assert_eq!(
      commands.take_changes(),
      vec![("input".into(), Change::Text("he".into()))]
    );
  }

  #[test]
  fn x_opens_only_outside_editing() {
    let mut h = Harness::new();
    let mut cell = InputCell::default();
    let mut commands = h.key(&mut cell, KeyCode::Char('x'));
    commands.stamp("input");
    assert_eq!(commands.take_changes(), vec![("input".into(), Change::Open)]);

    h.key(&mut cell, KeyCode::Enter);
    let mut commands = h.key(&mut cell, KeyCode::Char('x'));
    commands.stamp("input");
    assert!(commands.take_changes().is_empty());
  }

  #[test]
  fn escape_discards_the_edit() {
    let mut h = Harness::new();
    let mut cell = InputCell::default();
    cell.receive(&Message::SetText("keep".into()));
    h.key(&mut cell, KeyCode::Enter);
    type_str(&mut h, &mut cell, "zz");
    h.key(&mut cell, KeyCode::Esc);
    assert_eq!(cell.value(), "keep");
    assert!(!cell.is_editing());
  }

  #[test]
  fn numeric_cells_filter_input() {
    let mut h = Harness::new();
    let mut cell = InputNumericCell::default();
    h.key(&mut cell, KeyCode::Enter);
    type_str(&mut h, &mut cell, "-4a2-");
    let mut commands = h.key(&mut cell, KeyCode::Enter);
    commands.stamp("n");

    assert_eq!(cell.value(), Some(-42));
    assert_eq!(
      commands.take_changes(),
      vec![("n".into(), Change::Number(-42))]
    );
  }
}

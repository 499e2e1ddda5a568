//! Buttons.

use crossterm::event::KeyCode;
use crossterm::event::MouseButton;
use crossterm::event::MouseEventKind;

use serde_json::Value;

use tui::layout::Rect;
use tui::style::Modifier;
use tui::widgets::Block;
use tui::widgets::BorderType;
use tui::widgets::Borders;
use tui::widgets::Widget;

use unicode_width::UnicodeWidthStr;

use crate::ui::component::rect_contains;
use crate::ui::component::value_to_string;
use crate::ui::component::Change;
use crate::ui::component::Component;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::component::Size;

/// Returns whether `event` activates a focused widget drawn at `rect`:
/// Enter, or a left click inside it.
pub fn is_activation(event: &Event, rect: Rect, is_focused: bool) -> bool {
  match event {
    Event::Key(k) => is_focused && k.code == KeyCode::Enter,
    Event::Mouse(m) => {
      m.kind == MouseEventKind::Down(MouseButton::Left)
        && rect_contains(rect, m.column, m.row)
    }
  }
}

/// A push button, which reports [`Change::Clicked`].
#[derive(Clone, Debug)]
pub struct Button {
  text: String,
  primary: bool,
}

impl Default for Button {
  fn default() -> Self {
    Self::new("")
  }
}

impl Button {
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      primary: false,
    }
  }
}

impl Component for Button {
  fn wants_focus(&self) -> bool {
    true
  }

  fn layout_hint(&self, vertical: bool) -> Option<Size> {
    Some(Size::Fixed(if vertical {
      3
    } else {
      self.text.width() as u16 + 6
    }))
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    if is_activation(args.event, args.rect, args.is_focused) {
      args.commands.emit(Change::Clicked);
      args.commands.claim();
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    let rect = args.rect;
    if rect.width < 2 || rect.height == 0 {
      return;
    }

    let sheet = &args.style_sheet;
    let mut style = sheet.base(args.is_focused);
    if self.primary {
      style = style.patch(sheet.highlight);
    }
    let border = if args.is_focused {
      sheet.highlight.add_modifier(Modifier::BOLD)
    } else {
      sheet.dim
    };

    let text_y = if rect.height >= 3 {
      Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .render(rect, args.output);
      rect.y + rect.height / 2
    } else {
      rect.y
    };

    let inner_width = rect.width.saturating_sub(2);
    let width = (self.text.width() as u16).min(inner_width);
    args.output.set_stringn(
      rect.x + 1 + (inner_width - width) / 2,
      text_y,
      &self.text,
      width as usize,
      style,
    );
  }

  fn receive(&mut self, message: &Message) -> bool {
    match message {
      Message::SetText(text) | Message::SetTitle(text) => {
        self.text = text.clone()
      }
      _ => return false,
    }
    true
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    match name {
      "text" => match value_to_string(value) {
        Some(text) => self.text = text,
        None => return false,
      },
      "style" => match value.as_str() {
        Some("primary") => self.primary = true,
        Some("regular") => self.primary = false,
        _ => return false,
      },
      _ => return false,
    }
    true
  }
}

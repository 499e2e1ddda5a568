//! Modal dialogs.

use crossterm::event::KeyCode;
use crossterm::event::MouseButton;
use crossterm::event::MouseEventKind;

use tui::layout::Rect;
use tui::widgets::Block;
use tui::widgets::BorderType;
use tui::widgets::Borders;
use tui::widgets::Widget;

use unicode_width::UnicodeWidthStr;

use crate::ui::component::label::wrap;
use crate::ui::component::rect_contains;
use crate::ui::component::Component;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::RenderArgs;
use crate::ui::widgets;

/// The label of a dialog's only button.
const OK: &str = "确定";

/// A box of text with an OK button, drawn over everything else.
///
/// Confirming asks for the dialog to be dismissed; the owner is expected to
/// drop it then.
#[derive(Clone, Debug)]
pub struct Dialog {
  text: String,
  last_button: Rect,
}

impl Dialog {
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      last_button: Rect::default(),
    }
  }

  #[cfg(test)]
  pub fn text(&self) -> &str {
    &self.text
  }
}

impl Component for Dialog {
  fn wants_focus(&self) -> bool {
    true
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    // Modal: nothing gets past an open dialog.
    args.commands.claim();
    let confirmed = match args.event {
      Event::Key(k) => {
        matches!(k.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Backspace)
      }
      Event::Mouse(m) => {
        m.kind == MouseEventKind::Down(MouseButton::Left)
          && rect_contains(self.last_button, m.column, m.row)
      }
    };
    if confirmed {
      args.commands.dismiss();
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    let screen = args.rect;
    if screen.width < 8 || screen.height < 5 {
      return;
    }

    let longest = self.text.lines().map(|l| l.width()).max().unwrap_or(0);
    let width = (longest as u16 + 6).max(30).min(screen.width - 4);
    let lines = wrap(&self.text, width as usize - 4);
    let height = (lines.len() as u16 + 5).min(screen.height - 2);
    let rect = Rect::new(
      screen.x + (screen.width - width) / 2,
      screen.y + (screen.height - height) / 2,
      width,
      height,
    );

    let sheet = args.style_sheet;
    widgets::clear(rect, args.output, sheet.unfocused);
    Block::default()
      .borders(Borders::ALL)
      .border_type(BorderType::Rounded)
      .border_style(sheet.highlight)
      .render(rect, args.output);

    let text_rows = height.saturating_sub(5) as usize;
    for (i, line) in lines.iter().take(text_rows).enumerate() {
      let w = line.width() as u16;
      args.output.set_stringn(
        rect.x + (width - w.min(width)) / 2,
        rect.y + 2 + i as u16,
        line,
        width as usize - 4,
        sheet.focused,
      );
    }

    let label = format!("[ {} ]", OK);
    let label_width = label.width() as u16;
    self.last_button = Rect::new(
      rect.x + (width - label_width.min(width)) / 2,
      rect.y + height - 2,
      label_width,
      1,
    );
    args.output.set_stringn(
      self.last_button.x,
      self.last_button.y,
      &label,
      label_width as usize,
      sheet.focused.patch(sheet.selected).patch(sheet.highlight),
    );
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::ui::component::testing;

  #[test]
  fn dialogs_swallow_events_until_confirmed() {
    let mut dialog = Dialog::new("选择了 测试 3");
    let mut commands = testing::key(&mut dialog, KeyCode::Down);
    assert!(commands.is_claimed());
    assert!(!commands.take_dismiss());

    let mut commands = testing::key(&mut dialog, KeyCode::Enter);
    assert!(commands.take_dismiss());
  }

  #[test]
  fn the_button_is_clickable() {
    let mut h = testing::Harness::new();
    let mut dialog = Dialog::new("hello");
    let buf = h.render(&mut dialog, 40, 12, true);
    assert!(testing::contains(&buf, "hello"));

    let button = dialog.last_button;
    let mut commands = h.click(&mut dialog, button.x + 1, button.y);
    assert!(commands.take_dismiss());
  }
}

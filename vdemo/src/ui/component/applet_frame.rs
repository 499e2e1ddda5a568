//! The frame every activity is drawn in.

use serde_json::Value;

use tui::text::Span;
use tui::widgets::Widget;

use vitrine::layout::Node;

use crate::ui::component::value_to_string;
use crate::ui::component::Component;
use crate::ui::component::Empty;
use crate::ui::component::EventArgs;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::widgets::Chrome;

const DEFAULT_HINTS: &str = "↑↓←→ 移动  ↵ 确定  Esc 返回  Ctrl-Q 退出";

/// A title bar on top, a footer of key hints on the bottom, and one child
/// in between.
///
/// The footer is the "bottom bar" of the settings screen; it disappears
/// while the platform says it is hidden.
pub struct AppletFrame {
  title: String,
  hints: String,
  content: Box<dyn Component>,
}

impl Default for AppletFrame {
  fn default() -> Self {
    Self::new("", Box::new(Empty))
  }
}

impl AppletFrame {
  pub fn new(title: impl Into<String>, content: Box<dyn Component>) -> Self {
    Self {
      title: title.into(),
      hints: DEFAULT_HINTS.to_string(),
      content,
    }
  }

  fn chrome(&self, is_focused: bool, show_footer: bool) -> Chrome<'_> {
    Chrome::new()
      .title(Span::raw(self.title.as_str()))
      .footer(Span::raw(self.hints.as_str()))
      .show_footer(show_footer)
      .focus_title(is_focused)
  }
}

impl Component for AppletFrame {
  fn wants_focus(&self) -> bool {
    self.content.wants_focus()
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    let inner = self
      .chrome(args.is_focused, args.platform.footer_visible())
      .inner(args.rect);
    self.content.process_event(&mut EventArgs {
      is_focused: args.is_focused,
      event: args.event,
      rect: inner,
      platform: args.platform,
      commands: args.commands,
    });
  }

  fn render(&mut self, args: &mut RenderArgs) {
    let sheet = args.style_sheet;
    let chrome = self
      .chrome(args.is_focused, args.platform.footer_visible())
      .style(sheet.unfocused)
      .focused_style(sheet.highlight);
    let inner = chrome.inner(args.rect);
    chrome.render(args.rect, args.output);

    self.content.render(&mut RenderArgs {
      is_focused: args.is_focused,
      rect: inner,
      output: args.output,
      frame_number: args.frame_number,
      time: args.time,
      style_sheet: args.style_sheet,
      resources: args.resources,
      platform: args.platform,
    });
  }

  fn render_overlay(&mut self, args: &mut RenderArgs) {
    self.content.render_overlay(args)
  }

  fn receive(&mut self, message: &Message) -> bool {
    match message {
      Message::SetTitle(t) => self.title = t.clone(),
      _ => return false,
    }
    true
  }

  fn send(&mut self, id: &str, message: &Message) -> bool {
    self.content.send(id, message)
  }

  fn find_mut(&mut self, id: &str) -> Option<&mut dyn Component> {
    self.content.find_mut(id)
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    let text = match value_to_string(value) {
      Some(text) => text,
      None => return false,
    };
    match name {
      "title" => self.title = text,
      "hints" => self.hints = text,
      _ => return false,
    }
    true
  }

  fn add_child(&mut self, _: &Node, child: Box<dyn Component>) {
    self.content = child;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use vitrine::settings::Platform;

  use crate::ui::component::label::Label;
  use crate::ui::component::testing;

  #[test]
  fn footer_follows_the_platform() {
    let mut h = testing::Harness::new();
    let mut frame = AppletFrame::new("Demo", Box::new(Label::new("body")));

    let buf = h.render(&mut frame, 60, 6, true);
    assert!(testing::contains(&buf, "Demo"));
    assert!(testing::contains(&buf, "body"));
    assert!(testing::line(&buf, 5).contains("Esc"));

    h.platform.set_footer_visible(false);
    let buf = h.render(&mut frame, 60, 6, true);
    assert!(!testing::line(&buf, 5).contains("Esc"));
  }
}

//! Tabbed views.

use std::iter;

use crossterm::event::KeyCode;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use tui::layout::Rect;
use tui::text::Span;
use tui::text::Spans;
use tui::text::Text;
use tui::widgets::Paragraph;
use tui::widgets::Widget;

use vitrine::layout::Node;

use crate::ui::component::Component;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::util::SelectedVec;

/// How many rows the tab bar takes.
const BAR_HEIGHT: u16 = 3;

struct Tab {
  id: Option<String>,
  label: String,
  component: Box<dyn Component>,
}

/// A bar of tabs on top, and the content of the selected one below it.
///
/// Focus is either on the bar, where Left and Right switch tabs, or inside
/// the content. Down moves focus into the content; an Up the content does
/// not claim moves it back to the bar.
#[derive(Default)]
pub struct TabFrame {
  tabs: SelectedVec<Tab>,
  rendered_boundaries: Vec<u16>,
  in_content: bool,
}

impl TabFrame {
  pub fn push(
    &mut self,
    label: impl Into<String>,
    id: Option<&str>,
    component: Box<dyn Component>,
  ) {
    self.tabs.push(Tab {
      id: id.map(str::to_string),
      label: label.into(),
      component,
    })
  }

  #[cfg(test)]
  pub fn selection(&self) -> usize {
    self.tabs.selection()
  }

  #[cfg(test)]
  pub fn is_content_focused(&self) -> bool {
    self.in_content
  }

  fn switch(&mut self, delta: isize) -> bool {
    let changed = self.tabs.shift(delta);
    if changed {
      self.in_content = false;
    }
    changed
  }

  fn content_rect(rect: Rect) -> Rect {
    Rect::new(
      rect.x + 1,
      rect.y + BAR_HEIGHT.min(rect.height),
      rect.width.saturating_sub(2),
      rect.height.saturating_sub(BAR_HEIGHT),
    )
  }

  fn render_bar(&mut self, args: &mut RenderArgs) {
    let bar_focused = args.is_focused && !self.in_content;
    let sheet = args.style_sheet;
    let style = sheet.base(bar_focused);
    let selected = if bar_focused {
      style.patch(sheet.highlight)
    } else {
      style.patch(sheet.selected)
    };

    // What we're going for:
    //    ▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁
    //   ╱  Bonk ╱  Foo  ╲ Bar  ╲ Baz  ╲
    // ▔▔▔▔▔▔▔▔▔▔         ▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔

    self.rendered_boundaries.clear();
    self.rendered_boundaries.push(args.rect.x + 2);
    let mut top = vec![Span::styled("  ", style)];
    let mut middle = vec![Span::styled("  ", style)];
    let mut bottom = vec![Span::styled("▔▔", style)];
    let count = self.tabs.len();
    for (i, tab) in self.tabs.iter().enumerate() {
      let (span, top_bar, under) = if i < self.tabs.selection() {
        let span = Span::styled(format!("╱  {} ", tab.label), style);
        let width = span.width();
        let first = if i == 0 { ' ' } else { '▁' };
        let top_bar = iter::once(first)
          .chain(iter::repeat('▁').take(width - 1))
          .collect::<String>();
        (span, top_bar, '▔')
      } else if i > self.tabs.selection() {
        let span = Span::styled(format!(" {}  ╲", tab.label), style);
        let width = span.width();
        let last = if i + 1 == count { ' ' } else { '▁' };
        let top_bar = iter::repeat('▁')
          .take(width - 1)
          .chain(iter::once(last))
          .collect::<String>();
        (span, top_bar, '▔')
      } else {
        let span = Span::styled(format!("╱  {}  ╲", tab.label), selected);
        let width = span.width();
        let first = if i == 0 { ' ' } else { '▁' };
        let last = if i + 1 == count { ' ' } else { '▁' };
        let top_bar = iter::once(first)
          .chain(iter::repeat('▁').take(width - 2))
          .chain(iter::once(last))
          .collect::<String>();
        (span, top_bar, ' ')
      };

      let width = span.width();
      self.rendered_boundaries.push(
        self.rendered_boundaries.last().copied().unwrap_or_default()
          + width as u16,
      );
      let span_style = span.style;
      top.push(Span::styled(top_bar, span_style));
      middle.push(span);
      bottom.push(Span::styled(
        iter::repeat(under).take(width).collect::<String>(),
        span_style,
      ));
    }
    let rest_len = (args.rect.width as usize)
      .saturating_sub(bottom.iter().map(|s| s.width()).sum());
    bottom.push(Span::styled(
      iter::repeat('▔').take(rest_len).collect::<String>(),
      style,
    ));

    let bar = Rect::new(
      args.rect.x,
      args.rect.y,
      args.rect.width,
      BAR_HEIGHT.min(args.rect.height),
    );
    Paragraph::new(Text::from(vec![
      Spans::from(top),
      Spans::from(middle),
      Spans::from(bottom),
    ]))
    .render(bar, args.output);
  }
}

impl Component for TabFrame {
  fn wants_focus(&self) -> bool {
    true
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    let content = Self::content_rect(args.rect);

    if let Event::Mouse(MouseEvent {
      kind: MouseEventKind::Down(MouseButton::Left),
      column,
      row,
      ..
    }) = *args.event
    {
      if row >= args.rect.y && row < content.y {
        let new_index = match self.rendered_boundaries.binary_search(&column) {
          Err(index)
            if index == 0 || index == self.rendered_boundaries.len() =>
          {
            return;
          }
          Ok(index) => index,
          Err(index) => index - 1,
        };
        let new_index = new_index.min(self.tabs.len().saturating_sub(1));
        self.tabs.select(new_index);
        self.in_content = false;
        args.commands.claim();
        return;
      }
    }

    let in_content = self.in_content;
    let tab = match self.tabs.selected_mut() {
      Some(tab) => tab,
      None => return,
    };

    let deliver = match args.event {
      Event::Key(_) => in_content,
      Event::Mouse(_) => true,
    };
    if deliver {
      tab.component.process_event(&mut EventArgs {
        is_focused: args.is_focused && in_content,
        event: args.event,
        rect: content,
        platform: args.platform,
        commands: args.commands,
      });
      if let Some(id) = &tab.id {
        args.commands.stamp(id);
      }
      if args.commands.is_claimed() {
        if let Event::Mouse(_) = args.event {
          self.in_content = tab.component.wants_focus();
        }
        return;
      }
    }

    if !args.is_focused {
      return;
    }
    let k = match args.event {
      Event::Key(k) => k,
      _ => return,
    };

    let wants_focus = tab.component.wants_focus();
    let handled = if in_content {
      if k.code == KeyCode::Up {
        self.in_content = false;
        true
      } else {
        false
      }
    } else {
      match k.code {
        KeyCode::Left => self.switch(-1),
        KeyCode::Right => self.switch(1),
        KeyCode::Down | KeyCode::Enter if wants_focus => {
          self.in_content = true;
          true
        }
        _ => false,
      }
    };
    if handled {
      args.commands.claim();
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    self.render_bar(args);

    let is_focused = args.is_focused && self.in_content;
    if let Some(tab) = self.tabs.selected_mut() {
      tab.component.render(&mut RenderArgs {
        is_focused,
        rect: Self::content_rect(args.rect),
        output: args.output,
        frame_number: args.frame_number,
        time: args.time,
        style_sheet: args.style_sheet,
        resources: args.resources,
        platform: args.platform,
      });
    }
  }

  fn render_overlay(&mut self, args: &mut RenderArgs) {
    let is_focused = args.is_focused && self.in_content;
    if let Some(tab) = self.tabs.selected_mut() {
      tab.component.render_overlay(&mut RenderArgs {
        is_focused,
        rect: args.rect,
        output: args.output,
        frame_number: args.frame_number,
        time: args.time,
        style_sheet: args.style_sheet,
        resources: args.resources,
        platform: args.platform,
      });
    }
  }

  fn send(&mut self, id: &str, message: &Message) -> bool {
    self.tabs.iter_mut().any(|tab| {
      if tab.id.as_deref() == Some(id) {
        tab.component.receive(message)
      } else {
        tab.component.send(id, message)
      }
    })
  }

  fn find_mut(&mut self, id: &str) -> Option<&mut dyn Component> {
    for tab in self.tabs.iter_mut() {
      if tab.id.as_deref() == Some(id) {
        return Some(tab.component.as_mut());
      }
      if let Some(found) = tab.component.find_mut(id) {
        return Some(found);
      }
    }
    None
  }

  fn add_child(&mut self, node: &Node, component: Box<dyn Component>) {
    let label = node.attr_str("tab").unwrap_or(node.kind.as_str()).to_string();
    self.push(label, node.id.as_deref(), component);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::ui::component::button::Button;
  use crate::ui::component::label::Label;
  use crate::ui::component::testing::Harness;
  use crate::ui::component::Change;

  fn frame() -> TabFrame {
    let mut frame = TabFrame::default();
    frame.push("One", Some("one"), Box::new(Button::new("Go")));
    frame.push("Two", Some("two"), Box::new(Label::new("text")));
    frame
  }

  #[test]
  fn arrows_switch_tabs_from_the_bar() {
    let mut h = Harness::new();
    let mut frame = frame();
    h.render(&mut frame, 40, 10, true);

    assert!(h.key(&mut frame, KeyCode::Right).is_claimed());
    assert_eq!(frame.selection(), 1);
    // Labels take no focus, so Down stays on the bar.
    assert!(!h.key(&mut frame, KeyCode::Down).is_claimed());
    assert!(!frame.is_content_focused());
  }

  #[test]
  fn focus_moves_into_content_and_back() {
    let mut h = Harness::new();
    let mut frame = frame();
    h.render(&mut frame, 40, 10, true);

    h.key(&mut frame, KeyCode::Down);
    assert!(frame.is_content_focused());
    let mut commands = h.key(&mut frame, KeyCode::Enter);
    assert_eq!(commands.take_changes(), vec![("one".into(), Change::Clicked)]);

    h.key(&mut frame, KeyCode::Up);
    assert!(!frame.is_content_focused());
  }

  #[test]
  fn clicking_a_label_selects_it() {
    let mut h = Harness::new();
    let mut frame = frame();
    let buf = h.render(&mut frame, 40, 10, true);
    assert!(crate::ui::component::testing::contains(&buf, "Two"));

    // "╱  One  ╲" spans columns 2..11, " Two  ╲" starts right after.
    assert!(h.click(&mut frame, 13, 1).is_claimed());
    assert_eq!(frame.selection(), 1);
    h.click(&mut frame, 4, 1);
    assert_eq!(frame.selection(), 0);
  }

  #[test]
  fn messages_reach_any_tab() {
    let mut frame = frame();
    assert!(frame.send("two", &Message::SetText("new".into())));
    assert!(frame.find_mut("one").is_some());
    assert!(!frame.send("three", &Message::SetText("x".into())));
  }
}

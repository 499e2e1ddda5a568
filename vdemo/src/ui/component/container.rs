//! A box of components laid out along one axis.

use crossterm::event::KeyCode;
use crossterm::event::MouseButton;
use crossterm::event::MouseEventKind;

use serde_json::Value;

use tui::layout::Rect;
use tui::style::Color;
use tui::style::Style;

use vitrine::layout::Node;

use crate::ui::component::rect_contains;
use crate::ui::component::Component;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::component::Size;

/// The direction a [`Container`] lays its children out in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
  Row,
  Column,
}

/// A box of components.
///
/// Children along the main axis get either a fixed number of cells or a
/// share of the space left over by their fixed siblings. When fixed children
/// overflow a column, it scrolls to keep the focused child in view.
pub struct Container {
  axis: Axis,
  children: Vec<Child>,
  focus_idx: Option<usize>,
  padding: u16,
  spacing: u16,
  center: bool,
  scroll: u16,
}

struct Child {
  id: Option<String>,
  width: Option<u16>,
  height: Option<u16>,
  grow: Option<u16>,
  visible: bool,
  last_size: Rect,
  component: Box<dyn Component>,
}

impl Default for Container {
  fn default() -> Self {
    Self::new(Axis::Column)
  }
}

impl Container {
  pub fn new(axis: Axis) -> Self {
    Self {
      axis,
      children: Vec::new(),
      focus_idx: None,
      padding: 0,
      spacing: 0,
      center: false,
      scroll: 0,
    }
  }

  /// Appends a child, optionally with an id and a fixed main-axis size.
  #[cfg(test)]
  pub fn push(
    &mut self,
    id: Option<&str>,
    size: Option<Size>,
    component: Box<dyn Component>,
  ) -> &mut Self {
    let mut child = Child {
      id: id.map(str::to_string),
      width: None,
      height: None,
      grow: None,
      visible: true,
      last_size: Rect::default(),
      component,
    };
    match (size, self.axis) {
      (Some(Size::Fixed(n)), Axis::Column) => child.height = Some(n),
      (Some(Size::Fixed(n)), Axis::Row) => child.width = Some(n),
      (Some(Size::Flex(n)), _) => child.grow = Some(n),
      (None, _) => {}
    }
    self.children.push(child);
    self
  }

  /// Returns the index of the focused child.
  #[cfg(test)]
  pub fn focus_idx(&self) -> Option<usize> {
    self.focus_idx
  }

  fn is_vertical(&self) -> bool {
    self.axis == Axis::Column
  }

  fn main_size(&self, child: &Child) -> Size {
    let fixed = if self.is_vertical() {
      child.height
    } else {
      child.width
    };
    fixed
      .map(Size::Fixed)
      .or_else(|| child.grow.map(Size::Flex))
      .or_else(|| child.component.layout_hint(self.is_vertical()))
      .unwrap_or(Size::Flex(1))
  }

  fn can_focus(&self, i: usize) -> bool {
    let child = &self.children[i];
    child.visible && child.component.wants_focus()
  }

  fn fix_focus(&mut self) {
    let valid = self.focus_idx.map_or(false, |i| self.can_focus(i));
    if !valid {
      self.focus_idx = (0..self.children.len()).find(|&i| self.can_focus(i));
    }
  }

  fn move_focus(&mut self, delta: isize) -> bool {
    self.fix_focus();
    let old_val = match self.focus_idx {
      Some(i) => i,
      None => return false,
    };

    let mut new_val = old_val as isize;
    loop {
      new_val += delta;
      if new_val < 0 || new_val as usize >= self.children.len() {
        return false;
      }
      if self.can_focus(new_val as usize) {
        break;
      }
    }

    self.focus_idx = Some(new_val as usize);
    true
  }

  /// Computes the rectangle of every child within `rect`.
  fn layout(&mut self, rect: Rect) {
    let inner = Rect::new(
      rect.x + self.padding.min(rect.width / 2),
      rect.y + self.padding.min(rect.height / 2),
      rect.width.saturating_sub(self.padding * 2),
      rect.height.saturating_sub(self.padding * 2),
    );
    let vertical = self.is_vertical();
    let (avail, cross) = if vertical {
      (inner.height, inner.width)
    } else {
      (inner.width, inner.height)
    };

    let visible = self.children.iter().filter(|c| c.visible).count() as u16;
    let gaps = self.spacing * visible.saturating_sub(1);
    let sizes = self
      .children
      .iter()
      .map(|c| if c.visible { Some(self.main_size(c)) } else { None })
      .collect::<Vec<_>>();

    let fixed: u16 = sizes
      .iter()
      .map(|s| match s {
        Some(Size::Fixed(n)) => *n,
        _ => 0,
      })
      .sum();
    let weights: u16 = sizes
      .iter()
      .map(|s| match s {
        Some(Size::Flex(w)) => *w,
        _ => 0,
      })
      .sum();
    let leftover = avail.saturating_sub(fixed + gaps);

    let mut extents = Vec::with_capacity(sizes.len());
    let mut handed_out = 0;
    let mut weight_seen = 0;
    for size in &sizes {
      extents.push(match size {
        None => 0,
        Some(Size::Fixed(n)) => *n,
        Some(Size::Flex(w)) => {
          // Shares are cumulative, so rounding never loses a cell.
          weight_seen += *w;
          let upto = (leftover as u32 * weight_seen as u32
            / weights.max(1) as u32) as u16;
          let share = upto - handed_out;
          handed_out = upto;
          share
        }
      });
    }

    // Scroll so the focused child is fully in view.
    let total = extents.iter().sum::<u16>() + gaps;
    if total <= avail {
      self.scroll = 0;
    } else if let Some(f) = self.focus_idx {
      let start = extents[..f]
        .iter()
        .zip(&sizes[..f])
        .map(|(e, s)| if s.is_some() { e + self.spacing } else { 0 })
        .sum::<u16>();
      let end = start + extents[f];
      if start < self.scroll {
        self.scroll = start;
      } else if end > self.scroll + avail {
        self.scroll = end - avail;
      }
      self.scroll = self.scroll.min(total - avail);
    }

    let mut cursor = 0u16;
    for (i, child) in self.children.iter_mut().enumerate() {
      let extent = extents[i];
      if sizes[i].is_none() {
        child.last_size = Rect::default();
        continue;
      }

      let start = cursor as i32 - self.scroll as i32;
      cursor += extent + self.spacing;
      if start < 0 || start as u16 + extent > avail {
        child.last_size = Rect::default();
        continue;
      }

      let fixed_cross = if vertical { child.width } else { child.height };
      let cross_len = fixed_cross.map_or(cross, |n| n.min(cross));
      let cross_off = if self.center {
        (cross - cross_len) / 2
      } else {
        0
      };

      child.last_size = if vertical {
        Rect::new(
          inner.x + cross_off,
          inner.y + start as u16,
          cross_len,
          extent,
        )
      } else {
        Rect::new(
          inner.x + start as u16,
          inner.y + cross_off,
          extent,
          cross_len,
        )
      };
    }
  }
}

impl Component for Container {
  fn wants_focus(&self) -> bool {
    (0..self.children.len()).any(|i| self.can_focus(i))
  }

  fn layout_hint(&self, vertical: bool) -> Option<Size> {
    let mut sizes = self.children.iter().filter(|c| c.visible).map(|c| {
      if vertical {
        c.height.or_else(|| match c.component.layout_hint(true) {
          Some(Size::Fixed(n)) => Some(n),
          _ => None,
        })
      } else {
        c.width.or_else(|| match c.component.layout_hint(false) {
          Some(Size::Fixed(n)) => Some(n),
          _ => None,
        })
      }
    });

    let along = vertical == self.is_vertical();
    let mut total = 0u16;
    let mut count = 0u16;
    for size in &mut sizes {
      let n = size?;
      total = if along { total + n } else { total.max(n) };
      count += 1;
    }
    if count == 0 {
      return None;
    }
    if along {
      total += self.spacing * (count - 1);
    }
    Some(Size::Fixed(total + self.padding * 2))
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    self.fix_focus();

    for i in 0..self.children.len() {
      let child = &self.children[i];
      if !child.visible
        || child.last_size.width == 0
        || child.last_size.height == 0
      {
        continue;
      }

      match args.event {
        Event::Key(_) => {
          // Keys only go to the focused child.
          if self.focus_idx != Some(i) {
            continue;
          }
        }
        Event::Mouse(m) => {
          if !rect_contains(child.last_size, m.column, m.row) {
            continue;
          }
          if let MouseEventKind::Down(MouseButton::Left) = m.kind {
            if self.can_focus(i) {
              self.focus_idx = Some(i);
            }
          }
        }
      }

      let child = &mut self.children[i];
      child.component.process_event(&mut EventArgs {
        is_focused: args.is_focused && self.focus_idx == Some(i),
        event: args.event,
        rect: child.last_size,
        platform: args.platform,
        commands: args.commands,
      });
      if let Some(id) = &child.id {
        args.commands.stamp(id);
      }
      if args.commands.is_claimed() {
        return;
      }
    }

    if !args.is_focused {
      return;
    }

    let delta = match (self.axis, args.event) {
      (Axis::Column, Event::Key(k)) if k.code == KeyCode::Up => -1,
      (Axis::Column, Event::Key(k)) if k.code == KeyCode::Down => 1,
      (Axis::Row, Event::Key(k)) if k.code == KeyCode::Left => -1,
      (Axis::Row, Event::Key(k)) if k.code == KeyCode::Right => 1,
      (Axis::Column, Event::Mouse(m)) if m.kind == MouseEventKind::ScrollUp => {
        -1
      }
      (Axis::Column, Event::Mouse(m))
        if m.kind == MouseEventKind::ScrollDown =>
      {
        1
      }
      _ => return,
    };
    if self.move_focus(delta) {
      args.commands.claim();
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    self.fix_focus();
    self.layout(args.rect);

    let debug = args.platform.debugging_view();
    for (i, child) in self.children.iter_mut().enumerate() {
      let rect = child.last_size;
      if rect.width == 0 || rect.height == 0 {
        continue;
      }

      child.component.render(&mut RenderArgs {
        is_focused: args.is_focused && self.focus_idx == Some(i),
        rect,
        output: args.output,
        frame_number: args.frame_number,
        time: args.time,
        style_sheet: args.style_sheet,
        resources: args.resources,
        platform: args.platform,
      });

      if debug {
        let style = Style::default().fg(Color::Red);
        args.output.get_mut(rect.x, rect.y).set_symbol("┌").set_style(style);
        args
          .output
          .get_mut(rect.x + rect.width - 1, rect.y + rect.height - 1)
          .set_symbol("┘")
          .set_style(style);
      }
    }
  }

  fn render_overlay(&mut self, args: &mut RenderArgs) {
    for (i, child) in self.children.iter_mut().enumerate() {
      if !child.visible {
        continue;
      }
      child.component.render_overlay(&mut RenderArgs {
        is_focused: args.is_focused && self.focus_idx == Some(i),
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
    for child in &mut self.children {
      if child.id.as_deref() == Some(id) {
        if let Message::SetVisible(visible) = message {
          child.visible = *visible;
          return true;
        }
        return child.component.receive(message);
      }
      if child.component.send(id, message) {
        return true;
      }
    }
    false
  }

  fn find_mut(&mut self, id: &str) -> Option<&mut dyn Component> {
    for child in &mut self.children {
      if child.id.as_deref() == Some(id) {
        return Some(child.component.as_mut());
      }
      if let Some(found) = child.component.find_mut(id) {
        return Some(found);
      }
    }
    None
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    match (name, value) {
      ("axis", Value::String(s)) if s == "row" => self.axis = Axis::Row,
      ("axis", Value::String(s)) if s == "column" => self.axis = Axis::Column,
      ("padding", v) if v.is_u64() => {
        self.padding = v.as_u64().unwrap_or(0) as u16
      }
      ("spacing", v) if v.is_u64() => {
        self.spacing = v.as_u64().unwrap_or(0) as u16
      }
      ("align", Value::String(s)) => self.center = s == "center",
      _ => return false,
    }
    true
  }

  fn add_child(&mut self, node: &Node, component: Box<dyn Component>) {
    let attr = |name| node.attr_i64(name).map(|n| n.max(0) as u16);
    self.children.push(Child {
      id: node.id.clone(),
      width: attr("width"),
      height: attr("height"),
      grow: attr("grow"),
      visible: node.attr_bool("visible").unwrap_or(true),
      last_size: Rect::default(),
      component,
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crossterm::event::KeyEvent;

  use crate::ui::component::button::Button;
  use crate::ui::component::label::Label;
  use crate::ui::component::testing;
  use crate::ui::component::Change;

  fn column() -> Container {
    let mut c = Container::new(Axis::Column);
    c.push(None, Some(Size::Fixed(1)), Box::new(Label::new("title")));
    c.push(Some("a"), Some(Size::Fixed(3)), Box::new(Button::new("A")));
    c.push(Some("b"), Some(Size::Fixed(3)), Box::new(Button::new("B")));
    c.push(Some("c"), Some(Size::Fixed(3)), Box::new(Button::new("C")));
    c
  }

  #[test]
  fn focus_skips_unfocusable_children() {
    let mut c = column();
    testing::render(&mut c, 20, 10, true);
    assert_eq!(c.focus_idx(), Some(1));

    testing::key(&mut c, KeyCode::Down);
    assert_eq!(c.focus_idx(), Some(2));
    testing::key(&mut c, KeyCode::Up);
    testing::key(&mut c, KeyCode::Up);
    assert_eq!(c.focus_idx(), Some(1));
  }

  #[test]
  fn hidden_children_lose_focus_and_space() {
    let mut c = column();
    testing::render(&mut c, 20, 10, true);
    assert!(c.send("a", &Message::SetVisible(false)));
    testing::render(&mut c, 20, 10, true);

    assert_eq!(c.focus_idx(), Some(2));
    assert_eq!(c.children[2].last_size.y, 1);
  }

  #[test]
  fn changes_are_stamped_with_child_ids() {
    let mut c = column();
    testing::render(&mut c, 20, 10, true);
    testing::key(&mut c, KeyCode::Down);
    let mut commands = testing::key(&mut c, KeyCode::Enter);

    assert_eq!(
      commands.take_changes(),
      vec![("b".to_string(), Change::Clicked)]
    );
  }

  #[test]
  fn overflowing_columns_scroll_to_focus() {
    let mut c = column();
    testing::render(&mut c, 20, 5, true);
    assert_eq!(c.children[1].last_size.y, 1);
    assert_eq!(c.children[2].last_size.height, 0);

    testing::key(&mut c, KeyCode::Down);
    testing::key(&mut c, KeyCode::Down);
    testing::render(&mut c, 20, 5, true);
    assert_eq!(c.focus_idx(), Some(3));
    assert_eq!(c.children[3].last_size, Rect::new(0, 2, 20, 3));
  }

  #[test]
  fn flex_children_share_leftover_space() {
    let mut c = Container::new(Axis::Row);
    c.push(None, Some(Size::Fixed(4)), Box::new(Label::new("x")));
    c.push(None, Some(Size::Flex(1)), Box::new(Label::new("y")));
    c.push(None, Some(Size::Flex(2)), Box::new(Label::new("z")));
    testing::render(&mut c, 13, 1, false);

    let widths = c
      .children
      .iter()
      .map(|c| c.last_size.width)
      .collect::<Vec<_>>();
    assert_eq!(widths, vec![4, 3, 6]);
  }

  #[test]
  fn unfocused_columns_keep_their_focus() {
    let mut c = column();
    testing::render(&mut c, 20, 10, true);
    let mut commands = testing::event(
      &mut c,
      Event::Key(KeyEvent::from(KeyCode::Down)),
      false,
    );

    assert!(!commands.is_claimed());
    assert!(commands.take_changes().is_empty());
    assert_eq!(c.focus_idx(), Some(1));
  }
}

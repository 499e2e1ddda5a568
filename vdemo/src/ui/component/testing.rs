//! Helpers for driving components in tests.

use std::time::Duration;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use tui::buffer::Buffer;
use tui::layout::Rect;

use unicode_width::UnicodeWidthStr;

use vitrine::settings::HeadlessPlatform;

use crate::ui::component::CommandBuffer;
use crate::ui::component::Component;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::RenderArgs;
use crate::ui::component::StyleSheet;
use crate::ui::resources::Resources;

/// A platform and resources to drive a component against.
pub struct Harness {
  pub platform: HeadlessPlatform,
  pub resources: Resources,
  pub time: Duration,
  frame_number: usize,
  last_rect: Rect,
}

impl Harness {
  pub fn new() -> Self {
    Self {
      platform: HeadlessPlatform::default(),
      resources: Resources::builtin().unwrap(),
      time: Duration::from_secs(0),
      frame_number: 0,
      last_rect: Rect::new(0, 0, 40, 20),
    }
  }

  /// Renders `c` into a fresh `width` by `height` buffer.
  pub fn render(
    &mut self,
    c: &mut dyn Component,
    width: u16,
    height: u16,
    is_focused: bool,
  ) -> Buffer {
    let rect = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(rect);
    let mut args = RenderArgs {
      is_focused,
      rect,
      output: &mut buf,
      frame_number: self.frame_number,
      time: self.time,
      style_sheet: StyleSheet::default(),
      resources: &self.resources,
      platform: &self.platform,
    };
    c.render(&mut args);
    c.render_overlay(&mut args);
    self.frame_number += 1;
    self.last_rect = rect;
    buf
  }

  /// Feeds `event` to `c`, returning whatever it asked for.
  pub fn event(
    &mut self,
    c: &mut dyn Component,
    event: Event,
    is_focused: bool,
  ) -> CommandBuffer {
    let mut commands = CommandBuffer::new();
    c.process_event(&mut EventArgs {
      is_focused,
      event: &event,
      rect: self.last_rect,
      platform: &mut self.platform,
      commands: &mut commands,
    });
    commands
  }

  pub fn key(&mut self, c: &mut dyn Component, code: KeyCode) -> CommandBuffer {
    self.event(c, Event::Key(KeyEvent::from(code)), true)
  }

  /// Presses the left mouse button over `x` and `y`.
  pub fn click(&mut self, c: &mut dyn Component, x: u16, y: u16) -> CommandBuffer {
    let down = Event::Mouse(MouseEvent {
      kind: MouseEventKind::Down(MouseButton::Left),
      column: x,
      row: y,
      modifiers: KeyModifiers::NONE,
    });
    self.event(c, down, true)
  }
}

pub fn render(
  c: &mut dyn Component,
  width: u16,
  height: u16,
  is_focused: bool,
) -> Buffer {
  Harness::new().render(c, width, height, is_focused)
}

pub fn event(c: &mut dyn Component, e: Event, is_focused: bool) -> CommandBuffer {
  Harness::new().event(c, e, is_focused)
}

pub fn key(c: &mut dyn Component, code: KeyCode) -> CommandBuffer {
  Harness::new().key(c, code)
}

pub fn click(c: &mut dyn Component, x: u16, y: u16) -> CommandBuffer {
  Harness::new().click(c, x, y)
}

/// Returns row `y` of `buf` as a string, skipping the cells that wide
/// characters cover.
pub fn line(buf: &Buffer, y: u16) -> String {
  let area = buf.area();
  let mut out = String::new();
  let mut covered = 0;
  for x in area.x..area.x + area.width {
    if covered > 0 {
      covered -= 1;
      continue;
    }
    let symbol = buf.get(x, y).symbol.as_str();
    covered = symbol.width().saturating_sub(1);
    out.push_str(symbol);
  }
  out
}

/// Returns whether any row of `buf` contains `needle`.
pub fn contains(buf: &Buffer, needle: &str) -> bool {
  let area = buf.area();
  (area.y..area.y + area.height).any(|y| line(buf, y).contains(needle))
}

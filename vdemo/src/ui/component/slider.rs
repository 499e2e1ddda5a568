//! Sliders, bare and in list cells.

use crossterm::event::KeyCode;
use crossterm::event::MouseButton;
use crossterm::event::MouseEventKind;

use serde_json::Value;

use tui::layout::Rect;
use tui::widgets::Widget;

use crate::ui::component::cell;
use crate::ui::component::rect_contains;
use crate::ui::component::value_to_string;
use crate::ui::component::Change;
use crate::ui::component::Component;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::component::Size;
use crate::ui::widgets::Track;

/// A knob on a track, holding a value in `[0, 1]`. Reports
/// [`Change::Progress`] whenever the user moves it.
#[derive(Clone, Debug)]
pub struct Slider {
  progress: f32,
  step: f32,
}

impl Default for Slider {
  fn default() -> Self {
    Self::new(0.0)
  }
}

impl Slider {
  pub fn new(progress: f32) -> Self {
    Self {
      progress: progress.max(0.0).min(1.0),
      step: 0.05,
    }
  }

  pub fn set_progress(&mut self, progress: f32) {
    self.progress = progress.max(0.0).min(1.0);
  }

  /// Handles an event against a track drawn at `track`.
  fn handle(&mut self, args: &mut EventArgs, track: Rect) {
    let new = match args.event {
      Event::Key(k) if args.is_focused => match k.code {
        KeyCode::Left => self.progress - self.step,
        KeyCode::Right => self.progress + self.step,
        _ => return,
      },
      Event::Mouse(m)
        if m.kind == MouseEventKind::Down(MouseButton::Left)
          || m.kind == MouseEventKind::Drag(MouseButton::Left) =>
      {
        if !rect_contains(track, m.column, m.row) || track.width < 2 {
          return;
        }
        (m.column - track.x) as f32 / (track.width - 1) as f32
      }
      _ => return,
    };

    args.commands.claim();
    let old = self.progress;
    self.set_progress(new);
    if self.progress != old {
      args.commands.emit(Change::Progress(self.progress));
    }
  }

  fn apply(&mut self, name: &str, value: &Value) -> bool {
    match (name, value.as_f64()) {
      ("progress", Some(p)) => self.set_progress(p as f32),
      ("step", Some(s)) if s > 0.0 => self.step = s as f32,
      _ => return false,
    }
    true
  }
}

impl Component for Slider {
  fn wants_focus(&self) -> bool {
    true
  }

  fn layout_hint(&self, vertical: bool) -> Option<Size> {
    if vertical {
      Some(Size::Fixed(1))
    } else {
      None
    }
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    let rect = args.rect;
    self.handle(args, rect);
  }

  fn render(&mut self, args: &mut RenderArgs) {
    let sheet = &args.style_sheet;
    let filled = if args.is_focused {
      sheet.highlight
    } else {
      sheet.caption
    };
    Track::new(self.progress)
      .style(sheet.dim)
      .filled_style(filled)
      .render(args.rect, args.output);
  }

  fn receive(&mut self, message: &Message) -> bool {
    match message {
      Message::SetProgress(p) => self.set_progress(*p),
      _ => return false,
    }
    true
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    self.apply(name, value)
  }
}

/// A list cell with a title, a detail text and a slider underneath.
#[derive(Clone, Debug, Default)]
pub struct SliderCell {
  title: String,
  detail: String,
  slider: Slider,
}

impl SliderCell {
  fn track(rect: Rect) -> Rect {
    Rect::new(
      rect.x + 2,
      rect.y + 1,
      rect.width.saturating_sub(4),
      rect.height.min(1),
    )
  }
}

impl Component for SliderCell {
  fn wants_focus(&self) -> bool {
    true
  }

  fn layout_hint(&self, vertical: bool) -> Option<Size> {
    if vertical {
      Some(Size::Fixed(3))
    } else {
      None
    }
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    let track = Self::track(args.rect);
    self.slider.handle(args, track);
  }

  fn render(&mut self, args: &mut RenderArgs) {
    cell::draw_cell(args, &self.title, Some(self.detail.as_str()));
    let track = Self::track(args.rect);
    if args.rect.height < 2 {
      return;
    }
    self.slider.render(&mut RenderArgs {
      is_focused: args.is_focused,
      rect: track,
      output: args.output,
      frame_number: args.frame_number,
      time: args.time,
      style_sheet: args.style_sheet,
      resources: args.resources,
      platform: args.platform,
    });
  }

  fn receive(&mut self, message: &Message) -> bool {
    match message {
      Message::SetTitle(t) => self.title = t.clone(),
      Message::SetDetail(d) => self.detail = d.clone(),
      Message::SetProgress(p) => self.slider.set_progress(*p),
      _ => return false,
    }
    true
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    match name {
      "title" | "detail" => match value_to_string(value) {
        Some(text) if name == "title" => self.title = text,
        Some(text) => self.detail = text,
        None => return false,
      },
      _ => return self.slider.apply(name, value),
    }
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::ui::component::testing;

  fn progress_of(commands: &mut crate::ui::component::CommandBuffer) -> f32 {
    commands.stamp("s");
    match commands.take_changes().pop() {
      Some((_, Change::Progress(p))) => p,
      other => panic!("expected progress, got {:?}", other),
    }
  }

  #[test]
  fn arrows_step_and_clamp() {
    let mut slider = Slider::new(0.98);
    let mut commands = testing::key(&mut slider, KeyCode::Right);
    assert_eq!(progress_of(&mut commands), 1.0);

    // Already at the end: claimed, but nothing changed.
    let mut commands = testing::key(&mut slider, KeyCode::Right);
    assert!(commands.is_claimed());
    assert!(commands.take_changes().is_empty());

    let mut commands = testing::key(&mut slider, KeyCode::Left);
    assert!((progress_of(&mut commands) - 0.95).abs() < 1e-6);
  }

  #[test]
  fn clicking_the_track_jumps() {
    let mut cell = SliderCell::default();
    cell.receive(&Message::SetTitle("亮度".into()));
    let mut h = testing::Harness::new();
    h.render(&mut cell, 24, 3, true);

    // The track spans columns 2..22 on the second row.
    let mut commands = h.click(&mut cell, 12, 1);
    let p = progress_of(&mut commands);
    assert!((p - 10.0 / 19.0).abs() < 1e-6);
    assert!(!h.click(&mut cell, 12, 0).is_claimed());
  }
}

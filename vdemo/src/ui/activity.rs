//! Full-screen activities.

use tui::layout::Rect;

use vitrine::settings::Platform;
use vitrine::Error;

use crate::ui::component::CommandBuffer;
use crate::ui::component::Component;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::RenderArgs;
use crate::ui::inflate::Inflater;

/// The layout of the first activity.
pub const MAIN: &str = "activity/main";

/// One screen's worth of UI: a component tree that owns the whole terminal
/// while it is on top of the stack.
pub struct Activity {
  root: Box<dyn Component>,
  last_size: Rect,
}

impl Activity {
  pub fn new(root: Box<dyn Component>) -> Self {
    Self {
      root,
      last_size: Rect::default(),
    }
  }

  /// Inflates the tabbed main activity.
  pub fn main(inflater: &Inflater) -> Result<Self, Error> {
    inflater.inflate_layout(MAIN, &["tabs"]).map(Self::new)
  }

  /// Feeds `event` to the activity, using the area it was last drawn in.
  pub fn process_event(
    &mut self,
    event: &Event,
    platform: &mut dyn Platform,
    commands: &mut CommandBuffer,
  ) {
    self.root.process_event(&mut EventArgs {
      is_focused: true,
      event,
      rect: self.last_size,
      platform,
      commands,
    });
  }

  pub fn render(&mut self, args: &mut RenderArgs) {
    self.last_size = args.rect;
    self.root.render(args);
    self.root.render_overlay(args);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::ui::component::testing;
  use crate::ui::component::testing::Harness;
  use crate::ui::views;

  #[test]
  fn the_main_activity_shows_every_tab() {
    let mut h = Harness::new();
    let views = views::all().unwrap();
    let mut main = Activity::main(&Inflater::new(&h.resources, &views)).unwrap();
    let buf = h.render(main.root.as_mut(), 100, 40, true);
    for tab in &["基本组件", "设置", "文本", "变换", "回收列表"] {
      assert!(testing::contains(&buf, tab), "missing tab {}", tab);
    }
  }

  #[test]
  fn rendering_remembers_the_area() {
    let mut h = Harness::new();
    let views = views::all().unwrap();
    let mut main = Activity::main(&Inflater::new(&h.resources, &views)).unwrap();
    assert_eq!(main.last_size, Rect::default());

    let rect = Rect::new(0, 0, 80, 30);
    let mut buf = tui::buffer::Buffer::empty(rect);
    main.render(&mut RenderArgs {
      is_focused: true,
      rect,
      output: &mut buf,
      frame_number: 0,
      time: std::time::Duration::from_secs(0),
      style_sheet: Default::default(),
      resources: &h.resources,
      platform: &h.platform,
    });
    assert_eq!(main.last_size, rect);
  }
}

//! A label whose size, alignment and wrapping are all up to the user.

use tui::layout::Alignment;

use vitrine::Error;

use crate::ui::component::label::VerticalAlign;
use crate::ui::component::recycler::px_to_rows;
use crate::ui::component::Change;
use crate::ui::component::Component;
use crate::ui::component::Empty;
use crate::ui::component::EventArgs;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::inflate::Inflater;
use crate::ui::tab::dispatch;

const LAYOUT: &str = "tabs/text_test";

const IDS: &[&str] = &[
  "label",
  "width",
  "height",
  "vertical",
  "horizontal",
  "singleLine",
];

/// The largest width or height the sliders reach, in layout pixels.
const MAX_PX: f32 = 400.0;

/// How many layout pixels one terminal column stands for.
const PIXELS_PER_COLUMN: u32 = 10;

const VERTICAL: &[VerticalAlign] = &[
  VerticalAlign::Baseline,
  VerticalAlign::Top,
  VerticalAlign::Center,
  VerticalAlign::Bottom,
];

const HORIZONTAL: &[Alignment] =
  &[Alignment::Left, Alignment::Center, Alignment::Right];

/// Slider detail for a size in pixels.
fn size_detail(px: u32) -> String {
  if px == 0 {
    "auto".to_string()
  } else {
    px.to_string()
  }
}

pub struct TextTestTab {
  root: Box<dyn Component>,
}

impl Default for TextTestTab {
  fn default() -> Self {
    Self {
      root: Box::new(Empty),
    }
  }
}

impl TextTestTab {
  fn set_width(&mut self, progress: f32) {
    let px = (progress * MAX_PX).max(0.0) as u32;
    let width = if px == 0 {
      None
    } else {
      Some((px / PIXELS_PER_COLUMN).max(1) as u16)
    };
    self.root.send("label", &Message::SetWidth(width));
    self.root.send("width", &Message::SetDetail(size_detail(px)));
  }

  fn set_height(&mut self, progress: f32) {
    let px = (progress * MAX_PX).max(0.0) as u32;
    let height = if px == 0 {
      None
    } else {
      Some(px_to_rows(px) as u16)
    };
    // Single-line only matters while the label sizes itself.
    self
      .root
      .send("singleLine", &Message::SetVisible(height.is_none()));
    self.root.send("label", &Message::SetHeight(height));
    self.root.send("height", &Message::SetDetail(size_detail(px)));
  }

  fn on_change(&mut self, id: &str, change: Change) {
    let message = match (id, change) {
      ("width", Change::Progress(p)) => return self.set_width(p),
      ("height", Change::Progress(p)) => return self.set_height(p),
      ("vertical", Change::Selected(i)) => match VERTICAL.get(i) {
        Some(&a) => Message::SetVerticalAlign(a),
        None => return,
      },
      ("horizontal", Change::Selected(i)) => match HORIZONTAL.get(i) {
        Some(&a) => Message::SetHorizontalAlign(a),
        None => return,
      },
      ("singleLine", Change::Toggled(on)) => Message::SetSingleLine(on),
      _ => return,
    };
    self.root.send("label", &message);
  }
}

impl Component for TextTestTab {
  delegate_to_root!();

  fn process_event(&mut self, args: &mut EventArgs) {
    for (id, change) in dispatch(self.root.as_mut(), args) {
      self.on_change(&id, change);
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    self.root.render(args)
  }

  fn render_overlay(&mut self, args: &mut RenderArgs) {
    self.root.render_overlay(args)
  }

  fn inflate(&mut self, inflater: &Inflater) -> Result<(), Error> {
    self.root = inflater.inflate_layout(LAYOUT, IDS)?;

    self.root.send("width", &Message::SetProgress(1.0));
    self.set_width(1.0);
    self.root.send("height", &Message::SetProgress(0.0));
    self.set_height(0.0);
    self.root.send("vertical", &Message::SetSelected(2));
    self.on_change("vertical", Change::Selected(2));
    self.root.send("horizontal", &Message::SetSelected(0));
    self.on_change("horizontal", Change::Selected(0));
    self.root.send("singleLine", &Message::SetToggled(false));
    self.on_change("singleLine", Change::Toggled(false));
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::ui::component::testing;
  use crate::ui::component::testing::Harness;
  use crate::ui::views;

  fn tab(h: &Harness) -> TextTestTab {
    let views = views::all().unwrap();
    let mut tab = TextTestTab::default();
    tab.inflate(&Inflater::new(&h.resources, &views)).unwrap();
    tab
  }

  #[test]
  fn size_details_say_auto_at_zero() {
    assert_eq!(size_detail(0), "auto");
    assert_eq!(size_detail(400), "400");
  }

  #[test]
  fn starts_full_width_and_auto_height() {
    let mut h = Harness::new();
    let mut tab = tab(&h);
    let buf = h.render(&mut tab, 60, 40, true);
    assert!(testing::contains(&buf, "400"));
    assert!(testing::contains(&buf, "auto"));
    assert!(testing::contains(&buf, "singleLine"));
  }

  #[test]
  fn a_fixed_height_hides_the_single_line_switch() {
    let mut h = Harness::new();
    let mut tab = tab(&h);
    tab.on_change("height", Change::Progress(0.5));
    let buf = h.render(&mut tab, 60, 40, true);
    assert!(testing::contains(&buf, "200"));
    assert!(!testing::contains(&buf, "singleLine"));

    tab.on_change("height", Change::Progress(0.0));
    let buf = h.render(&mut tab, 60, 40, true);
    assert!(testing::contains(&buf, "singleLine"));
  }
}

//! An image with a caption that only shows while the image has focus.

use serde_json::Value;

use vitrine::Error;

use crate::ui::component::button::is_activation;
use crate::ui::component::value_to_string;
use crate::ui::component::Change;
use crate::ui::component::Component;
use crate::ui::component::Empty;
use crate::ui::component::EventArgs;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::inflate::Inflater;

const LAYOUT: &str = "views/captioned_image";

/// A focusable image, captioned by a label underneath it.
pub struct CaptionedImage {
  root: Box<dyn Component>,
}

impl Default for CaptionedImage {
  fn default() -> Self {
    Self {
      root: Box::new(Empty),
    }
  }
}

impl Component for CaptionedImage {
  fn wants_focus(&self) -> bool {
    true
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    if is_activation(args.event, args.rect, args.is_focused) {
      args.commands.emit(Change::Clicked);
      args.commands.claim();
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    self
      .root
      .send("label", &Message::SetVisible(args.is_focused));
    // The inner tree has nothing focusable; the caption is the only sign of
    // focus.
    self.root.render(&mut RenderArgs {
      is_focused: false,
      rect: args.rect,
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
      Message::SetImage(_) => self.root.send("image", message),
      Message::SetText(_) => self.root.send("label", message),
      _ => false,
    }
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    match name {
      "image" => match value.as_str() {
        Some(path) => self
          .root
          .send("image", &Message::SetImage(path.to_string())),
        None => false,
      },
      "caption" => match value_to_string(value) {
        Some(text) => self.root.send("label", &Message::SetText(text)),
        None => false,
      },
      _ => false,
    }
  }

  fn inflate(&mut self, inflater: &Inflater) -> Result<(), Error> {
    self.root = inflater.inflate_layout(LAYOUT, &["image", "label"])?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crossterm::event::KeyCode;

  use crate::ui::component::testing;
  use crate::ui::component::testing::Harness;
  use crate::ui::views;

  fn captioned(caption: &str) -> CaptionedImage {
    let h = Harness::new();
    let views = views::all().unwrap();
    let inflater = Inflater::new(&h.resources, &views);

    let mut view = CaptionedImage::default();
    view.inflate(&inflater).unwrap();
    assert!(view.apply_attribute("caption", &Value::from(caption)));
    assert!(view.apply_attribute("image", &Value::from("img/nope.png")));
    view
  }

  #[test]
  fn caption_follows_focus() {
    let mut view = captioned("Caption");
    let buf = testing::render(&mut view, 20, 10, false);
    assert!(!testing::contains(&buf, "Caption"));

    let buf = testing::render(&mut view, 20, 10, true);
    assert!(testing::contains(&buf, "Caption"));

    let buf = testing::render(&mut view, 20, 10, false);
    assert!(!testing::contains(&buf, "Caption"));
  }

  #[test]
  fn enter_clicks() {
    let mut view = captioned("Caption");
    let mut commands = testing::key(&mut view, KeyCode::Enter);
    assert!(commands.is_claimed());
    commands.stamp("pic");
    assert_eq!(
      commands.take_changes(),
      vec![("pic".to_string(), Change::Clicked)]
    );
  }
}

//! Components for displaying images rendered as text.

use serde_json::Value;

use tui::buffer::Buffer;
use tui::layout::Alignment;
use tui::layout::Rect;
use tui::style::Color;
use tui::style::Modifier;
use tui::style::Style;
use tui::text::Span;
use tui::text::Spans;
use tui::text::Text;
use tui::widgets::Block;
use tui::widgets::Borders;
use tui::widgets::Paragraph;
use tui::widgets::Widget;

use crate::ui::component::label::truncate;
use crate::ui::component::Component;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::resources::Resources;

/// How many times taller than wide a terminal cell is.
const FONT_HEIGHT: f64 = 2.1;

/// Rasterizes `image` to fit within a `width` by `height` block of cells.
pub fn rasterize(
  image: &image::RgbaImage,
  width: u16,
  height: u16,
) -> Text<'static> {
  if width == 0 || height == 0 || image.width() == 0 || image.height() == 0 {
    return Text::default();
  }

  // NOTE: Wider rectangles have a smaller aspect ratio, while taller
  // rectangles have a greater one.
  let rect_aspect = height as f64 / width as f64;
  let image_aspect = image.height() as f64 / image.width() as f64;

  // If the draw rectangle is wider or shorter than the image, we scale
  // according to the height ratio; otherwise, we use the width.
  let (width, height) = if rect_aspect * FONT_HEIGHT < image_aspect {
    let scale_factor = height as f64 / image.height() as f64;
    let width = (image.width() as f64 * scale_factor * FONT_HEIGHT) as u32;
    (width.max(1), height as u32)
  } else {
    let scale_factor = width as f64 / image.width() as f64;
    let height = (image.height() as f64 * scale_factor / FONT_HEIGHT) as u32;
    (width as u32, height.max(1))
  };

  // Recolor the transparent parts black instead of white, so they do not
  // bleed into the edges when resizing.
  let mut image = image.clone();
  for image::Rgba([r, g, b, a]) in image.pixels_mut() {
    if *a == 0 {
      *r = 0;
      *g = 0;
      *b = 0;
    }
  }

  // The nearest-neighbor resize is only used for alpha masking.
  let mask = image::imageops::resize(
    &image,
    width,
    height,
    image::imageops::FilterType::Nearest,
  );
  let mut resized = image::imageops::resize(
    &image,
    width,
    height,
    image::imageops::FilterType::Triangle,
  );
  for (image::Rgba([_, _, _, a]), image::Rgba([_, _, _, out])) in
    mask.pixels().zip(resized.pixels_mut())
  {
    *out = *a;
  }

  let mut text = Text::default();
  for row in resized.rows() {
    let mut spans = Vec::new();
    for &image::Rgba([r, g, b, a]) in row {
      let s = if a != 0 { "@" } else { " " };
      spans.push(Span::styled(
        s,
        Style::default()
          .fg(Color::Rgb(r, g, b))
          .add_modifier(Modifier::BOLD),
      ));
    }
    text.lines.push(Spans::from(spans));
  }
  text
}

/// Draws rasterized `text` centered in `rect`.
pub fn draw_centered(text: &Text<'static>, rect: Rect, buf: &mut Buffer) {
  let height = (text.lines.len() as u16).min(rect.height);
  let dy = (rect.height - height) / 2;
  Paragraph::new(text.clone())
    .alignment(Alignment::Center)
    .render(Rect::new(rect.x, rect.y + dy, rect.width, height), buf);
}

/// Draws the frame shown in place of an image that could not be loaded.
pub fn draw_placeholder(
  path: &str,
  rect: Rect,
  buf: &mut Buffer,
  style: Style,
) {
  if rect.width < 2 || rect.height < 2 {
    return;
  }
  Block::default()
    .borders(Borders::ALL)
    .border_style(style)
    .render(rect, buf);

  let name = path.rsplit('/').next().unwrap_or(path);
  let name = truncate(name, rect.width.saturating_sub(2) as usize);
  let width = unicode_width::UnicodeWidthStr::width(name.as_str()) as u16;
  buf.set_stringn(
    rect.x + (rect.width - width) / 2,
    rect.y + rect.height / 2,
    &name,
    width as usize,
    style,
  );
}

/// Remembers the rasterization of an image for the last size it was drawn
/// at.
#[derive(Clone, Debug, Default)]
pub struct Raster {
  path: String,
  cache: Option<(u16, u16, Option<Text<'static>>)>,
}

impl Raster {
  #[cfg(test)]
  pub fn new(path: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      cache: None,
    }
  }

  #[cfg(test)]
  pub fn path(&self) -> &str {
    &self.path
  }

  pub fn set_path(&mut self, path: impl Into<String>) {
    let path = path.into();
    if path != self.path {
      self.path = path;
      self.cache = None;
    }
  }

  pub fn draw(
    &mut self,
    resources: &Resources,
    rect: Rect,
    buf: &mut Buffer,
    placeholder: Style,
  ) {
    if rect.width == 0 || rect.height == 0 || self.path.is_empty() {
      return;
    }

    let stale = match &self.cache {
      Some((w, h, _)) => *w != rect.width || *h != rect.height,
      None => true,
    };
    if stale {
      let text = resources
        .image(&self.path)
        .map(|image| rasterize(&image, rect.width, rect.height));
      self.cache = Some((rect.width, rect.height, text));
    }

    match &self.cache {
      Some((_, _, Some(text))) => draw_centered(text, rect, buf),
      _ => draw_placeholder(&self.path, rect, buf, placeholder),
    }
  }
}

/// An image loaded from the resource directory.
#[derive(Clone, Debug, Default)]
pub struct Image {
  raster: Raster,
}

impl Image {
  #[cfg(test)]
  pub fn new(path: impl Into<String>) -> Self {
    Self {
      raster: Raster::new(path),
    }
  }

  #[cfg(test)]
  pub fn path(&self) -> &str {
    self.raster.path()
  }
}

impl Component for Image {
  fn render(&mut self, args: &mut RenderArgs) {
    let style = args.style_sheet.dim;
    self.raster.draw(args.resources, args.rect, args.output, style);
  }

  fn receive(&mut self, message: &Message) -> bool {
    match message {
      Message::SetImage(path) => self.raster.set_path(path.clone()),
      _ => return false,
    }
    true
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    match (name, value.as_str()) {
      ("image", Some(path)) => self.raster.set_path(path),
      _ => return false,
    }
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::ui::component::testing;

  #[test]
  fn opaque_pixels_become_glyphs() {
    let mut image = image::RgbaImage::new(4, 4);
    for (x, _, px) in image.enumerate_pixels_mut() {
      *px = if x < 2 {
        image::Rgba([255, 0, 0, 255])
      } else {
        image::Rgba([0, 0, 0, 0])
      };
    }

    // Cells are about twice as tall as wide, so four rows of pixels fit in
    // one row of text.
    let text = rasterize(&image, 4, 2);
    assert_eq!(text.lines.len(), 1);
    let first = &text.lines[0].0;
    assert_eq!(first.len(), 4);
    assert_eq!(first[0].content, "@");
    assert_eq!(first[3].content, " ");
  }

  #[test]
  fn missing_images_show_their_name() {
    let mut image = Image::new("img/pokemon/999.png");
    let buf = testing::render(&mut image, 16, 5, false);
    assert!(testing::contains(&buf, "999.png"));
  }
}

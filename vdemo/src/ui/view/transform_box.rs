//! An image box that can be translated, scaled, skewed and rotated.
//!
//! The box lives in a square container of [`CONTAINER_SIZE`] layout pixels,
//! which is fitted into the terminal rectangle it is drawn in. Every cell is
//! mapped back through the inverse of the box's transform; cells that land
//! inside the box are painted.

use serde_json::Value;

use tui::style::Color;
use tui::style::Modifier;
use tui::style::Style;

use crate::ui::component::Component;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;

/// The side of the square the box moves around in, in layout pixels.
pub const CONTAINER_SIZE: f32 = 400.0;
/// The untransformed side of the box, in layout pixels.
pub const BOX_SIZE: f32 = 100.0;

/// How many times taller than wide a terminal cell is.
const CELL_ASPECT: f32 = 2.1;

/// The text drawn on top of the box.
const CAPTION: &str = "demo";

/// Every parameter of a [`TransformBox`]. Translations and sizes are in
/// layout pixels, angles in radians.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
  pub trans_x: f32,
  pub trans_y: f32,
  pub scale_x: f32,
  pub scale_y: f32,
  pub skew_x: f32,
  pub skew_y: f32,
  pub rotate: f32,
  pub width: f32,
  pub height: f32,
  pub font_scale_x: f32,
  pub font_scale_y: f32,
}

impl Default for Transform {
  fn default() -> Self {
    Self {
      trans_x: 0.0,
      trans_y: 0.0,
      scale_x: 1.0,
      scale_y: 1.0,
      skew_x: 0.0,
      skew_y: 0.0,
      rotate: 0.0,
      width: BOX_SIZE,
      height: BOX_SIZE,
      font_scale_x: 1.0,
      font_scale_y: 1.0,
    }
  }
}

/// A 2x3 affine matrix, `[a c e; b d f]`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Affine([f32; 6]);

impl Affine {
  fn translate(x: f32, y: f32) -> Self {
    Self([1.0, 0.0, 0.0, 1.0, x, y])
  }

  fn linear(a: f32, b: f32, c: f32, d: f32) -> Self {
    Self([a, b, c, d, 0.0, 0.0])
  }

  /// Returns `self * other`: `other` is applied first.
  fn then(self, other: Self) -> Self {
    let [a, b, c, d, e, f] = self.0;
    let [a2, b2, c2, d2, e2, f2] = other.0;
    Self([
      a * a2 + c * b2,
      b * a2 + d * b2,
      a * c2 + c * d2,
      b * c2 + d * d2,
      a * e2 + c * f2 + e,
      b * e2 + d * f2 + f,
    ])
  }

  fn apply(self, x: f32, y: f32) -> (f32, f32) {
    let [a, b, c, d, e, f] = self.0;
    (a * x + c * y + e, b * x + d * y + f)
  }

  fn invert(self) -> Option<Self> {
    let [a, b, c, d, e, f] = self.0;
    let det = a * d - b * c;
    if !det.is_finite() || det.abs() < 1e-6 {
      return None;
    }
    let inv = Self::linear(d / det, -b / det, -c / det, a / det);
    let (e, f) = inv.apply(-e, -f);
    Some(Self([inv.0[0], inv.0[1], inv.0[2], inv.0[3], e, f]))
  }
}

impl Transform {
  /// Returns the matrix taking box-local pixels to container pixels.
  fn matrix(&self) -> Affine {
    let center_x = self.width * self.scale_x.abs() / 2.0;
    let center_y = self.height * self.scale_y.abs() / 2.0;
    let (sin, cos) = self.rotate.sin_cos();

    Affine::translate(self.trans_x + center_x, self.trans_y + center_y)
      .then(Affine::linear(cos, sin, -sin, cos))
      .then(Affine::linear(1.0, 0.0, self.skew_x.tan(), 1.0))
      .then(Affine::linear(1.0, self.skew_y.tan(), 0.0, 1.0))
      .then(Affine::linear(self.scale_x, 0.0, 0.0, self.scale_y))
      .then(Affine::translate(-center_x, -center_y))
  }
}

/// An image drawn through a [`Transform`].
#[derive(Clone, Debug, Default)]
pub struct TransformBox {
  transform: Transform,
  image: String,
}

impl TransformBox {
}

impl Component for TransformBox {
  fn render(&mut self, args: &mut RenderArgs) {
    let rect = args.rect;
    if rect.width == 0 || rect.height == 0 {
      return;
    }

    // Terminal cells per layout pixel, the same along both axes once the
    // cell aspect is accounted for.
    let scale = (rect.width as f32).min(rect.height as f32 * CELL_ASPECT)
      / CONTAINER_SIZE;
    let to_local = match self.transform.matrix().invert() {
      Some(m) => m,
      None => return,
    };
    let image = if self.image.is_empty() {
      None
    } else {
      args.resources.image(&self.image)
    };
    let (w, h) = (self.transform.width, self.transform.height);

    for row in 0..rect.height {
      for col in 0..rect.width {
        let px = (col as f32 + 0.5) / scale;
        let py = (row as f32 + 0.5) * CELL_ASPECT / scale;
        let (lx, ly) = to_local.apply(px, py);
        if !(0.0..w).contains(&lx) || !(0.0..h).contains(&ly) {
          continue;
        }

        let color = match &image {
          Some(image) => {
            let x = (lx / w * image.width() as f32) as u32;
            let y = (ly / h * image.height() as f32) as u32;
            let image::Rgba([r, g, b, a]) = *image.get_pixel(
              x.min(image.width().saturating_sub(1)),
              y.min(image.height().saturating_sub(1)),
            );
            if a == 0 {
              continue;
            }
            Color::Rgb(r, g, b)
          }
          None => {
            let shade = 96 + (160.0 * (lx / w + ly / h) / 2.0) as u8;
            Color::Rgb(shade / 3, shade, shade)
          }
        };
        args
          .output
          .get_mut(rect.x + col, rect.y + row)
          .set_symbol("█")
          .set_style(Style::default().fg(color));
      }
    }

    // The caption sits 4px in and 18px down from the box's corner, in a
    // coordinate system scaled by the font scale.
    let to_container = self.transform.matrix();
    let text_style = Style::default()
      .fg(Color::White)
      .bg(Color::Black)
      .add_modifier(Modifier::BOLD);
    for (i, ch) in CAPTION.chars().enumerate() {
      let lx = self.transform.font_scale_x * (4.0 + i as f32 * 8.0);
      let ly = self.transform.font_scale_y * 12.0;
      let (px, py) = to_container.apply(lx, ly);
      let col = (px * scale).floor();
      let row = (py * scale / CELL_ASPECT).floor();
      if col < 0.0
        || row < 0.0
        || col >= rect.width as f32
        || row >= rect.height as f32
      {
        continue;
      }
      args
        .output
        .get_mut(rect.x + col as u16, rect.y + row as u16)
        .set_char(ch)
        .set_style(text_style);
    }
  }

  fn receive(&mut self, message: &Message) -> bool {
    match message {
      Message::SetTransform(t) => self.transform = *t,
      Message::SetImage(path) => self.image = path.clone(),
      _ => return false,
    }
    true
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    match (name, value.as_str()) {
      ("image", Some(path)) => self.image = path.to_string(),
      _ => return false,
    }
    true
  }
}

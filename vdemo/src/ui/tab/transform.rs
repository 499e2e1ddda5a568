//! A transform box, a slider for every parameter of its transform, and a
//! canned animation that plays the sliders.

use std::f32::consts::PI;
use std::time::Duration;

use vitrine::animation::Animatable;
use vitrine::animation::EasingFunction;
use vitrine::Error;

use crate::ui::component::Change;
use crate::ui::component::Component;
use crate::ui::component::Empty;
use crate::ui::component::EventArgs;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::inflate::Inflater;
use crate::ui::tab::dispatch;
use crate::ui::view::transform_box::Transform;
use crate::ui::view::transform_box::BOX_SIZE;
use crate::ui::view::transform_box::CONTAINER_SIZE;

const LAYOUT: &str = "tabs/transform";

/// Every slider, with the progress it starts at and returns to on reset.
const KNOBS: &[(&str, f32)] = &[
  ("transX", 0.0),
  ("transY", 0.0),
  ("scaleX", 1.0),
  ("scaleY", 1.0),
  ("skewX", 0.0),
  ("skewY", 0.0),
  ("rotate", 0.0),
  ("width", 1.0),
  ("height", 1.0),
  ("fontScaleX", 1.0),
  ("fontScaleY", 1.0),
];

const STEP: Duration = Duration::from_millis(4000);

/// Slider updates requested by running tweens, applied once all of them
/// have ticked.
type Pending = Vec<(&'static str, f32)>;

/// Sets the parameter behind slider `id` from its progress, returning the
/// value it was set to.
fn apply_knob(t: &mut Transform, id: &str, progress: f32) -> Option<f32> {
  let slot = match id {
    "transX" => &mut t.trans_x,
    "transY" => &mut t.trans_y,
    "scaleX" => &mut t.scale_x,
    "scaleY" => &mut t.scale_y,
    "skewX" => &mut t.skew_x,
    "skewY" => &mut t.skew_y,
    "rotate" => &mut t.rotate,
    "width" => &mut t.width,
    "height" => &mut t.height,
    "fontScaleX" => &mut t.font_scale_x,
    "fontScaleY" => &mut t.font_scale_y,
    _ => return None,
  };
  *slot = match id {
    "transX" | "transY" => (CONTAINER_SIZE - BOX_SIZE) * progress,
    "skewX" | "skewY" => progress * PI,
    "rotate" => progress * PI * 2.0,
    "width" | "height" => progress * BOX_SIZE,
    _ => progress * 2.0 - 1.0,
  };
  Some(*slot)
}

pub struct TransformTab {
  root: Box<dyn Component>,
  transform: Transform,
  ani_x: Animatable<Pending>,
  ani_y: Animatable<Pending>,
  skew: Animatable<Pending>,
  skew2: Animatable<Pending>,
}

impl Default for TransformTab {
  fn default() -> Self {
    Self {
      root: Box::new(Empty),
      transform: Transform::default(),
      ani_x: Animatable::default(),
      ani_y: Animatable::default(),
      skew: Animatable::default(),
      skew2: Animatable::default(),
    }
  }
}

impl TransformTab {
  #[cfg(test)]
  pub fn transform(&self) -> &Transform {
    &self.transform
  }

  #[cfg(test)]
  pub fn is_playing(&self) -> bool {
    [&self.ani_x, &self.ani_y, &self.skew, &self.skew2]
      .iter()
      .any(|a| a.is_running())
  }

  fn tweens(&mut self) -> [&mut Animatable<Pending>; 4] {
    [
      &mut self.ani_x,
      &mut self.ani_y,
      &mut self.skew,
      &mut self.skew2,
    ]
  }

  fn set_knob(&mut self, id: &str, progress: f32) {
    let value = match apply_knob(&mut self.transform, id, progress) {
      Some(value) => value,
      None => return,
    };
    self.root.send(id, &Message::SetProgress(progress));
    self.root.send(id, &Message::SetDetail(format!("{:.2}", value)));
    self
      .root
      .send("box", &Message::SetTransform(self.transform));
  }

  fn play(&mut self) {
    for tween in self.tweens().iter_mut() {
      tween.stop();
    }

    self.ani_x.reset(0.0);
    self.ani_x.add_step(1.0, STEP, EasingFunction::ExponentialOut);
    self.ani_x.add_step(0.0, STEP, EasingFunction::CubicIn);
    self.ani_x.add_step(0.5, STEP, EasingFunction::ExponentialOut);
    self.ani_x.add_step(0.0, STEP, EasingFunction::CubicIn);
    self
      .ani_x
      .set_tick_callback(|p: &mut Pending, v| p.push(("transX", v)));

    self.ani_y.reset(0.0);
    self.ani_y.add_step(1.0, STEP, EasingFunction::BounceOut);
    self.ani_y.add_step(0.0, STEP, EasingFunction::CubicIn);
    self.ani_y.add_step(1.0, STEP, EasingFunction::BounceOut);
    self.ani_y.add_step(0.0, STEP, EasingFunction::CubicIn);
    self
      .ani_y
      .set_tick_callback(|p: &mut Pending, v| p.push(("transY", v)));

    self.skew.reset(0.0);
    self.skew.add_step(1.0, STEP, EasingFunction::BounceOut);
    self.skew.add_step(0.0, STEP, EasingFunction::CubicIn);
    self.skew.set_tick_callback(|p: &mut Pending, v| {
      p.push(("skewY", v));
      p.push(("scaleX", 1.0 - v));
    });

    // The second skew waits for the first one to finish.
    self.skew2.reset(0.0);
    self.skew2.add_step(0.0, STEP * 2, EasingFunction::Linear);
    self.skew2.add_step(1.0, STEP, EasingFunction::BounceOut);
    self.skew2.add_step(0.0, STEP, EasingFunction::CubicIn);
    self.skew2.set_tick_callback(|p: &mut Pending, v| {
      p.push(("skewX", v));
      p.push(("scaleY", 1.0 - v));
    });

    for tween in self.tweens().iter_mut() {
      tween.start();
    }
    log::debug!("transform animation started");
  }

  fn reset(&mut self) {
    for tween in self.tweens().iter_mut() {
      tween.stop();
    }
    for &(id, progress) in KNOBS {
      self.set_knob(id, progress);
    }
  }

  /// Ticks every running tween to `now` and moves the sliders they drive.
  fn advance(&mut self, now: Duration) {
    let mut pending = Pending::new();
    for tween in self.tweens().iter_mut() {
      tween.tick(now, &mut pending);
    }
    for (id, progress) in pending {
      self.set_knob(id, progress);
    }
  }

  fn on_change(&mut self, id: &str, change: Change) {
    match (id, change) {
      ("play", Change::Clicked) => self.play(),
      ("reset", Change::Clicked) => self.reset(),
      (id, Change::Progress(p)) => self.set_knob(id, p),
      _ => {}
    }
  }
}

impl Component for TransformTab {
  delegate_to_root!();

  fn process_event(&mut self, args: &mut EventArgs) {
    for (id, change) in dispatch(self.root.as_mut(), args) {
      self.on_change(&id, change);
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    self.advance(args.time);
    self.root.render(args)
  }

  fn render_overlay(&mut self, args: &mut RenderArgs) {
    self.root.render_overlay(args)
  }

  fn inflate(&mut self, inflater: &Inflater) -> Result<(), Error> {
    let mut ids = vec!["box", "play", "reset"];
    ids.extend(KNOBS.iter().map(|&(id, _)| id));
    self.root = inflater.inflate_layout(LAYOUT, &ids)?;
    self.reset();
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::ui::component::testing;
  use crate::ui::component::testing::Harness;
  use crate::ui::views;

  fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
  }

  fn tab(h: &Harness) -> TransformTab {
    let views = views::all().unwrap();
    let mut tab = TransformTab::default();
    tab.inflate(&Inflater::new(&h.resources, &views)).unwrap();
    tab
  }

  #[test]
  fn knobs_map_progress_to_parameters() {
    let mut t = Transform::default();
    assert_eq!(apply_knob(&mut t, "transX", 0.5), Some(150.0));
    assert_eq!(apply_knob(&mut t, "scaleY", 0.0), Some(-1.0));
    assert_eq!(apply_knob(&mut t, "rotate", 0.5), Some(PI));
    assert_eq!(apply_knob(&mut t, "width", 0.25), Some(25.0));
    assert_eq!(apply_knob(&mut t, "nope", 0.25), None);
    assert_eq!(t.trans_x, 150.0);
    assert_eq!(t.scale_y, -1.0);
  }

  #[test]
  fn starts_at_the_identity() {
    let h = Harness::new();
    let tab = tab(&h);
    assert_eq!(*tab.transform(), Transform::default());
  }

  #[test]
  fn playing_moves_the_box_and_comes_back() {
    let h = Harness::new();
    let mut tab = tab(&h);
    tab.on_change("play", Change::Clicked);
    assert!(tab.is_playing());

    tab.advance(ms(1000));
    tab.advance(ms(3000));
    assert!(tab.transform().trans_x > 0.0);
    assert!(tab.transform().trans_x <= CONTAINER_SIZE - BOX_SIZE);
    assert!(tab.transform().skew_y > 0.0);
    assert_eq!(tab.transform().skew_x, 0.0);

    tab.advance(ms(1000 + 16_000));
    assert!(!tab.is_playing());
    assert_eq!(tab.transform().trans_x, 0.0);
    assert_eq!(tab.transform().skew_x, 0.0);
    assert_eq!(tab.transform().scale_y, 1.0);
  }

  #[test]
  fn reset_stops_the_animation() {
    let h = Harness::new();
    let mut tab = tab(&h);
    tab.on_change("play", Change::Clicked);
    tab.advance(ms(0));
    tab.advance(ms(2000));
    assert_ne!(*tab.transform(), Transform::default());

    tab.on_change("reset", Change::Clicked);
    assert!(!tab.is_playing());
    tab.advance(ms(4000));
    assert_eq!(*tab.transform(), Transform::default());
  }

  #[test]
  fn slider_details_show_parameters() {
    let mut h = Harness::new();
    let mut tab = tab(&h);
    tab.on_change("rotate", Change::Progress(0.5));
    let buf = h.render(&mut tab, 80, 40, true);
    assert!(testing::contains(&buf, "3.14"));
  }
}

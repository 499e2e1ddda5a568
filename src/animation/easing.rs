//! Easing curves.

/// Maps linear progress in `[0, 1]` onto eased progress.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EasingFunction {
  Linear,
  QuadraticIn,
  QuadraticOut,
  QuadraticInOut,
  CubicIn,
  CubicOut,
  CubicInOut,
  ExponentialIn,
  ExponentialOut,
  BounceOut,
  /// The CSS `ease-in-out` curve, `cubic-bezier(0.42, 0, 0.58, 1)`.
  EaseInOut,
}

impl Default for EasingFunction {
  fn default() -> Self {
    EasingFunction::Linear
  }
}

impl EasingFunction {
  /// Applies the curve to `t`, which is clamped to `[0, 1]` first.
  pub fn apply(self, t: f32) -> f32 {
    let t = t.max(0.0).min(1.0);
    match self {
      EasingFunction::Linear => t,
      EasingFunction::QuadraticIn => t * t,
      EasingFunction::QuadraticOut => t * (2.0 - t),
      EasingFunction::QuadraticInOut => {
        if t < 0.5 {
          2.0 * t * t
        } else {
          -1.0 + (4.0 - 2.0 * t) * t
        }
      }
      EasingFunction::CubicIn => t * t * t,
      EasingFunction::CubicOut => {
        let u = t - 1.0;
        u * u * u + 1.0
      }
      EasingFunction::CubicInOut => {
        if t < 0.5 {
          4.0 * t * t * t
        } else {
          let u = 2.0 * t - 2.0;
          0.5 * u * u * u + 1.0
        }
      }
      EasingFunction::ExponentialIn => {
        if t == 0.0 {
          0.0
        } else {
          2f32.powf(10.0 * (t - 1.0))
        }
      }
      EasingFunction::ExponentialOut => {
        if t == 1.0 {
          1.0
        } else {
          1.0 - 2f32.powf(-10.0 * t)
        }
      }
      EasingFunction::BounceOut => bounce_out(t),
      EasingFunction::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
    }
  }
}

fn bounce_out(t: f32) -> f32 {
  const N: f32 = 7.5625;
  const D: f32 = 2.75;
  if t < 1.0 / D {
    N * t * t
  } else if t < 2.0 / D {
    let t = t - 1.5 / D;
    N * t * t + 0.75
  } else if t < 2.5 / D {
    let t = t - 2.25 / D;
    N * t * t + 0.9375
  } else {
    let t = t - 2.625 / D;
    N * t * t + 0.984375
  }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
  if x <= 0.0 {
    return 0.0;
  }
  if x >= 1.0 {
    return 1.0;
  }

  let cx = 3.0 * x1;
  let bx = 3.0 * (x2 - x1) - cx;
  let ax = 1.0 - cx - bx;
  let cy = 3.0 * y1;
  let by = 3.0 * (y2 - y1) - cy;
  let ay = 1.0 - cy - by;

  let curve = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
  let slope = |t: f32| (3.0 * ax * t + 2.0 * bx) * t + cx;

  // Newton's method first, bisection if it stalls.
  let mut t = x;
  for _ in 0..8 {
    let err = curve(ax, bx, cx, t) - x;
    if err.abs() < 1e-6 {
      return curve(ay, by, cy, t);
    }
    let d = slope(t);
    if d.abs() < 1e-6 {
      break;
    }
    t = (t - err / d).max(0.0).min(1.0);
  }

  let (mut lo, mut hi) = (0.0f32, 1.0f32);
  t = x;
  for _ in 0..24 {
    let err = curve(ax, bx, cx, t) - x;
    if err.abs() < 1e-6 {
      break;
    }
    if err > 0.0 {
      hi = t;
    } else {
      lo = t;
    }
    t = 0.5 * (lo + hi);
  }
  curve(ay, by, cy, t)
}

#[cfg(test)]
mod tests {
  use super::*;

  const ALL: [EasingFunction; 11] = [
    EasingFunction::Linear,
    EasingFunction::QuadraticIn,
    EasingFunction::QuadraticOut,
    EasingFunction::QuadraticInOut,
    EasingFunction::CubicIn,
    EasingFunction::CubicOut,
    EasingFunction::CubicInOut,
    EasingFunction::ExponentialIn,
    EasingFunction::ExponentialOut,
    EasingFunction::BounceOut,
    EasingFunction::EaseInOut,
  ];

  #[test]
  fn curves_hit_their_endpoints() {
    for f in ALL.iter() {
      assert!(f.apply(0.0).abs() < 1e-3, "{:?} at 0", f);
      assert!((f.apply(1.0) - 1.0).abs() < 1e-3, "{:?} at 1", f);
    }
  }

  #[test]
  fn input_is_clamped() {
    assert_eq!(EasingFunction::CubicIn.apply(-3.0), 0.0);
    assert_eq!(EasingFunction::CubicIn.apply(7.0), 1.0);
  }

  #[test]
  fn symmetric_curves_pass_through_the_middle() {
    assert!((EasingFunction::EaseInOut.apply(0.5) - 0.5).abs() < 1e-3);
    assert!((EasingFunction::CubicInOut.apply(0.5) - 0.5).abs() < 1e-3);
    assert!((EasingFunction::QuadraticInOut.apply(0.5) - 0.5).abs() < 1e-3);
  }

  #[test]
  fn in_curves_lag_and_out_curves_lead() {
    assert!(EasingFunction::CubicIn.apply(0.3) < 0.3);
    assert!(EasingFunction::ExponentialOut.apply(0.3) > 0.3);
    assert!(EasingFunction::BounceOut.apply(0.9) > 0.9);
  }
}

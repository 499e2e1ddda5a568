//! A single animated value.

use std::fmt;
use std::time::Duration;

use crate::animation::EasingFunction;

#[derive(Copy, Clone, Debug)]
struct Step {
  target: f32,
  duration: Duration,
  easing: EasingFunction,
}

#[derive(Copy, Clone, Debug)]
enum State {
  Idle,
  Running {
    step: usize,
    /// When the current step began; `None` until the first tick.
    since: Option<Duration>,
    from: f32,
  },
}

/// A value that moves through a list of eased steps.
///
/// Callbacks receive an explicit `Ctx`, supplied on every call to
/// [`Animatable::tick()`], instead of capturing whatever they drive.
pub struct Animatable<Ctx = ()> {
  value: f32,
  steps: Vec<Step>,
  state: State,
  on_tick: Option<Box<dyn FnMut(&mut Ctx, f32)>>,
  on_end: Option<Box<dyn FnMut(&mut Ctx, bool)>>,
}

impl<Ctx> fmt::Debug for Animatable<Ctx> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Animatable")
      .field("value", &self.value)
      .field("steps", &self.steps)
      .field("state", &self.state)
      .finish()
  }
}

impl<Ctx> Default for Animatable<Ctx> {
  fn default() -> Self {
    Self::new(0.0)
  }
}

impl<Ctx> Animatable<Ctx> {
  /// Creates a stopped animatable holding `value`.
  pub fn new(value: f32) -> Self {
    Self {
      value,
      steps: Vec::new(),
      state: State::Idle,
      on_tick: None,
      on_end: None,
    }
  }

  /// Returns the current value.
  pub fn value(&self) -> f32 {
    self.value
  }

  /// Returns whether a tween is in progress.
  pub fn is_running(&self) -> bool {
    matches!(self.state, State::Running { .. })
  }

  /// Stops any running tween, drops all steps, and jumps to `value`.
  /// Callbacks are kept.
  pub fn reset(&mut self, value: f32) {
    self.stop();
    self.steps.clear();
    self.value = value;
  }

  /// Appends a step that moves to `target` over `duration`.
  ///
  /// A step whose target equals the value it starts from is a plain delay.
  pub fn add_step(
    &mut self,
    target: f32,
    duration: Duration,
    easing: EasingFunction,
  ) {
    self.steps.push(Step {
      target,
      duration,
      easing,
    });
  }

  /// Sets the function called with the new value on every tick.
  pub fn set_tick_callback(&mut self, f: impl FnMut(&mut Ctx, f32) + 'static) {
    self.on_tick = Some(Box::new(f));
  }

  /// Sets the function called once the tween ends. The flag is `true` when
  /// the last step completed, and `false` when the tween was cut short by
  /// [`Animatable::stop_with()`].
  pub fn set_end_callback(&mut self, f: impl FnMut(&mut Ctx, bool) + 'static) {
    self.on_end = Some(Box::new(f));
  }

  /// Starts (or restarts) the steps from the current value. The timeline is
  /// anchored at the next call to [`Animatable::tick()`].
  pub fn start(&mut self) {
    self.state = State::Running {
      step: 0,
      since: None,
      from: self.value,
    };
  }

  /// Stops the tween where it is. No callback fires for it afterwards.
  pub fn stop(&mut self) {
    self.state = State::Idle;
  }

  /// Stops the tween where it is, calling the end callback with `false` if
  /// it was running. No callback fires for it afterwards.
  pub fn stop_with(&mut self, ctx: &mut Ctx) {
    if !self.is_running() {
      return;
    }
    self.stop();
    if let Some(f) = &mut self.on_end {
      f(ctx, false);
    }
  }

  /// Advances the tween to `now`, calling the tick callback once and the end
  /// callback if the last step finished. Returns whether it is still running.
  pub fn tick(&mut self, now: Duration, ctx: &mut Ctx) -> bool {
    let (mut step, mut since, mut from) = match self.state {
      State::Idle => return false,
      State::Running { step, since, from } => (step, since.unwrap_or(now), from),
    };

    // Leftover time from a finished step carries into the next one, so slow
    // frames don't stretch the timeline.
    let running = loop {
      let s = match self.steps.get(step) {
        Some(s) => *s,
        None => break false,
      };

      let elapsed = now.checked_sub(since).unwrap_or_default();
      if elapsed < s.duration {
        let t = elapsed.as_nanos() as f64 / s.duration.as_nanos() as f64;
        self.value = from + (s.target - from) * s.easing.apply(t as f32);
        break true;
      }

      self.value = s.target;
      from = s.target;
      since += s.duration;
      step += 1;
    };

    self.state = if running {
      State::Running {
        step,
        since: Some(since),
        from,
      }
    } else {
      State::Idle
    };

    if let Some(f) = &mut self.on_tick {
      f(ctx, self.value);
    }
    if !running {
      if let Some(f) = &mut self.on_end {
        f(ctx, true);
      }
    }
    running
  }
}

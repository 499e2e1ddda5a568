//! Process-wide settings that belong to the platform rather than to any one
//! screen.

use crate::Config;

/// The knobs a showcase can turn on the platform it runs on.
///
/// Every setter takes effect immediately; getters report the current state.
pub trait Platform {
  /// Returns how many display refreshes each frame waits for. Zero means the
  /// frame loop is unthrottled.
  fn swap_interval(&self) -> u32;
  fn set_swap_interval(&mut self, interval: u32);

  fn fps_visible(&self) -> bool;
  fn set_fps_visible(&mut self, visible: bool);

  fn always_on_top(&self) -> bool;
  fn set_always_on_top(&mut self, on_top: bool);

  /// Returns the backlight brightness, in `[0, 1]`.
  fn brightness(&self) -> f32;
  /// Sets the backlight brightness; values outside `[0, 1]` are clamped.
  fn set_brightness(&mut self, brightness: f32);

  /// Returns whether the layout debugging overlay is drawn.
  fn debugging_view(&self) -> bool;
  fn set_debugging_view(&mut self, enabled: bool);

  /// Returns whether the applet footer (the bottom bar) is shown.
  fn footer_visible(&self) -> bool;
  fn set_footer_visible(&mut self, visible: bool);

  /// Returns the current IP address, or a placeholder if unknown.
  fn ip_address(&self) -> String;
  /// Returns the current DNS server, or a placeholder if unknown.
  fn dns_server(&self) -> String;

  /// Asks the platform to open `url` in a browser.
  fn open_browser(&mut self, url: &str);
}

/// A [`Platform`] with no hardware behind it: settings are remembered and
/// logged, and nothing else happens.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessPlatform {
  swap_interval: u32,
  fps_visible: bool,
  always_on_top: bool,
  brightness: f32,
  debugging_view: bool,
  footer_visible: bool,
}

impl Default for HeadlessPlatform {
  fn default() -> Self {
    Self::new(&Config::default())
  }
}

impl HeadlessPlatform {
  /// Creates a platform whose initial state comes from `config`.
  pub fn new(config: &Config) -> Self {
    Self {
      swap_interval: config.swap_interval,
      fps_visible: false,
      always_on_top: false,
      brightness: config.brightness.max(0.0).min(1.0),
      debugging_view: config.debugging_view,
      footer_visible: true,
    }
  }
}

impl Platform for HeadlessPlatform {
  fn swap_interval(&self) -> u32 {
    self.swap_interval
  }

  fn set_swap_interval(&mut self, interval: u32) {
    log::info!("swap interval set to {}", interval);
    self.swap_interval = interval;
  }

  fn fps_visible(&self) -> bool {
    self.fps_visible
  }

  fn set_fps_visible(&mut self, visible: bool) {
    log::info!("fps overlay {}", if visible { "on" } else { "off" });
    self.fps_visible = visible;
  }

  fn always_on_top(&self) -> bool {
    self.always_on_top
  }

  fn set_always_on_top(&mut self, on_top: bool) {
    // A terminal has no window to raise.
    log::info!("always on top {}", if on_top { "on" } else { "off" });
    self.always_on_top = on_top;
  }

  fn brightness(&self) -> f32 {
    self.brightness
  }

  fn set_brightness(&mut self, brightness: f32) {
    self.brightness = brightness.max(0.0).min(1.0);
    log::debug!("brightness set to {:.2}", self.brightness);
  }

  fn debugging_view(&self) -> bool {
    self.debugging_view
  }

  fn set_debugging_view(&mut self, enabled: bool) {
    log::info!("debugging view {}", if enabled { "on" } else { "off" });
    self.debugging_view = enabled;
  }

  fn footer_visible(&self) -> bool {
    self.footer_visible
  }

  fn set_footer_visible(&mut self, visible: bool) {
    self.footer_visible = visible;
  }

  fn ip_address(&self) -> String {
    "-".to_string()
  }

  fn dns_server(&self) -> String {
    "-".to_string()
  }

  fn open_browser(&mut self, url: &str) {
    log::info!("no browser to open {}", url);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_from_config() {
    let config = Config {
      swap_interval: 3,
      brightness: 4.0,
      debugging_view: true,
      ..Config::default()
    };
    let platform = HeadlessPlatform::new(&config);
    assert_eq!(platform.swap_interval(), 3);
    assert_eq!(platform.brightness(), 1.0);
    assert!(platform.debugging_view());
    assert!(platform.footer_visible());
  }

  #[test]
  fn brightness_is_clamped() {
    let mut platform = HeadlessPlatform::default();
    platform.set_brightness(-0.5);
    assert_eq!(platform.brightness(), 0.0);
    platform.set_brightness(0.25);
    assert_eq!(platform.brightness(), 0.25);
  }
}

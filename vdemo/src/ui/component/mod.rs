//! The component model.
//!
//! Every view on screen is a [`Component`]: it renders into a
//! [`tui::buffer::Buffer`], processes input events when focused, and can be
//! told things through typed [`Message`]s. Components report what happened to
//! them by emitting [`Change`]s into the [`CommandBuffer`] passed along with
//! each event; containers stamp those changes with the id of the child that
//! produced them, so a screen can react to all of its widgets in one place.

use std::mem;
use std::time::Duration;

use crossterm::event::KeyEvent;
use crossterm::event::MouseEvent;

use serde_json::Value;

use tui::buffer::Buffer;
use tui::layout::Alignment;
use tui::layout::Rect;
use tui::style::Color;
use tui::style::Modifier;
use tui::style::Style;

use vitrine::layout::Node;
use vitrine::settings::Platform;
use vitrine::Error;

use crate::ui::inflate::Inflater;
use crate::ui::resources::Resources;

pub mod applet_frame;
pub mod button;
pub mod cell;
pub mod container;
pub mod dialog;
pub mod image;
pub mod input;
pub mod label;
pub mod recycler;
pub mod selector;
pub mod slider;
pub mod tab_frame;

use crate::ui::component::label::VerticalAlign;
use crate::ui::view::transform_box::Transform;

/// An input event.
#[derive(Copy, Clone, Debug)]
pub enum Event {
  Key(KeyEvent),
  Mouse(MouseEvent),
}

/// Something a widget reports about itself after processing an event.
#[derive(Clone, Debug, PartialEq)]
pub enum Change {
  /// A button or clickable cell was activated.
  Clicked,
  /// A slider moved.
  Progress(f32),
  /// A switch flipped.
  Toggled(bool),
  /// A selection was confirmed.
  Selected(usize),
  /// Text input was committed.
  Text(String),
  /// Numeric input was committed.
  Number(i64),
  /// The secondary action of a cell was requested.
  Open,
}

/// Something a screen tells one of its widgets.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
  SetText(String),
  SetTitle(String),
  SetDetail(String),
  SetProgress(f32),
  SetToggled(bool),
  SetSelected(usize),
  SetVisible(bool),
  SetImage(String),
  SetTransform(Transform),
  SetWidth(Option<u16>),
  SetHeight(Option<u16>),
  SetHorizontalAlign(Alignment),
  SetVerticalAlign(VerticalAlign),
  SetSingleLine(bool),
}

/// Builds a component to be pushed as a new activity.
pub type Presenter =
  Box<dyn FnOnce(&Inflater) -> Result<Box<dyn Component>, Error>>;

/// A buffer for issuing commands to the application in response to an event.
///
/// Buffered commands will not take effect until event processing completes.
#[derive(Default)]
pub struct CommandBuffer {
  claimed: bool,
  changes: Vec<(Option<String>, Change)>,
  presenters: Vec<Presenter>,
  dismiss: bool,
  alert: Option<String>,
  notification: Option<String>,
}

impl CommandBuffer {
  /// Creates an empty buffer.
  pub fn new() -> Self {
    Self::default()
  }

  /// Claims the event being processed, so it will not be further propagated
  /// to other components.
  pub fn claim(&mut self) {
    self.claimed = true
  }

  /// Returns whether a callee has already claimed the event associated with
  /// this buffer.
  pub fn is_claimed(&self) -> bool {
    self.claimed
  }

  /// Reports a change of the component currently processing the event.
  pub fn emit(&mut self, change: Change) {
    self.changes.push((None, change))
  }

  /// Attributes every change that does not have an id yet to `id`.
  pub fn stamp(&mut self, id: &str) {
    for (owner, _) in &mut self.changes {
      if owner.is_none() {
        *owner = Some(id.to_string());
      }
    }
  }

  /// Takes every change reported so far that has an id.
  pub fn take_changes(&mut self) -> Vec<(String, Change)> {
    let (named, anonymous) = mem::take(&mut self.changes)
      .into_iter()
      .partition::<Vec<_>, _>(|(id, _)| id.is_some());
    self.changes = anonymous;
    named
      .into_iter()
      .filter_map(|(id, change)| Some((id?, change)))
      .collect()
  }

  /// Requests that a new activity be pushed on top of the current one.
  pub fn present(
    &mut self,
    presenter: impl FnOnce(&Inflater) -> Result<Box<dyn Component>, Error>
      + 'static,
  ) {
    self.presenters.push(Box::new(presenter))
  }

  pub fn take_presenters(&mut self) -> Vec<Presenter> {
    mem::take(&mut self.presenters)
  }

  /// Requests that the current activity be popped.
  pub fn dismiss(&mut self) {
    self.dismiss = true
  }

  pub fn take_dismiss(&mut self) -> bool {
    mem::take(&mut self.dismiss)
  }

  /// Requests a modal dialog with a single OK button.
  pub fn alert(&mut self, text: impl Into<String>) {
    self.alert = Some(text.into())
  }

  pub fn take_alert(&mut self) -> Option<String> {
    self.alert.take()
  }

  /// Requests a transient notification banner.
  pub fn notify(&mut self, text: impl Into<String>) {
    self.notification = Some(text.into())
  }

  pub fn take_notification(&mut self) -> Option<String> {
    self.notification.take()
  }
}

#[derive(Copy, Clone, Debug)]
pub struct StyleSheet {
  pub focused: Style,
  pub unfocused: Style,
  pub selected: Style,
  pub highlight: Style,
  pub caption: Style,
  pub dim: Style,
}

impl Default for StyleSheet {
  fn default() -> Self {
    StyleSheet {
      focused: Style::default().fg(Color::White),
      unfocused: Style::default().fg(Color::Gray),
      selected: Style::default().add_modifier(Modifier::BOLD),
      highlight: Style::default().fg(Color::Rgb(0x00, 0xc0, 0xe0)),
      caption: Style::default().fg(Color::Rgb(51, 186, 227)),
      dim: Style::default().fg(Color::DarkGray),
    }
  }
}

impl StyleSheet {
  /// Returns the base style for a component with the given focus.
  pub fn base(&self, is_focused: bool) -> Style {
    if is_focused {
      self.focused.patch(self.selected)
    } else {
      self.unfocused
    }
  }
}

/// Arguments for [`Component::process_event()`].
pub struct EventArgs<'a> {
  pub is_focused: bool,
  pub event: &'a Event,
  /// Where the component was last drawn.
  pub rect: Rect,
  pub platform: &'a mut dyn Platform,
  pub commands: &'a mut CommandBuffer,
}

/// Arguments for [`Component::render()`].
pub struct RenderArgs<'a> {
  pub is_focused: bool,
  pub rect: Rect,
  pub output: &'a mut Buffer,
  pub frame_number: usize,
  /// Time since the application started.
  pub time: Duration,
  pub style_sheet: StyleSheet,
  pub resources: &'a Resources,
  pub platform: &'a dyn Platform,
}

/// How much room a component wants along its parent's main axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Size {
  /// Exactly this many cells.
  Fixed(u16),
  /// A share of whatever the fixed-size siblings leave over.
  Flex(u16),
}

/// A component, which is like a [`tui::widgets::Widget`] but which can
/// process input and carry state between frames.
pub trait Component {
  /// Processes an event, either mutating own state or issuing a command
  /// through `args.commands`.
  fn process_event(&mut self, args: &mut EventArgs) {
    let _ = args;
  }

  /// Renders this component.
  fn render(&mut self, args: &mut RenderArgs);

  /// Renders anything that floats above the whole screen, such as an open
  /// dropdown. `args.rect` is the full screen.
  fn render_overlay(&mut self, args: &mut RenderArgs) {
    let _ = args;
  }

  /// Returns whether this component should be given focus at all.
  fn wants_focus(&self) -> bool {
    false
  }

  /// Returns a hint to the parent's layout along `vertical` or horizontal
  /// axis.
  fn layout_hint(&self, vertical: bool) -> Option<Size> {
    let _ = vertical;
    None
  }

  /// Handles a message addressed to this component. Returns whether it was
  /// understood.
  fn receive(&mut self, message: &Message) -> bool {
    let _ = message;
    false
  }

  /// Delivers `message` to the descendant with the given id. Returns whether
  /// such a descendant exists and understood it.
  fn send(&mut self, id: &str, message: &Message) -> bool {
    let _ = (id, message);
    false
  }

  /// Finds the descendant with the given id.
  fn find_mut(&mut self, id: &str) -> Option<&mut dyn Component> {
    let _ = id;
    None
  }

  /// Returns this component as a recycler view, if it is one.
  fn as_recycler(&mut self) -> Option<&mut recycler::RecyclerView> {
    None
  }

  /// Applies a layout attribute. Returns whether it was understood.
  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    let _ = (name, value);
    false
  }

  /// Called right after construction, before attributes and children are
  /// applied, for components that inflate their own layout.
  fn inflate(&mut self, inflater: &Inflater) -> Result<(), Error> {
    let _ = inflater;
    Ok(())
  }

  /// Adopts a child declared in a layout document.
  fn add_child(&mut self, node: &Node, child: Box<dyn Component>) {
    let _ = child;
    log::warn!("dropping child `{}`: parent takes no children", node.kind);
  }
}

/// A trivial [`Component`] that ignores all events and draws nothing.
#[derive(Clone, Debug, Default)]
pub struct Empty;
impl Component for Empty {
  fn render(&mut self, _: &mut RenderArgs) {}
}

/// Reads a layout attribute as text; numbers and booleans are stringified.
pub fn value_to_string(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

/// Parses `left`, `center` or `right`.
pub fn parse_alignment(s: &str) -> Option<Alignment> {
  match s {
    "left" => Some(Alignment::Left),
    "center" => Some(Alignment::Center),
    "right" => Some(Alignment::Right),
    _ => None,
  }
}

/// Returns true if `rect` contains the point at `x` and `y`.
pub fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
  rect.x <= x
    && x < rect.x.saturating_add(rect.width)
    && rect.y <= y
    && y < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
pub mod testing;

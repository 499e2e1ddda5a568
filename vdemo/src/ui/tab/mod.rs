//! The showcase's tabs.
//!
//! Every tab inflates its own layout document, checking that it declares the
//! ids the tab talks to, and then reacts to whatever its widgets report in a
//! single `on_change()` method.

use crate::ui::component::Change;
use crate::ui::component::Component;
use crate::ui::component::EventArgs;

/// Implements the [`Component`] methods that a tab simply hands to its
/// inflated `root`.
macro_rules! delegate_to_root {
  () => {
    fn wants_focus(&self) -> bool {
      self.root.wants_focus()
    }

    fn send(
      &mut self,
      id: &str,
      message: &crate::ui::component::Message,
    ) -> bool {
      self.root.send(id, message)
    }

    fn find_mut(
      &mut self,
      id: &str,
    ) -> Option<&mut dyn crate::ui::component::Component> {
      self.root.find_mut(id)
    }
  };
}

pub mod components;
pub mod recycling_list;
pub mod settings;
pub mod text_test;
pub mod transform;

/// Feeds an event to `root` and collects what its widgets reported.
fn dispatch(
  root: &mut dyn Component,
  args: &mut EventArgs,
) -> Vec<(String, Change)> {
  root.process_event(args);
  args.commands.take_changes()
}

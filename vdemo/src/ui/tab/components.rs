//! The basic widgets: buttons, a slider, and dropdowns.

use vitrine::Error;

use crate::ui::component::selector::Dropdown;
use crate::ui::component::selector::Outcome;
use crate::ui::component::Change;
use crate::ui::component::CommandBuffer;
use crate::ui::component::Component;
use crate::ui::component::Empty;
use crate::ui::component::EventArgs;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::inflate::Inflater;
use crate::ui::tab::dispatch;

const LAYOUT: &str = "tabs/components";

const IDS: &[&str] = &[
  "button_primary",
  "slider",
  "progress",
  "music_genre",
  "music_era",
  "music_mood",
];

pub struct ComponentsTab {
  root: Box<dyn Component>,
  /// The dropdown the primary button opens, while it is open.
  dropdown: Option<Dropdown>,
  /// The last option picked from that dropdown.
  selected: usize,
}

impl Default for ComponentsTab {
  fn default() -> Self {
    Self {
      root: Box::new(Empty),
      dropdown: None,
      selected: 0,
    }
  }
}

impl ComponentsTab {
  #[cfg(test)]
  pub fn selected(&self) -> usize {
    self.selected
  }

  fn on_change(&mut self, commands: &mut CommandBuffer, id: &str, change: Change) {
    match (id, change) {
      ("button_primary", Change::Clicked) => {
        log::info!("主按钮被点击了");
        self.dropdown = Some(Dropdown::new(
          "Test",
          (1..=13).map(|i| format!("Test {}", i)),
          self.selected,
        ));
      }
      ("slider", Change::Progress(p)) => {
        let percent = format!("{}%", (p * 100.0).round() as i32);
        self.root.send("progress", &Message::SetText(percent));
      }
      ("music_genre", Change::Selected(i)) => {
        commands.alert(format!("选择了音乐风格: {}", i))
      }
      ("music_era", Change::Selected(i)) => {
        commands.alert(format!("选择了音乐年代: {}", i))
      }
      ("music_mood", Change::Selected(i)) => {
        commands.alert(format!("选择了音乐情绪: {}", i))
      }
      _ => {}
    }
  }
}

impl Component for ComponentsTab {
  delegate_to_root!();

  fn process_event(&mut self, args: &mut EventArgs) {
    if let Some(dropdown) = &mut self.dropdown {
      args.commands.claim();
      match dropdown.process_event(args.event) {
        Outcome::Pending => {}
        Outcome::Confirmed(i) => {
          log::info!("picked Test {}", i + 1);
          self.selected = i;
          self.dropdown = None;
        }
        Outcome::Cancelled => self.dropdown = None,
      }
      return;
    }

    for (id, change) in dispatch(self.root.as_mut(), args) {
      self.on_change(args.commands, &id, change);
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    self.root.render(args)
  }

  fn render_overlay(&mut self, args: &mut RenderArgs) {
    self.root.render_overlay(args);
    if let Some(dropdown) = &mut self.dropdown {
      dropdown.render(args);
    }
  }

  fn inflate(&mut self, inflater: &Inflater) -> Result<(), Error> {
    self.root = inflater.inflate_layout(LAYOUT, IDS)?;
    Ok(())
  }
}

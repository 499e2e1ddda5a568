//! Settings cells, most of them wired to the platform.

use vitrine::settings::Platform;
use vitrine::Error;

use crate::ui::component::Change;
use crate::ui::component::CommandBuffer;
use crate::ui::component::Component;
use crate::ui::component::Empty;
use crate::ui::component::EventArgs;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::inflate::Inflater;
use crate::ui::tab::dispatch;

const LAYOUT: &str = "tabs/settings";

const IDS: &[&str] = &[
  "radio",
  "boolean",
  "debug",
  "bottomBar",
  "alwaysOnTop",
  "fps",
  "selector",
  "swapInterval",
  "input",
  "inputNumeric",
  "ipAddress",
  "dnsServer",
  "notify",
  "slider",
];

const DEFAULT_URL: &str = "https://github.com";

const NOTIFICATIONS: &[&str] = &[
  "你的头发很酷",
  "我喜欢你的鞋子",
  "这个演示是在终端里画出来的",
  "三角力量是内部工作",
  "Pozznx将在一天十二小时后触发",
  "我可以看看吗？",
  "嗯，蒸汉堡！",
  "你好\n世界！",
];

pub struct SettingsTab {
  root: Box<dyn Component>,
  radio_selected: bool,
  url: String,
  number: Option<i64>,
  next_notification: usize,
}

impl Default for SettingsTab {
  fn default() -> Self {
    Self {
      root: Box::new(Empty),
      radio_selected: false,
      url: DEFAULT_URL.to_string(),
      number: Some(2448),
      next_notification: 0,
    }
  }
}

impl SettingsTab {
  #[cfg(test)]
  pub fn radio_selected(&self) -> bool {
    self.radio_selected
  }

  /// Shows whatever the platform currently says.
  fn sync(&mut self, platform: &dyn Platform) {
    let root = &mut self.root;
    root.send("debug", &Message::SetToggled(platform.debugging_view()));
    root.send("bottomBar", &Message::SetToggled(platform.footer_visible()));
    root.send("alwaysOnTop", &Message::SetToggled(platform.always_on_top()));
    root.send("fps", &Message::SetToggled(platform.fps_visible()));
    root.send(
      "swapInterval",
      &Message::SetSelected(platform.swap_interval() as usize),
    );
    root.send("ipAddress", &Message::SetDetail(platform.ip_address()));
    root.send("dnsServer", &Message::SetDetail(platform.dns_server()));

    let brightness = platform.brightness();
    root.send("slider", &Message::SetProgress(brightness));
    root.send("slider", &Message::SetDetail(format!("{:.2}", brightness)));
  }

  fn on_change(
    &mut self,
    platform: &mut dyn Platform,
    commands: &mut CommandBuffer,
    id: &str,
    change: Change,
  ) {
    match (id, change) {
      ("radio", Change::Toggled(_)) => {
        self.radio_selected = !self.radio_selected;
        let selected = self.radio_selected;
        self.root.send("radio", &Message::SetToggled(selected));
      }
      ("debug", Change::Toggled(on)) => {
        platform.set_debugging_view(on);
        log::info!("{} 调试层", if on { "打开" } else { "关闭" });
      }
      ("bottomBar", Change::Toggled(on)) => platform.set_footer_visible(on),
      ("alwaysOnTop", Change::Toggled(on)) => platform.set_always_on_top(on),
      ("fps", Change::Toggled(on)) => platform.set_fps_visible(on),
      ("selector", Change::Selected(i)) => {
        commands.alert(format!("选择了 {}", i))
      }
      ("swapInterval", Change::Selected(i)) => {
        platform.set_swap_interval(i as u32)
      }
      ("input", Change::Text(text)) => {
        log::info!("输入了文本: {}", text);
        self.url = text;
      }
      ("input", Change::Open) => platform.open_browser(&self.url),
      ("inputNumeric", Change::Number(n)) => {
        log::info!("输入了数字: {}", n);
        self.number = Some(n);
      }
      ("slider", Change::Progress(p)) => {
        platform.set_brightness(p);
        let detail = format!("{:.2}", platform.brightness());
        self.root.send("slider", &Message::SetDetail(detail));
      }
      ("notify", Change::Clicked) => {
        let text = NOTIFICATIONS[self.next_notification % NOTIFICATIONS.len()];
        self.next_notification += 1;
        commands.notify(text);
      }
      _ => {}
    }
  }
}

impl Component for SettingsTab {
  delegate_to_root!();

  fn process_event(&mut self, args: &mut EventArgs) {
    for (id, change) in dispatch(self.root.as_mut(), args) {
      self.on_change(args.platform, args.commands, &id, change);
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    self.sync(args.platform);
    self.root.render(args)
  }

  fn render_overlay(&mut self, args: &mut RenderArgs) {
    self.root.render_overlay(args)
  }

  fn inflate(&mut self, inflater: &Inflater) -> Result<(), Error> {
    self.root = inflater.inflate_layout(LAYOUT, IDS)?;
    let radio = self.radio_selected;
    self.root.send("radio", &Message::SetToggled(radio));
    self.root.send("input", &Message::SetText(self.url.clone()));
    if let Some(n) = self.number {
      self.root.send("inputNumeric", &Message::SetText(n.to_string()));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use vitrine::settings::HeadlessPlatform;

  use crate::ui::component::testing;
  use crate::ui::component::testing::Harness;
  use crate::ui::views;

  fn tab(h: &Harness) -> SettingsTab {
    let views = views::all().unwrap();
    let mut tab = SettingsTab::default();
    tab.inflate(&Inflater::new(&h.resources, &views)).unwrap();
    tab
  }

  #[test]
  fn switches_drive_the_platform() {
    let h = Harness::new();
    let mut tab = tab(&h);
    let mut platform = HeadlessPlatform::default();
    let mut commands = CommandBuffer::new();

    tab.on_change(&mut platform, &mut commands, "debug", Change::Toggled(true));
    tab.on_change(&mut platform, &mut commands, "fps", Change::Toggled(true));
    tab.on_change(
      &mut platform,
      &mut commands,
      "bottomBar",
      Change::Toggled(false),
    );
    tab.on_change(
      &mut platform,
      &mut commands,
      "swapInterval",
      Change::Selected(3),
    );
    tab.on_change(
      &mut platform,
      &mut commands,
      "slider",
      Change::Progress(0.75),
    );

    assert!(platform.debugging_view());
    assert!(platform.fps_visible());
    assert!(!platform.footer_visible());
    assert_eq!(platform.swap_interval(), 3);
    assert_eq!(platform.brightness(), 0.75);
  }

  #[test]
  fn the_radio_state_lives_on_the_tab() {
    let h = Harness::new();
    let mut tab = tab(&h);
    let mut platform = HeadlessPlatform::default();
    let mut commands = CommandBuffer::new();

    tab.on_change(&mut platform, &mut commands, "radio", Change::Toggled(true));
    assert!(tab.radio_selected());
    tab.on_change(&mut platform, &mut commands, "radio", Change::Toggled(false));
    assert!(!tab.radio_selected());
  }

  #[test]
  fn notifications_cycle() {
    let h = Harness::new();
    let mut tab = tab(&h);
    let mut platform = HeadlessPlatform::default();

    let mut seen = Vec::new();
    for _ in 0..NOTIFICATIONS.len() + 1 {
      let mut commands = CommandBuffer::new();
      tab.on_change(&mut platform, &mut commands, "notify", Change::Clicked);
      seen.push(commands.take_notification().unwrap());
    }
    assert_eq!(seen[0], NOTIFICATIONS[0]);
    assert_eq!(seen[1], NOTIFICATIONS[1]);
    assert_eq!(seen[NOTIFICATIONS.len()], NOTIFICATIONS[0]);
  }

  #[test]
  fn the_selector_opens_a_dialog() {
    let h = Harness::new();
    let mut tab = tab(&h);
    let mut platform = HeadlessPlatform::default();
    let mut commands = CommandBuffer::new();
    tab.on_change(&mut platform, &mut commands, "selector", Change::Selected(4));
    assert_eq!(commands.take_alert().as_deref(), Some("选择了 4"));
  }

  #[test]
  fn renders_platform_state() {
    let mut h = Harness::new();
    let mut tab = tab(&h);
    h.platform.set_brightness(0.3);
    let buf = h.render(&mut tab, 60, 40, true);
    assert!(testing::contains(&buf, "0.30"));
    assert!(testing::contains(&buf, "github"));
  }
}

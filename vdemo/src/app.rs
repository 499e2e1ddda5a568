//! The root UI type.

use std::time::Duration;
use std::time::Instant;

use crossterm::event::KeyCode;
use crossterm::event::KeyModifiers;

use tui::backend::Backend;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::widgets::Block;
use tui::widgets::BorderType;
use tui::widgets::Borders;
use tui::widgets::Widget;
use tui::Frame;

use unicode_width::UnicodeWidthStr;

use vitrine::settings::Platform;
use vitrine::Error;

use crate::ui::activity::Activity;
use crate::ui::component::dialog::Dialog;
use crate::ui::component::CommandBuffer;
use crate::ui::component::Component;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::RenderArgs;
use crate::ui::component::StyleSheet;
use crate::ui::inflate::Inflater;
use crate::ui::inflate::Views;
use crate::ui::resources::Resources;
use crate::ui::widgets;

/// How long a notification stays on screen.
const BANNER_TIME: Duration = Duration::from_secs(3);

/// How long one display refresh takes.
const REFRESH: Duration = Duration::from_millis(16);

/// How long a frame takes when the swap interval is zero.
const UNTHROTTLED: Duration = Duration::from_millis(4);

struct Banner {
  text: String,
  shown_at: Duration,
}

/// Counts frames over one-second windows.
#[derive(Default)]
struct FpsCounter {
  window_start: Duration,
  frames: u32,
  fps: u32,
}

impl FpsCounter {
  fn tick(&mut self, now: Duration) -> u32 {
    self.frames += 1;
    if now.saturating_sub(self.window_start) >= Duration::from_secs(1) {
      self.fps = self.frames;
      self.frames = 0;
      self.window_start = now;
    }
    self.fps
  }
}

/// The root application type: a stack of activities plus whatever is drawn
/// over them.
pub struct App {
  activities: Vec<Activity>,
  dialog: Option<Dialog>,
  banner: Option<Banner>,
  platform: Box<dyn Platform>,
  resources: Resources,
  views: Views,
  start: Instant,
  frame_number: usize,
  fps: FpsCounter,
  screen: Rect,
  quit: bool,
}

impl App {
  /// Creates an app showing the main activity.
  pub fn new(
    platform: Box<dyn Platform>,
    resources: Resources,
    views: Views,
  ) -> Result<Self, Error> {
    let main = Activity::main(&Inflater::new(&resources, &views))?;
    Ok(Self {
      activities: vec![main],
      dialog: None,
      banner: None,
      platform,
      resources,
      views,
      start: Instant::now(),
      frame_number: 0,
      fps: FpsCounter::default(),
      screen: Rect::default(),
      quit: false,
    })
  }

  pub fn should_quit(&self) -> bool {
    self.quit
  }

  /// Returns how many activities are stacked up.
  pub fn depth(&self) -> usize {
    self.activities.len()
  }

  /// Returns how long a frame should take, per the platform's swap interval.
  pub fn frame_time(&self) -> Duration {
    match self.platform.swap_interval() {
      0 => UNTHROTTLED,
      n => REFRESH * n,
    }
  }

  /// Propagates a terminal event to whatever is on top: the open dialog if
  /// there is one, the top activity otherwise.
  ///
  /// Ctrl-C and Ctrl-Q quit; Esc pops any activity but the first, unless the
  /// activity claimed it.
  pub fn process_event(&mut self, e: crossterm::event::Event) {
    let event = match e {
      crossterm::event::Event::Key(k) => {
        if k.modifiers.contains(KeyModifiers::CONTROL)
          && matches!(k.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
          log::info!("quitting");
          self.quit = true;
          return;
        }
        Event::Key(k)
      }
      crossterm::event::Event::Mouse(m) => Event::Mouse(m),
      crossterm::event::Event::Resize(..) => return,
    };

    let mut commands = CommandBuffer::new();
    if self.dialog.is_none() {
      return self.dispatch(&event, &mut commands);
    }

    if let Some(dialog) = &mut self.dialog {
      dialog.process_event(&mut EventArgs {
        is_focused: true,
        event: &event,
        rect: self.screen,
        platform: self.platform.as_mut(),
        commands: &mut commands,
      });
    }
    if commands.take_dismiss() {
      self.dialog = None;
    }
  }

  /// Feeds `event` to the top activity and carries out what it asked for.
  fn dispatch(&mut self, event: &Event, commands: &mut CommandBuffer) {
    let top = match self.activities.last_mut() {
      Some(top) => top,
      None => return,
    };
    top.process_event(event, self.platform.as_mut(), commands);

    if let Event::Key(k) = event {
      if k.code == KeyCode::Esc && !commands.is_claimed() {
        commands.dismiss();
      }
    }
    self.apply(commands);
  }

  /// Carries out what an event asked of the application.
  fn apply(&mut self, commands: &mut CommandBuffer) {
    if commands.take_dismiss() && self.activities.len() > 1 {
      self.activities.pop();
      log::debug!("activity dismissed, {} left", self.activities.len());
    }

    let presenters = commands.take_presenters();
    if !presenters.is_empty() {
      let inflater = Inflater::new(&self.resources, &self.views);
      for present in presenters {
        match present(&inflater) {
          Ok(root) => self.activities.push(Activity::new(root)),
          Err(e) => log::error!("could not present a view: {}", e),
        }
      }
    }

    if let Some(text) = commands.take_alert() {
      self.dialog = Some(Dialog::new(text));
    }
    if let Some(text) = commands.take_notification() {
      self.banner = Some(Banner {
        text,
        shown_at: self.start.elapsed(),
      });
    }
  }

  /// Renders the UI onto a `Frame`.
  pub fn render<B: Backend>(&mut self, f: &mut Frame<B>) {
    struct AppAsWidget<'a> {
      app: &'a mut App,
    }
    impl Widget for AppAsWidget<'_> {
      fn render(self, rect: Rect, buf: &mut Buffer) {
        let time = self.app.start.elapsed();
        self.app.draw(rect, buf, time);
      }
    }

    let size = f.size();
    f.render_widget(AppAsWidget { app: self }, size);
  }

  /// Draws everything as of `time` since startup.
  fn draw(&mut self, rect: Rect, buf: &mut Buffer, time: Duration) {
    self.screen = rect;
    let fps = self.fps.tick(time);
    let style_sheet = StyleSheet::default();

    if let Some(top) = self.activities.last_mut() {
      top.render(&mut RenderArgs {
        is_focused: self.dialog.is_none(),
        rect,
        output: buf,
        frame_number: self.frame_number,
        time,
        style_sheet,
        resources: &self.resources,
        platform: self.platform.as_ref(),
      });
    }

    if let Some(dialog) = &mut self.dialog {
      dialog.render(&mut RenderArgs {
        is_focused: true,
        rect,
        output: buf,
        frame_number: self.frame_number,
        time,
        style_sheet,
        resources: &self.resources,
        platform: self.platform.as_ref(),
      });
    }

    let expired = self
      .banner
      .as_ref()
      .map_or(false, |b| time.saturating_sub(b.shown_at) >= BANNER_TIME);
    if expired {
      self.banner = None;
    }
    if let Some(banner) = &self.banner {
      draw_banner(&banner.text, rect, buf, &style_sheet);
    }

    if self.platform.fps_visible() && rect.width > 0 {
      let text = format!(" {} FPS ", fps);
      let width = (text.width() as u16).min(rect.width);
      buf.set_stringn(
        rect.x + rect.width - width,
        rect.y,
        &text,
        width as usize,
        style_sheet.highlight,
      );
    }

    if self.platform.debugging_view() && rect.height > 0 {
      let text = format!(
        " frame {} | {}x{} | {} activities | {:.1}s ",
        self.frame_number,
        rect.width,
        rect.height,
        self.depth(),
        time.as_secs_f32(),
      );
      buf.set_stringn(
        rect.x,
        rect.y + rect.height - 1,
        &text,
        rect.width as usize,
        style_sheet.dim.patch(style_sheet.selected),
      );
    }

    self.frame_number += 1;
  }
}

/// Draws a boxed notification near the top of `screen`.
fn draw_banner(text: &str, screen: Rect, buf: &mut Buffer, sheet: &StyleSheet) {
  if screen.width < 6 || screen.height < 4 {
    return;
  }

  let longest = text.lines().map(|l| l.width()).max().unwrap_or(0) as u16;
  let width = (longest + 4).min(screen.width);
  let height = (text.lines().count() as u16 + 2).min(screen.height - 1);
  let rect = Rect::new(
    screen.x + (screen.width - width) / 2,
    screen.y + 1,
    width,
    height,
  );

  widgets::clear(rect, buf, sheet.unfocused);
  Block::default()
    .borders(Borders::ALL)
    .border_type(BorderType::Rounded)
    .border_style(sheet.highlight)
    .render(rect, buf);
  for (i, line) in text.lines().take(height as usize - 2).enumerate() {
    buf.set_stringn(
      rect.x + 2,
      rect.y + 1 + i as u16,
      line,
      width as usize - 4,
      sheet.focused,
    );
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crossterm::event::KeyEvent;

  use vitrine::model::Roster;
  use vitrine::settings::HeadlessPlatform;

  use crate::ui::component::testing;
  use crate::ui::view::pokemon::PokemonView;
  use crate::ui::views;

  fn app() -> App {
    App::new(
      Box::new(HeadlessPlatform::default()),
      Resources::builtin().unwrap(),
      views::all().unwrap(),
    )
    .unwrap()
  }

  fn key(code: KeyCode, modifiers: KeyModifiers) -> crossterm::event::Event {
    crossterm::event::Event::Key(KeyEvent::new(code, modifiers))
  }

  fn draw(app: &mut App, time: Duration) -> Buffer {
    let rect = Rect::new(0, 0, 80, 30);
    let mut buf = Buffer::empty(rect);
    app.draw(rect, &mut buf, time);
    buf
  }

  #[test]
  fn control_q_quits() {
    let mut app = app();
    app.process_event(key(KeyCode::Char('q'), KeyModifiers::NONE));
    assert!(!app.should_quit());
    app.process_event(key(KeyCode::Char('q'), KeyModifiers::CONTROL));
    assert!(app.should_quit());
  }

  #[test]
  fn presented_views_stack_up_and_escape_pops_them() {
    let mut app = app();
    let mut commands = CommandBuffer::new();
    commands.present(|inflater| {
      let roster = Roster::builtin()?;
      PokemonView::build(inflater, roster[0].clone())
    });
    app.apply(&mut commands);
    assert_eq!(app.depth(), 2);

    app.process_event(key(KeyCode::Esc, KeyModifiers::NONE));
    assert_eq!(app.depth(), 1);

    // The main activity stays.
    app.process_event(key(KeyCode::Esc, KeyModifiers::NONE));
    assert_eq!(app.depth(), 1);
  }

  #[test]
  fn alerts_are_modal_until_confirmed() {
    let mut app = app();
    let mut commands = CommandBuffer::new();
    commands.alert("选择了 3");
    app.apply(&mut commands);
    assert_eq!(app.dialog.as_ref().map(|d| d.text()), Some("选择了 3"));

    let buf = draw(&mut app, Duration::from_secs(0));
    assert!(testing::contains(&buf, "选择了 3"));

    app.process_event(key(KeyCode::Enter, KeyModifiers::NONE));
    assert!(app.dialog.is_none());
  }

  #[test]
  fn notifications_expire() {
    let mut app = app();
    let mut commands = CommandBuffer::new();
    commands.notify("你好\n世界！");
    app.apply(&mut commands);

    let shown_at = app.start.elapsed();
    let buf = draw(&mut app, shown_at);
    assert!(testing::contains(&buf, "你好"));
    assert!(testing::contains(&buf, "世界！"));

    let buf = draw(&mut app, shown_at + BANNER_TIME);
    assert!(!testing::contains(&buf, "你好"));
  }

  #[test]
  fn overlays_follow_the_platform() {
    let mut app = app();
    let buf = draw(&mut app, Duration::from_secs(0));
    assert!(!testing::contains(&buf, "FPS"));
    assert!(!testing::contains(&buf, "activities"));

    app.platform.set_fps_visible(true);
    app.platform.set_debugging_view(true);
    let buf = draw(&mut app, Duration::from_secs(1));
    assert!(testing::contains(&buf, "2 FPS"));
    assert!(testing::contains(&buf, "1 activities"));
  }

  #[test]
  fn frames_follow_the_swap_interval() {
    let mut app = app();
    assert_eq!(app.frame_time(), Duration::from_millis(16));
    app.platform.set_swap_interval(3);
    assert_eq!(app.frame_time(), Duration::from_millis(48));
    app.platform.set_swap_interval(0);
    assert_eq!(app.frame_time(), Duration::from_millis(4));
  }
}

//! A terminal showcase for the `vitrine` widgets.

use std::error::Error;
use std::fs::File;
use std::io;
use std::process;
use std::time::Instant;

use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;

use log::LevelFilter;

use tui::backend::Backend;
use tui::backend::CrosstermBackend;
use tui::Terminal;

use vitrine::settings::HeadlessPlatform;
use vitrine::settings::Platform as _;
use vitrine::Config;

mod app;
mod flags;
mod ui;

use crate::app::App;
use crate::flags::Flags;
use crate::ui::resources::Resources;

/// Sends logs to the file `flags` names; the terminal is busy drawing.
fn init_logger(flags: &Flags) -> Result<(), io::Error> {
  let file = File::create(&flags.log_file)?;
  let mut builder = env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("info"),
  );
  builder
    .format_timestamp_millis()
    .target(env_logger::Target::Pipe(Box::new(file)));
  if flags.debug {
    builder.filter_level(LevelFilter::Debug);
  }
  builder.init();
  Ok(())
}

/// Builds the app, exiting if any part of it fails to come up.
fn init(flags: &Flags) -> App {
  let config = match Config::load() {
    Ok(config) => config,
    Err(e) => {
      log::error!("could not load the configuration: {}", e);
      process::exit(1);
    }
  };

  let mut platform = HeadlessPlatform::new(&config);
  if flags.debugging_view {
    platform.set_debugging_view(true);
  }

  let resources = match Resources::load(&config) {
    Ok(resources) => resources,
    Err(e) => {
      log::error!("could not load resources: {}", e);
      process::exit(1);
    }
  };

  let views = match ui::views::all() {
    Ok(views) => views,
    Err(e) => {
      log::error!("view registration failed: {}", e);
      process::exit(1);
    }
  };

  match App::new(Box::new(platform), resources, views) {
    Ok(app) => app,
    Err(e) => {
      log::error!("could not create the main activity: {}", e);
      process::exit(1);
    }
  }
}

fn main() {
  let flags = Flags::parse(std::env::args().skip(1));
  if let Err(e) = init_logger(&flags) {
    eprintln!("could not open {}: {}", flags.log_file.display(), e);
    process::exit(1);
  }
  for flag in &flags.ignored {
    log::warn!("ignoring unknown flag {:?}", flag);
  }

  let mut app = init(&flags);
  if let Err(e) = run(&mut app) {
    log::error!("terminal failure: {}", e);
    process::exit(1);
  }
}

/// Takes over the terminal until the app quits, then gives it back.
fn run(app: &mut App) -> Result<(), Box<dyn Error>> {
  terminal::enable_raw_mode()?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
  let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

  let result = event_loop(&mut terminal, app);

  terminal::disable_raw_mode()?;
  execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
  terminal.show_cursor()?;
  result
}

fn event_loop<B: Backend>(
  terminal: &mut Terminal<B>,
  app: &mut App,
) -> Result<(), Box<dyn Error>> {
  terminal.hide_cursor()?;
  loop {
    let deadline = Instant::now() + app.frame_time();
    terminal.draw(|f| app.render(f))?;

    // Input is handled as it comes; the next frame waits for the deadline.
    loop {
      let now = Instant::now();
      if now >= deadline {
        break;
      }
      if event::poll(deadline - now)? {
        app.process_event(event::read()?);
        if app.should_quit() {
          return Ok(());
        }
      }
    }
  }
}

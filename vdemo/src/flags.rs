//! Command-line flags.

use std::path::PathBuf;

/// Where logs go unless `-o` says otherwise.
pub const DEFAULT_LOG: &str = "vitrine.log";

#[derive(Clone, Debug, PartialEq)]
pub struct Flags {
  /// `-d`: log at debug level.
  pub debug: bool,
  /// `-o <path>`: the file logs are written to.
  pub log_file: PathBuf,
  /// `-v`: start with the debugging overlay on.
  pub debugging_view: bool,
  /// Anything not understood, in order.
  pub ignored: Vec<String>,
}

impl Default for Flags {
  fn default() -> Self {
    Self {
      debug: false,
      log_file: PathBuf::from(DEFAULT_LOG),
      debugging_view: false,
      ignored: Vec::new(),
    }
  }
}

impl Flags {
  /// Parses `args`, not including the program name.
  pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
    let mut flags = Self::default();
    let mut args = args.into_iter().peekable();
    while let Some(arg) = args.next() {
      match arg.as_str() {
        "-d" => flags.debug = true,
        "-v" => flags.debugging_view = true,
        "-o" => {
          // A following flag is never taken as the path.
          flags.log_file = args
            .next_if(|path| !path.starts_with('-'))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG));
        }
        _ => flags.ignored.push(arg),
      }
    }
    flags
  }
}

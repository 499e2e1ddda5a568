//! Text.

use serde_json::Value;

use tui::layout::Alignment;
use tui::layout::Rect;
use tui::style::Color;
use tui::style::Modifier;

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::ui::component::parse_alignment;
use crate::ui::component::value_to_string;
use crate::ui::component::Component;
use crate::ui::component::Message;
use crate::ui::component::RenderArgs;
use crate::ui::component::Size;
use crate::ui::widgets;

/// Where text sits vertically within a label that is taller than it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VerticalAlign {
  /// Same as `Top` on a terminal, which has no baseline to speak of.
  Baseline,
  Top,
  Center,
  Bottom,
}

impl VerticalAlign {
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "baseline" => Some(Self::Baseline),
      "top" => Some(Self::Top),
      "center" => Some(Self::Center),
      "bottom" => Some(Self::Bottom),
      _ => None,
    }
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LabelStyle {
  Body,
  Caption,
  Header,
  Dim,
  Boxed,
}

/// A block of text, wrapped to its width unless it is single-line.
#[derive(Clone, Debug)]
pub struct Label {
  text: String,
  h_align: Alignment,
  v_align: VerticalAlign,
  single_line: bool,
  width: Option<u16>,
  height: Option<u16>,
  style: LabelStyle,
}

impl Default for Label {
  fn default() -> Self {
    Self::new("")
  }
}

impl Label {
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      h_align: Alignment::Left,
      v_align: VerticalAlign::Top,
      single_line: false,
      width: None,
      height: None,
      style: LabelStyle::Body,
    }
  }

  fn lines(&self, width: u16) -> Vec<String> {
    if self.single_line {
      let first = self.text.lines().next().unwrap_or("");
      vec![truncate(first, width as usize)]
    } else {
      wrap(&self.text, width as usize)
    }
  }
}

/// Greedily wraps `text` to `width` columns, breaking at the last space on a
/// line when there is one and anywhere otherwise.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
  if width == 0 {
    return Vec::new();
  }

  let mut lines = Vec::new();
  for paragraph in text.split('\n') {
    let mut line = String::new();
    let mut line_width = 0;
    let mut last_space = None;

    for ch in paragraph.chars() {
      let ch_width = ch.width().unwrap_or(0);
      if line_width + ch_width > width && !line.is_empty() {
        if ch == ' ' {
          lines.push(std::mem::take(&mut line));
          line_width = 0;
          last_space = None;
          continue;
        }
        match last_space {
          Some(idx) if idx > 0 => {
            let rest = line[idx + 1..].to_string();
            line.truncate(idx);
            lines.push(line);
            line_width = rest.width();
            line = rest;
          }
          _ => {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
          }
        }
        last_space = None;
        if line_width + ch_width > width && !line.is_empty() {
          lines.push(std::mem::take(&mut line));
          line_width = 0;
        }
      }

      if ch == ' ' {
        last_space = Some(line.len());
      }
      line.push(ch);
      line_width += ch_width;
    }
    lines.push(line);
  }
  lines
}

/// Cuts `text` down to `width` columns, ending it with an ellipsis if
/// anything was cut.
pub fn truncate(text: &str, width: usize) -> String {
  if text.width() <= width {
    return text.to_string();
  }

  let mut out = String::new();
  let mut used = 0;
  for ch in text.chars() {
    let w = ch.width().unwrap_or(0);
    if used + w + 1 > width {
      break;
    }
    out.push(ch);
    used += w;
  }
  if width > 0 {
    out.push('…');
  }
  out
}

impl Component for Label {
  fn layout_hint(&self, vertical: bool) -> Option<Size> {
    if vertical {
      let lines = if self.single_line {
        1
      } else {
        self.text.split('\n').count() as u16
      };
      Some(Size::Fixed(self.height.unwrap_or(lines)))
    } else {
      let text = self.text.lines().map(|l| l.width()).max().unwrap_or(0);
      let extra = if self.style == LabelStyle::Header { 2 } else { 0 };
      Some(Size::Fixed(self.width.unwrap_or(text as u16 + extra)))
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    let rect = Rect::new(
      args.rect.x,
      args.rect.y,
      self.width.map_or(args.rect.width, |w| w.min(args.rect.width)),
      self.height.map_or(args.rect.height, |h| h.min(args.rect.height)),
    );
    if rect.width == 0 || rect.height == 0 {
      return;
    }

    let sheet = &args.style_sheet;
    let mut text_rect = rect;
    let style = match self.style {
      LabelStyle::Body => sheet.unfocused,
      LabelStyle::Caption => sheet.caption,
      LabelStyle::Dim => sheet.dim,
      LabelStyle::Boxed => {
        let style = sheet.focused.bg(Color::Rgb(0x30, 0x30, 0x30));
        widgets::clear(rect, args.output, style);
        style
      }
      LabelStyle::Header => {
        args
          .output
          .get_mut(rect.x, rect.y)
          .set_symbol("▌")
          .set_style(sheet.highlight);
        text_rect.x += 2;
        text_rect.width = text_rect.width.saturating_sub(2);
        sheet.focused.add_modifier(Modifier::BOLD)
      }
    };

    let lines = self.lines(text_rect.width);
    let shown = (lines.len() as u16).min(text_rect.height);
    let slack = text_rect.height - shown;
    let top = match self.v_align {
      VerticalAlign::Baseline | VerticalAlign::Top => 0,
      VerticalAlign::Center => slack / 2,
      VerticalAlign::Bottom => slack,
    };

    for (i, line) in lines.iter().take(shown as usize).enumerate() {
      let line_width = (line.width() as u16).min(text_rect.width);
      let left = match self.h_align {
        Alignment::Left => 0,
        Alignment::Center => (text_rect.width - line_width) / 2,
        Alignment::Right => text_rect.width - line_width,
      };
      args.output.set_stringn(
        text_rect.x + left,
        text_rect.y + top + i as u16,
        line,
        line_width as usize,
        style,
      );
    }
  }

  fn receive(&mut self, message: &Message) -> bool {
    match message {
      Message::SetText(text) => self.text = text.clone(),
      Message::SetWidth(w) => self.width = *w,
      Message::SetHeight(h) => self.height = *h,
      Message::SetHorizontalAlign(a) => self.h_align = *a,
      Message::SetVerticalAlign(a) => self.v_align = *a,
      Message::SetSingleLine(s) => self.single_line = *s,
      _ => return false,
    }
    true
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    match name {
      "text" => match value_to_string(value) {
        Some(text) => self.text = text,
        None => return false,
      },
      "horizontalAlign" => {
        match value.as_str().and_then(parse_alignment) {
          Some(a) => self.h_align = a,
          None => return false,
        }
      }
      "verticalAlign" => {
        match value.as_str().and_then(VerticalAlign::parse) {
          Some(a) => self.v_align = a,
          None => return false,
        }
      }
      "singleLine" => match value.as_bool() {
        Some(b) => self.single_line = b,
        None => return false,
      },
      "style" => {
        self.style = match value.as_str() {
          Some("body") => LabelStyle::Body,
          Some("caption") => LabelStyle::Caption,
          Some("header") => LabelStyle::Header,
          Some("dim") => LabelStyle::Dim,
          Some("boxed") => LabelStyle::Boxed,
          _ => return false,
        }
      }
      _ => return false,
    }
    true
  }
}

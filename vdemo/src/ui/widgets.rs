//! `tui` widgets that are not complex enough to be `Component`s.

use std::iter;

use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Modifier;
use tui::style::Style;
use tui::symbols;
use tui::text::Span;
use tui::text::Spans;
use tui::widgets::Widget;

/// The character bars are drawn with.
const PIPE: &str = symbols::block::ONE_QUARTER;

/// A frame that wraps around a rectangle: a title bar on top and, optionally,
/// a footer bar on the bottom.
///
/// A focused title bar draws its text in the focused style.
#[derive(Clone, Debug)]
pub struct Chrome<'a> {
  title: Option<Spans<'a>>,
  footer: Option<Spans<'a>>,
  show_footer: bool,
  is_title_focused: bool,
  style: Style,
  focused_style: Style,
}

impl<'a> Chrome<'a> {
  pub fn new() -> Self {
    Self {
      title: None,
      footer: None,
      show_footer: true,
      is_title_focused: false,
      style: Style::default(),
      focused_style: Style::default(),
    }
  }

  pub fn title(mut self, title: impl Into<Spans<'a>>) -> Self {
    self.title = Some(title.into());
    self
  }

  pub fn footer(mut self, footer: impl Into<Spans<'a>>) -> Self {
    self.footer = Some(footer.into());
    self
  }

  /// Whether the footer bar is drawn at all.
  pub fn show_footer(mut self, show: bool) -> Self {
    self.show_footer = show;
    self
  }

  pub fn focus_title(mut self, focused: bool) -> Self {
    self.is_title_focused = focused;
    self
  }

  pub fn style(mut self, style: Style) -> Self {
    self.style = style;
    self
  }

  pub fn focused_style(mut self, style: Style) -> Self {
    self.focused_style = style;
    self
  }

  pub fn inner(&self, rect: Rect) -> Rect {
    let bars = if self.show_footer { 2 } else { 1 };
    Rect::new(
      rect.x + 1,
      rect.y + 1,
      rect.width.saturating_sub(2),
      rect.height.saturating_sub(bars),
    )
  }
}

impl Widget for Chrome<'_> {
  fn render(self, rect: Rect, buf: &mut Buffer) {
    if rect.width == 0 || rect.height == 0 {
      return;
    }

    let Chrome {
      title,
      footer,
      show_footer,
      is_title_focused,
      style,
      focused_style,
    } = self;

    let base_style = style;
    let focused_style = style.patch(focused_style);
    let make_bar = |spans, is_focused| {
      let mut bar = Spans::default();
      bar.0.push(Span::styled(PIPE, base_style));
      bar.0.push(Span::styled(PIPE, base_style));

      if let Some(Spans(spans)) = spans {
        bar.0.push(Span::styled(
          " ",
          focused_style.add_modifier(Modifier::REVERSED),
        ));
        for mut span in spans {
          span.style = if is_focused {
            focused_style.patch(span.style)
          } else {
            base_style.patch(span.style)
          }
          .add_modifier(Modifier::REVERSED);
          bar.0.push(span);
        }
        bar.0.push(Span::styled(
          " ",
          focused_style.add_modifier(Modifier::REVERSED),
        ));
      }

      let rest_len = (rect.width as usize).saturating_sub(bar.width());
      bar.0.push(Span::styled(
        iter::repeat(PIPE).take(rest_len).collect::<String>(),
        base_style,
      ));

      bar
    };

    buf.set_spans(
      rect.x,
      rect.y,
      &make_bar(title, is_title_focused),
      rect.width,
    );
    if show_footer && rect.height > 1 {
      buf.set_spans(
        rect.x,
        rect.y + rect.height - 1,
        &make_bar(footer, false),
        rect.width,
      );
    }
  }
}

/// A scrollbar indicating how far down a list the user has scrolled.
#[derive(Clone, Debug)]
pub struct ScrollBar {
  ratio: f64,
  style: Style,
  pip_style: Style,
}

impl ScrollBar {
  pub fn new(ratio: f64) -> Self {
    Self {
      ratio,
      style: Style::default(),
      pip_style: Style::default(),
    }
  }

  pub fn style(mut self, style: Style) -> Self {
    self.style = style;
    self
  }

  pub fn pip_style(mut self, style: Style) -> Self {
    self.pip_style = style;
    self
  }
}

impl Widget for ScrollBar {
  fn render(self, rect: Rect, buf: &mut Buffer) {
    let ratio = if self.ratio < 0.0 || self.ratio.is_nan() {
      0.0
    } else if self.ratio > 1.0 {
      1.0
    } else {
      self.ratio
    };
    let height = rect.height;
    if height == 0 || rect.width == 0 {
      return;
    }

    let selected = ((height - 1) as f64 * ratio) as u16;
    let x = rect.x + rect.width - 1;
    for i in 0..height {
      let cell = buf.get_mut(x, rect.y + i);
      if i == selected {
        let syn = if i == 0 {
          "▄"
        } else if i == height - 1 {
          "▀"
        } else {
          "█"
        };
        cell.set_symbol(syn);
        cell.set_style(self.style.patch(self.pip_style));
      } else {
        let syn = if i == 0 {
          "┬"
        } else if i == height - 1 {
          "┴"
        } else {
          "│"
        };
        cell.set_symbol(syn);
        cell.set_style(self.style);
      }
    }
  }
}

/// A horizontal track with a knob, showing a value in `[0, 1]`.
#[derive(Clone, Debug)]
pub struct Track {
  progress: f32,
  style: Style,
  filled_style: Style,
}

impl Track {
  pub fn new(progress: f32) -> Self {
    Self {
      progress,
      style: Style::default(),
      filled_style: Style::default(),
    }
  }

  pub fn style(mut self, style: Style) -> Self {
    self.style = style;
    self
  }

  pub fn filled_style(mut self, style: Style) -> Self {
    self.filled_style = style;
    self
  }
}

impl Widget for Track {
  fn render(self, rect: Rect, buf: &mut Buffer) {
    if rect.width == 0 || rect.height == 0 {
      return;
    }

    let progress = self.progress.max(0.0).min(1.0);
    let knob = ((rect.width - 1) as f32 * progress).round() as u16;
    let y = rect.y + rect.height / 2;
    for dx in 0..rect.width {
      let cell = buf.get_mut(rect.x + dx, y);
      if dx == knob {
        cell.set_symbol("●");
        cell.set_style(self.style.patch(self.filled_style));
      } else if dx < knob {
        cell.set_symbol("━");
        cell.set_style(self.style.patch(self.filled_style));
      } else {
        cell.set_symbol("─");
        cell.set_style(self.style);
      }
    }
  }
}

/// Blanks out `rect`, so that something can be drawn over whatever was
/// rendered there before.
pub fn clear(rect: Rect, buf: &mut Buffer, style: Style) {
  for y in rect.y..rect.y + rect.height {
    for x in rect.x..rect.x + rect.width {
      buf.get_mut(x, y).reset();
      buf.get_mut(x, y).set_style(style);
    }
  }
}

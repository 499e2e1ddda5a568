//! The list view: a [`RecyclerFrame`] drawn into the terminal.

use crossterm::event::KeyCode;
use crossterm::event::MouseButton;
use crossterm::event::MouseEventKind;

use serde_json::Value;

use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::widgets::Widget;

use vitrine::recycler::DataSource;
use vitrine::recycler::Entry;
use vitrine::recycler::RecyclerCell;
use vitrine::recycler::RecyclerFrame;
use vitrine::recycler::CELL;
use vitrine::recycler::HEADER;

use crate::ui::component::cell::draw_cell;
use crate::ui::component::image::Raster;
use crate::ui::component::rect_contains;
use crate::ui::component::CommandBuffer;
use crate::ui::component::Component;
use crate::ui::component::Event;
use crate::ui::component::EventArgs;
use crate::ui::component::RenderArgs;
use crate::ui::widgets::ScrollBar;

/// How many layout pixels one terminal row stands for.
const PIXELS_PER_ROW: u32 = 20;

/// Converts a height in layout pixels to terminal rows, rounding up.
pub fn px_to_rows(px: u32) -> u32 {
  ((px + PIXELS_PER_ROW - 1) / PIXELS_PER_ROW).max(1)
}

/// A cell of the list: a label and, for rows, a thumbnail.
#[derive(Clone, Debug, Default)]
pub struct ListCell {
  label: String,
  image: Raster,
}

impl ListCell {
  /// Fills the cell in for a row.
  pub fn set_item(
    &mut self,
    label: impl Into<String>,
    image: impl Into<String>,
  ) {
    self.label = label.into();
    self.image.set_path(image);
  }

  #[cfg(test)]
  pub fn label(&self) -> &str {
    &self.label
  }

  #[cfg(test)]
  pub fn image_path(&self) -> &str {
    self.image.path()
  }
}

impl RecyclerCell for ListCell {
  fn prepare_for_reuse(&mut self) {
    self.label.clear();
  }

  fn set_header_title(&mut self, title: &str) {
    self.label = title.to_string();
  }
}

/// The data source type a [`RecyclerView`] takes.
pub type ListSource = Box<dyn DataSource<ListCell, CommandBuffer>>;

/// A scrolling list of cells. Selections are reported to the data source,
/// which may act on them through the [`CommandBuffer`] of the event.
pub struct RecyclerView {
  frame: RecyclerFrame<ListCell, CommandBuffer>,
}

impl Default for RecyclerView {
  fn default() -> Self {
    Self::new()
  }
}

impl RecyclerView {
  pub fn new() -> Self {
    let mut frame = RecyclerFrame::new();
    frame.register_cell(HEADER, ListCell::default);
    frame.register_cell(CELL, ListCell::default);
    frame.set_estimated_row_height(px_to_rows(70));
    frame.set_header_height(2);
    Self { frame }
  }

  #[cfg(test)]
  pub fn frame(&self) -> &RecyclerFrame<ListCell, CommandBuffer> {
    &self.frame
  }

  pub fn set_data_source(&mut self, source: ListSource) {
    self.frame.set_data_source(source);
  }

  fn draw_entry(
    cell: &mut ListCell,
    entry: Entry,
    focused: bool,
    args: &mut RenderArgs,
  ) {
    let rect = args.rect;
    match entry {
      Entry::Header { .. } => {
        let sheet = args.style_sheet;
        args
          .output
          .get_mut(rect.x, rect.y)
          .set_symbol("▌")
          .set_style(sheet.highlight);
        args.output.set_stringn(
          rect.x + 2,
          rect.y,
          &cell.label,
          rect.width.saturating_sub(2) as usize,
          sheet.caption,
        );
      }
      Entry::Row(_) => {
        let thumb_width =
          (rect.height.saturating_sub(1) * 2 + 2).min(rect.width);
        let text = Rect::new(
          rect.x + thumb_width,
          rect.y + rect.height.saturating_sub(1) / 2,
          rect.width - thumb_width,
          rect.height - rect.height.saturating_sub(1) / 2,
        );
        let is_focused = args.is_focused && focused;
        draw_cell(
          &mut RenderArgs {
            is_focused,
            rect,
            output: args.output,
            frame_number: args.frame_number,
            time: args.time,
            style_sheet: args.style_sheet,
            resources: args.resources,
            platform: args.platform,
          },
          "",
          None,
        );
        args.output.set_stringn(
          text.x,
          text.y,
          &cell.label,
          text.width.saturating_sub(2) as usize,
          args.style_sheet.base(is_focused),
        );

        let thumb = Rect::new(
          rect.x + 2,
          rect.y,
          thumb_width.saturating_sub(2),
          rect.height.saturating_sub(1),
        );
        let dim = args.style_sheet.dim;
        cell.image.draw(args.resources, thumb, args.output, dim);
      }
    }
  }
}

impl Component for RecyclerView {
  fn wants_focus(&self) -> bool {
    self.frame.entry_count() > 0
  }

  fn process_event(&mut self, args: &mut EventArgs) {
    match args.event {
      Event::Key(k) if args.is_focused => {
        let handled = match k.code {
          KeyCode::Up => self.frame.move_focus(-1),
          KeyCode::Down => self.frame.move_focus(1),
          KeyCode::PageUp => self.frame.move_focus(-5),
          KeyCode::PageDown => self.frame.move_focus(5),
          KeyCode::Enter => self.frame.select(args.commands),
          _ => false,
        };
        if handled {
          args.commands.claim();
        }
      }
      Event::Mouse(m) if rect_contains(args.rect, m.column, m.row) => {
        let handled = match m.kind {
          MouseEventKind::ScrollUp => {
            self.frame.scroll_by(-1);
            true
          }
          MouseEventKind::ScrollDown => {
            self.frame.scroll_by(1);
            true
          }
          MouseEventKind::Down(MouseButton::Left) => {
            let y = (m.row - args.rect.y) as u32;
            self.frame.select_at(args.commands, y)
          }
          _ => false,
        };
        if handled {
          args.commands.claim();
        }
      }
      _ => {}
    }
  }

  fn render(&mut self, args: &mut RenderArgs) {
    let rect = args.rect;
    if rect.width < 4 || rect.height == 0 {
      return;
    }
    self.frame.layout(rect.height as u32);

    let list = Rect::new(rect.x, rect.y, rect.width - 1, rect.height);
    let visible = self
      .frame
      .visible()
      .map(|v| (v.entry, v.id, v.y, v.height, v.focused))
      .collect::<Vec<_>>();

    for (entry, id, y, height, focused) in visible {
      // Draw the whole cell off-screen, then copy over the rows that are
      // actually inside the list.
      let cell_rect = Rect::new(0, 0, list.width, height as u16);
      let mut scratch = Buffer::empty(cell_rect);
      let cell = self.frame.pool_mut().cell_mut(id);
      Self::draw_entry(
        cell,
        entry,
        focused,
        &mut RenderArgs {
          is_focused: args.is_focused,
          rect: cell_rect,
          output: &mut scratch,
          frame_number: args.frame_number,
          time: args.time,
          style_sheet: args.style_sheet,
          resources: args.resources,
          platform: args.platform,
        },
      );

      for dy in 0..height as i64 {
        let out_y = y + dy;
        if out_y < 0 || out_y >= list.height as i64 {
          continue;
        }
        for dx in 0..list.width {
          let src = scratch.get(dx, dy as u16).clone();
          *args.output.get_mut(list.x + dx, list.y + out_y as u16) = src;
        }
      }
    }

    let max = self
      .frame
      .content_height()
      .saturating_sub(self.frame.viewport());
    if max > 0 {
      ScrollBar::new(self.frame.offset() as f64 / max as f64)
        .style(args.style_sheet.dim)
        .pip_style(args.style_sheet.highlight)
        .render(rect, args.output);
    }
  }

  fn as_recycler(&mut self) -> Option<&mut RecyclerView> {
    Some(self)
  }

  fn apply_attribute(&mut self, name: &str, value: &Value) -> bool {
    let n = match value.as_u64() {
      Some(n) => n as u32,
      None => return false,
    };
    match name {
      "estimatedRowHeight" => {
        self.frame.set_estimated_row_height(px_to_rows(n))
      }
      "headerHeight" => self.frame.set_header_height(px_to_rows(n)),
      "prefetch" => self.frame.set_prefetch(n as usize),
      _ => return false,
    }
    true
  }
}

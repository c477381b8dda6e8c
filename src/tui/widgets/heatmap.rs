//! 53-week year heatmap widget

use chrono::Datelike;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::services::stats::WEEKDAY_LABELS;
use crate::services::IntensityBucket;
use crate::tui::theme::Theme;
use crate::types::{YearGrid, DAYS_PER_WEEK, GRID_WEEKS};

const LABEL_WIDTH: u16 = 4; // "Mon " prefix

/// Box drawing characters for the bordered layout
const BOX_TOP_LEFT: &str = "┌";
const BOX_TOP_RIGHT: &str = "┐";
const BOX_BOTTOM_LEFT: &str = "└";
const BOX_BOTTOM_RIGHT: &str = "┘";
const BOX_HORIZONTAL: &str = "─";
const BOX_VERTICAL: &str = "│";
const BOX_T_DOWN: &str = "┬";
const BOX_T_UP: &str = "┴";
const BOX_T_RIGHT: &str = "├";
const BOX_T_LEFT: &str = "┤";
const BOX_CROSS: &str = "┼";

const MONTH_NAMES: [&str; 13] = [
    "", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Cell layout, picked from the available width. The column count never
/// changes; only the cell size does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellLayout {
    /// 2-char cells separated by box-drawing borders
    Bordered,
    /// 2-char cells without borders
    Wide,
    /// 1-char cells
    Narrow,
}

impl CellLayout {
    pub fn for_width(width: u16) -> Self {
        if width >= Self::Bordered.total_width() {
            Self::Bordered
        } else if width >= Self::Wide.total_width() {
            Self::Wide
        } else {
            Self::Narrow
        }
    }

    /// Horizontal space per week column
    pub fn cell_width(self) -> u16 {
        match self {
            Self::Bordered => 3,
            Self::Wide => 2,
            Self::Narrow => 1,
        }
    }

    /// Full widget width including weekday labels
    pub fn total_width(self) -> u16 {
        let border = if self == Self::Bordered { 1 } else { 0 };
        LABEL_WIDTH + border + GRID_WEEKS as u16 * self.cell_width()
    }

    /// Rows needed including the month label row
    pub fn height(self) -> u16 {
        match self {
            Self::Bordered => 1 + DAYS_PER_WEEK as u16 * 2 + 1,
            Self::Wide | Self::Narrow => DAYS_PER_WEEK as u16 + 1,
        }
    }
}

/// Hovered cell position (week column, day row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub week: usize,
    pub day: usize,
}

impl Cursor {
    /// Move by the given deltas, staying inside the 53x7 grid
    pub fn moved(self, weeks: isize, days: isize) -> Self {
        let clamp = |value: usize, delta: isize, len: usize| {
            value.saturating_add_signed(delta).min(len - 1)
        };
        Self {
            week: clamp(self.week, weeks, GRID_WEEKS),
            day: clamp(self.day, days, DAYS_PER_WEEK),
        }
    }
}

/// Heatmap widget for ratatui
pub struct Heatmap<'a> {
    grid: &'a YearGrid,
    cursor: Option<Cursor>,
    theme: Theme,
}

impl<'a> Heatmap<'a> {
    pub fn new(grid: &'a YearGrid, theme: Theme) -> Self {
        Self {
            grid,
            cursor: None,
            theme,
        }
    }

    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    fn bucket_at(&self, week: usize, day: usize) -> IntensityBucket {
        self.grid
            .cell(week, day)
            .map(|c| IntensityBucket::classify(i64::from(c.count)))
            .unwrap_or(IntensityBucket::None)
    }

    fn is_cursor(&self, week: usize, day: usize) -> bool {
        self.cursor == Some(Cursor { week, day })
    }

    fn cell_style(&self, week: usize, day: usize) -> Style {
        let style = Style::default().fg(self.theme.heatmap_color(self.bucket_at(week, day)));
        if self.is_cursor(week, day) {
            style.bg(self.theme.accent())
        } else {
            style
        }
    }

    /// Render a horizontal border row: ┌──┬──┐ / ├──┼──┤ / └──┴──┘
    fn render_border_row(&self, buf: &mut Buffer, x: u16, y: u16, chars: [&str; 3]) {
        let [left, junction, right] = chars;
        let style = Style::default().fg(self.theme.muted());
        let cell_width = CellLayout::Bordered.cell_width();

        buf.set_string(x, y, left, style);
        for week in 0..GRID_WEEKS {
            let cx = x + 1 + week as u16 * cell_width;
            buf.set_string(cx, y, BOX_HORIZONTAL, style);
            buf.set_string(cx + 1, y, BOX_HORIZONTAL, style);
            let end = if week < GRID_WEEKS - 1 { junction } else { right };
            buf.set_string(cx + 2, y, end, style);
        }
    }

    /// Render a bordered content row: Mon │██│██│██│
    fn render_bordered_row(&self, buf: &mut Buffer, x: u16, y: u16, day: usize) {
        let border_style = Style::default().fg(self.theme.muted());
        let cell_width = CellLayout::Bordered.cell_width();

        buf.set_string(x, y, BOX_VERTICAL, border_style);
        for week in 0..GRID_WEEKS {
            let cx = x + 1 + week as u16 * cell_width;
            buf.set_string(cx, y, "██", self.cell_style(week, day));
            buf.set_string(cx + 2, y, BOX_VERTICAL, border_style);
        }
    }

    /// Render a borderless content row
    fn render_compact_row(&self, buf: &mut Buffer, x: u16, y: u16, day: usize, layout: CellLayout) {
        let symbol = match layout {
            CellLayout::Narrow => "■",
            _ => "■ ",
        };
        for week in 0..GRID_WEEKS {
            let cx = x + week as u16 * layout.cell_width();
            buf.set_string(cx, y, symbol, self.cell_style(week, day));
        }
    }

    /// Month labels under the first week column of each month
    fn render_month_labels(&self, buf: &mut Buffer, x: u16, y: u16, cell_width: u16, max_x: u16) {
        let mut last_month: Option<u32> = None;
        let mut next_free_x = x;

        for (week_idx, week) in self.grid.weeks().iter().enumerate() {
            let month = week.first().date.month();
            if last_month == Some(month) {
                continue;
            }
            last_month = Some(month);

            let label_x = x + week_idx as u16 * cell_width;
            if label_x < next_free_x || label_x + 3 > max_x {
                continue;
            }
            buf.set_string(
                label_x,
                y,
                MONTH_NAMES[month as usize],
                Style::default().fg(self.theme.muted()),
            );
            next_free_x = label_x + 4;
        }
    }
}

/// One-line notice in place of a grid that cannot fit
fn render_too_small(area: Rect, buf: &mut Buffer, theme: Theme) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let min = CellLayout::Narrow;
    let text = format!(
        "Terminal too small for the heatmap (needs {}x{})",
        min.total_width(),
        min.height()
    );
    let x = area.x + area.width.saturating_sub(text.chars().count() as u16) / 2;
    let y = area.y + area.height / 2;
    buf.set_stringn(x, y, &text, area.width as usize, Style::default().fg(theme.muted()));
}

impl Widget for Heatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = CellLayout::for_width(area.width);
        if area.height < layout.height() || area.width < layout.total_width() {
            render_too_small(area, buf, self.theme);
            return;
        }

        let x_offset = area.width.saturating_sub(layout.total_width()) / 2;
        let label_x = area.x + x_offset;
        let grid_x = label_x + LABEL_WIDTH;
        let label_style = Style::default().fg(self.theme.muted());
        let max_x = area.x + area.width;

        match layout {
            CellLayout::Bordered => {
                self.render_border_row(buf, grid_x, area.y, [BOX_TOP_LEFT, BOX_T_DOWN, BOX_TOP_RIGHT]);
                for (day, label) in WEEKDAY_LABELS.iter().enumerate() {
                    let y = area.y + 1 + day as u16 * 2;
                    buf.set_string(label_x, y, label, label_style);
                    self.render_bordered_row(buf, grid_x, y, day);

                    let chars = if day < DAYS_PER_WEEK - 1 {
                        [BOX_T_RIGHT, BOX_CROSS, BOX_T_LEFT]
                    } else {
                        [BOX_BOTTOM_LEFT, BOX_T_UP, BOX_BOTTOM_RIGHT]
                    };
                    self.render_border_row(buf, grid_x, y + 1, chars);
                }
                let month_y = area.y + layout.height() - 1;
                self.render_month_labels(buf, grid_x + 1, month_y, layout.cell_width(), max_x);
            }
            CellLayout::Wide | CellLayout::Narrow => {
                for (day, label) in WEEKDAY_LABELS.iter().enumerate() {
                    let y = area.y + day as u16;
                    buf.set_string(label_x, y, label, label_style);
                    self.render_compact_row(buf, grid_x, y, day, layout);
                }
                let month_y = area.y + DAYS_PER_WEEK as u16;
                self.render_month_labels(buf, grid_x, month_y, layout.cell_width(), max_x);
            }
        }
    }
}

//! Year view: navigation header, heatmap, tooltip, legend and summary

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::heatmap::{CellLayout, Cursor, Heatmap};
use crate::services::{
    format_count, pluralize, CellSummary, IntensityBucket, YearNavigator, YearStats,
};
use crate::tui::theme::Theme;
use crate::types::YearGrid;

/// Format a number with thousand separators (e.g., 1234567 -> "1,234,567")
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);

    // Digits are ASCII, so byte indexing is safe
    for (i, ch) in s.bytes().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch as char);
    }

    result
}

/// Everything the year view displays (references to avoid cloning)
pub struct YearViewData<'a> {
    pub grid: &'a YearGrid,
    pub stats: &'a YearStats,
    pub navigator: YearNavigator,
    pub cursor: Cursor,
    /// Where the activity came from, e.g. "API (dev@example.com)"
    pub source: &'a str,
}

pub struct YearView<'a> {
    data: YearViewData<'a>,
    theme: Theme,
}

impl<'a> YearView<'a> {
    pub fn new(data: YearViewData<'a>, theme: Theme) -> Self {
        Self { data, theme }
    }

    /// "◀ 2025 ▶" with arrows dimmed when the year cannot move further
    fn header_line(&self) -> Line<'static> {
        let nav = self.data.navigator;
        let arrow = |enabled: bool, symbol: &'static str| {
            let color = if enabled {
                self.theme.accent()
            } else {
                self.theme.muted()
            };
            Span::styled(symbol, Style::default().fg(color))
        };

        Line::from(vec![
            arrow(nav.can_step(-1), "◀ "),
            Span::styled(
                nav.year().to_string(),
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            ),
            arrow(nav.can_step(1), " ▶"),
            Span::styled(
                format!("   {}", self.data.source),
                Style::default().fg(self.theme.muted()),
            ),
        ])
    }

    /// Hovered cell summary, e.g. "■ 5 коммитов · 2025-01-10"
    fn tooltip_line(&self) -> Line<'static> {
        let cursor = self.data.cursor;
        match self.data.grid.cell(cursor.week, cursor.day) {
            Some(cell) => {
                let summary = CellSummary::from_cell(cell);
                Line::from(vec![
                    Span::styled(
                        "■ ",
                        Style::default().fg(self.theme.heatmap_color(summary.bucket)),
                    ),
                    Span::styled(summary.tooltip(), Style::default().fg(self.theme.text())),
                ])
            }
            None => Line::default(),
        }
    }

    /// "Less ■ 0 ■ 1-3 ■ 4-6 ■ 7-9 ■ 10+ More"
    fn legend_line(&self) -> Line<'static> {
        let muted = Style::default().fg(self.theme.muted());
        let mut spans = vec![Span::styled("Less ", muted)];
        for bucket in IntensityBucket::ALL {
            spans.push(Span::styled(
                "■",
                Style::default().fg(self.theme.heatmap_color(bucket)),
            ));
            spans.push(Span::styled(format!(" {} ", bucket.range_label()), muted));
        }
        spans.push(Span::styled("More", muted));
        Line::from(spans)
    }

    fn summary_line(&self) -> Line<'static> {
        let stats = self.data.stats;
        let text = self.theme.text();
        let muted = self.theme.muted();

        let mut spans = vec![
            Span::styled(
                format!(
                    "{} {}",
                    format_number(stats.total_commits),
                    pluralize(stats.total_commits)
                ),
                Style::default().fg(text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ·  {} active days", stats.active_days),
                Style::default().fg(muted),
            ),
            Span::styled(
                format!("  ·  longest streak {}", stats.longest_streak),
                Style::default().fg(muted),
            ),
        ];
        if let Some((date, count)) = stats.busiest_day {
            spans.push(Span::styled(
                format!("  ·  best day {} ({})", date, format_count(u64::from(count))),
                Style::default().fg(muted),
            ));
        }
        Line::from(spans)
    }

    fn keybindings_line(&self) -> Line<'static> {
        let key = Style::default().fg(self.theme.accent());
        let desc = Style::default().fg(self.theme.muted());
        Line::from(vec![
            Span::styled("[ ]", key),
            Span::styled(" year  ", desc),
            Span::styled("←↑↓→", key),
            Span::styled(" select  ", desc),
            Span::styled("r", key),
            Span::styled(" reload  ", desc),
            Span::styled("?", key),
            Span::styled(" help  ", desc),
            Span::styled("q", key),
            Span::styled(" quit", desc),
        ])
    }
}

impl Widget for YearView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let heatmap_height = CellLayout::for_width(area.width).height();

        let chunks = Layout::vertical([
            Constraint::Length(1),              // 0: Header
            Constraint::Length(1),              // 1: Separator
            Constraint::Length(1),              // 2: Blank
            Constraint::Length(heatmap_height), // 3: Heatmap
            Constraint::Length(1),              // 4: Tooltip
            Constraint::Length(1),              // 5: Legend
            Constraint::Length(1),              // 6: Blank
            Constraint::Length(1),              // 7: Summary
            Constraint::Fill(1),                // 8: Spacer
            Constraint::Length(1),              // 9: Separator
            Constraint::Length(1),              // 10: Keybindings
        ])
        .split(area);

        Paragraph::new(self.header_line())
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let separator = "─".repeat(area.width as usize);
        let sep_style = Style::default().fg(self.theme.muted());
        buf.set_string(chunks[1].x, chunks[1].y, &separator, sep_style);

        Heatmap::new(self.data.grid, self.theme)
            .with_cursor(self.data.cursor)
            .render(chunks[3], buf);

        Paragraph::new(self.tooltip_line())
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
        Paragraph::new(self.legend_line())
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
        Paragraph::new(self.summary_line())
            .alignment(Alignment::Center)
            .render(chunks[7], buf);

        buf.set_string(chunks[9].x, chunks[9].y, &separator, sep_style);
        Paragraph::new(self.keybindings_line())
            .alignment(Alignment::Center)
            .render(chunks[10], buf);
    }
}

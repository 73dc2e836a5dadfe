//! Categories view - quantity per category with its share of the total

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::bars::{format_bar, format_number, truncate};
use crate::tui::theme::Theme;
use crate::types::{CategoryShare, CategorySummary};

const NAME_WIDTH: usize = 16;
const BAR_WIDTH: usize = 30;
// name + "  " + bar + "  " + quantity + "  " + percent
const LINE_WIDTH: usize = NAME_WIDTH + 2 + BAR_WIDTH + 2 + 10 + 2 + 6;

pub struct CategoriesView<'a> {
    summary: &'a CategorySummary,
    distribution: &'a [CategoryShare],
    theme: Theme,
}

impl<'a> CategoriesView<'a> {
    pub fn new(
        summary: &'a CategorySummary,
        distribution: &'a [CategoryShare],
        theme: Theme,
    ) -> Self {
        Self {
            summary,
            distribution,
            theme,
        }
    }

    fn render_placeholder(&self, area: Rect, buf: &mut Buffer) {
        let label = self
            .summary
            .entries
            .first()
            .map(|e| e.category.clone())
            .unwrap_or_default();
        let y = area.y + area.height / 2;
        Paragraph::new(Line::from(Span::styled(
            label,
            Style::default().fg(self.theme.muted()),
        )))
        .alignment(Alignment::Center)
        .render(Rect { y, height: 1, ..area }, buf);
    }
}

impl Widget for CategoriesView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        if self.summary.is_placeholder {
            self.render_placeholder(area, buf);
            return;
        }

        let max = self.summary.max_quantity().max(0) as u64;
        let x_offset = area.width.saturating_sub(LINE_WIDTH as u16) / 2;

        // header row, then one row per category, then the total
        let header = Line::from(Span::styled(
            format!(
                "{:>name$}  {:<bar$}  {:>10}  {:>6}",
                "Category",
                "",
                "Quantity",
                "Share",
                name = NAME_WIDTH,
                bar = BAR_WIDTH
            ),
            Style::default()
                .fg(self.theme.date())
                .add_modifier(Modifier::BOLD),
        ));
        buf.set_line(area.x + x_offset, area.y, &header, area.width - x_offset);

        let body_rows = area.height.saturating_sub(2) as usize;
        let shown = self.summary.entries.len().min(body_rows);

        for (i, (entry, share)) in self
            .summary
            .entries
            .iter()
            .zip(self.distribution)
            .take(shown)
            .enumerate()
        {
            let y = area.y + 1 + i as u16;
            let quantity = entry.quantity.max(0) as u64;
            let line = Line::from(vec![
                Span::styled(
                    format!(
                        "{:>width$}",
                        truncate(&entry.category, NAME_WIDTH),
                        width = NAME_WIDTH
                    ),
                    Style::default().fg(self.theme.text()),
                ),
                Span::raw("  "),
                Span::styled(
                    format_bar(quantity, max, BAR_WIDTH),
                    Style::default().fg(self.theme.bar()),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:>10}", format_number(quantity)),
                    Style::default().fg(self.theme.text()),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:>5.1}%", share.percent),
                    Style::default().fg(self.theme.muted()),
                ),
            ]);
            buf.set_line(area.x + x_offset, y, &line, area.width - x_offset);
        }

        let hidden = self.summary.entries.len() - shown;
        let footer_y = area.y + 1 + shown as u16;
        if footer_y < area.y + area.height {
            let mut text = format!(
                "{:>name$}  {:<bar$}  {:>10}",
                "Total",
                "",
                format_number(self.summary.total().max(0) as u64),
                name = NAME_WIDTH,
                bar = BAR_WIDTH
            );
            if hidden > 0 {
                text.push_str(&format!("  (+{} more)", hidden));
            }
            let footer = Line::from(Span::styled(
                text,
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            ));
            buf.set_line(area.x + x_offset, footer_y, &footer, area.width - x_offset);
        }
    }
}

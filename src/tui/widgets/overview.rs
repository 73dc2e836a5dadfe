//! Overview view - headline totals

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::bars::format_number;
use crate::tui::theme::Theme;
use crate::types::OverviewMetrics;

/// Two hero numbers side by side
pub struct OverviewView<'a> {
    metrics: &'a OverviewMetrics,
    theme: Theme,
}

impl<'a> OverviewView<'a> {
    pub fn new(metrics: &'a OverviewMetrics, theme: Theme) -> Self {
        Self { metrics, theme }
    }

    fn render_stat(&self, area: Rect, buf: &mut Buffer, value: u64, label: &str) {
        Paragraph::new(vec![
            Line::from(Span::styled(
                format_number(value),
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                label.to_string(),
                Style::default().fg(self.theme.muted()),
            )),
        ])
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}

impl Widget for OverviewView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .split(area);
        let cols = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        self.render_stat(cols[0], buf, self.metrics.total_food_items, "food items");
        self.render_stat(cols[1], buf, self.metrics.total_users, "users");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_overview_renders_both_totals() {
        let metrics = OverviewMetrics {
            total_food_items: 1234,
            total_users: 56,
        };
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        OverviewView::new(&metrics, Theme::Dark).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("1,234"));
        assert!(text.contains("56"));
        assert!(text.contains("food items"));
    }
}

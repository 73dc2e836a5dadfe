//! Users view - sign-ups per calendar month

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Paragraph, Widget},
};

use super::bars::format_number;
use crate::tui::theme::Theme;
use crate::types::{MonthBuckets, MONTH_LABELS};

pub struct UsersView<'a> {
    buckets: &'a MonthBuckets,
    total_users: usize,
    month_filter: Option<u32>,
    theme: Theme,
}

impl<'a> UsersView<'a> {
    pub fn new(
        buckets: &'a MonthBuckets,
        total_users: usize,
        month_filter: Option<u32>,
        theme: Theme,
    ) -> Self {
        Self {
            buckets,
            total_users,
            month_filter,
            theme,
        }
    }

    pub fn title(month_filter: Option<u32>) -> String {
        let scope = month_filter
            .and_then(|m| MONTH_LABELS.get((m as usize).checked_sub(1)?))
            .copied()
            .unwrap_or("all months");
        format!(" Users per month ({}) ", scope)
    }

    /// Bar width that fits twelve bars plus gaps into `width`
    pub fn bar_width(width: u16) -> u16 {
        let inner = width.saturating_sub(2);
        (inner.saturating_sub(11) / 12).clamp(1, 6)
    }
}

impl Widget for UsersView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);

        let bars: Vec<Bar> = self
            .buckets
            .labelled()
            .enumerate()
            .map(|(i, (label, count))| {
                let selected = self.month_filter == Some(i as u32 + 1);
                let color = if selected {
                    self.theme.highlight()
                } else {
                    self.theme.bar()
                };
                Bar::default()
                    .value(count)
                    .label(Line::from(label))
                    .style(Style::default().fg(color))
            })
            .collect();

        BarChart::default()
            .block(Block::bordered().title(Self::title(self.month_filter)))
            .data(BarGroup::default().bars(&bars))
            .bar_width(Self::bar_width(chunks[0].width))
            .bar_gap(1)
            .value_style(
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            )
            .label_style(Style::default().fg(self.theme.muted()))
            .render(chunks[0], buf);

        let mut spans = vec![
            Span::styled("Total users: ", Style::default().fg(self.theme.muted())),
            Span::styled(
                format_number(self.total_users as u64),
                Style::default().fg(self.theme.text()),
            ),
        ];
        if self.buckets.dropped > 0 {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                format!("{} skipped (unparsable date)", self.buckets.dropped),
                Style::default().fg(self.theme.error()),
            ));
        }
        Paragraph::new(Line::from(spans)).render(chunks[1], buf);
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
    fn test_title_all_months() {
        assert_eq!(UsersView::title(None), " Users per month (all months) ");
    }

    #[test]
    fn test_title_with_filter() {
        assert_eq!(UsersView::title(Some(3)), " Users per month (Mar) ");
        assert_eq!(UsersView::title(Some(12)), " Users per month (Dec) ");
    }

    #[test]
    fn test_bar_width_bounds() {
        assert_eq!(UsersView::bar_width(0), 1);
        assert_eq!(UsersView::bar_width(40), 2);
        assert_eq!(UsersView::bar_width(500), 6);
    }

    #[test]
    fn test_users_view_footer_reports_dropped() {
        let mut buckets = MonthBuckets::default();
        buckets.counts[2] = 16;
        buckets.dropped = 2;
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        UsersView::new(&buckets, 18, None, Theme::Dark).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Total users: 18"));
        assert!(text.contains("2 skipped"));
        assert!(text.contains("Mar"));
    }

    #[test]
    fn test_users_view_footer_without_drops() {
        let buckets = MonthBuckets::default();
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        UsersView::new(&buckets, 0, Some(1), Theme::Dark).render(area, &mut buf);

        assert!(!buffer_text(&buf).contains("skipped"));
    }
}

//! Registered view - paged user table

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table, Widget},
};

use crate::services::PageState;
use crate::tui::theme::Theme;

pub struct RegisteredView<'a> {
    pages: &'a PageState,
    theme: Theme,
}

impl<'a> RegisteredView<'a> {
    pub fn new(pages: &'a PageState, theme: Theme) -> Self {
        Self { pages, theme }
    }

    /// "Page N of M" plus the list size; hidden records are counted when present
    pub fn footer_text(pages: &PageState) -> String {
        let mut text = format!(
            "Page {} of {}  ·  {} users",
            pages.current_page(),
            pages.display_page_count(),
            pages.visible_len()
        );
        if pages.hidden_len() > 0 {
            text.push_str(&format!(" ({} incomplete hidden)", pages.hidden_len()));
        }
        text
    }
}

impl Widget for RegisteredView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);

        let slice = self.pages.current_slice();
        if slice.is_empty() {
            let y = chunks[0].y + chunks[0].height / 2;
            Paragraph::new(Line::from(Span::styled(
                "No registered users",
                Style::default().fg(self.theme.muted()),
            )))
            .alignment(Alignment::Center)
            .render(Rect { y, height: 1, ..chunks[0] }, buf);
        } else {
            let first = self.pages.first_row_number();
            let rows = slice.iter().enumerate().map(|(i, user)| {
                Row::new(vec![
                    Span::styled(
                        (first + i).to_string(),
                        Style::default().fg(self.theme.muted()),
                    ),
                    Span::styled(user.full_name(), Style::default().fg(self.theme.text())),
                    Span::styled(
                        user.username.clone(),
                        Style::default().fg(self.theme.text()),
                    ),
                    Span::styled(user.email.clone(), Style::default().fg(self.theme.accent())),
                    Span::styled(
                        user.created_at.clone(),
                        Style::default().fg(self.theme.date()),
                    ),
                ])
            });

            let header = Row::new(vec!["#", "Name", "Username", "Email", "Joined"]).style(
                Style::default()
                    .fg(self.theme.date())
                    .add_modifier(Modifier::BOLD),
            );

            Table::new(
                rows,
                [
                    Constraint::Length(5),
                    Constraint::Fill(2),
                    Constraint::Fill(1),
                    Constraint::Fill(2),
                    Constraint::Length(25),
                ],
            )
            .header(header)
            .column_spacing(2)
            .render(chunks[0], buf);
        }

        Paragraph::new(Line::from(Span::styled(
            Self::footer_text(self.pages),
            Style::default().fg(self.theme.muted()),
        )))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
    }
}

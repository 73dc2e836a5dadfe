//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

const POPUP_WIDTH: u16 = 46;
const POPUP_HEIGHT: u16 = 19;

const NAVIGATION: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "Switch view"),
    ("1-4", "Jump to view"),
    ("← → or p / n", "Page (Registered)"),
    ("f", "Cycle month (Users)"),
    ("a", "All months (Users)"),
];

const GENERAL: &[(&str, &str)] = &[
    ("r", "Refresh all data"),
    ("q / Esc / Ctrl+C", "Quit"),
    ("?", "Toggle help"),
];

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }

    fn render_section(
        &self,
        title: &str,
        bindings: &[(&str, &str)],
        rows: &[Rect],
        buf: &mut Buffer,
    ) {
        let Some((header, rest)) = rows.split_first() else {
            return;
        };
        Paragraph::new(Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(self.theme.date())
                .add_modifier(Modifier::BOLD),
        )))
        .render(*header, buf);

        if let Some(sep) = rest.first() {
            buf.set_string(
                sep.x,
                sep.y,
                "─".repeat(sep.width as usize),
                Style::default().fg(self.theme.muted()),
            );
        }

        for ((key, desc), row) in bindings.iter().zip(rest.iter().skip(1)) {
            render_keybinding(*row, buf, key, desc, self.theme);
        }
    }
}

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let title = format!(" dishhub-admin v{} ", VERSION);
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        // padding, section (header + rule + bindings), padding, section, padding, hint
        let nav_rows = 2 + NAVIGATION.len();
        let gen_rows = 2 + GENERAL.len();
        let mut constraints = vec![Constraint::Length(1); 1 + nav_rows + 1 + gen_rows + 2];
        constraints.push(Constraint::Min(0));
        let chunks = Layout::vertical(constraints).split(inner);

        let nav_start = 1;
        let gen_start = nav_start + nav_rows + 1;
        let hint_row = gen_start + gen_rows + 1;

        self.render_section(
            "Navigation",
            NAVIGATION,
            &chunks[nav_start..nav_start + nav_rows],
            buf,
        );
        self.render_section(
            "General",
            GENERAL,
            &chunks[gen_start..gen_start + gen_rows],
            buf,
        );

        let hint = Line::from(Span::styled(
            "Press ? to close",
            Style::default().fg(self.theme.muted()),
        ));
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .render(chunks[hint_row], buf);
    }
}

/// Render a single keybinding line
fn render_keybinding(area: Rect, buf: &mut Buffer, key: &str, desc: &str, theme: Theme) {
    let line = Line::from(vec![
        Span::styled(
            format!("  {:<20}", key),
            Style::default().fg(theme.accent()),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.text())),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Left)
        .render(area, buf);
}

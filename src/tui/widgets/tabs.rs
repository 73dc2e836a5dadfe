//! Tab bar widget for view navigation

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::services::FetchKind;
use crate::tui::theme::Theme;

/// One tab per dashboard feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Categories,
    Users,
    Registered,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Categories => "Categories",
            Self::Users => "Users",
            Self::Registered => "Registered",
        }
    }

    pub fn all() -> &'static [Tab] {
        &[Tab::Overview, Tab::Categories, Tab::Users, Tab::Registered]
    }

    /// Next tab (wrapping)
    pub fn next(self) -> Self {
        match self {
            Self::Overview => Self::Categories,
            Self::Categories => Self::Users,
            Self::Users => Self::Registered,
            Self::Registered => Self::Overview,
        }
    }

    /// Previous tab (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Self::Overview => Self::Registered,
            Self::Categories => Self::Overview,
            Self::Users => Self::Categories,
            Self::Registered => Self::Users,
        }
    }

    /// Tab for number key (1-4)
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Overview),
            2 => Some(Self::Categories),
            3 => Some(Self::Users),
            4 => Some(Self::Registered),
            _ => None,
        }
    }

    /// Feed shown on this tab
    pub fn kind(self) -> FetchKind {
        match self {
            Self::Overview => FetchKind::Overview,
            Self::Categories => FetchKind::Categories,
            Self::Users => FetchKind::Users,
            Self::Registered => FetchKind::Registered,
        }
    }
}

/// Tab bar widget showing available views
pub struct TabBar {
    selected: Tab,
    theme: Theme,
}

impl TabBar {
    pub fn new(selected: Tab, theme: Theme) -> Self {
        Self { selected, theme }
    }

    fn display(tab: Tab, selected: bool) -> String {
        if selected {
            format!("[{}]", tab.label())
        } else {
            tab.label().to_string()
        }
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let total_width: u16 = Tab::all()
            .iter()
            .map(|tab| Self::display(*tab, *tab == self.selected).len() as u16 + 2)
            .sum::<u16>()
            .saturating_sub(2);

        let mut x = area.x + (area.width.saturating_sub(total_width)) / 2;

        for tab in Tab::all() {
            let is_selected = *tab == self.selected;
            let display = Self::display(*tab, is_selected);

            let display_len = display.len() as u16;
            if x + display_len > area.x + area.width {
                break;
            }

            let style = if is_selected {
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted())
            };

            buf.set_string(x, area.y, &display, style);
            x += display_len + 2;
        }
    }
}

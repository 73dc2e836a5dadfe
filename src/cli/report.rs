//! Plain-text and JSON rendering for one-shot commands

use std::fmt;

use serde::Serialize;

use crate::services::dashboard::DashboardState;
use crate::tui::widgets::bars::{format_bar, format_number};
use crate::types::{CategoryCount, CategoryShare};

const BAR_WIDTH: usize = 30;

/// Print as pretty JSON or as the text table
pub fn print<R: Serialize + fmt::Display>(json: bool, report: &R) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct OverviewReport {
    pub total_food_items: u64,
    pub total_users: u64,
}

impl OverviewReport {
    pub fn from_state(state: &DashboardState) -> Self {
        Self {
            total_food_items: state.overview.total_food_items,
            total_users: state.overview.total_users,
        }
    }
}

impl fmt::Display for OverviewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total food items  {:>10}", format_number(self.total_food_items))?;
        writeln!(f, "Total users       {:>10}", format_number(self.total_users))
    }
}

#[derive(Debug, Serialize)]
pub struct CategoriesReport {
    pub categories: Vec<CategoryCount>,
    pub is_placeholder: bool,
    pub total: i64,
    pub distribution: Vec<CategoryShare>,
}

impl CategoriesReport {
    pub fn from_state(state: &DashboardState) -> Self {
        Self {
            categories: state.categories.entries.clone(),
            is_placeholder: state.categories.is_placeholder,
            total: state.categories.total(),
            distribution: state.distribution.clone(),
        }
    }
}

impl fmt::Display for CategoriesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_placeholder {
            if let Some(entry) = self.categories.first() {
                writeln!(f, "{}", entry.category)?;
            }
            return Ok(());
        }

        let width = self
            .categories
            .iter()
            .map(|c| c.category.chars().count())
            .max()
            .unwrap_or(0)
            .max("Category".len());
        let max = self
            .categories
            .iter()
            .map(|c| c.quantity.max(0) as u64)
            .max()
            .unwrap_or(0);

        writeln!(f, "{:<width$}  {:>8}  {:>6}", "Category", "Quantity", "Share")?;
        for (count, share) in self.categories.iter().zip(&self.distribution) {
            writeln!(
                f,
                "{:<width$}  {:>8}  {:>5.1}%  {}",
                count.category,
                count.quantity,
                share.percent,
                format_bar(count.quantity.max(0) as u64, max, BAR_WIDTH),
            )?;
        }
        writeln!(f, "{:<width$}  {:>8}", "Total", self.total)
    }
}

#[derive(Debug, Serialize)]
pub struct MonthCount {
    pub month: &'static str,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct UsersReport {
    pub month_filter: Option<u32>,
    pub total_users: usize,
    pub dropped: u64,
    pub months: Vec<MonthCount>,
    #[serde(skip)]
    busiest: u64,
}

impl UsersReport {
    pub fn from_state(state: &DashboardState) -> Self {
        Self {
            month_filter: state.month_filter,
            total_users: state.total_users,
            dropped: state.month_buckets.dropped,
            months: state
                .month_buckets
                .labelled()
                .map(|(month, count)| MonthCount { month, count })
                .collect(),
            busiest: state.month_buckets.max_count(),
        }
    }
}

impl fmt::Display for UsersReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.months {
            writeln!(
                f,
                "{}  {:>6}  {}",
                m.month,
                m.count,
                format_bar(m.count, self.busiest, BAR_WIDTH)
            )?;
        }
        writeln!(f, "Total users: {}", format_number(self.total_users as u64))?;
        if self.dropped > 0 {
            writeln!(f, "Skipped (unparsable created_at): {}", self.dropped)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UserRow {
    pub number: usize,
    pub name: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct RegisteredReport {
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub visible: usize,
    pub hidden: usize,
    pub users: Vec<UserRow>,
}

impl RegisteredReport {
    pub fn from_state(state: &DashboardState) -> Self {
        let pages = &state.registered;
        let first = pages.first_row_number();
        Self {
            page: pages.current_page(),
            page_count: pages.display_page_count(),
            page_size: pages.page_size(),
            visible: pages.visible_len(),
            hidden: pages.hidden_len(),
            users: pages
                .current_slice()
                .iter()
                .enumerate()
                .map(|(i, u)| UserRow {
                    number: first + i,
                    name: u.full_name(),
                    username: u.username.clone(),
                    email: u.email.clone(),
                    created_at: u.created_at.clone(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for RegisteredReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.users.is_empty() {
            writeln!(f, "No registered users.")?;
        } else {
            writeln!(
                f,
                "{:>4}  {:<24}  {:<16}  {:<28}  Joined",
                "#", "Name", "Username", "Email"
            )?;
            for row in &self.users {
                writeln!(
                    f,
                    "{:>4}  {:<24}  {:<16}  {:<28}  {}",
                    row.number, row.name, row.username, row.email, row.created_at
                )?;
            }
        }
        writeln!(f, "Page {} of {}", self.page, self.page_count)?;
        if self.hidden > 0 {
            writeln!(f, "{} incomplete record(s) hidden", self.hidden)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dashboard::Action;
    use crate::services::{BucketZone, FetchKind};
    use crate::types::{CategoryRecord, UserRecord};

    fn make_state() -> DashboardState {
        DashboardState::new(2, BucketZone::Utc)
    }

    fn make_user(n: i64, created_at: &str) -> UserRecord {
        UserRecord {
            id: n,
            email: format!("user{}@dishhub.test", n),
            first_name: format!("First{}", n),
            last_name: "Last".into(),
            username: format!("user{}", n),
            created_at: created_at.into(),
        }
    }

    fn make_category(category: &str, quantity: i64) -> CategoryRecord {
        CategoryRecord {
            id: 0,
            name: "item".into(),
            quantity,
            category: category.into(),
        }
    }

    // ========== CategoriesReport tests ==========

    #[test]
    fn test_categories_placeholder_text() {
        let report = CategoriesReport::from_state(&make_state());
        assert!(report.is_placeholder);
        assert_eq!(report.to_string(), "No Categories Available\n");
    }

    #[test]
    fn test_categories_text_has_rows_and_total() {
        let mut state = make_state();
        let ticket = state.update(Action::Reload(FetchKind::Categories))[0].ticket();
        state.update(Action::CategoriesLoaded {
            ticket,
            result: Ok(vec![make_category("1", 3), make_category("2", 1)]),
        });

        let text = CategoriesReport::from_state(&state).to_string();
        assert!(text.contains("75.0%"));
        assert!(text.contains("25.0%"));
        assert!(text.lines().last().unwrap().ends_with("4"));
    }

    // ========== UsersReport tests ==========

    #[test]
    fn test_users_report_json_shape() {
        let mut state = make_state();
        let ticket = state.update(Action::Reload(FetchKind::Users))[0].ticket();
        state.update(Action::UsersLoaded {
            ticket,
            result: Ok(vec![
                make_user(1, "2024-03-05T10:00:00Z"),
                make_user(2, "garbage"),
            ]),
        });

        let json = serde_json::to_value(UsersReport::from_state(&state)).unwrap();
        assert_eq!(json["total_users"], 2);
        assert_eq!(json["dropped"], 1);
        assert_eq!(json["months"][2]["month"], "Mar");
        assert_eq!(json["months"][2]["count"], 1);
        assert_eq!(json["months"].as_array().unwrap().len(), 12);
        assert!(json.get("busiest").is_none());
    }

    #[test]
    fn test_users_text_scales_bars_to_busiest_month() {
        let mut state = make_state();
        let ticket = state.update(Action::Reload(FetchKind::Users))[0].ticket();
        state.update(Action::UsersLoaded {
            ticket,
            result: Ok(vec![
                make_user(1, "2024-03-05T10:00:00Z"),
                make_user(2, "2024-03-06T10:00:00Z"),
                make_user(3, "2024-05-01T10:00:00Z"),
            ]),
        });

        let text = UsersReport::from_state(&state).to_string();
        let march = text.lines().find(|l| l.starts_with("Mar")).unwrap();
        let may = text.lines().find(|l| l.starts_with("May")).unwrap();
        assert!(march.ends_with(&"█".repeat(BAR_WIDTH)));
        assert!(may.ends_with(&format!("{}{}", "█".repeat(15), "░".repeat(15))));
    }

    #[test]
    fn test_users_text_mentions_dropped_only_when_nonzero() {
        let report = UsersReport::from_state(&make_state());
        assert!(!report.to_string().contains("Skipped"));
    }

    // ========== RegisteredReport tests ==========

    #[test]
    fn test_registered_empty() {
        let text = RegisteredReport::from_state(&make_state()).to_string();
        assert!(text.contains("No registered users."));
        assert!(text.contains("Page 1 of 1"));
    }

    #[test]
    fn test_registered_numbers_rows_from_page_start() {
        let mut state = make_state();
        let ticket = state.update(Action::Reload(FetchKind::Registered))[0].ticket();
        let users = (1..=5).map(|n| make_user(n, "2024-01-01")).collect();
        state.update(Action::RegisteredLoaded {
            ticket,
            result: Ok(users),
        });
        state.registered.seek(2);

        let report = RegisteredReport::from_state(&state);
        assert_eq!(report.page, 2);
        assert_eq!(report.page_count, 3);
        assert_eq!(report.users.len(), 2);
        assert_eq!(report.users[0].number, 3);
        assert_eq!(report.users[0].name, "First3 Last");
    }
}

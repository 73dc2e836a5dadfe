//! Client-side pagination of the registered-users list

use crate::types::UserRecord;

/// Rows per page used by the registered-users table
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Users missing a first name, last name or email are never listed
pub fn has_required_fields(user: &UserRecord) -> bool {
    !user.first_name.trim().is_empty()
        && !user.last_name.trim().is_empty()
        && !user.email.trim().is_empty()
}

/// Number of pages needed for `len` items (0 for an empty list)
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Items on the 1-based `page`; empty when the page is out of range
pub fn current_slice<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = page.saturating_mul(page_size).min(items.len());
    &items[start..end]
}

/// Advance one page unless already on the last
pub fn next_page(current: usize, page_count: usize) -> usize {
    if current < page_count {
        current + 1
    } else {
        current
    }
}

/// Go back one page unless already on the first
pub fn prev_page(current: usize) -> usize {
    if current > 1 {
        current - 1
    } else {
        current
    }
}

/// Pagination state over a fetched user list
#[derive(Debug, Clone)]
pub struct PageState {
    /// Users that passed `has_required_fields`, in fetch order
    visible: Vec<UserRecord>,
    /// Users rejected by the filter
    hidden: usize,
    page_size: usize,
    current_page: usize,
}

impl PageState {
    /// `page_size` of 0 is treated as 1
    pub fn new(page_size: usize) -> Self {
        Self {
            visible: Vec::new(),
            hidden: 0,
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    /// Replace the list wholesale and go back to page 1
    pub fn replace_items(&mut self, items: Vec<UserRecord>) {
        let total = items.len();
        self.visible = items.into_iter().filter(has_required_fields).collect();
        self.hidden = total - self.visible.len();
        self.current_page = 1;
    }

    pub fn page_count(&self) -> usize {
        page_count(self.visible.len(), self.page_size)
    }

    /// Page count for display; an empty list still shows one page
    pub fn display_page_count(&self) -> usize {
        self.page_count().max(1)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_slice(&self) -> &[UserRecord] {
        current_slice(&self.visible, self.page_size, self.current_page)
    }

    pub fn next(&mut self) {
        self.current_page = next_page(self.current_page, self.page_count());
    }

    pub fn prev(&mut self) {
        self.current_page = prev_page(self.current_page);
    }

    /// Jump toward `page` using only next/prev steps, so the result stays in range
    pub fn seek(&mut self, page: usize) {
        while self.current_page < page {
            let before = self.current_page;
            self.next();
            if self.current_page == before {
                break;
            }
        }
        while self.current_page > page.max(1) {
            self.prev();
        }
    }

    pub fn is_first(&self) -> bool {
        self.current_page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.current_page >= self.display_page_count()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn hidden_len(&self) -> usize {
        self.hidden
    }

    /// 1-based index of the first row on the current page (for row numbering)
    pub fn first_row_number(&self) -> usize {
        (self.current_page - 1) * self.page_size + 1
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user(id: i64) -> UserRecord {
        UserRecord {
            id,
            email: format!("user{}@dishhub.test", id),
            first_name: "First".into(),
            last_name: format!("Last{}", id),
            username: format!("user{}", id),
            created_at: "2024-03-01T00:00:00Z".into(),
        }
    }

    fn make_users(n: i64) -> Vec<UserRecord> {
        (1..=n).map(make_user).collect()
    }

    // ========== pure function tests ==========

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 15), 0);
        assert_eq!(page_count(1, 15), 1);
        assert_eq!(page_count(15, 15), 1);
        assert_eq!(page_count(16, 15), 2);
        assert_eq!(page_count(30, 15), 2);
        assert_eq!(page_count(31, 15), 3);
    }

    #[test]
    fn test_page_count_zero_only_when_empty() {
        for len in 1..100 {
            assert!(page_count(len, 7) >= 1);
        }
        assert_eq!(page_count(0, 7), 0);
    }

    #[test]
    fn test_current_slice_bounds() {
        let items: Vec<u32> = (0..16).collect();

        assert_eq!(current_slice(&items, 15, 1).len(), 15);
        assert_eq!(current_slice(&items, 15, 2), &[15]);
        assert!(current_slice(&items, 15, 3).is_empty());
        assert!(current_slice(&items, 15, 0).is_empty());
        assert!(current_slice::<u32>(&[], 15, 1).is_empty());
    }

    #[test]
    fn test_next_page_stops_at_last() {
        assert_eq!(next_page(1, 2), 2);
        assert_eq!(next_page(2, 2), 2);
        assert_eq!(next_page(1, 0), 1);
    }

    #[test]
    fn test_prev_page_stops_at_first() {
        assert_eq!(prev_page(2), 1);
        assert_eq!(prev_page(1), 1);
    }

    #[test]
    fn test_required_fields() {
        assert!(has_required_fields(&make_user(1)));

        let mut no_email = make_user(2);
        no_email.email.clear();
        assert!(!has_required_fields(&no_email));

        let mut blank_first = make_user(3);
        blank_first.first_name = "   ".into();
        assert!(!has_required_fields(&blank_first));

        let mut no_last = make_user(4);
        no_last.last_name.clear();
        assert!(!has_required_fields(&no_last));
    }

    // ========== PageState tests ==========

    #[test]
    fn test_sixteen_users_two_pages() {
        let mut state = PageState::new(15);
        state.replace_items(make_users(16));

        assert_eq!(state.page_count(), 2);
        assert_eq!(state.current_slice().len(), 15);

        state.next();
        assert_eq!(state.current_page(), 2);
        assert_eq!(state.current_slice().len(), 1);
        assert_eq!(state.current_slice()[0].id, 16);

        state.next();
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_user_missing_email_excluded_from_counts() {
        let mut users = make_users(15);
        let mut bad = make_user(99);
        bad.email.clear();
        users.insert(3, bad);

        let mut state = PageState::new(15);
        state.replace_items(users);

        assert_eq!(state.visible_len(), 15);
        assert_eq!(state.hidden_len(), 1);
        assert_eq!(state.page_count(), 1);
        assert!(state.current_slice().iter().all(|u| u.id != 99));
    }

    #[test]
    fn test_empty_list_shows_one_page() {
        let mut state = PageState::new(15);
        state.replace_items(Vec::new());

        assert_eq!(state.page_count(), 0);
        assert_eq!(state.display_page_count(), 1);
        assert_eq!(state.current_page(), 1);
        assert!(state.current_slice().is_empty());

        state.next();
        state.prev();
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_replace_items_resets_page() {
        let mut state = PageState::new(5);
        state.replace_items(make_users(20));
        state.next();
        state.next();
        assert_eq!(state.current_page(), 3);

        state.replace_items(make_users(20));
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_seek_clamps_to_range() {
        let mut state = PageState::new(5);
        state.replace_items(make_users(12));

        state.seek(10);
        assert_eq!(state.current_page(), 3);
        assert!(state.is_last());

        state.seek(0);
        assert_eq!(state.current_page(), 1);
        assert!(state.is_first());
    }

    #[test]
    fn test_first_row_number() {
        let mut state = PageState::new(15);
        state.replace_items(make_users(40));
        state.next();
        assert_eq!(state.first_row_number(), 16);
    }

    #[test]
    fn test_zero_page_size_treated_as_one() {
        let state = PageState::new(0);
        assert_eq!(state.page_size(), 1);
    }
}

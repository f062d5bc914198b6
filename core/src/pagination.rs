//! Previous/next page controls derived from a server-reported total.
//!
//! The controller owns no state. It describes the two controls for a
//! `(page, total_items, page_size)` triple and hands back the target page
//! when an enabled control is activated.

use crate::messages;

/// One navigation button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    pub label: &'static str,
    pub disabled: bool,
    pub target: u32,
}

impl PageControl {
    /// The page-change intent, or `None` for a disabled control.
    pub fn activate(&self) -> Option<u32> {
        (!self.disabled).then_some(self.target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u64,
    /// No page to show: the result set is empty or `page` is past the end.
    pub has_no_page: bool,
    pub previous: PageControl,
    pub next: PageControl,
}

impl Pagination {
    pub fn new(page: u32, total_items: u64, page_size: u32) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_items.div_ceil(u64::from(page_size))
        };
        let has_no_page = total_pages == 0 || total_pages < u64::from(page);
        let is_first_page = page == 1 || has_no_page;
        let is_last_page = u64::from(page) == total_pages || has_no_page;

        let previous_page = page.saturating_sub(1).max(1);
        let next_page = u64::from(page.saturating_add(1)).min(total_pages);

        Self {
            page,
            total_pages,
            has_no_page,
            previous: PageControl {
                label: messages::PREVIOUS_BUTTON,
                disabled: is_first_page,
                target: previous_page,
            },
            next: PageControl {
                label: messages::NEXT_BUTTON,
                disabled: is_last_page,
                // bounded by `page + 1`, which fits in u32
                target: u32::try_from(next_page).unwrap_or(u32::MAX),
            },
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.previous.disabled
    }

    pub fn is_last_page(&self) -> bool {
        self.next.disabled
    }

    /// Text between the two controls, e.g. `Page 2`.
    pub fn label(&self) -> String {
        format!("{} {}", messages::PAGE_LABEL, self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_disables_previous_only() {
        let p = Pagination::new(1, 10, 5);
        assert_eq!(p.total_pages, 2);
        assert!(p.previous.disabled);
        assert!(!p.next.disabled);
        assert_eq!(p.next.activate(), Some(2));
        assert_eq!(p.previous.activate(), None);
    }

    #[test]
    fn last_page_disables_next_only() {
        let p = Pagination::new(2, 10, 5);
        assert!(!p.previous.disabled);
        assert!(p.next.disabled);
        assert_eq!(p.previous.activate(), Some(1));
    }

    #[test]
    fn middle_page_enables_both() {
        let p = Pagination::new(2, 11, 5);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.previous.activate(), Some(1));
        assert_eq!(p.next.activate(), Some(3));
    }

    #[test]
    fn page_past_the_end_disables_both() {
        let p = Pagination::new(3, 10, 5);
        assert_eq!(p.total_pages, 2);
        assert!(p.has_no_page);
        assert!(p.is_first_page());
        assert!(p.is_last_page());
        assert_eq!(p.next.activate(), None);
    }

    #[test]
    fn empty_result_disables_both() {
        let p = Pagination::new(1, 0, 5);
        assert_eq!(p.total_pages, 0);
        assert!(p.has_no_page);
        assert!(p.previous.disabled && p.next.disabled);
    }

    #[test]
    fn zero_page_size_has_no_page() {
        let p = Pagination::new(1, 10, 0);
        assert!(p.has_no_page);
    }

    #[test]
    fn single_page_disables_both() {
        let p = Pagination::new(1, 3, 5);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_no_page);
        assert!(p.previous.disabled && p.next.disabled);
    }

    #[test]
    fn label_shows_current_page() {
        assert_eq!(Pagination::new(4, 40, 5).label(), "Page 4");
    }
}

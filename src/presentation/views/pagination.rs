use askama::Template;

/// Page buttons shown at once.
pub const WINDOW: u32 = 5;

/// Bounded window of page numbers around `current`.
///
/// All pages when there are at most [`WINDOW`]; otherwise a window centred on
/// `current`, shifted to start at page 1 or end at `total` near the edges.
pub fn page_window(current: u32, total: u32) -> Vec<u32> {
    if total <= WINDOW {
        return (1..=total).collect();
    }

    let half = WINDOW / 2;
    let current = current.clamp(1, total);
    let start = if current <= half + 1 {
        1
    } else if current + half >= total {
        total - WINDOW + 1
    } else {
        current - half
    };
    (start..start + WINDOW).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButtonView {
    pub label: String,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub visible: bool,
    pub summary: String,
    pub buttons: Vec<PageButtonView>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationView {
    pub fn new(page: u32, page_size: u32, total: u64, total_pages: u32) -> Self {
        let last = (u64::from(page) * u64::from(page_size)).min(total);
        let first = (u64::from(page.saturating_sub(1)) * u64::from(page_size) + 1).min(last);
        let buttons = page_window(page, total_pages)
            .into_iter()
            .map(|number| PageButtonView {
                label: number.to_string(),
                current: number == page,
            })
            .collect();

        Self {
            visible: total_pages > 1,
            summary: format!("Showing {first} to {last} of {total} results"),
            buttons,
            prev_enabled: page > 1,
            next_enabled: page < total_pages,
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            summary: String::new(),
            buttons: Vec::new(),
            prev_enabled: false,
            next_enabled: false,
        }
    }
}

#[derive(Template)]
#[template(path = "pagination.txt")]
pub struct PaginationTemplate<'a> {
    pub view: &'a PaginationView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_shows_every_page_when_few() {
        assert_eq!(page_window(2, 4), vec![1, 2, 3, 4]);
        assert_eq!(page_window(1, 5), vec![1, 2, 3, 4, 5]);
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn window_slides_and_clamps() {
        assert_eq!(page_window(1, 12), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(3, 12), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(6, 12), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(10, 12), vec![8, 9, 10, 11, 12]);
        assert_eq!(page_window(12, 12), vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn out_of_range_page_still_yields_a_window() {
        assert_eq!(page_window(40, 12), vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn summary_and_controls() {
        let view = PaginationView::new(3, 10, 25, 3);

        assert!(view.visible);
        assert_eq!(view.summary, "Showing 21 to 25 of 25 results");
        assert!(view.prev_enabled);
        assert!(!view.next_enabled);
        assert!(view.buttons.iter().any(|b| b.current && b.label == "3"));
    }

    #[test]
    fn page_past_the_end_never_starts_after_it_ends() {
        let view = PaginationView::new(40, 10, 30, 3);

        assert_eq!(view.summary, "Showing 30 to 30 of 30 results");
        assert!(!view.next_enabled);
    }

    #[test]
    fn single_page_is_hidden() {
        assert!(!PaginationView::new(1, 10, 7, 1).visible);
        assert!(!PaginationView::new(1, 10, 0, 0).visible);
    }
}

//! Page navigation with previous/next controls and a windowed page list.
//!
//! Pages are zero-indexed in the API and one-based in the markup.  With more
//! than [`FULL_LIST_MAX`] pages only the first, the last and the pages around
//! the current one are listed; gaps are shown as an ellipsis.

use mosaic_core::listeners::activate;
use mosaic_core::markup::{Element, Node, Tag};
use mosaic_core::{Command, Component, ElementId, Listener};

/// Up to this many pages, every page gets a button.
pub const FULL_LIST_MAX: usize = 7;

/// Messages for the pagination component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Move to the next page.
    NextPage,
    /// Move to the previous page.
    PrevPage,
    /// Jump to a specific page (zero-indexed).
    GotoPage(usize),
}

/// One entry of the rendered page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A page button (zero-indexed).
    Page(usize),
    /// A run of omitted pages.
    Ellipsis,
}

/// The page list shown for `page` out of `total` pages.
///
/// Lists every page when `total <= FULL_LIST_MAX`.  Otherwise lists the
/// first page, the last page and the neighbours of `page`.  A gap of a
/// single page shows that page rather than an ellipsis.
pub fn page_window(page: usize, total: usize) -> Vec<PageItem> {
    if total <= FULL_LIST_MAX {
        return (0..total).map(PageItem::Page).collect();
    }
    let mut pages = vec![0, page.saturating_sub(1), page, page + 1, total - 1];
    pages.retain(|p| *p < total);
    pages.sort_unstable();
    pages.dedup();

    let mut items = Vec::with_capacity(pages.len() + 2);
    let mut last: Option<usize> = None;
    for p in pages {
        match last {
            Some(prev) if p - prev == 2 => items.push(PageItem::Page(prev + 1)),
            Some(prev) if p - prev > 2 => items.push(PageItem::Ellipsis),
            _ => {}
        }
        items.push(PageItem::Page(p));
        last = Some(p);
    }
    items
}

/// A pagination control.
///
/// # Example
///
/// ```ignore
/// use mosaic_widgets::pagination::Pagination;
///
/// let mut pages = Pagination::new(5).with_per_page(20);
/// pages.next_page();
/// assert_eq!(pages.page(), 1);
/// ```
pub struct Pagination {
    id: ElementId,
    label: String,
    total_pages: usize,
    page: usize,
    per_page: usize,
}

impl Pagination {
    /// Create a pagination control with the given number of total pages
    /// (minimum 1) and 10 items per page.
    pub fn new(total_pages: usize) -> Self {
        Self {
            id: ElementId::generate(),
            label: "Pagination".to_string(),
            total_pages: total_pages.max(1),
            page: 0,
            per_page: 10,
        }
    }

    /// Set the number of items per page.
    pub fn with_per_page(mut self, n: usize) -> Self {
        self.per_page = n.max(1);
        self
    }

    /// Accessible label of the navigation landmark (default: "Pagination").
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_page(mut self, n: usize) -> Self {
        self.set_page(n);
        self
    }

    /// Get the current page (zero-indexed).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Set the current page (zero-indexed). Clamped to valid range.
    pub fn set_page(&mut self, n: usize) {
        self.page = n.min(self.total_pages - 1);
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Set the total number of pages (minimum 1), clamping the current page.
    pub fn set_total_pages(&mut self, n: usize) {
        self.total_pages = n.max(1);
        if self.page >= self.total_pages {
            self.page = self.total_pages - 1;
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Advance to the next page if not on the last page.
    pub fn next_page(&mut self) {
        if !self.on_last_page() {
            self.page += 1;
        }
    }

    /// Go to the previous page if not on the first page.
    pub fn prev_page(&mut self) {
        if !self.on_first_page() {
            self.page -= 1;
        }
    }

    pub fn on_first_page(&self) -> bool {
        self.page == 0
    }

    pub fn on_last_page(&self) -> bool {
        self.page + 1 >= self.total_pages
    }

    /// How many items are on the current page given a total item count.
    ///
    /// With 23 items, 10 per page: pages 0 and 1 have 10 items, page 2 has 3.
    pub fn items_on_page(&self, total_items: usize) -> usize {
        let start = self.page.saturating_mul(self.per_page);
        if start >= total_items {
            return 0;
        }
        (total_items - start).min(self.per_page)
    }

    fn prev_id(&self) -> ElementId {
        self.id.child("prev")
    }

    fn next_id(&self) -> ElementId {
        self.id.child("next")
    }

    /// Deterministic per-page id, one-based like the label.
    fn page_id(&self, page: usize) -> ElementId {
        self.id.child(format!("page-{}", page + 1))
    }

    fn step_button(&self, id: ElementId, label: &str, glyph: &str, disabled: bool) -> Element {
        Element::new(Tag::Button)
            .class("pagination__step")
            .id(&id)
            .attr("type", "button")
            .attr("aria-label", label)
            .flag_if(disabled, "disabled")
            .text(glyph)
    }
}

impl Component for Pagination {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::NextPage => self.next_page(),
            Message::PrevPage => self.prev_page(),
            Message::GotoPage(n) => self.set_page(n),
        }
        Command::none()
    }

    fn view(&self) -> Node {
        let items = page_window(self.page, self.total_pages)
            .into_iter()
            .map(|item| match item {
                PageItem::Page(p) => {
                    let current = p == self.page;
                    Element::new(Tag::Li).child(
                        Element::new(Tag::Button)
                            .class("pagination__page")
                            .class_if(current, "pagination__page--current")
                            .id(&self.page_id(p))
                            .attr("type", "button")
                            .attr("aria-label", format!("Page {}", p + 1))
                            .attr_opt("aria-current", current.then_some("page"))
                            .text((p + 1).to_string()),
                    )
                }
                PageItem::Ellipsis => Element::new(Tag::Li).child(
                    Element::new(Tag::Span)
                        .class("pagination__ellipsis")
                        .attr("aria-hidden", "true")
                        .text("\u{2026}"),
                ),
            });

        Element::new(Tag::Nav)
            .class("pagination")
            .id(&self.id)
            .attr("aria-label", &self.label)
            .child(self.step_button(
                self.prev_id(),
                "Previous page",
                "\u{2039}",
                self.on_first_page(),
            ))
            .child(Element::new(Tag::Ul).class("pagination__list").children(items))
            .child(self.step_button(
                self.next_id(),
                "Next page",
                "\u{203a}",
                self.on_last_page(),
            ))
            .into()
    }

    fn listeners(&self) -> Vec<Listener<Message>> {
        let prev = self.prev_id();
        let next = self.next_id();
        let mut targets = vec![prev.clone(), next.clone()];
        targets.extend(
            page_window(self.page, self.total_pages)
                .into_iter()
                .filter_map(|item| match item {
                    PageItem::Page(p) => Some(self.page_id(p)),
                    PageItem::Ellipsis => None,
                }),
        );
        let page_prefix = format!("{}-page-", self.id);
        vec![activate(&self.id, targets, move |id| {
            if *id == prev {
                return Message::PrevPage;
            }
            if *id == next {
                return Message::NextPage;
            }
            let number = id
                .as_str()
                .strip_prefix(&page_prefix)
                .and_then(|n| n.parse::<usize>().ok())
                .unwrap_or(1);
            Message::GotoPage(number.saturating_sub(1))
        })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::testing::TestProgram;
    use mosaic_core::{Model, RoleQuery};
    use PageItem::{Ellipsis, Page};

    struct Host {
        pages: Pagination,
        log: Vec<Message>,
    }

    impl Model for Host {
        type Message = Message;
        type Flags = Pagination;

        fn init(pages: Pagination) -> (Self, Command<Message>) {
            (Host { pages, log: Vec::new() }, Command::none())
        }

        fn update(&mut self, msg: Message) -> Command<Message> {
            self.log.push(msg.clone());
            self.pages.update(msg)
        }

        fn view(&self) -> Node {
            self.pages.view()
        }

        fn listeners(&self) -> Vec<Listener<Message>> {
            self.pages.listeners()
        }
    }

    #[test]
    fn small_totals_list_every_page() {
        assert_eq!(page_window(0, 3), vec![Page(0), Page(1), Page(2)]);
        assert_eq!(page_window(3, 7).len(), 7);
    }

    #[test]
    fn large_totals_are_windowed() {
        assert_eq!(
            page_window(9, 20),
            vec![Page(0), Ellipsis, Page(8), Page(9), Page(10), Ellipsis, Page(19)]
        );
        assert_eq!(page_window(0, 20), vec![Page(0), Page(1), Ellipsis, Page(19)]);
        assert_eq!(page_window(19, 20), vec![Page(0), Ellipsis, Page(18), Page(19)]);
    }

    #[test]
    fn single_page_gaps_are_filled() {
        assert_eq!(
            page_window(3, 8),
            vec![Page(0), Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(7)]
        );
    }

    #[test]
    fn navigation_is_clamped() {
        let mut pages = Pagination::new(3);
        pages.prev_page();
        assert!(pages.on_first_page());
        pages.next_page();
        pages.next_page();
        pages.next_page();
        assert_eq!(pages.page(), 2);
        assert!(pages.on_last_page());
        pages.set_total_pages(0);
        assert_eq!(pages.total_pages(), 1);
        assert_eq!(pages.page(), 0);
    }

    #[test]
    fn items_on_page_handles_the_tail() {
        let mut pages = Pagination::new(3);
        assert_eq!(pages.items_on_page(23), 10);
        pages.set_page(2);
        assert_eq!(pages.items_on_page(23), 3);
        assert_eq!(pages.items_on_page(0), 0);
        assert_eq!(Pagination::new(2).with_per_page(0).per_page(), 1);
    }

    #[test]
    fn huge_page_size_does_not_overflow() {
        let pages = Pagination::new(3).with_per_page(usize::MAX).with_page(2);
        assert_eq!(pages.items_on_page(23), 0);
        assert_eq!(pages.items_on_page(usize::MAX), 0);
        let first = Pagination::new(3).with_per_page(usize::MAX);
        assert_eq!(first.items_on_page(23), 23);
    }

    #[test]
    fn current_page_is_marked() {
        let prog = TestProgram::<Host>::new(Pagination::new(5).with_page(1));
        let doc = prog.document();
        assert!(doc.get_by_role("navigation", "Pagination").is_ok());
        let current = prog.by_role("button", "Page 2");
        assert_eq!(doc.attribute(current, "aria-current"), Some("page"));
        assert_eq!(doc.attribute(prog.by_role("button", "Page 1"), "aria-current"), None);
    }

    #[test]
    fn bounds_disable_step_buttons() {
        let mut prog = TestProgram::<Host>::new(Pagination::new(2));
        let prev = prog.by_role("button", "Previous page");
        assert!(prog.document().has_attribute(prev, "disabled"));
        prog.click(prev);
        assert!(prog.model().log.is_empty());

        prog.click(prog.by_role("button", "Next page"));
        assert_eq!(prog.model().log, vec![Message::NextPage]);
        let next = prog.by_role("button", "Next page");
        assert!(prog.document().has_attribute(next, "disabled"));
    }

    #[test]
    fn page_buttons_jump() {
        let mut prog = TestProgram::<Host>::new(Pagination::new(20));
        prog.click(prog.by_role("button", "Page 20"));
        assert_eq!(prog.model().log, vec![Message::GotoPage(19)]);
        prog.click(prog.by_role("button", "Page 19"));
        assert_eq!(prog.model().pages.page(), 18);
    }

    #[test]
    fn ellipsis_is_hidden_from_queries() {
        let prog = TestProgram::<Host>::new(Pagination::new(20).with_page(9));
        // prev, next, and five page buttons
        assert_eq!(prog.document().query_all(&RoleQuery::new("button")).len(), 7);
        assert!(prog.html().contains('\u{2026}'));
    }
}

//! Pagination window calculation: which page buttons (and ellipses) the
//! list renders for a given current page and page count.

/// Pages beyond this count collapse into a first/window/last shape.
const MAX_VISIBLE: u64 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page(u64),
    Ellipsis,
}

/// `current` is 0-based. With `total <= MAX_VISIBLE + 2` every page is
/// shown; otherwise page 0 and page `total - 1` are always present with an
/// inner window clamped to `[1, total - 2]`, biased wide near either end.
/// An ellipsis marks each side where the window does not abut the edge.
pub fn page_window(current: u64, total: u64) -> Vec<PageItem> {
    if total <= MAX_VISIBLE + 2 {
        return (0..total).map(PageItem::Page).collect();
    }

    let (start, end) = if current <= 2 {
        (1, (MAX_VISIBLE - 1).min(total - 2))
    } else if current + 3 >= total {
        (1.max(total - MAX_VISIBLE), total - 2)
    } else {
        (current - 1, current + 1)
    };

    let mut items = vec![PageItem::Page(0)];
    if start > 1 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total - 2 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total - 1));
    items
}

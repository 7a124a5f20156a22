pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const DEFAULT_SORT_BY: &str = "createdAt";

/// Columns the list can be sorted by, in wire spelling.
pub const SORT_COLUMNS: [&str; 7] = [
    "title",
    "service",
    "severity",
    "status",
    "owner",
    "createdAt",
    "updatedAt",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl SortDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<SortDir> {
        match value.to_lowercase().as_str() {
            "asc" => Some(SortDir::Asc),
            "desc" => Some(SortDir::Desc),
            _ => None,
        }
    }
}

/// Single source of truth for what the list view fetches.
///
/// Filter fields are kept as plain strings ("" meaning "no filter") so the
/// state mirrors the query string one-to-one. The setters enforce the page
/// invariants; callers never touch `page` directly when changing a filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filters {
    pub search: String,
    pub service: String,
    pub severity: String,
    pub status: String,
    pub page: u64,
    pub size: u64,
    pub sort_by: String,
    pub sort_dir: SortDir,
}

impl Default for Filters {
    fn default() -> Filters {
        Filters {
            search: String::new(),
            service: String::new(),
            severity: String::new(),
            status: String::new(),
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_dir: SortDir::Desc,
        }
    }
}

impl Filters {
    pub fn set_search(&mut self, value: impl Into<String>) {
        self.search = value.into();
        self.page = 0;
    }

    pub fn set_service(&mut self, value: impl Into<String>) {
        self.service = value.into();
        self.page = 0;
    }

    pub fn set_severity(&mut self, value: impl Into<String>) {
        self.severity = value.into();
        self.page = 0;
    }

    pub fn set_status(&mut self, value: impl Into<String>) {
        self.status = value.into();
        self.page = 0;
    }

    pub fn set_page(&mut self, page: u64) {
        self.page = page;
    }

    pub fn set_size(&mut self, size: u64) {
        self.size = size;
        self.page = 0;
    }

    /// Clicking the active ascending column flips to descending; clicking a
    /// descending or inactive column sorts ascending. Either way the view
    /// goes back to the first page.
    pub fn toggle_sort(&mut self, column: &str) {
        self.sort_dir = if self.sort_by == column && self.sort_dir == SortDir::Asc {
            SortDir::Desc
        } else {
            SortDir::Asc
        };
        self.sort_by = column.to_string();
        self.page = 0;
    }

    /// Total reset, sort order included.
    pub fn reset(&mut self) {
        *self = Filters::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page_three() -> Filters {
        Filters {
            page: 3,
            ..Filters::default()
        }
    }

    #[test]
    fn filter_setters_reset_page() {
        let mut filters = on_page_three();
        filters.set_search("timeout");
        assert_eq!(filters.page, 0);

        let mut filters = on_page_three();
        filters.set_service("Payments");
        assert_eq!(filters.page, 0);

        let mut filters = on_page_three();
        filters.set_severity("SEV1");
        assert_eq!(filters.page, 0);

        let mut filters = on_page_three();
        filters.set_status("OPEN");
        assert_eq!(filters.page, 0);
    }

    #[test]
    fn page_change_leaves_other_fields_alone() {
        let mut filters = Filters::default();
        filters.set_search("cache");
        filters.set_page(4);
        assert_eq!(filters.search, "cache");
        assert_eq!(filters.page, 4);
        assert_eq!(filters.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn size_change_resets_page_only() {
        let mut filters = on_page_three();
        filters.set_service("CDN");
        filters.set_page(2);
        filters.set_size(50);
        assert_eq!(filters.page, 0);
        assert_eq!(filters.size, 50);
        assert_eq!(filters.service, "CDN");
    }

    #[test]
    fn sort_toggle_cycles_asc_then_desc() {
        let mut filters = Filters::default();
        assert_eq!(filters.sort_by, "createdAt");
        assert_eq!(filters.sort_dir, SortDir::Desc);

        // Inactive column: ascending.
        filters.toggle_sort("title");
        assert_eq!(filters.sort_by, "title");
        assert_eq!(filters.sort_dir, SortDir::Asc);

        // Active ascending column: descending.
        filters.toggle_sort("title");
        assert_eq!(filters.sort_dir, SortDir::Desc);

        // Active descending column: back to ascending.
        filters.toggle_sort("title");
        assert_eq!(filters.sort_dir, SortDir::Asc);
    }

    #[test]
    fn sort_toggle_resets_page() {
        let mut filters = on_page_three();
        filters.toggle_sort("severity");
        assert_eq!(filters.page, 0);

        filters.set_page(5);
        filters.toggle_sort("severity");
        assert_eq!(filters.page, 0);
    }

    #[test]
    fn reset_restores_defaults_including_sort() {
        let mut filters = Filters::default();
        filters.set_search("dns");
        filters.set_severity("SEV3");
        filters.toggle_sort("owner");
        filters.set_size(20);
        filters.reset();
        assert_eq!(filters, Filters::default());
    }
}

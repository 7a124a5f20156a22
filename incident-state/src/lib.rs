//! Pure state logic for the incident list view.
//!
//! Everything here is framework-free: the filter/sort/page state and its
//! invariants, the query-string codec used for both the browser URL and the
//! list request, the pagination window calculation, and the two small
//! bookkeeping types (request sequencing, debounce) that make the view
//! correct under out-of-order responses and rapid input without relying on
//! cancellation primitives.

pub mod debounce;
pub mod filters;
pub mod pagination;
pub mod query;
pub mod sequence;

pub use debounce::Debounce;
pub use filters::{Filters, SortDir, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, SORT_COLUMNS};
pub use pagination::{page_window, PageItem};
pub use query::{from_query, to_query};
pub use sequence::RequestSequence;

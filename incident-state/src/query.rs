//! Query-string codec for [`Filters`].
//!
//! The serialized form doubles as the browser URL (shareable links) and the
//! GET /incidents parameters; fields equal to their defaults are omitted in
//! both. Deserialization runs exactly once, at initial page load. After
//! that the flow is always state to URL, never the reverse.

use crate::filters::{Filters, SortDir, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY};

pub fn to_query(filters: &Filters) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();
    if !filters.search.is_empty() {
        params.push(("search", filters.search.clone()));
    }
    if !filters.service.is_empty() {
        params.push(("service", filters.service.clone()));
    }
    if !filters.severity.is_empty() {
        params.push(("severity", filters.severity.clone()));
    }
    if !filters.status.is_empty() {
        params.push(("status", filters.status.clone()));
    }
    if filters.page > 0 {
        params.push(("page", filters.page.to_string()));
    }
    if filters.size != DEFAULT_PAGE_SIZE {
        params.push(("size", filters.size.to_string()));
    }
    if filters.sort_by != DEFAULT_SORT_BY {
        params.push(("sortBy", filters.sort_by.clone()));
    }
    if filters.sort_dir != SortDir::Desc {
        params.push(("sortDir", filters.sort_dir.as_str().to_string()));
    }

    params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Accepts an optional leading `?`. Missing or unparseable fields fall back
/// to their defaults; unknown keys are ignored.
pub fn from_query(query: &str) -> Filters {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut filters = Filters::default();

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
        let value = urlencoding::decode(raw)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| raw.to_string());

        match key {
            "search" => filters.search = value,
            "service" => filters.service = value,
            "severity" => filters.severity = value,
            "status" => filters.status = value,
            "page" => filters.page = value.parse().unwrap_or(0),
            "size" => filters.size = value.parse().unwrap_or(DEFAULT_PAGE_SIZE),
            "sortBy" => {
                if !value.is_empty() {
                    filters.sort_by = value;
                }
            }
            "sortDir" => filters.sort_dir = SortDir::parse(&value).unwrap_or_default(),
            _ => {}
        }
    }

    filters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_serialize_to_empty() {
        assert_eq!(to_query(&Filters::default()), "");
    }

    #[test]
    fn only_non_default_fields_appear() {
        let mut filters = Filters::default();
        filters.set_service("Payments");
        filters.set_page(2);
        assert_eq!(to_query(&filters), "service=Payments&page=2");
    }

    #[test]
    fn search_is_percent_encoded() {
        let mut filters = Filters::default();
        filters.set_search("rate limit & retry");
        let query = to_query(&filters);
        assert_eq!(query, "search=rate%20limit%20%26%20retry");
        assert_eq!(from_query(&query).search, "rate limit & retry");
    }

    #[test]
    fn round_trips_every_non_default_field() {
        let filters = Filters {
            search: "disk space".into(),
            service: "API Gateway".into(),
            severity: "SEV2".into(),
            status: "MITIGATED".into(),
            page: 7,
            size: 50,
            sort_by: "severity".into(),
            sort_dir: SortDir::Asc,
        };
        assert_eq!(from_query(&to_query(&filters)), filters);
    }

    #[test]
    fn round_trips_partial_combinations() {
        let mut filters = Filters::default();
        filters.set_status("OPEN");
        filters.toggle_sort("owner");
        assert_eq!(from_query(&to_query(&filters)), filters);

        let mut filters = Filters::default();
        filters.set_size(5);
        filters.set_page(1);
        assert_eq!(from_query(&to_query(&filters)), filters);
    }

    #[test]
    fn empty_and_missing_fields_fall_back_to_defaults() {
        assert_eq!(from_query(""), Filters::default());
        assert_eq!(from_query("?"), Filters::default());
        assert_eq!(from_query("sortBy=&page=notanumber"), Filters::default());
    }

    #[test]
    fn leading_question_mark_is_accepted() {
        let filters = from_query("?service=CDN&sortDir=asc");
        assert_eq!(filters.service, "CDN");
        assert_eq!(filters.sort_dir, SortDir::Asc);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let filters = from_query("utm_source=mail&service=Auth");
        assert_eq!(filters.service, "Auth");
        assert_eq!(from_query("utm_source=mail"), Filters::default());
    }
}

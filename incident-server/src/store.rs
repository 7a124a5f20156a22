use incident_model::{CreateIncident, Incident, PageResponse, Severity, Status, UpdateIncident};
use incident_state::{Filters, SortDir, SORT_COLUMNS};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const MAX_PAGE_SIZE: u64 = 100;

/// SQLite-backed incident store. Cheap to clone; each call opens its own
/// connection against the shared path.
#[derive(Clone)]
pub struct IncidentStore {
    db_path: Arc<PathBuf>,
}

impl IncidentStore {
    pub fn open(path: &str) -> Result<Self, String> {
        let db_path = PathBuf::from(path);
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
            }
        }

        let conn = Connection::open(&db_path).map_err(|e| e.to_string())?;
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            CREATE TABLE IF NOT EXISTS incidents (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                service TEXT NOT NULL,
                severity TEXT NOT NULL,
                status TEXT NOT NULL,
                owner TEXT,
                summary TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_incidents_created ON incidents(created_at);
            CREATE INDEX IF NOT EXISTS idx_incidents_service ON incidents(service);
            ",
        )
        .map_err(|e| e.to_string())?;

        Ok(Self {
            db_path: Arc::new(db_path),
        })
    }

    fn connect(&self) -> Result<Connection, String> {
        Connection::open(&*self.db_path).map_err(|e| e.to_string())
    }

    pub fn create(&self, req: &CreateIncident) -> Result<Incident, String> {
        let now = now_string();
        let incident = Incident {
            id: uuid::Uuid::new_v4().to_string(),
            title: req.title.trim().to_string(),
            service: req.service.trim().to_string(),
            severity: req.severity,
            status: req.status,
            owner: req.owner.clone(),
            summary: req.summary.clone(),
            created_at: now.clone(),
            updated_at: now,
        };
        self.insert(&incident)?;
        Ok(incident)
    }

    /// Inserts a fully-formed record (seeding, tests). `create` is the
    /// normal path and assigns id and timestamps itself.
    pub fn insert(&self, incident: &Incident) -> Result<(), String> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO incidents
                 (id, title, service, severity, status, owner, summary, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                incident.id,
                incident.title,
                incident.service,
                incident.severity.as_str(),
                incident.status.as_str(),
                incident.owner,
                incident.summary,
                incident.created_at,
                incident.updated_at,
            ],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<Incident>, String> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM incidents WHERE id = ?1"),
            params![id],
            map_row,
        )
        .optional()
        .map_err(|e| e.to_string())
    }

    /// Applies the fields present in the patch, leaves the rest unchanged,
    /// and bumps `updated_at`. `Ok(None)` when the id does not exist.
    pub fn update(&self, id: &str, patch: &UpdateIncident) -> Result<Option<Incident>, String> {
        let Some(mut incident) = self.get(id)? else {
            return Ok(None);
        };

        if let Some(title) = &patch.title {
            incident.title = title.trim().to_string();
        }
        if let Some(service) = &patch.service {
            incident.service = service.trim().to_string();
        }
        if let Some(severity) = patch.severity {
            incident.severity = severity;
        }
        if let Some(status) = patch.status {
            incident.status = status;
        }
        if let Some(owner) = &patch.owner {
            incident.owner = Some(owner.clone());
        }
        if let Some(summary) = &patch.summary {
            incident.summary = Some(summary.clone());
        }
        incident.updated_at = now_string();

        let conn = self.connect()?;
        conn.execute(
            "UPDATE incidents
             SET title = ?2, service = ?3, severity = ?4, status = ?5,
                 owner = ?6, summary = ?7, updated_at = ?8
             WHERE id = ?1",
            params![
                incident.id,
                incident.title,
                incident.service,
                incident.severity.as_str(),
                incident.status.as_str(),
                incident.owner,
                incident.summary,
                incident.updated_at,
            ],
        )
        .map_err(|e| e.to_string())?;

        Ok(Some(incident))
    }

    pub fn count(&self) -> Result<u64, String> {
        let conn = self.connect()?;
        conn.query_row("SELECT COUNT(*) FROM incidents", [], |row| {
            row.get::<_, i64>(0)
        })
        .map(|n| n as u64)
        .map_err(|e| e.to_string())
    }

    /// Filtered, sorted, paged listing. Search matches title or owner,
    /// case-insensitive substring; service is an exact match; severity and
    /// status values that do not parse mean "no filter". Unknown sort
    /// columns fall back to createdAt.
    pub fn list(&self, filters: &Filters) -> Result<PageResponse<Incident>, String> {
        let size = filters.size.clamp(1, MAX_PAGE_SIZE);
        let page = filters.page;

        let mut where_sql = String::from(" WHERE 1=1");
        let mut args: Vec<String> = Vec::new();

        if !filters.search.is_empty() {
            where_sql.push_str(" AND (LOWER(title) LIKE ? OR LOWER(IFNULL(owner, '')) LIKE ?)");
            let needle = format!("%{}%", filters.search.to_lowercase());
            args.push(needle.clone());
            args.push(needle);
        }
        if !filters.service.is_empty() {
            where_sql.push_str(" AND service = ?");
            args.push(filters.service.clone());
        }
        if let Some(severity) = Severity::parse(&filters.severity) {
            where_sql.push_str(" AND severity = ?");
            args.push(severity.as_str().to_string());
        }
        if let Some(status) = Status::parse(&filters.status) {
            where_sql.push_str(" AND status = ?");
            args.push(status.as_str().to_string());
        }

        let conn = self.connect()?;

        let total: u64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM incidents{where_sql}"),
                params_from_iter(args.iter()),
                |row| row.get::<_, i64>(0),
            )
            .map(|n| n as u64)
            .map_err(|e| e.to_string())?;

        let column = sort_column(&filters.sort_by);
        let direction = match filters.sort_dir {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        };
        let offset = page.saturating_mul(size);

        let sql = format!(
            "SELECT {COLUMNS} FROM incidents{where_sql}
             ORDER BY {column} {direction} LIMIT {size} OFFSET {offset}"
        );
        let mut stmt = conn.prepare(&sql).map_err(|e| e.to_string())?;
        let rows = stmt
            .query_map(params_from_iter(args.iter()), map_row)
            .map_err(|e| e.to_string())?;

        let mut content = Vec::new();
        for row in rows {
            content.push(row.map_err(|e| e.to_string())?);
        }

        let total_pages = total.div_ceil(size);
        Ok(PageResponse {
            empty: content.is_empty(),
            first: page == 0,
            last: page + 1 >= total_pages,
            content,
            total_elements: total,
            total_pages,
            number: page,
            size,
        })
    }
}

const COLUMNS: &str =
    "id, title, service, severity, status, owner, summary, created_at, updated_at";

fn sort_column(sort_by: &str) -> &'static str {
    if !SORT_COLUMNS.contains(&sort_by) {
        return "created_at";
    }
    match sort_by {
        "title" => "title",
        "service" => "service",
        "severity" => "severity",
        "status" => "status",
        "owner" => "owner",
        "updatedAt" => "updated_at",
        _ => "created_at",
    }
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Incident> {
    let severity_str: String = row.get(3)?;
    let status_str: String = row.get(4)?;

    let severity = Severity::parse(&severity_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("invalid severity '{severity_str}'").into(),
        )
    })?;
    let status = Status::parse(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("invalid status '{status_str}'").into(),
        )
    })?;

    Ok(Incident {
        id: row.get(0)?,
        title: row.get(1)?,
        service: row.get(2)?,
        severity,
        status,
        owner: row.get(5)?,
        summary: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn now_string() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_path(name: &str) -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        format!("/tmp/incident-tracker-tests/{name}-{nanos}.db")
    }

    fn seeded(id: &str, title: &str, service: &str, severity: Severity, status: Status) -> Incident {
        Incident {
            id: id.into(),
            title: title.into(),
            service: service.into(),
            severity,
            status,
            owner: None,
            summary: None,
            created_at: format!("2025-06-0{}T00:00:00.000Z", id.len().min(9)),
            updated_at: format!("2025-06-0{}T00:00:00.000Z", id.len().min(9)),
        }
    }

    fn sample_store(name: &str) -> IncidentStore {
        let store = IncidentStore::open(&db_path(name)).expect("open");
        let mut rows = vec![
            seeded("a", "Login failure", "Auth", Severity::Sev1, Status::Open),
            seeded("bb", "Payment delay", "Payments", Severity::Sev2, Status::Mitigated),
            seeded("ccc", "API timeout", "API Gateway", Severity::Sev3, Status::Resolved),
            seeded("dddd", "Cache invalidation bug", "Backend", Severity::Sev2, Status::Open),
        ];
        rows[1].owner = Some("alice@team.com".into());
        rows[3].owner = Some("bob@team.com".into());
        for row in &rows {
            store.insert(row).expect("insert");
        }
        store
    }

    #[test]
    fn create_assigns_id_and_timestamps() {
        let store = IncidentStore::open(&db_path("create")).expect("open");
        let created = store
            .create(&CreateIncident {
                title: "  DNS resolution failure  ".into(),
                service: "CDN".into(),
                severity: Severity::Sev1,
                status: Status::Open,
                owner: None,
                summary: Some("Records not propagated.".into()),
            })
            .expect("create");

        assert!(!created.id.is_empty());
        assert_eq!(created.title, "DNS resolution failure");
        assert_eq!(created.created_at, created.updated_at);

        let fetched = store.get(&created.id).expect("get").expect("some");
        assert_eq!(fetched, created);
    }

    #[test]
    fn get_missing_is_none() {
        let store = IncidentStore::open(&db_path("get-missing")).expect("open");
        assert_eq!(store.get("nope").expect("get"), None);
    }

    #[test]
    fn update_applies_only_present_fields() {
        let store = sample_store("update-partial");
        let patch = UpdateIncident {
            status: Some(Status::Resolved),
            owner: Some("charlie@team.com".into()),
            ..UpdateIncident::default()
        };
        let updated = store.update("a", &patch).expect("update").expect("some");

        assert_eq!(updated.status, Status::Resolved);
        assert_eq!(updated.owner.as_deref(), Some("charlie@team.com"));
        // Untouched fields survive.
        assert_eq!(updated.title, "Login failure");
        assert_eq!(updated.severity, Severity::Sev1);
        assert_ne!(updated.updated_at, updated.created_at);

        let fetched = store.get("a").expect("get").expect("some");
        assert_eq!(fetched, updated);
    }

    #[test]
    fn update_missing_is_none() {
        let store = sample_store("update-missing");
        let patch = UpdateIncident {
            title: Some("whatever".into()),
            ..UpdateIncident::default()
        };
        assert_eq!(store.update("ghost", &patch).expect("update"), None);
    }

    #[test]
    fn list_default_sorts_by_created_at_desc() {
        let store = sample_store("list-default");
        let page = store.list(&Filters::default()).expect("list");
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.total_pages, 1);
        assert!(page.first && page.last && !page.empty);
        // Latest created first.
        assert_eq!(page.content[0].id, "dddd");
        assert_eq!(page.content[3].id, "a");
    }

    #[test]
    fn search_matches_title_and_owner_case_insensitive() {
        let store = sample_store("list-search");

        let mut filters = Filters::default();
        filters.set_search("PAYMENT");
        let page = store.list(&filters).expect("list");
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].id, "bb");

        filters.set_search("bob@");
        let page = store.list(&filters).expect("list");
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].id, "dddd");

        filters.set_search("no such thing");
        let page = store.list(&filters).expect("list");
        assert_eq!(page.total_elements, 0);
        assert!(page.empty);
    }

    #[test]
    fn filters_combine() {
        let store = sample_store("list-combined");
        let mut filters = Filters::default();
        filters.set_severity("SEV2");
        filters.set_status("OPEN");
        let page = store.list(&filters).expect("list");
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].id, "dddd");

        filters.set_service("Payments");
        let page = store.list(&filters).expect("list");
        assert_eq!(page.total_elements, 0);
    }

    #[test]
    fn unparseable_enum_filter_means_no_filter() {
        let store = sample_store("list-lenient");
        let mut filters = Filters::default();
        filters.set_severity("SEV9");
        let page = store.list(&filters).expect("list");
        assert_eq!(page.total_elements, 4);
    }

    #[test]
    fn sort_by_title_ascending() {
        let store = sample_store("list-sort");
        let mut filters = Filters::default();
        filters.toggle_sort("title");
        let page = store.list(&filters).expect("list");
        let titles: Vec<_> = page.content.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "API timeout",
                "Cache invalidation bug",
                "Login failure",
                "Payment delay"
            ]
        );
    }

    #[test]
    fn unknown_sort_column_falls_back_to_created_at() {
        let store = sample_store("list-sort-unknown");
        let mut filters = Filters::default();
        filters.sort_by = "createdAt; DROP TABLE incidents".into();
        let page = store.list(&filters).expect("list");
        assert_eq!(page.content[0].id, "dddd");
        assert_eq!(store.count().expect("count"), 4);
    }

    #[test]
    fn paging_metadata_is_consistent() {
        let store = sample_store("list-paging");
        let mut filters = Filters::default();
        filters.set_size(3);
        let page = store.list(&filters).expect("list");
        assert_eq!(page.content.len(), 3);
        assert_eq!(page.total_pages, 2);
        assert!(page.first && !page.last);

        filters.set_page(1);
        let page = store.list(&filters).expect("list");
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.number, 1);
        assert!(!page.first && page.last);

        // Past the end: empty but well-formed.
        filters.set_page(9);
        let page = store.list(&filters).expect("list");
        assert!(page.empty && page.last);
        assert_eq!(page.total_elements, 4);
    }

    #[test]
    fn size_is_clamped() {
        let store = sample_store("list-clamp");
        let mut filters = Filters::default();
        filters.set_size(0);
        let page = store.list(&filters).expect("list");
        assert_eq!(page.size, 1);
        assert_eq!(page.content.len(), 1);

        filters.set_size(100_000);
        let page = store.list(&filters).expect("list");
        assert_eq!(page.size, 100);
    }
}

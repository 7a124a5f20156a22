use crate::store::IncidentStore;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use incident_model::{validate_create, validate_update, CreateIncident, FieldError, UpdateIncident};
use incident_state::{Filters, SortDir, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY};
use serde::Deserialize;

pub fn router(store: IncidentStore) -> Router {
    Router::new()
        .route("/api/incidents", get(list_incidents).post(create_incident))
        .route(
            "/api/incidents/:id",
            get(get_incident).patch(update_incident),
        )
        .with_state(store)
}

/// GET /api/incidents query parameters; absence of a parameter implies its
/// default, matching the URL contract the UI serializes against.
#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListParams {
    search: String,
    service: String,
    severity: String,
    status: String,
    page: u64,
    size: u64,
    sort_by: String,
    sort_dir: String,
}

impl Default for ListParams {
    fn default() -> ListParams {
        ListParams {
            search: String::new(),
            service: String::new(),
            severity: String::new(),
            status: String::new(),
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_dir: String::new(),
        }
    }
}

impl ListParams {
    fn into_filters(self) -> Filters {
        Filters {
            search: self.search,
            service: self.service,
            severity: self.severity,
            status: self.status,
            page: self.page,
            size: self.size,
            sort_by: self.sort_by,
            sort_dir: SortDir::parse(&self.sort_dir).unwrap_or_default(),
        }
    }
}

async fn list_incidents(
    State(store): State<IncidentStore>,
    Query(params): Query<ListParams>,
) -> Response {
    match store.list(&params.into_filters()) {
        Ok(page) => Json(page).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_incident(State(store): State<IncidentStore>, Path(id): Path<String>) -> Response {
    match store.get(&id) {
        Ok(Some(incident)) => Json(incident).into_response(),
        Ok(None) => not_found(),
        Err(err) => internal_error(err),
    }
}

async fn create_incident(
    State(store): State<IncidentStore>,
    Json(req): Json<CreateIncident>,
) -> Response {
    let errors = validate_create(&req);
    if !errors.is_empty() {
        return validation_failed(errors);
    }
    match store.create(&req) {
        Ok(incident) => (StatusCode::CREATED, Json(incident)).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn update_incident(
    State(store): State<IncidentStore>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateIncident>,
) -> Response {
    let errors = validate_update(&patch);
    if !errors.is_empty() {
        return validation_failed(errors);
    }
    match store.update(&id, &patch) {
        Ok(Some(incident)) => Json(incident).into_response(),
        Ok(None) => not_found(),
        Err(err) => internal_error(err),
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "Incident not found" })),
    )
        .into_response()
}

fn validation_failed(errors: Vec<FieldError>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "errors": errors })),
    )
        .into_response()
}

fn internal_error(err: String) -> Response {
    tracing::error!("store failure: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "message": "Internal server error" })),
    )
        .into_response()
}

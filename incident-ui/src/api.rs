//! Fetch-based client for the incident REST API.

use incident_model::{CreateIncident, Incident, PageResponse, UpdateIncident};
use incident_state::{to_query, Filters};
use js_sys::Reflect;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    NotFound,
    Status(u16),
    Network(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "Incident not found"),
            ApiError::Status(code) => write!(f, "Request failed with status {code}"),
            ApiError::Network(message) => write!(f, "Network error: {message}"),
        }
    }
}

/// Deployments can point the UI at another host by defining
/// `window.INCIDENT_API_BASE` before the bundle loads.
fn api_base() -> String {
    web_sys::window()
        .and_then(|window| Reflect::get(&window, &JsValue::from_str("INCIDENT_API_BASE")).ok())
        .and_then(|value| value.as_string())
        .filter(|base| !base.is_empty())
        .unwrap_or_else(|| "/api".to_string())
}

async fn request<B, R>(method: &str, path: &str, body: Option<&B>) -> Result<R, ApiError>
where
    B: Serialize,
    R: DeserializeOwned,
{
    let window =
        web_sys::window().ok_or_else(|| ApiError::Network("window not available".into()))?;

    let init = RequestInit::new();
    init.set_method(method);
    if let Some(body) = body {
        let json = serde_json::to_string(body).map_err(|e| ApiError::Network(e.to_string()))?;
        init.set_body(&JsValue::from_str(&json));
    }

    let request = Request::new_with_str_and_init(&format!("{}{path}", api_base()), &init)
        .map_err(|e| ApiError::Network(format!("{e:?}")))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| ApiError::Network(format!("{e:?}")))?;
    }

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(format!("{e:?}")))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| ApiError::Network("unexpected fetch result".into()))?;

    if response.status() == 404 {
        return Err(ApiError::NotFound);
    }
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    let json = JsFuture::from(
        response
            .json()
            .map_err(|e| ApiError::Network(format!("{e:?}")))?,
    )
    .await
    .map_err(|e| ApiError::Network(format!("{e:?}")))?;

    serde_wasm_bindgen::from_value(json).map_err(|e| ApiError::Network(e.to_string()))
}

pub async fn fetch_incidents(filters: &Filters) -> Result<PageResponse<Incident>, ApiError> {
    let query = to_query(filters);
    let path = if query.is_empty() {
        "/incidents".to_string()
    } else {
        format!("/incidents?{query}")
    };
    request::<(), _>("GET", &path, None).await
}

pub async fn fetch_incident(id: &str) -> Result<Incident, ApiError> {
    request::<(), _>("GET", &format!("/incidents/{id}"), None).await
}

pub async fn create_incident(req: &CreateIncident) -> Result<Incident, ApiError> {
    request("POST", "/incidents", Some(req)).await
}

pub async fn update_incident(id: &str, patch: &UpdateIncident) -> Result<Incident, ApiError> {
    request("PATCH", &format!("/incidents/{id}"), Some(patch)).await
}

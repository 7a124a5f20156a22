//! Wire types shared by the incident UI and server, plus the field-level
//! validation both sides run before accepting a mutation.

use serde::{Deserialize, Serialize};

pub const SERVICES: [&str; 10] = [
    "Auth",
    "Payments",
    "Backend",
    "Frontend",
    "Database",
    "API Gateway",
    "Notifications",
    "Search",
    "Analytics",
    "CDN",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "SEV1")]
    Sev1,
    #[serde(rename = "SEV2")]
    Sev2,
    #[serde(rename = "SEV3")]
    Sev3,
    #[serde(rename = "SEV4")]
    Sev4,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Sev1,
        Severity::Sev2,
        Severity::Sev3,
        Severity::Sev4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Sev1 => "SEV1",
            Severity::Sev2 => "SEV2",
            Severity::Sev3 => "SEV3",
            Severity::Sev4 => "SEV4",
        }
    }

    pub fn parse(value: &str) -> Option<Severity> {
        match value.to_uppercase().as_str() {
            "SEV1" => Some(Severity::Sev1),
            "SEV2" => Some(Severity::Sev2),
            "SEV3" => Some(Severity::Sev3),
            "SEV4" => Some(Severity::Sev4),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Open,
    Mitigated,
    Resolved,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Open, Status::Mitigated, Status::Resolved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "OPEN",
            Status::Mitigated => "MITIGATED",
            Status::Resolved => "RESOLVED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::Mitigated => "Mitigated",
            Status::Resolved => "Resolved",
        }
    }

    pub fn parse(value: &str) -> Option<Status> {
        match value.to_uppercase().as_str() {
            "OPEN" => Some(Status::Open),
            "MITIGATED" => Some(Status::Mitigated),
            "RESOLVED" => Some(Status::Resolved),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: String,
    pub title: String,
    pub service: String,
    pub severity: Severity,
    pub status: Status,
    pub owner: Option<String>,
    pub summary: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Server-paginated result envelope. Replaced wholesale on each fetch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
    pub size: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncident {
    pub title: String,
    pub service: String,
    pub severity: Severity,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Partial update: absent fields are left unchanged by the server. Blank
/// optional strings must be mapped to `None` before serializing so they are
/// omitted from the payload rather than sent as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIncident {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

pub fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> FieldError {
        FieldError {
            field,
            message: message.to_string(),
        }
    }
}

fn check_title(title: &str, errors: &mut Vec<FieldError>) {
    let len = title.trim().chars().count();
    if len < 3 {
        errors.push(FieldError::new(
            "title",
            "Title must be at least 3 characters",
        ));
    } else if len > 200 {
        errors.push(FieldError::new(
            "title",
            "Title must be at most 200 characters",
        ));
    }
}

fn check_service(service: &str, errors: &mut Vec<FieldError>) {
    if service.trim().is_empty() {
        errors.push(FieldError::new("service", "Service is required"));
    } else if service.trim().chars().count() > 100 {
        errors.push(FieldError::new(
            "service",
            "Service must be at most 100 characters",
        ));
    }
}

fn check_owner(owner: &str, errors: &mut Vec<FieldError>) {
    if owner.trim().chars().count() > 200 {
        errors.push(FieldError::new(
            "owner",
            "Owner must be at most 200 characters",
        ));
    }
}

fn check_summary(summary: &str, errors: &mut Vec<FieldError>) {
    if summary.trim().chars().count() > 2000 {
        errors.push(FieldError::new(
            "summary",
            "Summary must be at most 2000 characters",
        ));
    }
}

pub fn validate_create(req: &CreateIncident) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_title(&req.title, &mut errors);
    check_service(&req.service, &mut errors);
    if let Some(owner) = req.owner.as_deref() {
        check_owner(owner, &mut errors);
    }
    if let Some(summary) = req.summary.as_deref() {
        check_summary(summary, &mut errors);
    }
    errors
}

/// Validates only the fields present in the patch.
pub fn validate_update(req: &UpdateIncident) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Some(title) = req.title.as_deref() {
        check_title(title, &mut errors);
    }
    if let Some(service) = req.service.as_deref() {
        check_service(service, &mut errors);
    }
    if let Some(owner) = req.owner.as_deref() {
        check_owner(owner, &mut errors);
    }
    if let Some(summary) = req.summary.as_deref() {
        check_summary(summary, &mut errors);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateIncident {
        CreateIncident {
            title: "Login failures on SSO".into(),
            service: "Auth".into(),
            severity: Severity::Sev2,
            status: Status::Open,
            owner: Some("alice@team.com".into()),
            summary: None,
        }
    }

    #[test]
    fn valid_create_passes() {
        assert!(validate_create(&create_request()).is_empty());
    }

    #[test]
    fn short_title_is_rejected() {
        let mut req = create_request();
        req.title = "ab".into();
        let errors = validate_create(&req);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[0].message, "Title must be at least 3 characters");
    }

    #[test]
    fn whitespace_title_is_rejected() {
        let mut req = create_request();
        req.title = "   a   ".into();
        let errors = validate_create(&req);
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn missing_service_is_rejected() {
        let mut req = create_request();
        req.service = "".into();
        let errors = validate_create(&req);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "service");
        assert_eq!(errors[0].message, "Service is required");
    }

    #[test]
    fn oversized_fields_are_rejected() {
        let mut req = create_request();
        req.title = "t".repeat(201);
        req.owner = Some("o".repeat(201));
        req.summary = Some("s".repeat(2001));
        let errors = validate_create(&req);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "owner", "summary"]);
    }

    #[test]
    fn update_validates_only_present_fields() {
        let req = UpdateIncident {
            owner: Some("bob@team.com".into()),
            ..UpdateIncident::default()
        };
        assert!(validate_update(&req).is_empty());

        let req = UpdateIncident {
            title: Some("ab".into()),
            ..UpdateIncident::default()
        };
        let errors = validate_update(&req);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn blank_to_none_trims() {
        assert_eq!(blank_to_none("   "), None);
        assert_eq!(blank_to_none(""), None);
        assert_eq!(blank_to_none("  alice  "), Some("alice".to_string()));
    }

    #[test]
    fn update_payload_omits_absent_fields() {
        let req = UpdateIncident {
            title: Some("Payment delays".into()),
            status: Some(Status::Mitigated),
            ..UpdateIncident::default()
        };
        let json = serde_json::to_value(&req).expect("serialize");
        let obj = json.as_object().expect("object");
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("title"));
        assert!(obj.contains_key("status"));
        assert!(!obj.contains_key("owner"));
        assert!(!obj.contains_key("summary"));
    }

    #[test]
    fn enums_use_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&Severity::Sev1).expect("severity"),
            "\"SEV1\""
        );
        assert_eq!(
            serde_json::to_string(&Status::Mitigated).expect("status"),
            "\"MITIGATED\""
        );
        assert_eq!(Severity::parse("sev3"), Some(Severity::Sev3));
        assert_eq!(Status::parse("resolved"), Some(Status::Resolved));
        assert_eq!(Severity::parse("SEV5"), None);
        assert_eq!(Status::parse(""), None);
    }

    #[test]
    fn incident_uses_camel_case_keys() {
        let incident = Incident {
            id: "inc-1".into(),
            title: "API timeouts".into(),
            service: "API Gateway".into(),
            severity: Severity::Sev1,
            status: Status::Open,
            owner: None,
            summary: Some("Requests timing out.".into()),
            created_at: "2025-01-01T00:00:00Z".into(),
            updated_at: "2025-01-02T00:00:00Z".into(),
        };
        let json = serde_json::to_value(&incident).expect("serialize");
        assert_eq!(json["createdAt"], "2025-01-01T00:00:00Z");
        assert_eq!(json["updatedAt"], "2025-01-02T00:00:00Z");

        let parsed: Incident = serde_json::from_value(json).expect("parse");
        assert_eq!(parsed, incident);
    }

    #[test]
    fn page_response_parses_server_envelope() {
        let body = serde_json::json!({
            "content": [],
            "totalElements": 42,
            "totalPages": 5,
            "number": 2,
            "size": 10,
            "first": false,
            "last": false,
            "empty": true
        });
        let page: PageResponse<Incident> = serde_json::from_value(body).expect("parse");
        assert_eq!(page.total_elements, 42);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.number, 2);
        assert!(page.empty);
    }
}

use crate::api::{self, ApiError};
use crate::format::{fmt_date, fmt_datetime};
use crate::toast::{use_toast, ToastKind, ToastView};
use incident_model::{
    blank_to_none, validate_update, FieldError, Incident, Severity, Status, UpdateIncident,
    SERVICES,
};
use leptos::*;

/// Detail page for one incident: view mode plus an inline edit mode. A
/// failed save keeps the in-progress form; Cancel restores it from the
/// loaded record.
#[component]
pub fn DetailPage(id: String, #[prop(into)] on_back: Callback<()>) -> impl IntoView {
    let id = store_value(id);

    let incident = create_rw_signal(None::<Incident>);
    let loading = create_rw_signal(true);
    let error = create_rw_signal(None::<String>);
    let editing = create_rw_signal(false);
    let saving = create_rw_signal(false);
    let errors = create_rw_signal(Vec::<FieldError>::new());
    let (toast, show_toast) = use_toast();

    let form_title = create_rw_signal(String::new());
    let form_service = create_rw_signal(String::new());
    let form_severity = create_rw_signal(Severity::Sev1);
    let form_status = create_rw_signal(Status::Open);
    let form_owner = create_rw_signal(String::new());
    let form_summary = create_rw_signal(String::new());

    let fill_form = move |record: &Incident| {
        form_title.set(record.title.clone());
        form_service.set(record.service.clone());
        form_severity.set(record.severity);
        form_status.set(record.status);
        form_owner.set(record.owner.clone().unwrap_or_default());
        form_summary.set(record.summary.clone().unwrap_or_default());
    };

    let load = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match api::fetch_incident(&id.get_value()).await {
                Ok(record) => {
                    fill_form(&record);
                    incident.set(Some(record));
                }
                Err(ApiError::NotFound) => error.set(Some("Incident not found".into())),
                Err(err) => {
                    logging::error!("detail load failed: {err}");
                    error.set(Some("Failed to load incident details".into()));
                }
            }
            loading.set(false);
        });
    };
    load();

    let save = move |_| {
        let patch = UpdateIncident {
            title: Some(form_title.get_untracked().trim().to_string()),
            service: Some(form_service.get_untracked()),
            severity: Some(form_severity.get_untracked()),
            status: Some(form_status.get_untracked()),
            owner: blank_to_none(&form_owner.get_untracked()),
            summary: blank_to_none(&form_summary.get_untracked()),
        };

        let found = validate_update(&patch);
        if !found.is_empty() {
            errors.set(found);
            return;
        }
        errors.set(Vec::new());
        saving.set(true);

        spawn_local(async move {
            match api::update_incident(&id.get_value(), &patch).await {
                Ok(updated) => {
                    fill_form(&updated);
                    incident.set(Some(updated));
                    editing.set(false);
                    show_toast("Incident updated successfully!", ToastKind::Success);
                }
                // The form keeps whatever the user typed.
                Err(err) => {
                    logging::error!("update failed: {err}");
                    show_toast("Failed to update incident.", ToastKind::Error);
                }
            }
            saving.set(false);
        });
    };

    let cancel = move |_| {
        if let Some(record) = incident.get_untracked() {
            fill_form(&record);
        }
        errors.set(Vec::new());
        editing.set(false);
    };

    let field_error = move |field: &'static str| {
        errors.with(|errs| {
            errs.iter()
                .find(|e| e.field == field)
                .map(|e| e.message.clone())
        })
    };

    let edit_view = move || {
        view! {
          <div>
            <div class="form-group">
              <label for="edit-title">"Title"</label>
              <input
                id="edit-title"
                class="form-control"
                type="text"
                prop:value=move || form_title.get()
                on:input=move |ev| form_title.set(event_target_value(&ev))
              />
              <Show when=move || field_error("title").is_some() fallback=|| ()>
                <p class="form-error">{move || field_error("title").unwrap_or_default()}</p>
              </Show>
            </div>

            <div class="form-row">
              <div class="form-group">
                <label for="edit-service">"Service"</label>
                <select
                  id="edit-service"
                  class="form-control"
                  prop:value=move || form_service.get()
                  on:change=move |ev| form_service.set(event_target_value(&ev))
                >
                  {SERVICES
                      .iter()
                      .map(|s| view! { <option value=*s>{*s}</option> })
                      .collect_view()}
                </select>
                <Show when=move || field_error("service").is_some() fallback=|| ()>
                  <p class="form-error">{move || field_error("service").unwrap_or_default()}</p>
                </Show>
              </div>

              <div class="form-group">
                <label for="edit-severity">"Severity"</label>
                <select
                  id="edit-severity"
                  class="form-control"
                  prop:value=move || form_severity.get().as_str()
                  on:change=move |ev| {
                    if let Some(parsed) = Severity::parse(&event_target_value(&ev)) {
                      form_severity.set(parsed);
                    }
                  }
                >
                  {Severity::ALL
                      .iter()
                      .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                      .collect_view()}
                </select>
              </div>
            </div>

            <div class="form-row">
              <div class="form-group">
                <label for="edit-status">"Status"</label>
                <select
                  id="edit-status"
                  class="form-control"
                  prop:value=move || form_status.get().as_str()
                  on:change=move |ev| {
                    if let Some(parsed) = Status::parse(&event_target_value(&ev)) {
                      form_status.set(parsed);
                    }
                  }
                >
                  {Status::ALL
                      .iter()
                      .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                      .collect_view()}
                </select>
              </div>

              <div class="form-group">
                <label for="edit-owner">"Assigned To"</label>
                <input
                  id="edit-owner"
                  class="form-control"
                  type="text"
                  placeholder="Optional"
                  prop:value=move || form_owner.get()
                  on:input=move |ev| form_owner.set(event_target_value(&ev))
                />
              </div>
            </div>

            <div class="form-group">
              <label for="edit-summary">"Summary"</label>
              <textarea
                id="edit-summary"
                class="form-control"
                rows=4
                prop:value=move || form_summary.get()
                on:input=move |ev| form_summary.set(event_target_value(&ev))
              />
            </div>

            <div class="actions-row">
              <button class="btn btn-success" disabled=move || saving.get() on:click=save>
                {move || if saving.get() { "Saving..." } else { "Save Changes" }}
              </button>
              <button class="btn btn-secondary" disabled=move || saving.get() on:click=cancel>
                "Cancel"
              </button>
            </div>
          </div>
        }
    };

    let detail_view = move |record: Incident| {
        let has_summary = record.summary.is_some();
        let summary_text = record.summary.clone().unwrap_or_default();
        view! {
          <div>
            <div class="detail-header">
              <h1 class="detail-title">{record.title.clone()}</h1>
            </div>

            <div class="detail-meta">
              <div class="meta-item">
                <span class="meta-label">"Service"</span>
                <span class="meta-value">{record.service.clone()}</span>
              </div>
              <div class="meta-item">
                <span class="meta-label">"Severity"</span>
                <span class="meta-value">
                  <span class=format!("badge severity-{}", record.severity.as_str().to_lowercase())>
                    {record.severity.as_str()}
                  </span>
                </span>
              </div>
              <div class="meta-item">
                <span class="meta-label">"Status"</span>
                <span class="meta-value">
                  <span class=format!("badge status-{}", record.status.as_str().to_lowercase())>
                    {record.status.label()}
                  </span>
                </span>
              </div>
              <div class="meta-item">
                <span class="meta-label">"Assigned To"</span>
                <span class="meta-value">{record.owner.clone().unwrap_or_else(|| "—".into())}</span>
              </div>
              <div class="meta-item">
                <span class="meta-label">"Occurred At"</span>
                <span class="meta-value">{fmt_date(&record.created_at)}</span>
              </div>
              <div class="meta-item">
                <span class="meta-label">"Last Updated"</span>
                <span class="meta-value">{fmt_datetime(&record.updated_at)}</span>
              </div>
            </div>

            <Show when=move || has_summary fallback=|| ()>
              <div class="detail-summary">
                <h3>"Summary"</h3>
                <p>{summary_text.clone()}</p>
              </div>
            </Show>
          </div>
        }
    };

    view! {
      <div>
        <a class="back-link" on:click=move |_| on_back.call(())>"← Back to Incidents"</a>

        <div class="card">
          <div class="card-header">
            <h2>"Incident Tracker"</h2>
            <Show when=move || !editing.get() && incident.get().is_some() fallback=|| ()>
              <button class="btn btn-primary btn-sm" on:click=move |_| editing.set(true)>
                "Edit Incident"
              </button>
            </Show>
          </div>

          <div class="card-body">
            {move || {
                if loading.get() {
                    view! {
                      <div class="loading-container">
                        <div class="spinner"></div>
                        <p>"Loading incident details..."</p>
                      </div>
                    }
                    .into_view()
                } else if let Some(message) = error.get() {
                    view! {
                      <div class="error-state">
                        <p>{message}</p>
                        <button class="btn btn-primary btn-sm" on:click=move |_| on_back.call(())>
                          "Back to Incidents"
                        </button>
                      </div>
                    }
                    .into_view()
                } else if editing.get() {
                    edit_view().into_view()
                } else if let Some(record) = incident.get() {
                    detail_view(record).into_view()
                } else {
                    ().into_view()
                }
            }}
          </div>
        </div>

        <ToastView toast=toast />
      </div>
    }
}

use crate::api;
use incident_model::{
    blank_to_none, validate_create, CreateIncident, FieldError, Incident, Severity, Status,
    SERVICES,
};
use leptos::*;

/// Creation form. Validation runs client-side before submission; invalid
/// input never produces a request.
#[component]
pub fn CreateModal(
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_created: Callback<Incident>,
) -> impl IntoView {
    let title = create_rw_signal(String::new());
    let service = create_rw_signal(String::new());
    let severity = create_rw_signal(Severity::Sev1);
    let status = create_rw_signal(Status::Open);
    let owner = create_rw_signal(String::new());
    let summary = create_rw_signal(String::new());

    let errors = create_rw_signal(Vec::<FieldError>::new());
    let general_error = create_rw_signal(None::<String>);
    let submitting = create_rw_signal(false);

    let field_error = move |field: &'static str| {
        errors.with(|errs| {
            errs.iter()
                .find(|e| e.field == field)
                .map(|e| e.message.clone())
        })
    };
    let clear_error =
        move |field: &'static str| errors.update(|errs| errs.retain(|e| e.field != field));

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let payload = CreateIncident {
            title: title.get_untracked().trim().to_string(),
            service: service.get_untracked(),
            severity: severity.get_untracked(),
            status: status.get_untracked(),
            owner: blank_to_none(&owner.get_untracked()),
            summary: blank_to_none(&summary.get_untracked()),
        };

        let found = validate_create(&payload);
        if !found.is_empty() {
            errors.set(found);
            return;
        }
        errors.set(Vec::new());
        general_error.set(None);
        submitting.set(true);

        spawn_local(async move {
            match api::create_incident(&payload).await {
                Ok(incident) => on_created.call(incident),
                Err(err) => {
                    logging::error!("create failed: {err}");
                    general_error.set(Some("Failed to create incident. Please try again.".into()));
                    submitting.set(false);
                }
            }
        });
    };

    view! {
      <div class="modal-overlay" on:click=move |_| on_close.call(())>
        <div class="modal-content" on:click=|ev| ev.stop_propagation()>
          <div class="modal-header">
            <h2>"Create New Incident"</h2>
          </div>
          <form on:submit=submit>
            <div class="modal-body">
              <Show when=move || general_error.get().is_some() fallback=|| ()>
                <p class="form-error">{move || general_error.get().unwrap_or_default()}</p>
              </Show>

              <div class="form-group">
                <label for="title">"Title"</label>
                <input
                  id="title"
                  class="form-control"
                  type="text"
                  placeholder="Issue Title..."
                  prop:value=move || title.get()
                  on:input=move |ev| {
                    title.set(event_target_value(&ev));
                    clear_error("title");
                  }
                />
                <Show when=move || field_error("title").is_some() fallback=|| ()>
                  <p class="form-error">{move || field_error("title").unwrap_or_default()}</p>
                </Show>
              </div>

              <div class="form-group">
                <label for="service">"Service"</label>
                <select
                  id="service"
                  class="form-control"
                  prop:value=move || service.get()
                  on:change=move |ev| {
                    service.set(event_target_value(&ev));
                    clear_error("service");
                  }
                >
                  <option value="">"Select Service"</option>
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
                <label>"Severity"</label>
                <div class="radio-group">
                  {Severity::ALL
                      .iter()
                      .map(|sev| {
                        let sev = *sev;
                        view! {
                          <label>
                            <input
                              type="radio"
                              name="severity"
                              value=sev.as_str()
                              prop:checked=move || severity.get() == sev
                              on:change=move |_| severity.set(sev)
                            />
                            {sev.as_str()}
                          </label>
                        }
                      })
                      .collect_view()}
                </div>
              </div>

              <div class="form-group">
                <label for="status">"Status"</label>
                <select
                  id="status"
                  class="form-control"
                  prop:value=move || status.get().as_str()
                  on:change=move |ev| {
                    if let Some(parsed) = Status::parse(&event_target_value(&ev)) {
                      status.set(parsed);
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
                <label for="owner">"Assigned To"</label>
                <input
                  id="owner"
                  class="form-control"
                  type="text"
                  placeholder="Optional"
                  prop:value=move || owner.get()
                  on:input=move |ev| owner.set(event_target_value(&ev))
                />
              </div>

              <div class="form-group">
                <label for="summary">"Summary"</label>
                <textarea
                  id="summary"
                  class="form-control"
                  rows=3
                  placeholder="Describe the incident..."
                  prop:value=move || summary.get()
                  on:input=move |ev| summary.set(event_target_value(&ev))
                />
              </div>
            </div>

            <div class="modal-footer">
              <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                {move || if submitting.get() { "Creating..." } else { "Create Incident" }}
              </button>
              <button
                type="button"
                class="btn btn-secondary"
                disabled=move || submitting.get()
                on:click=move |_| on_close.call(())
              >
                "Cancel"
              </button>
            </div>
          </form>
        </div>
      </div>
    }
}

use crate::api;
use crate::create::CreateModal;
use crate::format::fmt_date;
use crate::pagination::Pagination;
use crate::toast::{use_toast, ToastKind, ToastView};
use incident_model::{Incident, Severity, Status, SERVICES};
use incident_state::{from_query, to_query, Debounce, Filters, RequestSequence, SortDir};
use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::*;
use std::time::Duration;
use wasm_bindgen::JsValue;

const SEARCH_DEBOUNCE_MS: u64 = 400;

/// The incident list: filter bar, sortable table, pagination, creation
/// modal. Filter state is the single source of truth; it is read from the
/// URL exactly once here, and every later change flows state to URL.
#[component]
pub fn ListPage(#[prop(into)] on_open: Callback<String>) -> impl IntoView {
    let initial = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .map(|search| from_query(&search))
        .unwrap_or_default();

    let search_input = create_rw_signal(initial.search.clone());
    let filters = create_rw_signal(initial);
    let data = create_rw_signal(None::<incident_model::PageResponse<Incident>>);
    let loading = create_rw_signal(true);
    let error = create_rw_signal(None::<String>);
    let show_create = create_rw_signal(false);
    let (toast, show_toast) = use_toast();

    let sequence = store_value(RequestSequence::default());
    let debounce = store_value(Debounce::new(SEARCH_DEBOUNCE_MS));
    let debounce_timer = store_value(None::<TimeoutHandle>);

    let clear_debounce_timer = move || {
        if let Some(handle) = debounce_timer.try_update_value(|t| t.take()).flatten() {
            handle.clear();
        }
    };
    on_cleanup(clear_debounce_timer);

    let load = move || {
        let snapshot = filters.get_untracked();
        let ticket = sequence.try_update_value(|seq| seq.begin()).unwrap_or(0);
        loading.set(true);
        spawn_local(async move {
            let result = api::fetch_incidents(&snapshot).await;
            // Only the most recently issued request may apply its result.
            let current = sequence
                .try_with_value(|seq| seq.is_current(ticket))
                .unwrap_or(false);
            if !current {
                return;
            }
            match result {
                Ok(page) => {
                    data.set(Some(page));
                    error.set(None);
                }
                Err(err) => {
                    data.set(None);
                    error.set(Some(err.to_string()));
                }
            }
            loading.set(false);
        });
    };

    // Every state change is pushed to the URL and refetched.
    create_effect(move |_| {
        let current = filters.get();
        sync_url(&current);
        load();
    });

    let on_search_input = move |ev| {
        let value = event_target_value(&ev);
        search_input.set(value.clone());
        debounce.update_value(|d| d.input(now_ms(), &value));
        clear_debounce_timer();
        let handle = set_timeout_with_handle(
            move || {
                let committed = debounce.try_update_value(|d| d.poll(now_ms())).flatten();
                if let Some(committed) = committed {
                    filters.update(|f| f.set_search(committed));
                }
            },
            Duration::from_millis(SEARCH_DEBOUNCE_MS),
        )
        .ok();
        debounce_timer.set_value(handle);
    };

    let reset_filters = move |_| {
        debounce.update_value(|d| d.cancel());
        clear_debounce_timer();
        search_input.set(String::new());
        filters.set(Filters::default());
    };

    let on_created = move |_incident: Incident| {
        show_create.set(false);
        show_toast("Incident created successfully!", ToastKind::Success);
        filters.update(|f| f.set_page(0));
    };

    let sort_header = move |column: &'static str, label: &'static str| {
        let indicator = move || {
            filters.with(|f| {
                if f.sort_by != column {
                    "↕"
                } else if f.sort_dir == SortDir::Asc {
                    "↑"
                } else {
                    "↓"
                }
            })
        };
        view! {
          <th
            class=("active-sort", move || filters.with(|f| f.sort_by == column))
            on:click=move |_| filters.update(|f| f.toggle_sort(column))
          >
            {label}
            <span class="sort-indicator">{indicator}</span>
          </th>
        }
    };

    view! {
      <div>
        <div class="card">
          <div class="card-header">
            <h2>"Incident Tracker"</h2>
            <button class="btn btn-primary" on:click=move |_| show_create.set(true)>
              "+ New Incident"
            </button>
          </div>

          <div class="filters-bar">
            <div class="filter-group">
              <label>"Service"</label>
              <select
                class="form-control"
                prop:value=move || filters.with(|f| f.service.clone())
                on:change=move |ev| {
                  let value = event_target_value(&ev);
                  filters.update(|f| f.set_service(value));
                }
              >
                <option value="">"All Services"</option>
                {SERVICES
                    .iter()
                    .map(|s| view! { <option value=*s>{*s}</option> })
                    .collect_view()}
              </select>
            </div>

            <div class="filter-group">
              <label>"Severity"</label>
              <div class="severity-checkboxes">
                {Severity::ALL
                    .iter()
                    .map(|sev| {
                      let sev = *sev;
                      view! {
                        <label>
                          <input
                            type="checkbox"
                            prop:checked=move || filters.with(|f| f.severity == sev.as_str())
                            on:change=move |_| {
                              filters.update(|f| {
                                let next = if f.severity == sev.as_str() { "" } else { sev.as_str() };
                                f.set_severity(next);
                              });
                            }
                          />
                          {sev.as_str()}
                        </label>
                      }
                    })
                    .collect_view()}
              </div>
            </div>

            <div class="filter-group">
              <label>"Status"</label>
              <select
                class="form-control"
                prop:value=move || filters.with(|f| f.status.clone())
                on:change=move |ev| {
                  let value = event_target_value(&ev);
                  filters.update(|f| f.set_status(value));
                }
              >
                <option value="">"All Statuses"</option>
                {Status::ALL
                    .iter()
                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                    .collect_view()}
              </select>
            </div>

            <div class="filter-group grow">
              <label>"Search"</label>
              <input
                class="form-control search-input"
                type="text"
                placeholder="Search by title or owner..."
                prop:value=move || search_input.get()
                on:input=on_search_input
              />
            </div>

            <div class="filter-group">
              <button class="btn btn-secondary btn-sm" on:click=reset_filters>
                "Reset Filters"
              </button>
            </div>
          </div>

          <div class="table-container">
            {move || {
                if loading.get() {
                    view! {
                      <div class="loading-container">
                        <div class="spinner"></div>
                        <p>"Loading incidents..."</p>
                      </div>
                    }
                    .into_view()
                } else if let Some(message) = error.get() {
                    view! {
                      <div class="error-state">
                        <p>{message}</p>
                        <button class="btn btn-primary btn-sm" on:click=move |_| load()>
                          "Retry"
                        </button>
                      </div>
                    }
                    .into_view()
                } else if data.with(|d| d.as_ref().is_some_and(|p| p.content.is_empty())) {
                    view! {
                      <div class="empty-state">
                        <p>"No incidents found."</p>
                        <p class="hint">"Try adjusting your filters or create a new incident."</p>
                      </div>
                    }
                    .into_view()
                } else {
                    view! {
                      <table class="incident-table">
                        <thead>
                          <tr>
                            {sort_header("title", "Title")}
                            {sort_header("service", "Service")}
                            {sort_header("severity", "Severity")}
                            {sort_header("status", "Status")}
                            {sort_header("createdAt", "Created At")}
                            {sort_header("owner", "Owner")}
                          </tr>
                        </thead>
                        <tbody>
                          <For
                            each=move || data.get().map(|p| p.content).unwrap_or_default()
                            key=|incident| incident.id.clone()
                            children=move |incident| {
                              let id = incident.id.clone();
                              view! {
                                <tr on:click=move |_| on_open.call(id.clone())>
                                  <td class="title-cell">{incident.title.clone()}</td>
                                  <td>{incident.service.clone()}</td>
                                  <td>
                                    <span class=format!(
                                        "badge severity-{}",
                                        incident.severity.as_str().to_lowercase()
                                    )>{incident.severity.as_str()}</span>
                                  </td>
                                  <td>
                                    <span class=format!(
                                        "badge status-{}",
                                        incident.status.as_str().to_lowercase()
                                    )>{incident.status.label()}</span>
                                  </td>
                                  <td>{fmt_date(&incident.created_at)}</td>
                                  <td class="text-truncate">
                                    {incident.owner.clone().unwrap_or_else(|| "—".into())}
                                  </td>
                                </tr>
                              }
                            }
                          />
                        </tbody>
                      </table>
                    }
                    .into_view()
                }
            }}
          </div>

          {move || {
              data.get().filter(|page| page.total_pages > 0).map(|page| view! {
                <div class="pagination-row">
                  <div class="page-size">
                    <select
                      class="form-control"
                      prop:value=move || filters.with(|f| f.size.to_string())
                      on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse() {
                          filters.update(|f| f.set_size(size));
                        }
                      }
                    >
                      <option value="5">"5"</option>
                      <option value="10">"10"</option>
                      <option value="20">"20"</option>
                      <option value="50">"50"</option>
                    </select>
                    <span class="hint">"per page"</span>
                  </div>
                  <Pagination
                    current=page.number
                    total_pages=page.total_pages
                    total_elements=page.total_elements
                    size=page.size
                    on_page=move |p| filters.update(|f| f.set_page(p))
                  />
                </div>
              })
          }}
        </div>

        <Show when=move || show_create.get() fallback=|| ()>
          <CreateModal
            on_close=move |_| show_create.set(false)
            on_created=on_created
          />
        </Show>

        <ToastView toast=toast />
      </div>
    }
}

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// History replace, so rapid filter changes never pile up history entries.
fn sync_url(filters: &Filters) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let path = window
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_string());
    let query = to_query(filters);
    let url = if query.is_empty() {
        path
    } else {
        format!("{path}?{query}")
    };
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&url));
    }
}

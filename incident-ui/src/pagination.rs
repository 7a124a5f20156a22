use incident_state::{page_window, PageItem};
use leptos::*;

/// First/prev/window/next/last controls. Props are plain values; the parent
/// re-renders this from the current page response, so nothing here needs to
/// be reactive on its own.
#[component]
pub fn Pagination(
    current: u64,
    total_pages: u64,
    total_elements: u64,
    size: u64,
    #[prop(into)] on_page: Callback<u64>,
) -> impl IntoView {
    if total_pages <= 1 {
        return ().into_view();
    }

    let start_item = current * size + 1;
    let end_item = ((current + 1) * size).min(total_elements);
    let at_start = current == 0;
    let at_end = current + 1 >= total_pages;

    let items = page_window(current, total_pages)
        .into_iter()
        .map(|item| match item {
            PageItem::Ellipsis => view! { <span class="page-btn ellipsis">"…"</span> }.into_view(),
            PageItem::Page(page) => view! {
              <button
                class="page-btn"
                class=("active", move || page == current)
                on:click=move |_| on_page.call(page)
              >
                {page + 1}
              </button>
            }
            .into_view(),
        })
        .collect_view();

    view! {
      <div class="pagination">
        <span class="pagination-info">
          {format!(
              "Page {} of {total_pages} · {start_item}–{end_item} of {total_elements}",
              current + 1
          )}
        </span>
        <div class="pagination-controls">
          <button
            class="page-btn"
            disabled=at_start
            title="First page"
            on:click=move |_| on_page.call(0)
          >
            "«"
          </button>
          <button
            class="page-btn"
            disabled=at_start
            title="Previous page"
            on:click=move |_| on_page.call(current.saturating_sub(1))
          >
            "‹"
          </button>
          {items}
          <button
            class="page-btn"
            disabled=at_end
            title="Next page"
            on:click=move |_| on_page.call(current + 1)
          >
            "›"
          </button>
          <button
            class="page-btn"
            disabled=at_end
            title="Last page"
            on:click=move |_| on_page.call(total_pages - 1)
          >
            "»"
          </button>
        </div>
      </div>
    }
    .into_view()
}

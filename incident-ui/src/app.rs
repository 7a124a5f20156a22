use crate::detail::DetailPage;
use crate::list::ListPage;
use leptos::*;

#[component]
pub fn App() -> impl IntoView {
    let selected = create_rw_signal(None::<String>);

    view! {
      <main class="container">
        {move || match selected.get() {
            Some(id) => view! {
              <DetailPage id=id on_back=move |_| selected.set(None) />
            }
            .into_view(),
            None => view! {
              <ListPage on_open=move |id| selected.set(Some(id)) />
            }
            .into_view(),
        }}
      </main>
    }
}

mod api;
mod app;
mod create;
mod detail;
mod format;
mod list;
mod pagination;
mod toast;

use app::App;

fn main() {
    leptos::mount_to_body(App);
}

use incident_server::store::IncidentStore;
use incident_server::{api, seed};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("incident_server=info,tower_http=info")),
        )
        .init();

    let db_path = std::env::var("INCIDENTS_DB").unwrap_or_else(|_| "incidents.db".into());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let seed_on_empty = std::env::var("SEED_ON_EMPTY")
        .map(|v| v != "0")
        .unwrap_or(true);

    let store = IncidentStore::open(&db_path).expect("open incident store");
    if seed_on_empty {
        match seed::seed_if_empty(&store) {
            Ok(0) => {}
            Ok(n) => tracing::info!("seeded {n} sample incidents"),
            Err(err) => tracing::warn!("seeding failed: {err}"),
        }
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = api::router(store)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("bind listener");
    tracing::info!("incident-server listening on {bind_addr}");
    axum::serve(listener, app).await.expect("serve");
}

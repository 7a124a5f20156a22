//! Deterministic sample data for an empty database.

use crate::store::IncidentStore;
use incident_model::{Incident, Severity, Status, SERVICES};
use rand::{rngs::StdRng, Rng, SeedableRng};

const SEED_COUNT: usize = 200;
const RNG_SEED: u64 = 42;

const OWNERS: [&str; 10] = [
    "alice@team.com",
    "bob@team.com",
    "charlie@team.com",
    "dev@team.com",
    "ops@team.com",
    "jason@team.com",
    "amy@team.com",
    "sarah@team.com",
    "mike@team.com",
    "david@team.com",
];

const TITLE_PREFIXES: [&str; 30] = [
    "Login Failure",
    "Payment Delay",
    "API Timeout",
    "UI Bug on Dashboard",
    "Database Issue",
    "Service Degradation",
    "Memory Leak",
    "CPU Spike",
    "Deployment Failure",
    "SSL Certificate Expiry",
    "DNS Resolution Failure",
    "Rate Limiting Triggered",
    "Cache Invalidation Bug",
    "Data Sync Error",
    "Connection Pool Exhaustion",
    "Disk Space Alert",
    "Health Check Failure",
    "Latency Spike",
    "Error Rate Increase",
    "Webhook Delivery Failure",
    "Queue Backlog",
    "Configuration Drift",
    "Permission Denied Error",
    "Session Timeout Issue",
    "CORS Policy Violation",
    "Schema Migration Failure",
    "Load Balancer Misconfiguration",
    "Circuit Breaker Tripped",
    "Deadlock Detected",
    "Retry Storm",
];

const SUMMARIES: [&str; 20] = [
    "API requests to the backend service were timing out, causing disruptions for users.",
    "Users reported intermittent failures when attempting to log in via SSO.",
    "Payment processing experienced significant delays during peak hours.",
    "Dashboard widgets failed to render correctly on mobile devices.",
    "Database connection pool was exhausted leading to query timeouts.",
    "Service response times degraded to unacceptable levels after deployment.",
    "Memory usage on production pods exceeded 90% threshold.",
    "CPU utilization spiked to 100% on multiple nodes simultaneously.",
    "Automated deployment pipeline failed during the rollout phase.",
    "SSL certificate renewal was missed causing secure connections to fail.",
    "DNS records were not properly propagated after infrastructure changes.",
    "Rate limiting was incorrectly applied to authenticated API requests.",
    "Cache entries were not being properly invalidated after data updates.",
    "Data replication lag between primary and replica databases increased.",
    "Connection pool reached maximum capacity during high traffic period.",
    "Server disk space reached critical threshold on production environment.",
    "Health check endpoint started returning 5xx errors intermittently.",
    "P99 latency increased from 200ms to 2000ms on critical API endpoints.",
    "Error rate exceeded the 1% threshold across multiple services.",
    "Webhook deliveries to partner systems were failing silently.",
];

/// Inserts [`SEED_COUNT`] sample incidents when the table is empty, spread
/// over the recent past so every sort order has visible variety. The RNG is
/// fixed-seeded, so two empty databases seed identically. Returns how many
/// rows were inserted.
pub fn seed_if_empty(store: &IncidentStore) -> Result<usize, String> {
    let existing = store.count()?;
    if existing > 0 {
        tracing::info!("database already holds {existing} incidents, skipping seed");
        return Ok(0);
    }

    let mut rng = StdRng::seed_from_u64(RNG_SEED);
    let now = chrono::Utc::now();

    for i in 0..SEED_COUNT {
        let title = format!(
            "{} #{}",
            TITLE_PREFIXES[rng.gen_range(0..TITLE_PREFIXES.len())],
            i + 1
        );
        let service = SERVICES[rng.gen_range(0..SERVICES.len())].to_string();
        let severity = Severity::ALL[rng.gen_range(0..Severity::ALL.len())];
        let status = Status::ALL[rng.gen_range(0..Status::ALL.len())];
        let owner = if rng.gen::<f64>() > 0.15 {
            Some(OWNERS[rng.gen_range(0..OWNERS.len())].to_string())
        } else {
            None
        };
        let summary = if rng.gen::<f64>() > 0.1 {
            Some(SUMMARIES[rng.gen_range(0..SUMMARIES.len())].to_string())
        } else {
            None
        };

        let created = now - chrono::Duration::hours((SEED_COUNT - i) as i64 * 6);
        let updated = (created + chrono::Duration::minutes(rng.gen_range(0..720))).min(now);

        store.insert(&Incident {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            service,
            severity,
            status,
            owner,
            summary,
            created_at: created.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            updated_at: updated.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        })?;
    }

    Ok(SEED_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_path(name: &str) -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        format!("/tmp/incident-tracker-tests/{name}-{nanos}.db")
    }

    #[test]
    fn seeds_once() {
        let store = IncidentStore::open(&db_path("seed-once")).expect("open");
        assert_eq!(seed_if_empty(&store).expect("seed"), SEED_COUNT);
        assert_eq!(store.count().expect("count"), SEED_COUNT as u64);

        // Second run is a no-op.
        assert_eq!(seed_if_empty(&store).expect("seed"), 0);
        assert_eq!(store.count().expect("count"), SEED_COUNT as u64);
    }

    #[test]
    fn seeded_rows_are_listable() {
        let store = IncidentStore::open(&db_path("seed-list")).expect("open");
        seed_if_empty(&store).expect("seed");

        let page = store
            .list(&incident_state::Filters::default())
            .expect("list");
        assert_eq!(page.total_elements, SEED_COUNT as u64);
        assert_eq!(page.total_pages, 20);
        assert_eq!(page.content.len(), 10);
        // Default order is newest first.
        assert!(page.content[0].created_at >= page.content[9].created_at);
    }
}

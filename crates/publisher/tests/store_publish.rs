//! Publishing through the store sink against a live PostgreSQL.
//!
//! Runs only when `DATABASE_URL` and `DATABASE_NAME` point at a reachable
//! server; otherwise the test returns early.

use metricode_publisher::sink::store::RESULTS_TABLE;
use metricode_publisher::{CollectorConfig, MetricsCollector, Outcome, StoreSink, StoreSinkConfig};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn store_env() -> Option<(String, String)> {
    let url = std::env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty())?;
    let database = std::env::var("DATABASE_NAME").ok().filter(|v| !v.trim().is_empty())?;
    Some((url, database))
}

fn unique_project() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("metricode-store-test-{}-{}", std::process::id(), nanos)
}

async fn stored_documents(url: &str, database: &str, project_id: &str) -> Vec<serde_json::Value> {
    let options = url.parse::<PgConnectOptions>().unwrap().database(database);
    let mut conn = PgConnection::connect_with(&options).await.unwrap();
    let rows = sqlx::query_scalar::<_, serde_json::Value>(&format!(
        "SELECT document FROM {} WHERE project_id = $1 ORDER BY id",
        RESULTS_TABLE
    ))
    .bind(project_id)
    .fetch_all(&mut conn)
    .await
    .unwrap();
    conn.close().await.unwrap();
    rows
}

// One test only: concurrent `CREATE TABLE IF NOT EXISTS` can race in PostgreSQL.
#[tokio::test]
async fn each_publish_stores_one_row_matching_the_json_document() {
    let Some((url, database)) = store_env() else {
        eprintln!("DATABASE_URL/DATABASE_NAME not set, skipping");
        return;
    };
    let project_id = unique_project();
    let sink = StoreSink::new(
        StoreSinkConfig::new(&url, &database).with_timeout(Duration::from_secs(10)),
    )
    .unwrap();

    let mut collector =
        MetricsCollector::new(CollectorConfig::new(project_id.as_str()).with_runtime("rust"))
            .unwrap();
    collector.add_field("latency_ms", 12.5, "ms");
    collector.add_field("passed", true, "");
    collector
        .add_time_series_field("cpu_usage", vec![25.0, 35.5], vec![1_000, 1_500], "%")
        .unwrap();

    assert_eq!(collector.publish(&sink).await, Outcome::Success);
    let first = collector.document().to_json();

    let stored = stored_documents(&url, &database, &project_id).await;
    assert_eq!(stored, vec![first.clone()]);

    collector.add_field("runs", 2, "");
    assert!(collector.publish(&sink).await.is_success());

    let stored = stored_documents(&url, &database, &project_id).await;
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0], first);
    assert_eq!(stored[1], collector.document().to_json());
}

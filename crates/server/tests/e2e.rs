use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes;
use server::state::ServerState;

struct TestApp {
    base_url: String,
}

/// Boot the real router on a loopback port over a fresh in-memory database.
/// One connection only: each sqlite `:memory:` connection is its own db.
async fn start_server() -> anyhow::Result<TestApp> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        acquire_timeout: Duration::from_secs(5),
        sqlx_logging: false,
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;

    let state = ServerState { db };
    let app: Router = routes::build_router(CorsLayer::very_permissive(), state);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn post_sample_client(app: &TestApp, name: &str) -> anyhow::Result<i64> {
    let res = client()
        .post(format!("{}/api/clients", app.base_url))
        .json(&json!({
            "name": name,
            "email": format!("{name}@example.com"),
            "company": "Example Co",
            "services": ["web design", "hosting"],
            "total_amount": 1000.0,
            "advance_paid": 400.0
        }))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    Ok(body["id"].as_i64().expect("id"))
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/api/health", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["clients"], 0);
    assert!(body["env"].is_string());
    Ok(())
}

#[tokio::test]
async fn e2e_client_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let id = post_sample_client(&app, "lifecycle").await?;

    // Listing: services as array, payment fields flattened in
    let res = c.get(format!("{}/api/clients", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    let row = &body.as_array().expect("array")[0];
    assert_eq!(row["id"].as_i64(), Some(id));
    assert_eq!(row["services"].as_array().map(|a| a.len()), Some(2));
    assert_eq!(row["total_amount"], 1000.0);
    assert_eq!(row["remaining_balance"], 600.0);
    assert_eq!(row["pending_tasks"], 0);

    // Patch: rename and fully replace services
    let res = c
        .patch(format!("{}/api/clients/{}", app.base_url, id))
        .json(&json!({"name": "lifecycle 2", "services": ["seo"]}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);

    let res = c.get(format!("{}/api/clients", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    let row = &body[0];
    assert_eq!(row["name"], "lifecycle 2");
    assert_eq!(row["services"], json!(["seo"]));

    // Delete: 204, listing goes empty
    let res = c.delete(format!("{}/api/clients/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::NO_CONTENT);
    let res = c.get(format!("{}/api/clients", app.base_url)).send().await?;
    assert_eq!(res.json::<serde_json::Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_task_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let cid = post_sample_client(&app, "taskowner").await?;

    let res = c
        .post(format!("{}/api/tasks", app.base_url))
        .json(&json!({
            "client_id": cid,
            "title": "send proposal",
            "assigned_to": "sam",
            "due_date": "2024-10-01"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let task_id = res.json::<serde_json::Value>().await?["id"].as_i64().expect("id");

    // Filtered listing carries the client name
    let res = c
        .get(format!("{}/api/tasks?clientId={}", app.base_url, cid))
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body[0]["title"], "send proposal");
    assert_eq!(body[0]["client_name"], "taskowner");
    assert_eq!(body[0]["status"], "pending");

    // Pending count shows up in the client listing
    let res = c.get(format!("{}/api/clients", app.base_url)).send().await?;
    assert_eq!(res.json::<serde_json::Value>().await?[0]["pending_tasks"], 1);

    let res = c
        .patch(format!("{}/api/tasks/{}", app.base_url, task_id))
        .json(&json!({"status": "done"}))
        .send()
        .await?;
    assert_eq!(res.json::<serde_json::Value>().await?["success"], true);

    let res = c.delete(format!("{}/api/tasks/{}", app.base_url, task_id)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn e2e_payment_update_and_ledger() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let cid = post_sample_client(&app, "payer").await?;

    let res = c
        .patch(format!("{}/api/payments/{}", app.base_url, cid))
        .json(&json!({"advance_paid": 700.0, "amount_added": 300.0}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?["success"], true);

    let res = c.get(format!("{}/api/clients", app.base_url)).send().await?;
    let row = res.json::<serde_json::Value>().await?[0].clone();
    assert_eq!(row["advance_paid"], 700.0);
    assert_eq!(row["remaining_balance"], 300.0);

    let res = c.get(format!("{}/api/transactions", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    let rows = body.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["amount"], 300.0);
    assert_eq!(rows[0]["type"], "payment");
    assert_eq!(rows[0]["client_name"], "payer");
    Ok(())
}

#[tokio::test]
async fn e2e_payment_missing_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .patch(format!("{}/api/payments/12345", app.base_url))
        .json(&json!({"advance_paid": 10.0}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].as_str().unwrap_or_default().contains("payment record"));
    Ok(())
}

#[tokio::test]
async fn e2e_stats_fresh_database() -> anyhow::Result<()> {
    let app = start_server().await?;
    post_sample_client(&app, "statistical").await?;

    let res = client().get(format!("{}/api/stats", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["revenue"]["value"], 1000.0);
    assert_eq!(body["revenue"]["trend"], "+100%");
    assert_eq!(body["received"]["value"], 400.0);
    assert_eq!(body["pending"]["value"], 600.0);
    assert_eq!(body["clients"]["value"], 1);
    Ok(())
}

#[tokio::test]
async fn e2e_backup_restore_round_trip() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let cid = post_sample_client(&app, "archived").await?;

    let res = c.get(format!("{}/api/backup", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let snapshot = res.json::<serde_json::Value>().await?;
    assert_eq!(snapshot["version"], "1.0");
    assert_eq!(snapshot["clients"].as_array().map(|a| a.len()), Some(1));

    // Diverge from the snapshot, then restore it
    post_sample_client(&app, "extra").await?;
    let res = c
        .post(format!("{}/api/restore", app.base_url))
        .json(&snapshot)
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?["success"], true);

    let res = c.get(format!("{}/api/clients", app.base_url)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    let rows = body.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"].as_i64(), Some(cid));
    assert_eq!(rows[0]["name"], "archived");
    Ok(())
}

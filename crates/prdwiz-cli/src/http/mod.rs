//! HTTP API over the catalog.
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/` | liveness |
//! | GET, POST | `/documents` | list, create |
//! | GET, PUT, DELETE | `/documents/{id}` | fetch, replace, delete |
//! | GET | `/documents/{id}/export` | fetch with export time |
//! | GET, POST | `/trackers/{id}` | fetch, overwrite |

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use log::info;
use prdwiz_core::Catalog;
use tokio::{
    net::TcpListener,
    signal::unix::{signal, SignalKind},
};

mod handlers;
mod response;

pub fn router(catalog: Catalog) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(
            "/documents",
            get(handlers::list_documents).post(handlers::create_document),
        )
        .route(
            "/documents/{id}",
            get(handlers::get_document)
                .put(handlers::update_document)
                .delete(handlers::delete_document),
        )
        .route("/documents/{id}/export", get(handlers::export_document))
        .route(
            "/trackers/{id}",
            get(handlers::get_tracker).post(handlers::put_tracker),
        )
        .with_state(catalog)
}

/// Serve the API until SIGINT or SIGTERM.
pub async fn serve(catalog: Catalog, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{}", listener.local_addr()?);

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let shutdown = async move {
        tokio::select! {
            _ = sigint.recv() => info!("Received SIGINT, shutting down gracefully..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully..."),
        }
    };

    axum::serve(listener, router(catalog))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use prdwiz_core::CatalogBuilder;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    async fn app() -> (TempDir, Router) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let catalog = CatalogBuilder::new()
            .with_data_dir(Some(temp_dir.path()))
            .build()
            .await
            .expect("Failed to create catalog");
        (temp_dir, router(catalog))
    }

    fn document_body(user_stories: Value) -> Value {
        json!({
            "id": "ignored",
            "project_name": "Acme",
            "vision": "Ship PRDs faster",
            "reference_links": [{ "link": "https://x.com", "features": ["f1"] }],
            "tech_stack": {
                "domain": "acme.dev",
                "repo_name": "acme-app",
                "frontend_framework": "React",
                "backend_framework": "FastAPI",
                "databases": ["Postgres"],
                "team_members": ["Dana"],
                "deployment_option": "Docker"
            },
            "database_schema": { "tables": [{
                "name": "users",
                "fields": [{ "name": "id", "type": "uuid", "required": true, "description": "" }],
                "relationships": []
            }]},
            "user_stories": user_stories
        })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_root_status() {
        let (_temp_dir, app) = app().await;
        let (status, body) = send(&app, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "active");
    }

    #[tokio::test]
    async fn test_document_endpoints() {
        let (_temp_dir, app) = app().await;

        let (status, created) = send(
            &app,
            "POST",
            "/documents",
            Some(document_body(json!(["As a PM I can write a PRD"]))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_str().unwrap().to_string();
        assert!(id.ends_with("-acme"));

        let (status, fetched) = send(&app, "GET", &format!("/documents/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["project_name"], "Acme");

        let (status, listed) = send(&app, "GET", "/documents", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, exported) = send(&app, "GET", &format!("/documents/{id}/export"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(exported["exported_at"].is_string());

        let (status, _) = send(&app, "DELETE", &format!("/documents/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(&app, "GET", &format!("/documents/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "PRD not found");
    }

    #[tokio::test]
    async fn test_partial_document_reports_validator_messages() {
        let (_temp_dir, app) = app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/documents",
            Some(json!({ "project_name": "Acme", "vision": "v" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error = body["error"].as_str().unwrap();
        assert!(error.contains("At least one reference link is required"));
        assert!(error.contains("At least one user story is required"));
    }

    #[tokio::test]
    async fn test_malformed_body_gets_json_error() {
        let (_temp_dir, app) = app().await;

        let mut document = document_body(json!(["story"]));
        document["database_schema"]["tables"][0]["fields"][0]["type"] = json!("bogus");
        let (status, body) = send(&app, "POST", "/documents", Some(document)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());

        let request = Request::builder()
            .method("POST")
            .uri("/documents")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_update_document() {
        let (_temp_dir, app) = app().await;
        let body = document_body(json!(["story"]));
        let (_, created) = send(&app, "POST", "/documents", Some(body)).await;
        let id = created["id"].as_str().unwrap().to_string();

        let mut changed = document_body(json!(["story", "another story"]));
        changed["id"] = json!(id);
        let (status, updated) = send(&app, "PUT", &format!("/documents/{id}"), Some(changed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], id.as_str());
        assert_eq!(updated["user_stories"].as_array().unwrap().len(), 2);

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/documents/{id}"),
            Some(document_body(json!(["story"]))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("does not match"));

        let mut missing = document_body(json!(["story"]));
        missing["id"] = json!("1-missing");
        let (status, _) = send(&app, "PUT", "/documents/1-missing", Some(missing)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let partial = json!({ "project_name": "Acme" });
        let (status, _) = send(&app, "PUT", &format!("/documents/{id}"), Some(partial)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_incomplete_document_rejected() {
        let (_temp_dir, app) = app().await;
        let (status, body) = send(&app, "POST", "/documents", Some(document_body(json!([])))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("user story"));

        let (_, listed) = send(&app, "GET", "/documents", None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_tracker_endpoints() {
        let (_temp_dir, app) = app().await;
        let (status, body) = send(&app, "GET", "/trackers/1-acme", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Implementation tracker for PRD 1-acme not found");

        let tracker = json!({
            "prdId": "2-somewhere-else",
            "projectName": "Acme",
            "lastUpdated": "2024-03-01T10:00:00.000Z",
            "stages": [{
                "id": "initial-setup",
                "title": "Initial Setup",
                "description": "",
                "status": "completed",
                "subTasks": [{ "id": "clone-repo", "title": "Clone", "description": "", "completed": true },
                             { "id": "setup-readme", "title": "README", "description": "", "completed": false }]
            }]
        });
        let (status, body) = send(&app, "POST", "/trackers/1-acme", Some(tracker)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let (status, stored) = send(&app, "GET", "/trackers/1-acme", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored["stages"][0]["status"], "in_progress");
        assert_eq!(stored["prdId"], "1-acme");
    }
}

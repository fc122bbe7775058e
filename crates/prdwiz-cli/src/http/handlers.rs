//! Request handlers for documents and trackers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use log::{debug, info};
use prdwiz_core::{
    Catalog, DocumentExport, DocumentId, NewDocument, PrdDocument, PrdDraft, PrdError, Tracker,
    UpdateDocument,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::response::{ApiError, ApiResult};

pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "active",
        "message": "PRD wizard API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn list_documents(State(catalog): State<Catalog>) -> ApiResult<Json<Vec<PrdDocument>>> {
    let documents = catalog.list_documents().await?;
    debug!("GET /documents returned {} documents", documents.len());
    Ok(Json(documents))
}

/// Body of `PUT /documents/{id}`: a full document, optionally naming its id.
#[derive(Debug, Deserialize)]
pub struct DocumentBody {
    #[serde(default)]
    id: Option<String>,
    #[serde(flatten)]
    draft: PrdDraft,
}

/// Validates the body as a whole document; any `id` in it is ignored.
///
/// Missing groups are reported with the validator messages rather than as a
/// deserialization failure.
pub async fn create_document(
    State(catalog): State<Catalog>,
    body: Result<Json<PrdDraft>, JsonRejection>,
) -> ApiResult<Json<PrdDocument>> {
    let Json(draft) = body?;
    let document = NewDocument::try_from(draft)?;
    info!("Creating PRD '{}'", document.project_name);
    let stored = catalog.create_document(document).await?;
    Ok(Json(stored))
}

pub async fn get_document(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> ApiResult<Json<PrdDocument>> {
    debug!("GET /documents/{id}");
    catalog
        .get_document(&DocumentId::from(id.as_str()))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("PRD not found".to_string()))
}

pub async fn export_document(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> ApiResult<Json<DocumentExport>> {
    debug!("GET /documents/{id}/export");
    catalog
        .export_document(&DocumentId::from(id.as_str()))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("PRD not found".to_string()))
}

/// Replaces a stored document. The id in the URL is kept.
pub async fn update_document(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
    body: Result<Json<DocumentBody>, JsonRejection>,
) -> ApiResult<Json<PrdDocument>> {
    let Json(DocumentBody { id: body_id, draft }) = body?;
    debug!("PUT /documents/{id}");
    if body_id.as_deref().is_some_and(|body_id| body_id != id) {
        return Err(PrdError::invalid_input("id")
            .with_reason("Document id in body does not match URL")
            .into());
    }

    let document = NewDocument::try_from(draft)?;
    catalog
        .update_document(UpdateDocument { id, document })
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("PRD not found".to_string()))
}

pub async fn delete_document(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    if !catalog.delete_document(&DocumentId::from(id.as_str())).await? {
        return Err(ApiError::NotFound("PRD not found".to_string()));
    }
    info!("Deleted PRD {id}");
    Ok(Json(json!({
        "status": "success",
        "message": format!("PRD {id} deleted successfully"),
    })))
}

pub async fn get_tracker(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> ApiResult<Json<Tracker>> {
    debug!("GET /trackers/{id}");
    let tracker = catalog.require_tracker(&DocumentId::from(id)).await?;
    Ok(Json(tracker))
}

/// Overwrites the tracker stored under `id` with the body. The stored
/// tracker's `prdId` is always `id`.
pub async fn put_tracker(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
    body: Result<Json<Tracker>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(tracker) = body?;
    debug!("POST /trackers/{id}");
    catalog.put_tracker(&DocumentId::from(id), tracker).await?;
    Ok(Json(json!({ "success": true })))
}

use super::*;
use axum::Json;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListQuery {
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    cursor: Option<String>,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct BlobView {
    url: String,
    pathname: String,
    size: u64,
    uploaded_at: String,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ListResponseBody {
    blobs: Vec<BlobView>,

    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<String>,

    has_more: bool,
}

pub(super) async fn list_objects(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ListQuery>,
) -> Response {
    let limit = q.limit.unwrap_or(state.max_page).min(state.max_page).max(1);

    let objects = state.objects.read().await;
    let mut iter = objects
        .values()
        .filter(|o| {
            q.prefix
                .as_deref()
                .map(|p| o.pathname.starts_with(p))
                .unwrap_or(true)
        })
        .skip_while(|o| {
            q.cursor
                .as_deref()
                .map(|c| o.pathname.as_str() <= c)
                .unwrap_or(false)
        });

    let page: Vec<StoredObject> = iter.by_ref().take(limit).cloned().collect();
    let has_more = iter.next().is_some();
    let cursor = if has_more {
        page.last().map(|o| o.pathname.clone())
    } else {
        None
    };

    let blobs = page
        .into_iter()
        .map(|o| BlobView {
            url: state.blob_url(&o.pathname),
            pathname: o.pathname,
            size: o.size,
            uploaded_at: o.uploaded_at,
        })
        .collect();

    Json(ListResponseBody {
        blobs,
        cursor,
        has_more,
    })
    .into_response()
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PutQuery {
    #[serde(default)]
    access: Option<String>,
    #[serde(default)]
    add_random_suffix: Option<bool>,
    #[serde(default)]
    allow_overwrite: bool,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct PutResponseBody {
    url: String,
    pathname: String,
    content_type: String,
}

pub(super) async fn put_object(
    State(state): State<Arc<AppState>>,
    Path(pathname): Path<String>,
    Query(q): Query<PutQuery>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> std::result::Result<Response, Response> {
    validate_pathname(&pathname).map_err(bad_request)?;
    if q.access.as_deref() != Some("public") {
        return Err(bad_request("only public access is supported"));
    }
    if q.add_random_suffix == Some(true) {
        return Err(bad_request("random suffixing is not supported"));
    }

    let content_type = headers
        .get("x-content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let mut objects = state.objects.write().await;
    if objects.contains_key(&pathname) && !q.allow_overwrite {
        return Err(conflict("object already exists"));
    }

    let path = state.blob_path(&pathname);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .context("create blob parent dir")
            .map_err(internal_error)?;
    }
    std::fs::write(&path, &body)
        .with_context(|| format!("write {}", path.display()))
        .map_err(internal_error)?;

    let uploaded_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format timestamp")
        .map_err(internal_error)?;

    let object = StoredObject {
        pathname: pathname.clone(),
        size: body.len() as u64,
        uploaded_at,
        content_type: content_type.clone(),
    };
    objects.insert(pathname.clone(), object);
    persist_index(&state.data_dir, &objects).map_err(internal_error)?;

    Ok(Json(PutResponseBody {
        url: state.blob_url(&pathname),
        pathname,
        content_type,
    })
    .into_response())
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct DeleteRequest {
    urls: Vec<String>,
}

pub(super) async fn delete_objects(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteRequest>,
) -> std::result::Result<Response, Response> {
    let mut objects = state.objects.write().await;
    for url in &req.urls {
        // Unknown or foreign URLs are ignored; delete is best-effort batch.
        let Some(pathname) = state.pathname_for_url(url) else {
            continue;
        };
        if objects.remove(pathname).is_some() {
            let _ = std::fs::remove_file(state.blob_path(pathname));
        }
    }
    persist_index(&state.data_dir, &objects).map_err(internal_error)?;
    Ok(Json(serde_json::json!({})).into_response())
}

pub(super) async fn get_blob(
    State(state): State<Arc<AppState>>,
    Path(pathname): Path<String>,
) -> std::result::Result<Response, Response> {
    validate_pathname(&pathname).map_err(bad_request)?;

    let content_type = {
        let objects = state.objects.read().await;
        match objects.get(&pathname) {
            Some(o) => o.content_type.clone(),
            None => return Err(not_found()),
        }
    };

    let path = state.blob_path(&pathname);
    let bytes = std::fs::read(&path)
        .with_context(|| format!("read {}", path.display()))
        .map_err(internal_error)?;
    Ok((
        [(header::CONTENT_TYPE, content_type)],
        axum::body::Bytes::from(bytes),
    )
        .into_response())
}

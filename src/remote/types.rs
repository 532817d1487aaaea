//! DTOs for remote object-store requests/responses.

use serde::Deserialize;

use crate::model::RemoteObject;

/// One page of a listing. The server may hand back a cursor even on the final
/// page; `has_more` is authoritative.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListResponse {
    pub(super) blobs: Vec<RemoteObject>,

    #[serde(default)]
    pub(super) cursor: Option<String>,

    #[serde(default)]
    pub(super) has_more: bool,
}

use super::*;
use super::types::ListResponse;

use crate::model::RemoteObject;

const PAGE_SIZE: u32 = 1000;

impl StoreClient {
    /// Fetch the full flat listing, following server-issued cursors.
    ///
    /// `has_more == false` terminates the loop immediately after appending
    /// that page, even if the server also returned a cursor. A missing cursor
    /// with `has_more == true` terminates as well rather than re-requesting
    /// the first page forever.
    pub fn list(&self, prefix: Option<&str>) -> Result<Vec<RemoteObject>> {
        with_retries("list objects", || self.list_once(prefix))
    }

    fn list_once(&self, prefix: Option<&str>) -> Result<Vec<RemoteObject>> {
        let mut objects = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut query: Vec<(&str, String)> = vec![("limit", PAGE_SIZE.to_string())];
            if let Some(prefix) = prefix {
                query.push(("prefix", prefix.to_string()));
            }
            if let Some(cursor) = &cursor {
                query.push(("cursor", cursor.clone()));
            }

            let resp = self
                .client
                .get(self.url(""))
                .header(reqwest::header::AUTHORIZATION, self.auth())
                .query(&query)
                .send()
                .context("list request")?;
            let page: ListResponse = self
                .ensure_ok(resp, "list")?
                .json()
                .context("parse list response")?;

            objects.extend(page.blobs);

            if !page.has_more {
                break;
            }
            match page.cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(objects)
    }
}

use super::*;

use crate::model::UploadResult;
use crate::naming::content_type_for;

impl StoreClient {
    /// Single PUT-style write. The pathname is authoritative: visibility is
    /// public, random suffixing is disabled, and overwrite follows settings.
    pub fn upload(&self, bytes: Vec<u8>, pathname: &str, filename: &str) -> Result<UploadResult> {
        let resp = self
            .client
            .put(self.url(&format!("/{}", pathname)))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .header("x-content-type", content_type_for(filename))
            .query(&[
                ("access", "public"),
                ("addRandomSuffix", "false"),
                (
                    "allowOverwrite",
                    if self.settings.allow_overwrite {
                        "true"
                    } else {
                        "false"
                    },
                ),
            ])
            .body(bytes)
            .send()
            .with_context(|| format!("upload {}", pathname))?;

        let result: UploadResult = self
            .ensure_ok(resp, "upload")?
            .json()
            .context("parse upload response")?;
        Ok(result)
    }

    /// Batch-capable wire call, always invoked with exactly one URL here.
    pub fn delete(&self, url: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.url("/delete"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&serde_json::json!({ "urls": [url] }))
            .send()
            .context("delete request")?;
        self.ensure_ok(resp, "delete")?;
        Ok(())
    }
}

use super::*;

/// Retry wrapper for idempotent reads. Mutations go out single-shot: with
/// overwrite disabled, a retried PUT whose first attempt actually landed would
/// surface as a spurious conflict.
pub(super) fn with_retries<T>(label: &str, mut f: impl FnMut() -> Result<T>) -> Result<T> {
    const ATTEMPTS: usize = 3;
    let mut last: Option<anyhow::Error> = None;
    for i in 0..ATTEMPTS {
        match f() {
            Ok(v) => return Ok(v),
            Err(err) => {
                last = Some(err);
                if i + 1 < ATTEMPTS {
                    std::thread::sleep(std::time::Duration::from_millis(200 * (1 << i)));
                }
            }
        }
    }
    Err(last
        .unwrap_or_else(|| anyhow::anyhow!("unknown error"))
        .context(label.to_string()))
}

impl StoreClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            anyhow::bail!(
                "unauthorized (token invalid/expired; run `blobdock login --url ... --token ...`)"
            );
        }
        if resp.status() == reqwest::StatusCode::CONFLICT {
            anyhow::bail!("object already exists (enable allow_overwrite to replace it)");
        }
        resp.error_for_status()
            .with_context(|| format!("{} status", label))
    }

    pub(super) fn auth(&self) -> String {
        format!("Bearer {}", self.settings.token)
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url, path)
    }
}

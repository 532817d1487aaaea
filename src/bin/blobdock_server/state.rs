use super::*;

pub(super) struct AppState {
    pub(super) data_dir: PathBuf,
    pub(super) public_base: String,
    pub(super) token: String,
    pub(super) max_page: usize,
    pub(super) objects: RwLock<BTreeMap<String, StoredObject>>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(super) struct StoredObject {
    pub(super) pathname: String,
    pub(super) size: u64,
    pub(super) uploaded_at: String,
    pub(super) content_type: String,
}

impl AppState {
    pub(super) fn blob_url(&self, pathname: &str) -> String {
        format!("{}/b/{}", self.public_base, pathname)
    }

    /// Map a public blob URL back to its pathname, if it belongs to this
    /// server.
    pub(super) fn pathname_for_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(&self.public_base)?.strip_prefix("/b/")
    }

    pub(super) fn blob_path(&self, pathname: &str) -> PathBuf {
        self.data_dir.join("objects").join(pathname)
    }
}

/// Reject pathnames that would escape the data directory or collide with the
/// index file.
pub(super) fn validate_pathname(pathname: &str) -> std::result::Result<(), String> {
    if pathname.is_empty() {
        return Err("empty pathname".to_string());
    }
    if pathname.starts_with('/') || pathname.split('/').any(|seg| seg == "." || seg == "..") {
        return Err(format!("invalid pathname {}", pathname));
    }
    Ok(())
}

fn index_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("index.json")
}

/// Best-effort hydration so the dev server survives restarts.
pub(super) fn load_index(data_dir: &std::path::Path) -> Result<BTreeMap<String, StoredObject>> {
    let path = index_path(data_dir);
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let bytes = std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    let objects: Vec<StoredObject> =
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;
    Ok(objects
        .into_iter()
        .map(|o| (o.pathname.clone(), o))
        .collect())
}

pub(super) fn persist_index(
    data_dir: &std::path::Path,
    objects: &BTreeMap<String, StoredObject>,
) -> Result<()> {
    let list: Vec<&StoredObject> = objects.values().collect();
    let bytes = serde_json::to_vec_pretty(&list).context("serialize index")?;
    let path = index_path(data_dir);
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    std::fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    std::fs::rename(&tmp, &path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

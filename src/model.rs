use serde::{Deserialize, Serialize};

/// One stored blob as reported by a listing. Immutable once listed; any
/// mutation is observed by re-listing, never by editing these in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    /// Slash-separated virtual path; the object's unique key.
    pub pathname: String,
    /// Absolute fetch URL.
    pub url: String,
    /// Size in bytes.
    pub size: u64,
    /// RFC 3339 timestamp.
    pub uploaded_at: String,
}

impl RemoteObject {
    /// Final pathname segment, used as the display name.
    pub fn display_name(&self) -> &str {
        self.pathname
            .rsplit('/')
            .next()
            .unwrap_or(self.pathname.as_str())
    }
}

/// Server-confirmed result of a single upload. Not persisted; the next
/// listing is the source of truth.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub url: String,
    pub pathname: String,
    pub content_type: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VaultConfig {
    pub version: u32,

    #[serde(default)]
    pub store: Option<StoreSettings>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

fn default_true() -> bool {
    true
}

fn default_base_prefix() -> String {
    "attachments".to_string()
}

fn default_max_file_size_mb() -> u64 {
    10
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreSettings {
    pub base_url: String,
    pub token: String,

    /// Prefix under which root-level uploads land.
    #[serde(default = "default_base_prefix")]
    pub base_prefix: String,

    #[serde(default = "default_true")]
    pub slugify_filenames: bool,

    #[serde(default)]
    pub allow_overwrite: bool,

    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    #[serde(default)]
    pub view_mode: ViewMode,
}

impl StoreSettings {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            base_url,
            token,
            base_prefix: default_base_prefix(),
            slugify_filenames: true,
            allow_overwrite: false,
            max_file_size_mb: default_max_file_size_mb(),
            view_mode: ViewMode::Grid,
        }
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

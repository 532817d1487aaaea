//! Local configuration store (`.blobdock/config.json`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::VaultConfig;

const STORE_DIR: &str = ".blobdock";

/// Owns the vault-local `.blobdock` directory holding `config.json`.
#[derive(Clone)]
pub struct LocalStore {
    root: PathBuf,
    vault_root: PathBuf,
}

impl LocalStore {
    pub fn blobdock_dir(vault_root: &Path) -> PathBuf {
        vault_root.join(STORE_DIR)
    }

    /// Root of the note vault the store belongs to.
    pub fn vault_root(&self) -> &Path {
        &self.vault_root
    }

    pub fn open(vault_root: &Path) -> Result<Self> {
        let root = Self::blobdock_dir(vault_root);
        if !root.is_dir() {
            return Err(anyhow!(
                "No {} directory found at {} (run `blobdock init`)",
                STORE_DIR,
                root.display()
            ));
        }
        Ok(Self {
            root,
            vault_root: vault_root.to_path_buf(),
        })
    }

    pub fn init(vault_root: &Path, force: bool) -> Result<Self> {
        let root = Self::blobdock_dir(vault_root);
        if root.exists() && !force {
            return Err(anyhow!(
                "{} already exists at {} (use --force to re-init)",
                STORE_DIR,
                root.display()
            ));
        }
        fs::create_dir_all(&root)
            .with_context(|| format!("create {}", root.display()))?;

        let cfg = VaultConfig {
            version: 1,
            store: None,
        };
        let bytes = serde_json::to_vec_pretty(&cfg).context("serialize vault config")?;
        write_atomic(&root.join("config.json"), &bytes).context("write config.json")?;

        Ok(Self {
            root,
            vault_root: vault_root.to_path_buf(),
        })
    }

    /// Walk up from `start` to the nearest directory containing `.blobdock`.
    pub fn discover(start: &Path) -> Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("canonicalize {}", start.display()))?;
        for dir in start.ancestors() {
            if Self::blobdock_dir(dir).is_dir() {
                return Self::open(dir);
            }
        }
        Err(anyhow!("No {} directory found (run `blobdock init`)", STORE_DIR))
    }

    pub fn read_config(&self) -> Result<VaultConfig> {
        let bytes = fs::read(self.root.join("config.json")).context("read config.json")?;
        let cfg: VaultConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &VaultConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StoreSettings;

    #[test]
    fn init_open_and_round_trip_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::init(dir.path(), false).unwrap();

        let mut cfg = store.read_config().unwrap();
        assert!(cfg.store.is_none());

        cfg.store = Some(StoreSettings::new(
            "http://127.0.0.1:9/store".into(),
            "tok".into(),
        ));
        store.write_config(&cfg).unwrap();

        let reopened = LocalStore::open(dir.path()).unwrap();
        let cfg = reopened.read_config().unwrap();
        assert_eq!(cfg.store.unwrap().token, "tok");
    }

    #[test]
    fn init_refuses_to_clobber_without_force() {
        let dir = tempfile::tempdir().unwrap();
        LocalStore::init(dir.path(), false).unwrap();
        assert!(LocalStore::init(dir.path(), false).is_err());
        assert!(LocalStore::init(dir.path(), true).is_ok());
    }

    #[test]
    fn discover_walks_up_to_vault_root() {
        let dir = tempfile::tempdir().unwrap();
        LocalStore::init(dir.path(), false).unwrap();
        let nested = dir.path().join("notes/daily");
        fs::create_dir_all(&nested).unwrap();
        let store = LocalStore::discover(&nested).unwrap();
        assert_eq!(
            store.vault_root().canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}

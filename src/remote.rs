//! Blocking client for the remote object-store API.
//!
//! Three operations against a single base endpoint, authorized by a bearer
//! token: paginated list, single-object upload, batch delete. The client owns
//! no state beyond its settings; callers re-list after any mutation.

use anyhow::{Context, Result};

use crate::error::StoreError;
use crate::model::StoreSettings;

mod http_client;
use self::http_client::with_retries;

mod types;
mod list;
mod transfer;

pub struct StoreClient {
    settings: StoreSettings,
    client: reqwest::blocking::Client,
}

impl StoreClient {
    /// Fails without touching the network when no token is configured.
    pub fn new(settings: StoreSettings) -> Result<Self, StoreError> {
        if settings.token.trim().is_empty() {
            return Err(StoreError::NotConfigured);
        }
        let client = reqwest::blocking::Client::builder()
            .user_agent("blobdock")
            .build()
            .context("build reqwest client")?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }
}

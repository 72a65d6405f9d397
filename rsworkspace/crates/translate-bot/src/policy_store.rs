//! File-backed channel/category policies
//!
//! The file is re-read on every lookup so that edits (from the admin commands
//! or by hand) take effect on the next reaction without a restart.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::info;
use translate_types::{ChannelConfigFile, ScopeConfig};

use crate::json_file;

#[derive(Clone)]
pub struct PolicyStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl PolicyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file contents. A missing file is an empty configuration.
    pub fn load(&self) -> Result<ChannelConfigFile> {
        json_file::read_or_default(&self.path)
    }

    /// Effective policy for `channel_id`, falling back to its category.
    pub fn resolve(&self, channel_id: u64, category_id: Option<u64>) -> Result<ScopeConfig> {
        Ok(self.load()?.resolve(channel_id, category_id))
    }

    pub async fn set_channel_policy(&self, channel_id: u64, config: ScopeConfig) -> Result<()> {
        self.update(|file| file.set_channel(channel_id, config)).await?;
        info!(
            channel_id,
            active = config.active,
            dm = config.deliver_via_dm,
            "Channel policy updated"
        );
        Ok(())
    }

    pub async fn set_category_policy(&self, category_id: u64, config: ScopeConfig) -> Result<()> {
        self.update(|file| file.set_category(category_id, config)).await?;
        info!(
            category_id,
            active = config.active,
            dm = config.deliver_via_dm,
            "Category policy updated"
        );
        Ok(())
    }

    async fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut ChannelConfigFile),
    {
        let _guard = self.write_lock.lock().await;
        let mut file = self.load()?;
        apply(&mut file);
        json_file::write_atomic(&self.path, &file)
    }
}

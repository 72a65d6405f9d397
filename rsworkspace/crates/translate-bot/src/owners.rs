//! Whitelist of users allowed to run admin commands.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::json_file;

/// On-disk layout: `{ "owners": [id, ...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WhitelistFile {
    #[serde(default)]
    pub owners: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOwnerOutcome {
    Added,
    AlreadyPresent,
}

#[derive(Clone)]
pub struct OwnerList {
    path: PathBuf,
    owners: Arc<RwLock<BTreeSet<u64>>>,
}

impl OwnerList {
    /// Load the whitelist. A missing file starts an empty list.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file: WhitelistFile = json_file::read_or_default(&path)?;
        info!("Loaded {} owner(s) from {}", file.owners.len(), path.display());
        Ok(Self {
            path,
            owners: Arc::new(RwLock::new(file.owners.into_iter().collect())),
        })
    }

    pub async fn is_owner(&self, user_id: u64) -> bool {
        self.owners.read().await.contains(&user_id)
    }

    pub async fn owners(&self) -> Vec<u64> {
        self.owners.read().await.iter().copied().collect()
    }

    /// Add `user_id` and persist the list.
    pub async fn add(&self, user_id: u64) -> Result<AddOwnerOutcome> {
        let mut owners = self.owners.write().await;
        if !owners.insert(user_id) {
            return Ok(AddOwnerOutcome::AlreadyPresent);
        }

        let file = WhitelistFile {
            owners: owners.iter().copied().collect(),
        };
        if let Err(e) = json_file::write_atomic(&self.path, &file) {
            owners.remove(&user_id);
            return Err(e);
        }

        info!(user_id, "Owner added");
        Ok(AddOwnerOutcome::Added)
    }
}

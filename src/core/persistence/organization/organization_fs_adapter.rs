use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::persistence::json_file::read_json_list;
use crate::core::persistence::storage_path::organizations_path;

use super::organization_entity::OrganizationEntity;
use super::organization_repository_trait::OrganizationDirectory;

/// Reads organizations from `organizations.json` under the data directory.
pub struct OrganizationFsAdapter {
    data_dir: PathBuf,
}

impl OrganizationFsAdapter {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

#[async_trait]
impl OrganizationDirectory for OrganizationFsAdapter {
    async fn get(&self, organization_id: &str) -> Result<Option<OrganizationEntity>> {
        let organizations: Vec<OrganizationEntity> =
            read_json_list(&organizations_path(&self.data_dir))?;

        Ok(organizations.into_iter().find(|o| o.id == organization_id))
    }
}

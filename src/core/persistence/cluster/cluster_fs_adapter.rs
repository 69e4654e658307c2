use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::persistence::json_file::read_json_list;
use crate::core::persistence::storage_path::clusters_path;

use super::cluster_entity::ClusterEntity;
use super::cluster_repository_trait::ClusterRegistry;

/// Reads clusters from `clusters.json` under the data directory.
pub struct ClusterFsAdapter {
    data_dir: PathBuf,
}

impl ClusterFsAdapter {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn read_all(&self) -> Result<Vec<ClusterEntity>> {
        read_json_list(&clusters_path(&self.data_dir))
    }
}

#[async_trait]
impl ClusterRegistry for ClusterFsAdapter {
    async fn list_by_organization(&self, organization_id: &str) -> Result<Vec<ClusterEntity>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|c| c.organization_id == organization_id)
            .collect())
    }

    async fn get(&self, cluster_id: &str) -> Result<Option<ClusterEntity>> {
        Ok(self.read_all()?.into_iter().find(|c| c.id == cluster_id))
    }
}

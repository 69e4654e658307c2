use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationEntity {
    pub id: String,
    pub name: String,
    /// Cluster hosting the organization's metrics stack.
    #[serde(default)]
    pub primary_cluster_id: Option<String>,
}

impl OrganizationEntity {
    /// Primary cluster id, treating a blank value as unset.
    pub fn primary_cluster(&self) -> Option<&str> {
        self.primary_cluster_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

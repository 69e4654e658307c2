use async_trait::async_trait;

use super::organization_entity::OrganizationEntity;

/// Tenant directory lookup.
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    async fn get(&self, organization_id: &str) -> anyhow::Result<Option<OrganizationEntity>>;
}

pub mod organization_entity;
pub mod organization_fs_adapter;
pub mod organization_repository_trait;

pub mod alert_entity;
pub mod alert_fs_adapter;
pub mod alert_repository_trait;

pub mod cluster_entity;
pub mod cluster_fs_adapter;
pub mod cluster_repository_trait;

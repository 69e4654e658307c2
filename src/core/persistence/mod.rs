//! Read-only adapters for the organization directory, cluster registry and
//! alert store.

pub mod alert;
pub mod cluster;
pub mod json_file;
pub mod organization;
pub mod storage_path;

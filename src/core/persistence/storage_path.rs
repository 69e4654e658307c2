use std::path::{Path, PathBuf};

pub fn organizations_path(data_dir: &Path) -> PathBuf {
    data_dir.join("organizations.json")
}

pub fn clusters_path(data_dir: &Path) -> PathBuf {
    data_dir.join("clusters.json")
}

pub fn alerts_path(data_dir: &Path) -> PathBuf {
    data_dir.join("alerts.json")
}

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Create a unique, timestamp-named process directory under `base_dir` and
/// return its path. The directory basename doubles as the process ID.
pub fn new_process_dir(base_dir: &Path) -> Result<PathBuf> {
    let process_id = OffsetDateTime::now_utc().unix_timestamp_nanos().to_string();
    let dir = base_dir.join(process_id);
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create process dir {}", dir.display()))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_directory_under_base() {
        let base = tempdir().unwrap();
        let dir = new_process_dir(base.path()).unwrap();
        assert!(dir.is_dir());
        assert_eq!(dir.parent().unwrap(), base.path());
        let id = dir.file_name().unwrap().to_str().unwrap();
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }
}

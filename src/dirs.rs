use std::fs;
use std::path::Path;

use anyhow::Result;

/// Ensures that a directory exists at the given path, creating it (and any
/// missing parents) if necessary.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_ensure_dir_exists() {
        let base_path = Path::new("_test_ensure_dir");
        fs::create_dir_all(base_path).unwrap();

        let new_dir = base_path.join("storage");
        ensure_dir_exists(&new_dir).unwrap();
        assert!(new_dir.is_dir());

        let nested_dir = base_path.join("parent/child");
        ensure_dir_exists(&nested_dir).unwrap();
        assert!(nested_dir.is_dir());

        // Existing directory is not an error
        ensure_dir_exists(&new_dir).unwrap();

        fs::remove_dir_all(base_path).unwrap();
    }
}

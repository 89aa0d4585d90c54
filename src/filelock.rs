use std::io::{self, Read, Write};

use anyhow::Result;
use file_lock::FileLock;

/// Reads a file under a shared advisory lock. Returns `None` if the file
/// does not exist.
pub fn read_file_lock(path: &str) -> Result<Option<Vec<u8>>> {
    let lock_opts = file_lock::FileOptions::new().read(true);
    let mut file = match FileLock::lock(path, true, lock_opts) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    let mut data = Vec::new();
    file.file.read_to_end(&mut data)?;
    Ok(Some(data))
}

/// Replaces a file's content under an exclusive advisory lock, creating the
/// file if it does not exist.
pub fn write_file_lock(path: &str, data: &[u8]) -> Result<()> {
    let lock_opts = file_lock::FileOptions::new()
        .write(true)
        .truncate(true)
        .create(true);
    let mut file = FileLock::lock(path, true, lock_opts)?;
    file.file.write_all(data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_write_then_read() {
        let path = "_test_filelock_roundtrip";
        let _ = fs::remove_file(path);

        write_file_lock(path, b"bearer-token").unwrap();
        let content = read_file_lock(path).unwrap().unwrap();
        assert_eq!(content, b"bearer-token");

        write_file_lock(path, b"replaced").unwrap();
        let content = read_file_lock(path).unwrap().unwrap();
        assert_eq!(content, b"replaced");

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = read_file_lock("_test_filelock_missing").unwrap();
        assert!(result.is_none());
    }
}

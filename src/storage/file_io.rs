//! JSON file I/O with atomic writes

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::error::MyBudgetError;

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> MyBudgetError {
    MyBudgetError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read JSON from a file, returning the default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, MyBudgetError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_error("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Write JSON to a file atomically (write to a temp file, sync, then rename)
///
/// Readers see either the old file or the complete new one. Each call gets
/// its own temp file, so concurrent writers never share one.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), MyBudgetError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))?;

    // Same directory as the target so the rename stays on one filesystem
    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| storage_error("create temp file in", parent, e))?;
    let temp_path = temp.path().to_path_buf();

    let mut writer = BufWriter::new(temp.as_file_mut());
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("serialize", path, e))?;
    writer
        .flush()
        .map_err(|e| storage_error("flush", &temp_path, e))?;
    drop(writer);

    temp.as_file()
        .sync_all()
        .map_err(|e| storage_error("sync", &temp_path, e))?;

    // A failed persist drops the temp file, which removes it
    temp.persist(path)
        .map_err(|e| storage_error("replace", path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: TestData = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_write_then_read_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("test.json");
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();

        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(loaded, data);
        let entries = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_concurrent_writers_all_succeed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shared.json");

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|value| {
                    let path = &path;
                    scope.spawn(move || {
                        let data = TestData {
                            name: "writer".to_string(),
                            value,
                        };
                        (0..20)
                            .map(|_| write_json_atomic(path, &data))
                            .collect::<Result<Vec<_>, _>>()
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap().unwrap();
            }
        });

        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(loaded.name, "writer");
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<TestData, _>(&path).unwrap_err();
        assert!(matches!(err, MyBudgetError::Storage(_)));
    }
}

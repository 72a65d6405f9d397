//! Small JSON-on-disk helpers shared by the policy store and owner list.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read and parse `path`, returning `T::default()` when the file is absent.
pub fn read_or_default<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    if content.trim().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write `value` as pretty JSON, replacing `path` atomically.
///
/// The data goes to a sibling temp file first and is renamed over the target.
pub fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    fs::write(tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_default() {
        let dir = tempdir().unwrap();
        let value: BTreeMap<String, u32> = read_or_default(&dir.path().join("none.json")).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_blank_file_yields_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.json");
        fs::write(&path, "  \n").unwrap();
        let value: BTreeMap<String, u32> = read_or_default(&path).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = read_or_default::<BTreeMap<String, u32>>(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");
        let mut value = BTreeMap::new();
        value.insert("a".to_string(), 1u32);

        write_atomic(&path, &value).unwrap();
        let back: BTreeMap<String, u32> = read_or_default(&path).unwrap();
        assert_eq!(back, value);
        assert!(!dir.path().join("nested").join("data.json.tmp").exists());
    }
}

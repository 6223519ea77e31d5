use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    async fn list_files(&self, extensions: &[String]) -> Result<Vec<String>> {
        let base = Path::new(&self.base_path);
        let mut files = Vec::new();

        for entry in WalkDir::new(base).follow_links(false) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let matches = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|e| e == ext));
            if !matches {
                continue;
            }

            if let Ok(relative) = entry.path().strip_prefix(base) {
                // 統一使用 `/` 作為分隔符號
                files.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_files_recurses_and_filters() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("forms/inputs")).unwrap();
        fs::write(root.join("Button.svelte"), "<div/>").unwrap();
        fs::write(root.join("forms/inputs/Text.svelte"), "<input/>").unwrap();
        fs::write(root.join("forms/README.md"), "# forms").unwrap();

        let storage = LocalStorage::new(root.to_string_lossy().into_owned());
        let files = storage.list_files(&["svelte".to_string()]).await.unwrap();

        assert_eq!(files, vec!["Button.svelte", "forms/inputs/Text.svelte"]);
    }

    #[tokio::test]
    async fn test_list_files_missing_root_fails() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("missing").to_string_lossy().into_owned());

        assert!(storage.list_files(&["svelte".to_string()]).await.is_err());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_string_lossy().into_owned());

        storage.write_file("reports/out.csv", b"a,b\n").await.unwrap();
        let data = storage.read_file("reports/out.csv").await.unwrap();

        assert_eq!(data, b"a,b\n");
    }
}

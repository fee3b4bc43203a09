//! # FileStore
//!
//! The public face of the crate. Every operation validates the logical
//! name first, then touches the filesystem.
//!
//! Reads look under the root and then under the legacy directory; writes
//! only ever target the root.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use yamled_core::check_syntax;

use crate::config::StoreConfig;
use crate::convert::{convert_file, Converted};
use crate::error::{StoreError, StoreResult};
use crate::listing::{list_files, FileRecord};
use crate::persist::{write_with_backup, SavedFile};
use crate::policy::{check_extension, check_logical_name};

/// Content of a stored file together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredContent {
    /// File text.
    pub content: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

/// YAML file store over a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    config: StoreConfig,
}

impl FileStore {
    /// Build a store from its configuration. Nothing is touched on disk.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// The configuration this store was built with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The managed root directory.
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// All YAML files under the root, sorted by name.
    pub fn list_files(&self) -> Vec<FileRecord> {
        list_files(&self.config.root, &self.config.root_name())
    }

    /// Locate an existing file: first under the root, then under the
    /// legacy directory.
    pub fn resolve_for_read(&self, logical_name: &str) -> StoreResult<PathBuf> {
        let relative = check_logical_name(logical_name)?;

        let primary = self.config.root.join(relative);
        if primary.is_file() {
            return Ok(primary);
        }
        if let Some(legacy) = &self.config.legacy_dir {
            let fallback = legacy.join(relative);
            if fallback.is_file() {
                tracing::debug!(name = logical_name, path = %fallback.display(), "resolved via legacy directory");
                return Ok(fallback);
            }
        }
        Err(StoreError::NotFound(logical_name.to_string()))
    }

    /// Read a stored YAML file.
    pub fn read(&self, logical_name: &str) -> StoreResult<StoredContent> {
        check_extension(logical_name)?;
        let path = self.resolve_for_read(logical_name)?;

        let bytes = fs::read(&path).map_err(|e| StoreError::io(&path, e))?;
        let metadata = fs::metadata(&path).map_err(|e| StoreError::io(&path, e))?;
        let modified = metadata.modified().map_err(|e| StoreError::io(&path, e))?;
        let content = String::from_utf8(bytes).map_err(|_| StoreError::NonUtf8Content)?;

        Ok(StoredContent {
            size: content.len() as u64,
            content,
            modified: DateTime::<Utc>::from(modified),
        })
    }

    /// Save `content` under `logical_name` in the root, backing up any
    /// existing file.
    ///
    /// The name and the content are checked before anything is written.
    pub fn save(&self, logical_name: &str, content: &str) -> StoreResult<SavedFile> {
        check_extension(logical_name)?;
        let relative = check_logical_name(logical_name)?;
        check_syntax(content)?;

        let target = self.config.root.join(relative);
        let saved = write_with_backup(&target, content)?;
        tracing::info!(name = logical_name, size = saved.size, "saved file");
        Ok(saved)
    }

    /// Store uploaded bytes under `file_name`. Same protocol as
    /// [`FileStore::save`], plus a UTF-8 check.
    pub fn upload(&self, file_name: &str, bytes: &[u8]) -> StoreResult<SavedFile> {
        check_extension(file_name)?;
        check_logical_name(file_name)?;
        let content = std::str::from_utf8(bytes).map_err(|_| StoreError::NonUtf8Content)?;
        self.save(file_name, content)
    }

    /// Convert a stored YAML file to JSON. The source may come from the
    /// legacy directory; the JSON is always written under the root.
    pub fn convert(&self, logical_name: &str) -> StoreResult<Converted> {
        check_extension(logical_name)?;
        let source = self.resolve_for_read(logical_name)?;
        convert_file(&source, &self.config.root, logical_name, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn store_in(dir: &Path) -> FileStore {
        let root = dir.join("nursing");
        fs::create_dir_all(&root).unwrap();
        FileStore::new(StoreConfig::new(root))
    }

    fn backups(dir: &Path, prefix: &str) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(prefix))
            })
            .collect()
    }

    // ── Save ────────────────────────────────────────────────────────

    #[test]
    fn save_then_read_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let content = "# comment kept\npathwayInfo:\n  id: p1   # trailing\nrequirements: []\n";

        let saved = store.save("pathway.yaml", content).unwrap();
        assert_eq!(saved.size, content.len() as u64);

        let read = store.read("pathway.yaml").unwrap();
        assert_eq!(read.content, content);
        assert_eq!(read.size, content.len() as u64);
    }

    #[test]
    fn save_accepts_non_finite_floats() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let content = "maxDose: .inf\nminDose: -.inf\nunknown: .nan\n";
        store.save("dose.yaml", content).unwrap();
        assert_eq!(store.read("dose.yaml").unwrap().content, content);

        let converted = store.convert("dose.yaml").unwrap();
        let json: Value = serde_json::from_str(&converted.json_content).unwrap();
        assert_eq!(json["maxDose"], ".inf");
        assert_eq!(json["unknown"], ".nan");
    }

    #[test]
    fn save_rejects_wrong_extension_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let err = store.save("foo.txt", "a: 1").unwrap_err();
        assert!(matches!(err, StoreError::InvalidExtension(_)));
        assert_eq!(fs::read_dir(store.root()).unwrap().count(), 0);
    }

    #[test]
    fn save_rejects_invalid_yaml_and_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.save("bar.yaml", "a: 1\n").unwrap();

        let err = store.save("bar.yaml", "a: [1,2").unwrap_err();
        assert!(matches!(err, StoreError::InvalidContent(_)));
        assert_eq!(fs::read_to_string(store.root().join("bar.yaml")).unwrap(), "a: 1\n");
        assert!(backups(store.root(), "bar.yaml.backup.").is_empty());
    }

    #[test]
    fn overwrite_keeps_old_content_in_backup() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.save("bar.yaml", "old: true\n").unwrap();
        store.save("bar.yaml", "new: true\n").unwrap();

        let found = backups(store.root(), "bar.yaml.backup.");
        assert_eq!(found.len(), 1);
        assert_eq!(fs::read_to_string(&found[0]).unwrap(), "old: true\n");
        assert_eq!(store.read("bar.yaml").unwrap().content, "new: true\n");
    }

    #[test]
    fn save_into_new_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.save("rules/intake.yml", "ruleset: intake\n").unwrap();
        assert!(store.root().join("rules/intake.yml").is_file());
    }

    #[test]
    fn traversal_is_rejected_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(dir.path().join("escape.yaml"), "a: 1\n").unwrap();

        assert!(matches!(
            store.save("../escape.yaml", "a: 2\n"),
            Err(StoreError::InvalidPath(_))
        ));
        assert!(matches!(store.read("../escape.yaml"), Err(StoreError::InvalidPath(_))));
        assert!(matches!(store.convert("../escape.yaml"), Err(StoreError::InvalidPath(_))));
        assert_eq!(fs::read_to_string(dir.path().join("escape.yaml")).unwrap(), "a: 1\n");
    }

    // ── Upload ──────────────────────────────────────────────────────

    #[test]
    fn upload_stores_utf8_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let saved = store.upload("up.yaml", "k: v\n".as_bytes()).unwrap();
        assert_eq!(saved.size, 5);
        assert_eq!(store.read("up.yaml").unwrap().content, "k: v\n");
    }

    #[test]
    fn upload_rejects_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let err = store.upload("bin.yaml", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, StoreError::NonUtf8Content));
        assert!(!store.root().join("bin.yaml").exists());
    }

    #[test]
    fn upload_checks_extension_before_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let err = store.upload("bin.exe", &[0xff]).unwrap_err();
        assert!(matches!(err, StoreError::InvalidExtension(_)));
    }

    #[test]
    fn upload_backs_up_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.upload("up.yaml", b"v: 1\n").unwrap();
        store.upload("up.yaml", b"v: 2\n").unwrap();
        assert_eq!(backups(store.root(), "up.yaml.backup.").len(), 1);
    }

    // ── Read resolution ─────────────────────────────────────────────

    #[test]
    fn read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(matches!(store.read("nope.yaml"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn read_rejects_wrong_extension_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(matches!(
            store.read("../x.json"),
            Err(StoreError::InvalidExtension(_))
        ));
    }

    #[test]
    fn listing_paths_resolve_through_legacy_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.save("pathway.yaml", "a: 1\n").unwrap();

        let record = &store.list_files()[0];
        assert_eq!(record.path, "nursing/pathway.yaml");

        let resolved = store.resolve_for_read(&record.path).unwrap();
        assert_eq!(resolved, dir.path().join("nursing/pathway.yaml"));
        assert_eq!(store.read(&record.path).unwrap().content, "a: 1\n");
    }

    #[test]
    fn root_wins_over_legacy_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(dir.path().join("shared.yaml"), "from: legacy\n").unwrap();
        store.save("shared.yaml", "from: root\n").unwrap();
        assert_eq!(store.read("shared.yaml").unwrap().content, "from: root\n");
    }

    #[test]
    fn disabled_legacy_dir_is_not_consulted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nursing");
        fs::create_dir_all(&root).unwrap();
        fs::write(dir.path().join("outside.yaml"), "a: 1\n").unwrap();
        let store = FileStore::new(StoreConfig::new(&root).with_legacy_dir(None));
        assert!(matches!(
            store.resolve_for_read("outside.yaml"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn directories_do_not_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::create_dir_all(store.root().join("folder.yaml")).unwrap();
        assert!(matches!(
            store.resolve_for_read("folder.yaml"),
            Err(StoreError::NotFound(_))
        ));
    }

    // ── Convert ─────────────────────────────────────────────────────

    #[test]
    fn convert_writes_json_with_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.save("doc.yaml", "a: 1\n").unwrap();

        let converted = store.convert("doc.yaml").unwrap();
        assert_eq!(converted.json_name, "doc.json");

        let text = fs::read_to_string(store.root().join("doc.json")).unwrap();
        let json: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["a"], 1);
        let meta = json["_metadata"].as_object().unwrap();
        assert_eq!(meta.len(), 3);
        assert_eq!(meta["generatedFrom"], "doc.yaml");
        assert_eq!(meta["generatedBy"], "yaml-editor-api");
    }

    #[test]
    fn convert_from_legacy_dir_writes_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(dir.path().join("old.yaml"), "a: 1\n").unwrap();

        let converted = store.convert("old.yaml").unwrap();
        assert_eq!(converted.json_name, "old.json");
        assert!(store.root().join("old.json").is_file());
        assert!(!dir.path().join("old.json").exists());
    }

    #[test]
    fn convert_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(matches!(store.convert("ghost.yml"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn converted_json_is_not_listed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.save("doc.yaml", "a: 1\n").unwrap();
        store.convert("doc.yaml").unwrap();
        assert_eq!(store.list_files().len(), 1);
    }
}

//! 検出レコード永続化モジュール
//!
//! 保存先はJSONブロブ1つ。`load` は全件読み込み、`save` は全件上書き。
//! 追記はワークフロー側の read-modify-write で行う。
//! ファイルが無い・壊れている場合は空のリストとして扱う。

use crate::error::Result;
use litter_log_common::Detection;
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// 永続化ポートの抽象
///
/// ワークフローはこのポート経由でのみストレージへ触れる。
pub trait DetectionStore {
    /// 全レコードを読み込む（読めない場合は空リスト）
    fn load(&self) -> Vec<Detection>;

    /// 全レコードを上書き保存
    fn save(&self, detections: &[Detection]) -> Result<()>;
}

impl<T: DetectionStore + ?Sized> DetectionStore for &T {
    fn load(&self) -> Vec<Detection> {
        (**self).load()
    }

    fn save(&self, detections: &[Detection]) -> Result<()> {
        (**self).save(detections)
    }
}

/// JSONファイルに保存するストア
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DetectionStore for JsonFileStore {
    fn load(&self) -> Vec<Detection> {
        if !self.path.exists() {
            return Vec::new();
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return Vec::new(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(detections) => detections,
            Err(_) => {
                eprintln!("検出レコードの読み込みに失敗、空のリストから開始します");
                Vec::new()
            }
        }
    }

    fn save(&self, detections: &[Detection]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, detections)?;
        Ok(())
    }
}

/// メモリ上のストア（テスト用）
#[derive(Default)]
pub struct MemoryStore {
    records: RefCell<Vec<Detection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DetectionStore for MemoryStore {
    fn load(&self) -> Vec<Detection> {
        self.records.borrow().clone()
    }

    fn save(&self, detections: &[Detection]) -> Result<()> {
        *self.records.borrow_mut() = detections.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litter_log_common::GeoPosition;
    use std::fs;

    fn test_detection(id: &str) -> Detection {
        Detection::new(
            id.to_string(),
            "data:image/jpeg;base64,".to_string(),
            vec![],
            GeoPosition::fallback(),
            "2026-08-06T09:00:00+00:00".to_string(),
            "u1".to_string(),
        )
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let store = JsonFileStore::new("/nonexistent/dir/detections.json");
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = std::env::temp_dir().join("litter-log-test-store");
        fs::create_dir_all(&temp_dir).unwrap();
        let store = JsonFileStore::new(temp_dir.join("detections.json"));

        let records = vec![test_detection("d1"), test_detection("d2")];
        store.save(&records).expect("保存失敗");

        let loaded = store.load();
        assert_eq!(loaded, records);

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_load_corrupt_file_returns_empty() {
        let temp_dir = std::env::temp_dir().join("litter-log-test-store-corrupt");
        fs::create_dir_all(&temp_dir).unwrap();
        let path = temp_dir.join("detections.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().is_empty());

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp_dir = std::env::temp_dir().join("litter-log-test-store-nested");
        fs::remove_dir_all(&temp_dir).ok();
        let store = JsonFileStore::new(temp_dir.join("a").join("b").join("detections.json"));

        store.save(&[test_detection("d1")]).expect("保存失敗");
        assert_eq!(store.load().len(), 1);

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.load().is_empty());
        store.save(&[test_detection("d1")]).unwrap();
        assert_eq!(store.load().len(), 1);
    }
}

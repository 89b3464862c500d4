use crate::error::{LitterLogError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 解析遅延のデフォルト値（モック推論コストの再現）
pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 検出レコードの保存先（省略時は ~/.config/litter-log/detections.json）
    pub storage_path: Option<PathBuf>,
    /// ログインユーザーID
    pub user_id: Option<String>,
    /// ユーザー表示名
    pub user_name: Option<String>,
    /// 解析の模擬遅延（ミリ秒）
    pub analysis_delay_ms: u64,
    /// 端末の現在位置（緯度）。未設定ならフォールバック座標を使う
    pub device_latitude: Option<f64>,
    /// 端末の現在位置（経度）
    pub device_longitude: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: None,
            user_id: None,
            user_name: None,
            analysis_delay_ms: DEFAULT_ANALYSIS_DELAY_MS,
            device_latitude: None,
            device_longitude: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LitterLogError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("litter-log").join("config.json"))
    }

    /// 検出レコードの保存先パス
    pub fn detections_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.storage_path {
            return Ok(path.clone());
        }
        let home = dirs::home_dir()
            .ok_or_else(|| LitterLogError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home
            .join(".config")
            .join("litter-log")
            .join("detections.json"))
    }

    /// 端末座標（設定があれば）
    pub fn device_coordinates(&self) -> Option<(f64, f64)> {
        match (self.device_latitude, self.device_longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

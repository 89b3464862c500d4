//! メディア取得モジュール
//!
//! カメラデバイスを start / captured_frame / stop の契約で抽象化する。
//! 撮影フレームはJPEG（品質80）でエンコードし、
//! "data:image/jpeg;base64,..." 形式のData URLとして返す。
//! デバイスは start から stop までの間、排他的に保持される。

mod synthetic;

pub use synthetic::SyntheticCamera;

use crate::error::{LitterLogError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// JPEGエンコード品質（lossy、canvas.toDataURL相当の0.8）
pub const JPEG_QUALITY: u8 = 80;

/// Data URLの接頭辞
pub const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// カメラデバイスの抽象
///
/// `captured_frame` は `start` 成功後のみ有効。失敗時のリトライは行わず、
/// 呼び出し側が再度 `start` を呼ぶ。
pub trait Camera {
    /// デバイスを取得してストリーミングを開始
    fn start(&mut self) -> Result<()>;

    /// 現在のフレームをJPEGエンコードしてData URLで返す
    fn captured_frame(&mut self) -> Result<String>;

    /// デバイスを解放（冪等、未起動でも安全）
    fn stop(&mut self);
}

/// フレームをJPEG（品質80）のData URLにエンコード
pub fn encode_jpeg_data_url(frame: &DynamicImage) -> Result<String> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    frame
        .write_with_encoder(encoder)
        .map_err(|e| LitterLogError::Image(format!("JPEGエンコード失敗: {}", e)))?;
    Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(&buf)))
}

/// 画像ファイルをカメラデバイスに見立てるアダプタ
///
/// `start` でファイルをデコードして保持し、`stop` で解放する。
/// ファイルが存在しない・画像として読めない場合は `start` が失敗する。
pub struct FileCamera {
    path: PathBuf,
    frame: Option<DynamicImage>,
}

impl FileCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            frame: None,
        }
    }
}

impl Camera for FileCamera {
    fn start(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Err(LitterLogError::Camera(format!(
                "デバイスが見つかりません: {}",
                self.path.display()
            )));
        }
        let frame = image::open(&self.path)
            .map_err(|e| LitterLogError::Camera(format!("カメラ起動失敗: {}", e)))?;
        self.frame = Some(frame);
        Ok(())
    }

    fn captured_frame(&mut self) -> Result<String> {
        let frame = self
            .frame
            .as_ref()
            .ok_or(LitterLogError::Camera("カメラが起動していません".into()))?;
        encode_jpeg_data_url(frame)
    }

    fn stop(&mut self) {
        self.frame = None;
    }
}

/// テスト・デモ用にファイルカメラの入力画像を生成
pub fn write_test_image(path: &Path, width: u32, height: u32) -> Result<()> {
    let frame = synthetic::generate_frame(width, height);
    frame
        .save(path)
        .map_err(|e| LitterLogError::Image(format!("画像保存失敗: {}", e)))?;
    Ok(())
}

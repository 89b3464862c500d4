//! 画像分類モジュール
//!
//! 契約は「画像Data URLを入れると分類項目リストが返る」のみ。
//! 実モデル推論への置き換えはこの契約を保ったままアダプタを差し替える。

mod simulated;

pub use simulated::SimulatedCharacterizer;

use crate::error::Result;
use litter_log_common::PlasticItem;
use std::future::Future;

/// 分類器の抽象
pub trait Characterizer {
    /// 撮影画像を分類して項目リストを返す
    fn analyze(&self, image_url: &str) -> impl Future<Output = Result<Vec<PlasticItem>>> + Send;
}

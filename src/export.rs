//! 検出レコードのJSONエクスポート
//!
//! ユーザー1人分のレコードを整形JSONで書き出す読み取り専用変換。
//! 書き出したファイルを読み戻すと元のレコード列と一致する。

use crate::error::Result;
use litter_log_common::{stats, Detection};
use std::path::{Path, PathBuf};

/// デフォルトの出力ファイル名
pub const DEFAULT_EXPORT_FILE: &str = "plastic-litter-detections.json";

/// 指定ユーザーのレコードをJSONファイルへ書き出す
///
/// 書き出した件数を返す。
pub fn export_detections(
    detections: &[Detection],
    user_id: &str,
    output: &Path,
) -> Result<usize> {
    let user_records = stats::for_user(detections, user_id);
    let json = serde_json::to_string_pretty(&user_records)?;
    std::fs::write(output, json)?;
    Ok(user_records.len())
}

/// 出力先の指定が無い場合のデフォルトパス
pub fn default_export_path() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_FILE)
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LitterLogError {
    #[error("カメラエラー: {0}")]
    Camera(String),

    #[error("画像処理エラー: {0}")]
    Image(String),

    #[error("不正な状態遷移: {0}")]
    InvalidTransition(&'static str),

    #[error("ログインが必要です。`--user YOUR_ID` を指定するか `litter-log config --set-user YOUR_ID` で設定してください")]
    AuthRequired,

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("保存済みレコードがありません: {0}")]
    NoDetections(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LitterLogError>;

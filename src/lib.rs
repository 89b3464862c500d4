//! Litter Log - プラスチックごみ撮影記録・分類ツール
//!
//! 撮影 → 模擬AI分類 → レビュー → 保存のワークフローをCLIで提供する。
//! コアは `workflow` の状態機械で、カメラ・位置・分類器・ストアの
//! 4ポートを注入して動く。

pub mod analyzer;
pub mod auth;
pub mod camera;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod location;
pub mod store;
pub mod workflow;

//! Litter Log Common Library
//!
//! CLIの各コマンドで共有される型と集計ユーティリティ

pub mod error;
pub mod stats;
pub mod types;

pub use error::{Error, Result};
pub use types::{Detection, GeoPosition, PlasticItem, PlasticType, User, UserRole};

//! 位置取得モジュール
//!
//! 単発の非同期取得。失敗は呼び出し側へ伝播させず、
//! 常にフォールバック座標へ吸収する（戻り値から成否は区別できない）。

use litter_log_common::GeoPosition;
use std::future::Future;

/// 位置取得成功時の表示ラベル
const CURRENT_LOCATION_LABEL: &str = "Current Location";

/// 位置リゾルバの抽象
///
/// `resolve` は決して失敗しない。取得できない場合はフォールバック値を返す。
pub trait LocationResolver {
    fn resolve(&self) -> impl Future<Output = GeoPosition> + Send;
}

/// 端末の位置情報を読むアダプタ
///
/// 設定された座標を端末報告値として扱う。未設定・範囲外の座標は
/// 取得失敗とみなしてフォールバックに落とす。
#[derive(Debug, Clone)]
pub struct DeviceLocator {
    coordinates: Option<(f64, f64)>,
}

impl DeviceLocator {
    pub fn new(coordinates: Option<(f64, f64)>) -> Self {
        Self { coordinates }
    }
}

impl LocationResolver for DeviceLocator {
    async fn resolve(&self) -> GeoPosition {
        match self.coordinates {
            Some((latitude, longitude)) => GeoPosition::new(
                latitude,
                longitude,
                Some(CURRENT_LOCATION_LABEL.to_string()),
            )
            .unwrap_or_else(|_| GeoPosition::fallback()),
            None => GeoPosition::fallback(),
        }
    }
}

/// 固定位置を返すアダプタ（テスト用）
#[derive(Debug, Clone)]
pub struct FixedLocator {
    position: GeoPosition,
}

impl FixedLocator {
    pub fn new(position: GeoPosition) -> Self {
        Self { position }
    }
}

impl LocationResolver for FixedLocator {
    async fn resolve(&self) -> GeoPosition {
        self.position.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litter_log_common::types::{FALLBACK_LATITUDE, FALLBACK_LONGITUDE};

    #[tokio::test]
    async fn test_device_locator_with_coordinates() {
        let locator = DeviceLocator::new(Some((35.6812, 139.7671)));
        let pos = locator.resolve().await;
        assert_eq!(pos.latitude, 35.6812);
        assert_eq!(pos.address.as_deref(), Some(CURRENT_LOCATION_LABEL));
    }

    #[tokio::test]
    async fn test_device_locator_without_coordinates_falls_back() {
        let locator = DeviceLocator::new(None);
        let pos = locator.resolve().await;
        assert_eq!(pos.latitude, FALLBACK_LATITUDE);
        assert_eq!(pos.longitude, FALLBACK_LONGITUDE);
        assert_eq!(pos.address.as_deref(), Some("Unknown Location"));
    }

    #[tokio::test]
    async fn test_device_locator_invalid_coordinates_fall_back() {
        let locator = DeviceLocator::new(Some((999.0, 0.0)));
        let pos = locator.resolve().await;
        assert_eq!(pos.latitude, FALLBACK_LATITUDE);
    }

    #[tokio::test]
    async fn test_resolve_always_in_range() {
        for locator in [
            DeviceLocator::new(None),
            DeviceLocator::new(Some((12.34, 56.78))),
            DeviceLocator::new(Some((-100.0, 500.0))),
        ] {
            let pos = locator.resolve().await;
            assert!(pos.is_valid());
        }
    }

    #[tokio::test]
    async fn test_fixed_locator_returns_preset() {
        let preset = GeoPosition::new(1.0, 2.0, Some("Pier 7".into())).unwrap();
        let locator = FixedLocator::new(preset.clone());
        assert_eq!(locator.resolve().await, preset);
    }
}

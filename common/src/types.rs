//! 検出レコードの型定義
//!
//! CLIの各コマンドで共有される型:
//! - PlasticType / PlasticItem: 分類結果（種類と個数）
//! - GeoPosition: 撮影位置（フォールバックあり）
//! - Detection: 保存される検出レコード（作成後は不変）
//! - User / UserRole: ログインユーザー

use serde::{Deserialize, Serialize};

/// プラスチックごみの分類（6種固定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlasticType {
    PlasticBottles,
    PlasticCups,
    PlasticContainers,
    PlasticStraws,
    PlasticBags,
    Styrofoam,
}

impl PlasticType {
    /// 全種類（表示順）
    pub const ALL: [PlasticType; 6] = [
        PlasticType::PlasticBottles,
        PlasticType::PlasticCups,
        PlasticType::PlasticContainers,
        PlasticType::PlasticStraws,
        PlasticType::PlasticBags,
        PlasticType::Styrofoam,
    ];

    /// 表示ラベル
    pub fn label(&self) -> &'static str {
        match self {
            PlasticType::PlasticBottles => "Plastic Bottles",
            PlasticType::PlasticCups => "Plastic Cups",
            PlasticType::PlasticContainers => "Plastic Containers",
            PlasticType::PlasticStraws => "Plastic Straws",
            PlasticType::PlasticBags => "Plastic Bags",
            PlasticType::Styrofoam => "Styrofoam",
        }
    }
}

/// 分類結果の1項目
///
/// 1つの検出内では同じ種類は高々1項目。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlasticItem {
    #[serde(rename = "type")]
    pub item_type: PlasticType,
    pub count: u32,
}

/// フォールバック座標（位置取得失敗時）
pub const FALLBACK_LATITUDE: f64 = 40.7128;
pub const FALLBACK_LONGITUDE: f64 = -74.0060;

/// 撮影位置
///
/// `address` は表示用ラベルであり、逆ジオコーディング結果ではない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl GeoPosition {
    /// 座標を検証して生成（緯度 [-90,90]、経度 [-180,180]）
    pub fn new(
        latitude: f64,
        longitude: f64,
        address: Option<String>,
    ) -> crate::error::Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(crate::error::Error::CoordinateOutOfRange(format!(
                "latitude = {}",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(crate::error::Error::CoordinateOutOfRange(format!(
                "longitude = {}",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
            address,
        })
    }

    /// 位置取得失敗時のフォールバック値
    pub fn fallback() -> Self {
        Self {
            latitude: FALLBACK_LATITUDE,
            longitude: FALLBACK_LONGITUDE,
            address: Some("Unknown Location".to_string()),
        }
    }

    /// 座標が有効範囲内か
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// 保存される検出レコード
///
/// `total_items` は生成時に items から算出され、以後再計算しない。
/// 生成後の編集・個別削除の操作は存在しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub id: String,
    pub image_url: String,
    pub items: Vec<PlasticItem>,
    pub location: GeoPosition,
    pub date: String,
    pub user_id: String,
    pub total_items: u32,
}

impl Detection {
    /// 検出レコードを生成
    ///
    /// `total_items` はここで items の合計として確定する。
    pub fn new(
        id: String,
        image_url: String,
        items: Vec<PlasticItem>,
        location: GeoPosition,
        date: String,
        user_id: String,
    ) -> Self {
        let total_items = items.iter().map(|item| item.count).sum();
        Self {
            id,
            image_url,
            items,
            location,
            date,
            user_id,
            total_items,
        }
    }
}

/// ユーザー権限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

/// ログインユーザー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plastic_type_serde_tag() {
        let json = serde_json::to_string(&PlasticType::PlasticBottles).unwrap();
        assert_eq!(json, "\"plastic_bottles\"");

        let parsed: PlasticType = serde_json::from_str("\"styrofoam\"").unwrap();
        assert_eq!(parsed, PlasticType::Styrofoam);
    }

    #[test]
    fn test_plastic_item_serde_field_name() {
        let item = PlasticItem {
            item_type: PlasticType::PlasticBags,
            count: 2,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, "{\"type\":\"plastic_bags\",\"count\":2}");
    }

    #[test]
    fn test_geo_position_new_valid() {
        let pos = GeoPosition::new(35.6812, 139.7671, Some("Current Location".into())).unwrap();
        assert!(pos.is_valid());
    }

    #[test]
    fn test_geo_position_new_out_of_range() {
        assert!(GeoPosition::new(91.0, 0.0, None).is_err());
        assert!(GeoPosition::new(-91.0, 0.0, None).is_err());
        assert!(GeoPosition::new(0.0, 180.5, None).is_err());
        assert!(GeoPosition::new(0.0, -200.0, None).is_err());
    }

    #[test]
    fn test_geo_position_fallback_in_range() {
        let pos = GeoPosition::fallback();
        assert!(pos.is_valid());
        assert_eq!(pos.latitude, FALLBACK_LATITUDE);
        assert_eq!(pos.longitude, FALLBACK_LONGITUDE);
        assert_eq!(pos.address.as_deref(), Some("Unknown Location"));
    }

    #[test]
    fn test_detection_total_items_computed() {
        let detection = Detection::new(
            "d1".into(),
            "data:image/jpeg;base64,".into(),
            vec![
                PlasticItem {
                    item_type: PlasticType::PlasticBottles,
                    count: 3,
                },
                PlasticItem {
                    item_type: PlasticType::PlasticBags,
                    count: 2,
                },
            ],
            GeoPosition::fallback(),
            "2026-08-06T00:00:00+00:00".into(),
            "u1".into(),
        );
        assert_eq!(detection.total_items, 5);
    }

    #[test]
    fn test_detection_camel_case_json() {
        let detection = Detection::new(
            "d1".into(),
            "data:image/jpeg;base64,".into(),
            vec![],
            GeoPosition::fallback(),
            "2026-08-06T00:00:00+00:00".into(),
            "u1".into(),
        );
        let json = serde_json::to_string(&detection).unwrap();
        assert!(json.contains("\"imageUrl\""));
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"totalItems\""));
    }

    #[test]
    fn test_user_role_serde() {
        let json = serde_json::to_string(&UserRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
    }
}

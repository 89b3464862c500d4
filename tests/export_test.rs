//! エクスポートの統合テスト
//!
//! 書き出したJSONを読み戻すと元のレコード列と一致することを検証

use litter_log_common::{Detection, GeoPosition, PlasticItem, PlasticType};
use litter_log_rust::export::{export_detections, DEFAULT_EXPORT_FILE};
use tempfile::tempdir;

fn detection(id: &str, user_id: &str) -> Detection {
    Detection::new(
        id.to_string(),
        format!("data:image/jpeg;base64,{}", id),
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
        GeoPosition::new(35.6812, 139.7671, Some("Current Location".into())).unwrap(),
        "2026-08-06T09:00:00+00:00".to_string(),
        user_id.to_string(),
    )
}

/// エクスポート → 再読み込みのラウンドトリップ
#[test]
fn test_export_round_trip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join(DEFAULT_EXPORT_FILE);

    let records = vec![
        detection("d1", "u1"),
        detection("d2", "u1"),
        detection("d3", "u1"),
    ];
    let written = export_detections(&records, "u1", &output).expect("エクスポート失敗");
    assert_eq!(written, 3);

    let content = std::fs::read_to_string(&output).unwrap();
    let reloaded: Vec<Detection> = serde_json::from_str(&content).unwrap();
    assert_eq!(reloaded, records);
}

/// 他ユーザーのレコードは含まれない
#[test]
fn test_export_excludes_other_users() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("export.json");

    let records = vec![detection("d1", "u1"), detection("d2", "u2")];
    let written = export_detections(&records, "u1", &output).unwrap();
    assert_eq!(written, 1);

    let reloaded: Vec<Detection> =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].user_id, "u1");
}

/// 該当レコードが無ければ空配列を書き出す
#[test]
fn test_export_no_records_writes_empty_array() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("export.json");

    let written = export_detections(&[], "u1", &output).unwrap();
    assert_eq!(written, 0);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "[]");
}

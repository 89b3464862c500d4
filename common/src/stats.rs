//! 集計ロジック（ダッシュボード表示用）
//!
//! 保存済み検出レコードからの純粋な集計のみを行う。I/Oは持たない。

use crate::types::{Detection, PlasticType};
use chrono::{DateTime, NaiveDate};

/// 指定ユーザーのレコードを抽出
pub fn for_user<'a>(detections: &'a [Detection], user_id: &str) -> Vec<&'a Detection> {
    detections
        .iter()
        .filter(|detection| detection.user_id == user_id)
        .collect()
}

/// 全レコードの合計個数
pub fn total_items(detections: &[Detection]) -> u32 {
    detections.iter().map(|d| d.total_items).sum()
}

/// 種類別の合計個数（表示順、0件の種類も含む）
pub fn counts_by_type(detections: &[Detection]) -> Vec<(PlasticType, u32)> {
    PlasticType::ALL
        .iter()
        .map(|&plastic_type| {
            let count = detections
                .iter()
                .flat_map(|d| d.items.iter())
                .filter(|item| item.item_type == plastic_type)
                .map(|item| item.count)
                .sum();
            (plastic_type, count)
        })
        .collect()
}

/// 直近N日間の日別検出件数（古い日付から順に、0件の日も含む）
///
/// `date` がRFC3339として解釈できないレコードは集計から外れる。
pub fn daily_counts(
    detections: &[Detection],
    days: u32,
    today: NaiveDate,
) -> Vec<(NaiveDate, usize)> {
    let dates: Vec<NaiveDate> = detections
        .iter()
        .filter_map(|d| DateTime::parse_from_rfc3339(&d.date).ok())
        .map(|dt| dt.date_naive())
        .collect();

    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(chrono::Days::new(offset as u64)))
        .map(|day| {
            let count = dates.iter().filter(|&&d| d == day).count();
            (day, count)
        })
        .collect()
}

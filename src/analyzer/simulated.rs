//! 模擬分類器
//!
//! 実モデルの代役。画像の内容は見ずに、6種の候補から
//! ランダムな2〜4項目を生成する。推論コストの再現として
//! 固定遅延（デフォルト2秒）を挟む。遅延はこのアダプタの
//! 実装詳細であり、分類契約には含まれない。

use super::Characterizer;
use crate::error::Result;
use litter_log_common::{PlasticItem, PlasticType};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

/// 種類別の個数上限（下限は全種1）
const CANDIDATE_MAX_COUNTS: [(PlasticType, u32); 6] = [
    (PlasticType::PlasticBottles, 5),
    (PlasticType::PlasticBags, 8),
    (PlasticType::PlasticContainers, 3),
    (PlasticType::PlasticStraws, 10),
    (PlasticType::PlasticCups, 4),
    (PlasticType::Styrofoam, 2),
];

pub struct SimulatedCharacterizer {
    delay: Duration,
}

impl SimulatedCharacterizer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedCharacterizer {
    fn default() -> Self {
        Self::new(Duration::from_millis(
            crate::config::DEFAULT_ANALYSIS_DELAY_MS,
        ))
    }
}

impl Characterizer for SimulatedCharacterizer {
    async fn analyze(&self, _image_url: &str) -> Result<Vec<PlasticItem>> {
        tokio::time::sleep(self.delay).await;
        Ok(simulate_detection(&mut rand::thread_rng()))
    }
}

/// 候補6種に個数を振ってシャッフルし、2〜4項目を取り出す
///
/// 個数0の項目は除外する（個数の下限が1なので実際には発生しない）。
fn simulate_detection(rng: &mut impl Rng) -> Vec<PlasticItem> {
    let mut pool: Vec<PlasticItem> = CANDIDATE_MAX_COUNTS
        .iter()
        .map(|&(item_type, max_count)| PlasticItem {
            item_type,
            count: rng.gen_range(1..=max_count),
        })
        .collect();

    pool.shuffle(rng);

    let num_items = rng.gen_range(2..=4);
    pool.truncate(num_items);
    pool.retain(|item| item.count > 0);
    pool
}

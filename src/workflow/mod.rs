//! 撮影ワークフロー制御
//!
//! 撮影から保存までの状態機械:
//! Idle → Streaming → Captured → Analyzing → Reviewed → (保存/破棄) → Idle
//!
//! 4つのポート（カメラ・位置・分類器・ストア）を注入して動く。
//! 遷移は1インスタンスにつき常に逐次実行（`&mut self` で強制）。
//! 解析中の中断手段は持たない。
//!
//! 失敗の扱い:
//! - カメラ失敗はその試行で終端。状態は変わらず、自動リトライしない
//! - 位置取得失敗はフォールバック座標に吸収され、表面化しない
//! - 未ログインでの保存は拒否（状態維持）であり、エラーではない

use crate::analyzer::Characterizer;
use crate::camera::Camera;
use crate::error::{LitterLogError, Result};
use crate::location::LocationResolver;
use crate::store::DetectionStore;
use chrono::Utc;
use litter_log_common::{Detection, GeoPosition, PlasticItem, User};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// ワークフローの状態（保持データ付き）
#[derive(Debug)]
enum CaptureState {
    Idle,
    Streaming,
    Captured { image: String },
    Analyzing { image: String },
    Reviewed { image: String, items: Vec<PlasticItem> },
}

/// 表示・判定用の状態名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Streaming,
    Captured,
    Analyzing,
    Reviewed,
}

/// 保存遷移の結果
///
/// 未ログインは拒否であってエラーではない。呼び出し側は
/// `AuthRequired` を受けてログインプロンプトを出し、解決後に再度
/// `save` を呼ぶ（その間ワークフローはレビュー状態に留まる）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { id: String, total_items: u32 },
    AuthRequired,
}

pub struct CaptureWorkflow<C, L, A, S> {
    camera: C,
    locator: L,
    analyzer: A,
    store: S,
    state: CaptureState,
    location: Option<GeoPosition>,
    location_task: Option<JoinHandle<GeoPosition>>,
}

impl<C, L, A, S> CaptureWorkflow<C, L, A, S>
where
    C: Camera,
    L: LocationResolver + Clone + Send + 'static,
    A: Characterizer,
    S: DetectionStore,
{
    pub fn new(camera: C, locator: L, analyzer: A, store: S) -> Self {
        Self {
            camera,
            locator,
            analyzer,
            store,
            state: CaptureState::Idle,
            location: None,
            location_task: None,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            CaptureState::Idle => Phase::Idle,
            CaptureState::Streaming => Phase::Streaming,
            CaptureState::Captured { .. } => Phase::Captured,
            CaptureState::Analyzing { .. } => Phase::Analyzing,
            CaptureState::Reviewed { .. } => Phase::Reviewed,
        }
    }

    /// 保持中の撮影画像（Data URL）
    pub fn held_image(&self) -> Option<&str> {
        match &self.state {
            CaptureState::Captured { image }
            | CaptureState::Analyzing { image }
            | CaptureState::Reviewed { image, .. } => Some(image.as_str()),
            _ => None,
        }
    }

    /// レビュー中の分類結果
    pub fn reviewed_items(&self) -> Option<&[PlasticItem]> {
        match &self.state {
            CaptureState::Reviewed { items, .. } => Some(items),
            _ => None,
        }
    }

    /// レビュー中の合計個数（表示用、未保存）
    pub fn reviewed_total(&self) -> Option<u32> {
        self.reviewed_items()
            .map(|items| items.iter().map(|item| item.count).sum())
    }

    /// 解決済みの位置（capture後、解析完了までは未解決のことがある）
    pub fn location(&self) -> Option<&GeoPosition> {
        self.location.as_ref()
    }

    /// Idle → Streaming: カメラを起動
    ///
    /// 失敗時はIdleのまま。リトライは呼び出し側の再実行に任せる。
    pub fn start(&mut self) -> Result<()> {
        if !matches!(self.state, CaptureState::Idle) {
            return Err(LitterLogError::InvalidTransition(
                "カメラ起動は待機状態からのみ可能です",
            ));
        }
        self.camera.start()?;
        self.state = CaptureState::Streaming;
        Ok(())
    }

    /// Streaming → Captured: フレームを確保してカメラを即時解放
    ///
    /// 解放後すぐに位置取得を開始し、解析完了までに解決させる。
    pub fn capture(&mut self) -> Result<()> {
        if !matches!(self.state, CaptureState::Streaming) {
            return Err(LitterLogError::InvalidTransition(
                "撮影はストリーミング中のみ可能です",
            ));
        }
        let image = self.camera.captured_frame()?;
        self.camera.stop();

        let locator = self.locator.clone();
        self.location_task = Some(tokio::spawn(async move { locator.resolve().await }));

        self.state = CaptureState::Captured { image };
        Ok(())
    }

    /// Streaming/Captured → Idle: 破棄して待機に戻る
    pub fn cancel(&mut self) -> Result<()> {
        match self.state {
            CaptureState::Streaming => {
                self.camera.stop();
            }
            CaptureState::Captured { .. } => {}
            _ => {
                return Err(LitterLogError::InvalidTransition(
                    "キャンセルできる状態ではありません",
                ));
            }
        }
        self.state = CaptureState::Idle;
        self.clear_held();
        Ok(())
    }

    /// Captured → Analyzing → Reviewed: 分類を実行
    ///
    /// 唯一の長い中断点（モックで約2秒）。解析と位置解決を並行して待つ。
    /// 撮影画像が無い場合は拒否（状態は変わらない）。
    pub async fn characterize(&mut self) -> Result<()> {
        let image = match std::mem::replace(&mut self.state, CaptureState::Idle) {
            CaptureState::Captured { image } => image,
            other => {
                self.state = other;
                return Err(LitterLogError::InvalidTransition(
                    "分類には撮影済み画像が必要です",
                ));
            }
        };
        self.state = CaptureState::Analyzing {
            image: image.clone(),
        };

        let pending = self.location_task.take();
        let (analysis, location) = tokio::join!(
            self.analyzer.analyze(&image),
            resolve_or_fallback(pending),
        );
        self.location = Some(location);

        match analysis {
            Ok(items) => {
                self.state = CaptureState::Reviewed { image, items };
                Ok(())
            }
            Err(e) => {
                // 失敗時は撮影済みに戻す（再分類できる）
                self.state = CaptureState::Captured { image };
                Err(e)
            }
        }
    }

    /// Reviewed → Idle: 検出レコードを構築して追記保存
    ///
    /// ユーザー不在なら `AuthRequired` を返してレビュー状態に留まる。
    /// 保存は全件 read-modify-write の追記で、途中状態を残さない。
    /// 書き込み失敗時もレビュー状態に戻る（何も書かれない）。
    pub fn save(&mut self, user: Option<&User>) -> Result<SaveOutcome> {
        let (image, items) = match std::mem::replace(&mut self.state, CaptureState::Idle) {
            CaptureState::Reviewed { image, items } => (image, items),
            other => {
                self.state = other;
                return Err(LitterLogError::InvalidTransition(
                    "保存はレビュー済み状態からのみ可能です",
                ));
            }
        };

        let Some(user) = user else {
            self.state = CaptureState::Reviewed { image, items };
            return Ok(SaveOutcome::AuthRequired);
        };

        let location = self
            .location
            .clone()
            .unwrap_or_else(GeoPosition::fallback);

        let detection = Detection::new(
            Uuid::new_v4().to_string(),
            image.clone(),
            items.clone(),
            location,
            Utc::now().to_rfc3339(),
            user.id.clone(),
        );
        let id = detection.id.clone();
        let total_items = detection.total_items;

        let mut all = self.store.load();
        all.push(detection);
        match self.store.save(&all) {
            Ok(()) => {
                self.clear_held();
                Ok(SaveOutcome::Saved { id, total_items })
            }
            Err(e) => {
                self.state = CaptureState::Reviewed { image, items };
                Err(e)
            }
        }
    }

    /// Reviewed → Idle: 保存せずに破棄（撮り直し）
    pub fn retake(&mut self) -> Result<()> {
        if !matches!(self.state, CaptureState::Reviewed { .. }) {
            return Err(LitterLogError::InvalidTransition(
                "撮り直しはレビュー済み状態からのみ可能です",
            ));
        }
        self.state = CaptureState::Idle;
        self.clear_held();
        Ok(())
    }

    fn clear_held(&mut self) {
        self.location = None;
        if let Some(task) = self.location_task.take() {
            task.abort();
        }
    }
}

/// 位置取得タスクの完了を待つ。未開始・中断時はフォールバック
async fn resolve_or_fallback(pending: Option<JoinHandle<GeoPosition>>) -> GeoPosition {
    match pending {
        Some(handle) => handle.await.unwrap_or_else(|_| GeoPosition::fallback()),
        None => GeoPosition::fallback(),
    }
}

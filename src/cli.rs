use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "litter-log")]
#[command(about = "プラスチックごみ撮影記録・分類ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// ログインユーザーID（設定ファイルより優先）
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// ユーザー表示名
    #[arg(long, global = true)]
    pub user_name: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 撮影から保存までのワークフローを実行
    Capture {
        /// カメラの代わりに使う画像ファイル（省略時は合成フレーム）
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// 解析の模擬遅延（ミリ秒、デフォルトは設定値）
        #[arg(long)]
        delay_ms: Option<u64>,

        /// 確認プロンプトなしで保存まで実行
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// 保存済みの検出レコードを一覧表示
    History {
        /// 表示件数の上限
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// 検出レコードをJSONファイルにエクスポート
    Export {
        /// 出力ファイル（デフォルト: plastic-litter-detections.json）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 検出レコードの集計を表示
    Stats {
        /// 全ユーザーを対象にする（デフォルトはログインユーザーのみ）
        #[arg(long)]
        all_users: bool,
    },

    /// 設定の表示・変更
    Config {
        /// ログインユーザーIDを設定
        #[arg(long)]
        set_user: Option<String>,

        /// ユーザー表示名を設定
        #[arg(long)]
        set_user_name: Option<String>,

        /// 検出レコードの保存先を設定
        #[arg(long)]
        set_storage: Option<PathBuf>,

        /// 端末座標を設定（"緯度,経度" 形式）
        #[arg(long)]
        set_coordinates: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

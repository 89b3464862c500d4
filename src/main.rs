use clap::Parser;
use dialoguer::{Confirm, Input, Select};
use indicatif::ProgressBar;
use litter_log_rust::auth::{AuthProvider, StaticAuth};
use litter_log_rust::cli::{Cli, Commands};
use litter_log_rust::config::Config;
use litter_log_rust::error::{LitterLogError, Result};
use litter_log_rust::store::{DetectionStore, JsonFileStore};
use litter_log_rust::workflow::{CaptureWorkflow, SaveOutcome};
use litter_log_rust::{analyzer, camera, export, location};
use litter_log_common::{stats, GeoPosition, User};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let auth = StaticAuth::from_parts(
        cli.user.clone().or_else(|| config.user_id.clone()),
        cli.user_name.clone().or_else(|| config.user_name.clone()),
    );

    match cli.command {
        Commands::Capture {
            image,
            delay_ms,
            yes,
        } => {
            println!("📸 litter-log - プラスチックごみ検出\n");
            if auth.current_user().is_none() {
                println!("📌 未ログインです。保存時にログインを求められます\n");
            }

            match image {
                Some(path) => {
                    run_capture(
                        camera::FileCamera::new(path),
                        &config,
                        &auth,
                        delay_ms,
                        yes,
                        cli.verbose,
                    )
                    .await?
                }
                None => {
                    run_capture(
                        camera::SyntheticCamera::default(),
                        &config,
                        &auth,
                        delay_ms,
                        yes,
                        cli.verbose,
                    )
                    .await?
                }
            }
        }

        Commands::History { limit } => {
            let user = require_user(&auth)?;
            let detection_store = JsonFileStore::new(config.detections_path()?);
            let records = detection_store.load();
            let user_records = stats::for_user(&records, &user.id);

            println!("📋 保存済み検出: {}件\n", user_records.len());

            if user_records.is_empty() {
                println!("保存済みの検出はまだありません。`litter-log capture` から始めてください");
                return Ok(());
            }

            let shown = limit.unwrap_or(user_records.len());
            for (index, detection) in user_records.iter().take(shown).enumerate() {
                let address = detection
                    .location
                    .address
                    .as_deref()
                    .unwrap_or("Unknown Location");
                println!(
                    "[{}] {}  合計{}個  @ {}",
                    index + 1,
                    format_date(&detection.date),
                    detection.total_items,
                    address
                );
                let items = detection
                    .items
                    .iter()
                    .map(|item| format!("{} {}", item.count, item.item_type.label()))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("    {}", items);
            }

            if shown < user_records.len() {
                println!("\n... 他{}件", user_records.len() - shown);
            }
        }

        Commands::Export { output } => {
            println!("📄 litter-log - エクスポート\n");

            let user = require_user(&auth)?;
            let detection_store = JsonFileStore::new(config.detections_path()?);
            let records = detection_store.load();

            if stats::for_user(&records, &user.id).is_empty() {
                return Err(LitterLogError::NoDetections(user.id));
            }

            let output = output.unwrap_or_else(export::default_export_path);
            let written = export::export_detections(&records, &user.id, &output)?;
            println!("✔ {}件を書き出しました: {}", written, output.display());
        }

        Commands::Stats { all_users } => {
            let detection_store = JsonFileStore::new(config.detections_path()?);
            let records = detection_store.load();

            let (scoped, scope_label): (Vec<_>, String) = if all_users {
                (records.iter().collect(), "全ユーザー".to_string())
            } else {
                let user = require_user(&auth)?;
                (
                    stats::for_user(&records, &user.id),
                    format!("ユーザー: {}", user.name),
                )
            };
            let scoped: Vec<_> = scoped.into_iter().cloned().collect();

            println!("📊 検出統計 ({})\n", scope_label);
            println!("  検出回数: {}回", scoped.len());
            println!("  合計個数: {}個\n", stats::total_items(&scoped));

            println!("種類別:");
            for (plastic_type, count) in stats::counts_by_type(&scoped) {
                println!("  {:<20} {}個", plastic_type.label(), count);
            }

            println!("\n直近7日間:");
            let today = chrono::Utc::now().date_naive();
            for (day, count) in stats::daily_counts(&scoped, 7, today) {
                println!("  {}  {}件", day, count);
            }
        }

        Commands::Config {
            set_user,
            set_user_name,
            set_storage,
            set_coordinates,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(user_id) = set_user {
                config.user_id = Some(user_id);
                changed = true;
            }
            if let Some(name) = set_user_name {
                config.user_name = Some(name);
                changed = true;
            }
            if let Some(path) = set_storage {
                config.storage_path = Some(path);
                changed = true;
            }
            if let Some(coords) = set_coordinates {
                let (latitude, longitude) = parse_coordinates(&coords)?;
                config.device_latitude = Some(latitude);
                config.device_longitude = Some(longitude);
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  保存先: {}", config.detections_path()?.display());
                println!(
                    "  ユーザー: {}",
                    config.user_id.as_deref().unwrap_or("未設定")
                );
                println!(
                    "  表示名: {}",
                    config.user_name.as_deref().unwrap_or("未設定")
                );
                println!("  解析遅延: {}ms", config.analysis_delay_ms);
                match config.device_coordinates() {
                    Some((latitude, longitude)) => {
                        println!("  端末座標: ({}, {})", latitude, longitude)
                    }
                    None => println!("  端末座標: 未設定（フォールバック座標を使用）"),
                }
            }
        }
    }

    Ok(())
}

/// 撮影から保存までのワークフローを対話的に実行
async fn run_capture<C: camera::Camera>(
    device: C,
    config: &Config,
    auth: &StaticAuth,
    delay_ms: Option<u64>,
    yes: bool,
    verbose: bool,
) -> Result<()> {
    let locator = location::DeviceLocator::new(config.device_coordinates());
    let delay = Duration::from_millis(delay_ms.unwrap_or(config.analysis_delay_ms));
    let characterizer = analyzer::SimulatedCharacterizer::new(delay);
    let detection_store = JsonFileStore::new(config.detections_path()?);
    let mut workflow = CaptureWorkflow::new(device, locator, characterizer, detection_store);

    println!("[1/4] カメラを起動中...");
    workflow.start()?;
    println!("✔ カメラ起動\n");

    println!("[2/4] 撮影中...");
    workflow.capture()?;
    println!("✔ 撮影完了（カメラ解放、位置取得を開始）\n");
    if verbose {
        if let Some(image) = workflow.held_image() {
            println!("  画像ペイロード: {} bytes", image.len());
        }
    }

    println!("[3/4] AI分類中...");
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("解析しています...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    workflow.characterize().await?;
    spinner.finish_and_clear();

    let total = workflow.reviewed_total().unwrap_or(0);
    println!("✔ 分類完了: 合計{}個を検出\n", total);
    if let Some(items) = workflow.reviewed_items() {
        for item in items {
            println!("  - {:<20} {}個", item.item_type.label(), item.count);
        }
    }
    if let Some(position) = workflow.location() {
        println!(
            "  位置: {} ({:.4}, {:.4})",
            position.address.as_deref().unwrap_or("-"),
            position.latitude,
            position.longitude
        );
    }
    println!();

    println!("[4/4] レビュー");
    let save_requested = if yes {
        true
    } else {
        let choice = Select::new()
            .with_prompt("この検出結果をどうしますか？")
            .items(&["保存", "撮り直し（破棄）"])
            .default(0)
            .interact()
            .map_err(|e| LitterLogError::Prompt(e.to_string()))?;
        choice == 0
    };

    if !save_requested {
        workflow.retake()?;
        println!("撮り直しのため破棄しました");
        return Ok(());
    }

    let mut user = auth.current_user();
    loop {
        match workflow.save(user.as_ref())? {
            SaveOutcome::Saved { id, total_items } => {
                println!("\n✅ 検出を保存しました (ID: {}, 合計{}個)", id, total_items);
                break;
            }
            SaveOutcome::AuthRequired => {
                println!("\n📌 保存にはログインが必要です");
                if yes {
                    println!("保存せずに終了します（レコードは書き込まれません）");
                    break;
                }
                let wants_login = Confirm::new()
                    .with_prompt("ログインしますか？")
                    .default(true)
                    .interact()
                    .map_err(|e| LitterLogError::Prompt(e.to_string()))?;
                if !wants_login {
                    println!("保存せずに終了します（レコードは書き込まれません）");
                    break;
                }
                let user_id: String = Input::new()
                    .with_prompt("ユーザーID")
                    .interact_text()
                    .map_err(|e| LitterLogError::Prompt(e.to_string()))?;
                user = StaticAuth::from_parts(Some(user_id), None).current_user();
            }
        }
    }

    Ok(())
}

fn require_user(auth: &StaticAuth) -> Result<User> {
    auth.current_user().ok_or(LitterLogError::AuthRequired)
}

fn format_date(date: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(date)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// "緯度,経度" 形式の座標指定をパース
fn parse_coordinates(value: &str) -> Result<(f64, f64)> {
    let (lat_str, lon_str) = value
        .split_once(',')
        .ok_or_else(|| LitterLogError::Config(format!("座標は \"緯度,経度\" 形式で指定してください: {}", value)))?;
    let latitude: f64 = lat_str
        .trim()
        .parse()
        .map_err(|_| LitterLogError::Config(format!("緯度が数値ではありません: {}", lat_str)))?;
    let longitude: f64 = lon_str
        .trim()
        .parse()
        .map_err(|_| LitterLogError::Config(format!("経度が数値ではありません: {}", lon_str)))?;
    // 範囲チェックは共通型の検証に任せる
    GeoPosition::new(latitude, longitude, None)
        .map_err(|e| LitterLogError::Config(e.to_string()))?;
    Ok((latitude, longitude))
}

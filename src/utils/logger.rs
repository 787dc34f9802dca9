use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 建立帶時間戳記的日誌檔路徑，例如 logs/emotion_analysis_20250101_120000.log
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    log_dir.join(format!("emotion_analysis_{}.log", timestamp))
}

fn open_log_file(log_dir: &Path) -> std::io::Result<(PathBuf, File)> {
    fs::create_dir_all(log_dir)?;
    let path = log_file_path(log_dir);
    let file = File::create(&path)?;
    Ok((path, file))
}

pub fn init_cli_logger(verbose: bool, json: bool, log_dir: Option<&Path>) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("emotion_analysis=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("emotion_analysis=info"))
    };

    let console = if json {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .json()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .boxed()
    };

    // 檔案日誌失敗時只輸出到主控台
    let mut file_error = None;
    let file_layer = log_dir.and_then(|dir| match open_log_file(dir) {
        Ok((path, file)) => Some((path, file)),
        Err(e) => {
            file_error = Some((dir.to_path_buf(), e));
            None
        }
    });
    let (file_path, file_layer) = match file_layer {
        Some((path, file)) => (
            Some(path),
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            ),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    if let Some(path) = file_path {
        tracing::info!("📝 Writing logs to {}", path.display());
    }
    if let Some((dir, e)) = file_error {
        tracing::warn!("Could not create log file in {}: {}", dir.display(), e);
    }
}

use clap::Parser;
use emotion_analysis::app::runner::{build_analyzer, run_batch};
use emotion_analysis::config::toml_config::TomlConfig;
use emotion_analysis::utils::error::{AnalysisError, ErrorSeverity};
use emotion_analysis::utils::{logger, validation::Validate};
use emotion_analysis::{AnalysisSettings, CliConfig, OpenAiCompatClient};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 載入設定檔（選填）
    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let settings = match AnalysisSettings::resolve(file_config.as_ref(), &cli.overrides()) {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.json_logs, Some(Path::new(&settings.log_dir)));

    tracing::info!("Starting emotion-analysis ({} approach)", settings.approach);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        exit_with(e);
    }

    if settings.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let client = match OpenAiCompatClient::new(&settings.api) {
        Ok(client) => client,
        Err(e) => exit_with(e),
    };
    tracing::info!("🌐 Model endpoint: {} ({})", client.endpoint(), settings.api.model);

    // 提示詞缺少時整個流程中止
    let analyzer = match build_analyzer(settings.approach, client, Path::new(&settings.prompts_path)) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            tracing::error!("❌ Failed to load prompts: {}", e);
            exit_with(e);
        }
    };

    match run_batch(&settings, analyzer.as_ref()).await {
        Ok(summary) => {
            tracing::debug!("Batch summary: {}", summary.to_json());
            println!("✅ Analysis finished");
            println!("📄 Documents: {}", summary.documents_seen);
            println!("💾 Saved: {}", summary.saved.len());
            for skipped in &summary.skipped {
                println!("⏭️ Skipped {}: {}", skipped.file_name, skipped.reason);
            }
            println!("📁 Output folder: {}", settings.output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Batch failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            exit_with(e);
        }
    }

    Ok(())
}

fn exit_with(e: AnalysisError) -> ! {
    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}

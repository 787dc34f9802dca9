use crate::adapters::storage::LocalStorage;
use crate::config::prompts::{load_system_prompt, StagePrompts};
use crate::core::batch::BatchRunner;
use crate::core::single::SinglePromptAnalyzer;
use crate::core::staged::SeparateAnalyzer;
use crate::domain::model::{Approach, BatchSummary};
use crate::domain::ports::{Analyzer, ChatClient, ConfigProvider};
use crate::utils::error::Result;
use std::path::Path;

/// 依分析方式載入提示詞並建立分析器；提示詞缺少時直接回傳錯誤
pub fn build_analyzer<C: ChatClient + 'static>(
    approach: Approach,
    client: C,
    prompts_path: &Path,
) -> Result<Box<dyn Analyzer>> {
    match approach {
        Approach::Single => {
            let system_prompt = load_system_prompt(prompts_path)?;
            Ok(Box::new(SinglePromptAnalyzer::new(client, system_prompt)))
        }
        Approach::Separate => {
            let prompts = StagePrompts::load(prompts_path)?;
            Ok(Box::new(SeparateAnalyzer::new(client, prompts)))
        }
    }
}

/// 以設定中的輸入／輸出資料夾執行批次分析
pub async fn run_batch<C: ConfigProvider>(
    config: &C,
    analyzer: &dyn Analyzer,
) -> Result<BatchSummary> {
    tracing::info!(
        "🧭 Approach: {} (prompts from {})",
        config.approach(),
        config.prompts_path()
    );
    tracing::info!("📂 Processing input folder: {}", config.input_path());
    tracing::info!("📁 Output folder: {}", config.output_path());
    tokio::fs::create_dir_all(config.output_path()).await?;

    // 輸入資料夾不存在時視為沒有文件，正常結束
    let input_exists = tokio::fs::metadata(config.input_path())
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    if !input_exists {
        tracing::warn!(
            "⚠️ Input folder {} does not exist; nothing to analyze",
            config.input_path()
        );
        return Ok(BatchSummary::default());
    }

    let input = LocalStorage::new(config.input_path());
    let output = LocalStorage::new(config.output_path());

    let runner =
        BatchRunner::new_with_monitoring(analyzer, input, output, config.monitor_enabled());
    runner.run().await
}

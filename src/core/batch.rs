use crate::domain::model::{BatchSummary, Document, SkipReason, SkippedDocument};
use crate::domain::ports::{Analyzer, Storage};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use serde_json::Value;
use std::path::Path;
use std::time::Instant;

pub const INPUT_EXTENSION: &str = "txt";

/// 批次處理：逐一讀取輸入資料夾的 .txt，分析後各自寫出 <stem>.json
///
/// 文件依序處理（讀取 → 分析 → 寫出），任一步驟失敗只略過該文件，不會中止整個批次。
pub struct BatchRunner<'a, I: Storage, O: Storage> {
    analyzer: &'a dyn Analyzer,
    input: I,
    output: O,
    monitor: SystemMonitor,
}

impl<'a, I: Storage, O: Storage> BatchRunner<'a, I, O> {
    pub fn new(analyzer: &'a dyn Analyzer, input: I, output: O) -> Self {
        Self::new_with_monitoring(analyzer, input, output, false)
    }

    pub fn new_with_monitoring(
        analyzer: &'a dyn Analyzer,
        input: I,
        output: O,
        monitor_enabled: bool,
    ) -> Self {
        Self {
            analyzer,
            input,
            output,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<BatchSummary> {
        let started = Instant::now();
        let mut summary = BatchSummary::default();

        let files = self.input.list_files(INPUT_EXTENSION).await?;
        tracing::info!(
            "🚀 Processing {} document(s) with the {} analyzer",
            files.len(),
            self.analyzer.name()
        );
        self.monitor.log_stats("Batch started");

        let total = files.len();
        for file_name in files {
            summary.documents_seen += 1;
            tracing::info!("📄 Processing file {}/{}: {}", summary.documents_seen, total, file_name);

            match self.process_document(&file_name).await {
                Ok(saved_as) => {
                    tracing::info!("💾 Analysis saved to {}", saved_as);
                    summary.saved.push(saved_as);
                }
                Err(reason) => {
                    tracing::warn!("⏭️ Skipping {} due to {}", file_name, reason);
                    summary.skipped.push(SkippedDocument {
                        file_name: file_name.clone(),
                        reason,
                    });
                }
            }

            self.monitor.log_stats(&format!("After {}", file_name));
        }

        summary.duration = started.elapsed();
        self.monitor.log_final_stats(summary.documents_seen);
        tracing::info!(
            "✅ Batch finished: {} saved, {} skipped, {:?}",
            summary.saved.len(),
            summary.skipped.len(),
            summary.duration
        );

        Ok(summary)
    }

    async fn process_document(&self, file_name: &str) -> std::result::Result<String, SkipReason> {
        let document = self.read_document(file_name).await?;

        let result = self
            .analyzer
            .analyze(&document.text)
            .await
            .map_err(|e| SkipReason::AnalysisFailed(e.to_string()))?;

        self.persist(&document, &result).await
    }

    async fn read_document(&self, file_name: &str) -> std::result::Result<Document, SkipReason> {
        let bytes = self
            .input
            .read_file(file_name)
            .await
            .map_err(|e| SkipReason::ReadFailed(e.to_string()))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| SkipReason::ReadFailed(format!("invalid UTF-8: {}", e)))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(SkipReason::EmptyText);
        }

        Ok(Document::new(document_stem(file_name), text))
    }

    async fn persist(
        &self,
        document: &Document,
        result: &Value,
    ) -> std::result::Result<String, SkipReason> {
        let output_name = document.output_file_name();
        let bytes = serde_json::to_vec_pretty(result)
            .map_err(|e| SkipReason::WriteFailed(e.to_string()))?;

        self.output
            .write_file(&output_name, &bytes)
            .await
            .map_err(|e| SkipReason::WriteFailed(e.to_string()))?;

        Ok(output_name)
    }
}

fn document_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
        .to_string()
}

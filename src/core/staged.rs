use crate::config::prompts::StagePrompts;
use crate::core::response::parse_model_json;
use crate::domain::model::{Stage, StageRecord};
use crate::domain::ports::{Analyzer, ChatClient};
use crate::utils::error::Result;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

/// 四階段完整執行結果
#[derive(Debug, Clone)]
pub struct StageChain {
    pub stages: Vec<StageRecord>,
}

impl StageChain {
    pub fn final_result(&self) -> Option<&Value> {
        self.stages
            .iter()
            .find(|record| record.stage == Stage::Output)
            .map(|record| &record.value)
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|record| record.duration).sum()
    }
}

/// 分階段分析器：情緒 → 主題 → adorescore → 最終輸出
///
/// 每個階段是一次獨立的 API 呼叫，後面的階段以前面階段的結果為輸入。
/// 任一階段失敗即停止，不保留部分結果。
pub struct SeparateAnalyzer<C: ChatClient> {
    client: C,
    prompts: StagePrompts,
}

impl<C: ChatClient> SeparateAnalyzer<C> {
    pub fn new(client: C, prompts: StagePrompts) -> Self {
        Self { client, prompts }
    }

    async fn call_stage(&self, stage: Stage, user_content: &str) -> Result<Value> {
        let raw = self
            .client
            .complete(self.prompts.get(stage), user_content)
            .await
            .map_err(|e| e.in_stage(stage))?;

        parse_model_json(&raw).map_err(|e| {
            tracing::error!("{}", e);
            e.in_stage(stage)
        })
    }

    pub async fn analyze_emotions(&self, text: &str) -> Result<Value> {
        tracing::info!("🎭 Analyzing emotions");
        self.call_stage(Stage::Emotion, text).await
    }

    pub async fn analyze_topics(&self, text: &str) -> Result<Value> {
        tracing::info!("🏷️ Analyzing topics");
        self.call_stage(Stage::Topic, text).await
    }

    /// 以原文加上主題分析結果計算 adorescore
    pub async fn calculate_adorescore(&self, text: &str, topics: &Value) -> Result<Value> {
        tracing::info!("🧮 Calculating adorescores");
        let combined_input = serde_json::to_string(&json!({
            "text": text,
            "topics": topics,
        }))?;
        self.call_stage(Stage::Adorescore, &combined_input).await
    }

    /// 合併三個階段的結果產生最終輸出
    pub async fn generate_final_output(
        &self,
        emotions: &Value,
        topics: &Value,
        adorescore: &Value,
    ) -> Result<Value> {
        tracing::info!("🧾 Generating final output");
        let combined_input = serde_json::to_string(&json!({
            "emotion_analysis": emotions,
            "topic_analysis": topics,
            "adorescore_analysis": adorescore,
        }))?;
        self.call_stage(Stage::Output, &combined_input).await
    }

    /// 依序執行四個階段，任何一個失敗就中止
    pub async fn run_chain(&self, text: &str) -> Result<StageChain> {
        let mut stages = Vec::with_capacity(Stage::ALL.len());

        let started = Instant::now();
        let emotions = self
            .analyze_emotions(text)
            .await
            .inspect_err(|_| log_abort(Stage::Emotion, &stages))?;
        stages.push(record(Stage::Emotion, &emotions, started));

        let started = Instant::now();
        let topics = self
            .analyze_topics(text)
            .await
            .inspect_err(|_| log_abort(Stage::Topic, &stages))?;
        stages.push(record(Stage::Topic, &topics, started));

        let started = Instant::now();
        let adorescore = self
            .calculate_adorescore(text, &topics)
            .await
            .inspect_err(|_| log_abort(Stage::Adorescore, &stages))?;
        stages.push(record(Stage::Adorescore, &adorescore, started));

        let started = Instant::now();
        let output = self
            .generate_final_output(&emotions, &topics, &adorescore)
            .await
            .inspect_err(|_| log_abort(Stage::Output, &stages))?;
        stages.push(record(Stage::Output, &output, started));

        let chain = StageChain { stages };
        tracing::debug!("Stage chain finished in {:?}", chain.total_duration());
        Ok(chain)
    }
}

fn record(stage: Stage, value: &Value, started: Instant) -> StageRecord {
    let duration = started.elapsed();
    tracing::debug!("✅ {} stage finished in {:?}", stage, duration);
    StageRecord {
        stage,
        value: value.clone(),
        duration,
    }
}

fn log_abort(failed: Stage, completed: &[StageRecord]) {
    let done: Vec<&str> = completed.iter().map(|r| r.stage.key()).collect();
    tracing::warn!(
        "⛔ {} stage failed; discarding completed stages [{}]",
        failed,
        done.join(", ")
    );
}

#[async_trait::async_trait]
impl<C: ChatClient> Analyzer for SeparateAnalyzer<C> {
    async fn analyze(&self, text: &str) -> Result<Value> {
        let chain = self.run_chain(text).await?;
        Ok(chain.final_result().cloned().unwrap_or(Value::Null))
    }

    fn name(&self) -> &str {
        "separate"
    }
}

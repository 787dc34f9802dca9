use crate::core::response::parse_model_json;
use crate::domain::ports::{Analyzer, ChatClient};
use crate::utils::error::Result;
use serde_json::Value;

/// 單一提示詞分析器：一次 API 呼叫取得完整分析
pub struct SinglePromptAnalyzer<C: ChatClient> {
    client: C,
    system_prompt: String,
}

impl<C: ChatClient> SinglePromptAnalyzer<C> {
    pub fn new(client: C, system_prompt: String) -> Self {
        Self {
            client,
            system_prompt,
        }
    }

    pub async fn analyze_text(&self, text: &str) -> Result<Value> {
        let raw = self.client.complete(&self.system_prompt, text).await?;
        let parsed = parse_model_json(&raw).inspect_err(|e| {
            tracing::error!("{}", e);
        })?;
        tracing::info!("✅ Successfully parsed JSON response");
        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl<C: ChatClient> Analyzer for SinglePromptAnalyzer<C> {
    async fn analyze(&self, text: &str) -> Result<Value> {
        self.analyze_text(text).await
    }

    fn name(&self) -> &str {
        "single"
    }
}

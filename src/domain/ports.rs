use crate::domain::model::Approach;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 列出指定副檔名的檔案名稱（依名稱排序）
    fn list_files(
        &self,
        extension: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn approach(&self) -> Approach;
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn prompts_path(&self) -> &str;
    fn monitor_enabled(&self) -> bool;
}

/// Chat completion 風格的模型 API
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_content: &str) -> Result<String>;
}

#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<Value>;

    fn name(&self) -> &str;
}

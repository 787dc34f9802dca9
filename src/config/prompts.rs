use crate::domain::model::Stage;
use crate::utils::error::{AnalysisError, Result};
use std::collections::HashMap;
use std::path::Path;

pub const SINGLE_PROMPT_FILE: &str = "system_prompt.txt";

/// 讀取單一提示詞檔案；找不到檔案時整個流程中止
pub fn load_prompt_file(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            tracing::info!("📄 Loaded prompt from {}", path.display());
            Ok(content)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::error!("Prompt file not found: {}", path.display());
            Err(AnalysisError::PromptNotFoundError {
                path: path.display().to_string(),
            })
        }
        Err(e) => Err(AnalysisError::IoError(e)),
    }
}

/// 單一提示詞方式使用的系統提示詞
pub fn load_system_prompt(prompts_dir: &Path) -> Result<String> {
    load_prompt_file(&prompts_dir.join(SINGLE_PROMPT_FILE))
}

/// 四階段提示詞，啟動時一次載入
#[derive(Debug, Clone)]
pub struct StagePrompts {
    prompts: HashMap<Stage, String>,
}

impl StagePrompts {
    pub fn load(prompts_dir: &Path) -> Result<Self> {
        let mut prompts = HashMap::new();
        for stage in Stage::ALL {
            let content = load_prompt_file(&prompts_dir.join(stage.prompt_file()))?;
            prompts.insert(stage, content);
        }
        Ok(Self { prompts })
    }

    pub fn from_map(prompts: HashMap<Stage, String>) -> Result<Self> {
        for stage in Stage::ALL {
            if !prompts.contains_key(&stage) {
                return Err(AnalysisError::PromptNotFoundError {
                    path: stage.prompt_file().to_string(),
                });
            }
        }
        Ok(Self { prompts })
    }

    pub fn get(&self, stage: Stage) -> &str {
        // from_map/load 已確保四個階段都存在
        self.prompts.get(&stage).map(String::as_str).unwrap_or_default()
    }
}

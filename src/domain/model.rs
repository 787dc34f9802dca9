use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// 一份待分析的回饋文字，以檔名（不含副檔名）識別
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub stem: String,
    pub text: String,
}

impl Document {
    pub fn new(stem: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            text: text.into(),
        }
    }

    pub fn output_file_name(&self) -> String {
        format!("{}.json", self.stem)
    }
}

/// 分析方式：單一提示詞或四階段提示詞
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Approach {
    Single,
    Separate,
}

impl Approach {
    pub fn default_prompts_path(&self) -> &'static str {
        match self {
            Approach::Single => "SinglePromptApproach/prompt",
            Approach::Separate => "SeparateApproach/prompts",
        }
    }

    pub fn default_output_path(&self) -> &'static str {
        match self {
            Approach::Single => "./SinglePromptApproach/output",
            Approach::Separate => "./SeparateApproach/output",
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Approach::Single => write!(f, "single"),
            Approach::Separate => write!(f, "separate"),
        }
    }
}

/// 四階段流程中的一個階段，依執行順序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Emotion,
    Topic,
    Adorescore,
    Output,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Emotion, Stage::Topic, Stage::Adorescore, Stage::Output];

    pub fn key(&self) -> &'static str {
        match self {
            Stage::Emotion => "emotion",
            Stage::Topic => "topic",
            Stage::Adorescore => "adorescore",
            Stage::Output => "output",
        }
    }

    pub fn prompt_file(&self) -> &'static str {
        match self {
            Stage::Emotion => "EmotionDetection.txt",
            Stage::Topic => "TopicAnalysis.txt",
            Stage::Adorescore => "Adorescore.txt",
            Stage::Output => "OutputGenerator.txt",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 單一階段的執行紀錄
#[derive(Debug, Clone)]
pub struct StageRecord {
    pub stage: Stage,
    pub value: serde_json::Value,
    pub duration: Duration,
}

/// 文件被略過的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    ReadFailed(String),
    EmptyText,
    AnalysisFailed(String),
    WriteFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ReadFailed(e) => write!(f, "read error: {}", e),
            SkipReason::EmptyText => write!(f, "empty document"),
            SkipReason::AnalysisFailed(e) => write!(f, "analysis error: {}", e),
            SkipReason::WriteFailed(e) => write!(f, "write error: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub file_name: String,
    pub reason: SkipReason,
}

/// 批次執行摘要
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub documents_seen: usize,
    pub saved: Vec<String>,
    pub skipped: Vec<SkippedDocument>,
    pub duration: Duration,
}

impl BatchSummary {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "documents_seen": self.documents_seen,
            "saved": self.saved,
            "skipped": self
                .skipped
                .iter()
                .map(|s| serde_json::json!({ "file": s.file_name, "reason": s.reason.to_string() }))
                .collect::<Vec<_>>(),
            "duration_ms": self.duration.as_millis() as u64,
        })
    }
}

pub mod prompts;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::Approach;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use settings::SettingsOverrides;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "emotion-analysis")]
#[command(about = "Batch emotion, topic and adorescore analysis of feedback text")]
pub struct CliConfig {
    /// Analysis approach: one combined prompt or four chained prompts
    #[arg(long, value_enum)]
    pub approach: Option<Approach>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Folder containing .txt feedback documents
    #[arg(long)]
    pub input_path: Option<String>,

    /// Folder receiving one .json result per document
    #[arg(long)]
    pub output_path: Option<String>,

    /// Folder holding the prompt templates
    #[arg(long)]
    pub prompts_path: Option<String>,

    #[arg(long)]
    pub api_base_url: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Folder for the timestamped log file (default: logs)
    #[arg(long)]
    pub log_dir: Option<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU and memory usage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            approach: self.approach,
            base_url: self.api_base_url.clone(),
            model: self.model.clone(),
            timeout_seconds: self.timeout_seconds,
            input_path: self.input_path.clone(),
            output_path: self.output_path.clone(),
            prompts_path: self.prompts_path.clone(),
            log_dir: self.log_dir.clone(),
            monitor: self.monitor,
        }
    }
}

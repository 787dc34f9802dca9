pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{llm::OpenAiCompatClient, storage::LocalStorage};
pub use app::dashboard::DashboardView;
pub use config::settings::AnalysisSettings;
pub use core::{
    batch::BatchRunner, single::SinglePromptAnalyzer, staged::SeparateAnalyzer,
};
pub use utils::error::{AnalysisError, Result};

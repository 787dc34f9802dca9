use crate::domain::model::Stage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Prompt file not found: {path}")]
    PromptNotFoundError { path: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("API response contained no completion text")]
    EmptyCompletionError,

    #[error("Error parsing JSON response: {source} (content: {content})")]
    ResponseParseError {
        #[source]
        source: serde_json::Error,
        content: String,
    },

    #[error("Model returned an empty result")]
    EmptyResultError,

    #[error("{stage} stage failed: {source}")]
    StageError {
        stage: Stage,
        #[source]
        source: Box<AnalysisError>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Parsing,
    Io,
    Pipeline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AnalysisError {
    /// 包裝為指定階段的錯誤
    pub fn in_stage(self, stage: Stage) -> Self {
        AnalysisError::StageError {
            stage,
            source: Box::new(self),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalysisError::ConfigValidationError { .. }
            | AnalysisError::MissingConfigError { .. }
            | AnalysisError::InvalidConfigValueError { .. }
            | AnalysisError::PromptNotFoundError { .. } => ErrorCategory::Configuration,
            AnalysisError::ApiError(_)
            | AnalysisError::ApiStatusError { .. }
            | AnalysisError::EmptyCompletionError => ErrorCategory::Network,
            AnalysisError::ResponseParseError { .. }
            | AnalysisError::EmptyResultError
            | AnalysisError::SerializationError(_) => ErrorCategory::Parsing,
            AnalysisError::IoError(_) => ErrorCategory::Io,
            AnalysisError::StageError { .. } => ErrorCategory::Pipeline,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單一文件失敗只會被略過
            AnalysisError::EmptyResultError => ErrorSeverity::Low,
            AnalysisError::ApiError(_)
            | AnalysisError::ApiStatusError { .. }
            | AnalysisError::EmptyCompletionError => ErrorSeverity::Medium,
            AnalysisError::ResponseParseError { .. }
            | AnalysisError::SerializationError(_)
            | AnalysisError::StageError { .. } => ErrorSeverity::High,
            AnalysisError::ConfigValidationError { .. }
            | AnalysisError::MissingConfigError { .. }
            | AnalysisError::InvalidConfigValueError { .. }
            | AnalysisError::PromptNotFoundError { .. }
            | AnalysisError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AnalysisError::PromptNotFoundError { .. } => {
                "Check --prompts-path; every prompt template must exist before the run starts"
                    .to_string()
            }
            AnalysisError::MissingConfigError { field } => {
                format!("Set {} in the environment or in a local .env file", field)
            }
            AnalysisError::ApiError(_) => {
                "Check network connectivity and the API base URL".to_string()
            }
            AnalysisError::ApiStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Check that the API key is valid for this endpoint".to_string()
            }
            AnalysisError::ApiStatusError { status, .. } if *status == 429 => {
                "The API rate limit was hit; wait before running again".to_string()
            }
            AnalysisError::ApiStatusError { .. } | AnalysisError::EmptyCompletionError => {
                "Check the model name and try again later".to_string()
            }
            AnalysisError::ResponseParseError { .. } | AnalysisError::EmptyResultError => {
                "Review the prompt template; the model must answer with a JSON object".to_string()
            }
            AnalysisError::StageError { source, .. } => source.recovery_suggestion(),
            AnalysisError::ConfigValidationError { .. }
            | AnalysisError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags".to_string()
            }
            AnalysisError::IoError(_) => {
                "Check that the input and output directories exist and are accessible".to_string()
            }
            AnalysisError::SerializationError(_) => {
                "Inspect the model output; it could not be re-encoded as JSON".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AnalysisError::PromptNotFoundError { path } => {
                format!("Prompt template is missing: {}", path)
            }
            AnalysisError::MissingConfigError { field } => {
                format!("Required setting {} is not set", field)
            }
            AnalysisError::ApiError(_) | AnalysisError::ApiStatusError { .. } => {
                "Could not reach the analysis API".to_string()
            }
            AnalysisError::StageError { stage, .. } => {
                format!("Analysis failed during the {} stage", stage)
            }
            AnalysisError::ResponseParseError { .. } | AnalysisError::EmptyResultError => {
                "The model did not return usable JSON".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

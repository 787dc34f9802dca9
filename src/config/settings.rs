use crate::config::toml_config::{has_unresolved_placeholder, TomlConfig};
use crate::domain::model::Approach;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AnalysisError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_INPUT_PATH: &str = "inputs";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Option<Duration>,
}

/// 合併預設值、設定檔、命令列參數後的最終設定
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub approach: Approach,
    pub api: ApiSettings,
    pub api_key_env: String,
    pub input_path: String,
    pub output_path: String,
    pub prompts_path: String,
    pub log_dir: String,
    pub monitor: bool,
}

/// 命令列可覆蓋的欄位
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub approach: Option<Approach>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub input_path: Option<String>,
    pub output_path: Option<String>,
    pub prompts_path: Option<String>,
    pub log_dir: Option<String>,
    pub monitor: bool,
}

impl AnalysisSettings {
    /// 依序套用：預設值 → 設定檔 → 命令列；API key 最後從環境變數讀取
    pub fn resolve(file: Option<&TomlConfig>, overrides: &SettingsOverrides) -> Result<Self> {
        let file = file.cloned().unwrap_or_default();

        let approach = overrides
            .approach
            .or(file.analysis.approach)
            .unwrap_or(Approach::Single);

        let api_key_env = file
            .api
            .api_key_env
            .clone()
            .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());

        let api_key = file
            .api
            .api_key
            .clone()
            .filter(|key| !has_unresolved_placeholder(key))
            .or_else(|| api_key_from_env(&api_key_env))
            .unwrap_or_default();

        let timeout_seconds = overrides.timeout_seconds.or(file.api.timeout_seconds);

        let settings = Self {
            approach,
            api: ApiSettings {
                base_url: pick(&overrides.base_url, &file.api.base_url, DEFAULT_BASE_URL),
                model: pick(&overrides.model, &file.api.model, DEFAULT_MODEL),
                api_key,
                timeout: timeout_seconds.map(Duration::from_secs),
            },
            api_key_env,
            input_path: pick(&overrides.input_path, &file.paths.input, DEFAULT_INPUT_PATH),
            output_path: pick(
                &overrides.output_path,
                &file.paths.output,
                approach.default_output_path(),
            ),
            prompts_path: pick(
                &overrides.prompts_path,
                &file.paths.prompts,
                approach.default_prompts_path(),
            ),
            log_dir: pick(&overrides.log_dir, &file.paths.log_dir, DEFAULT_LOG_DIR),
            monitor: overrides.monitor || file.analysis.monitor.unwrap_or(false),
        };

        if let Some(seconds) = timeout_seconds {
            validate_range("api.timeout_seconds", seconds, 1, 600)?;
        }

        Ok(settings)
    }
}

fn pick(cli: &Option<String>, file: &Option<String>, default: &str) -> String {
    cli.clone()
        .or_else(|| file.clone())
        .unwrap_or_else(|| default.to_string())
}

/// 讀取 API key；先嘗試載入當前目錄的 .env
pub fn api_key_from_env(var_name: &str) -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(var_name)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

impl Validate for AnalysisSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        validate_non_empty_string("api.model", &self.api.model)?;
        if self.api.api_key.trim().is_empty() {
            return Err(AnalysisError::MissingConfigError {
                field: self.api_key_env.clone(),
            });
        }
        validate_path("paths.input", &self.input_path)?;
        validate_path("paths.output", &self.output_path)?;
        validate_path("paths.prompts", &self.prompts_path)?;
        validate_path("paths.log_dir", &self.log_dir)?;
        Ok(())
    }
}

impl ConfigProvider for AnalysisSettings {
    fn approach(&self) -> Approach {
        self.approach
    }

    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn prompts_path(&self) -> &str {
        &self.prompts_path
    }

    fn monitor_enabled(&self) -> bool {
        self.monitor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with_key() -> TomlConfig {
        TomlConfig::from_toml_str(
            r#"
[api]
api_key = "file-key"
model = "file-model"

[paths]
output = "./file-output"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_follow_approach() {
        let overrides = SettingsOverrides {
            approach: Some(Approach::Separate),
            ..Default::default()
        };
        let settings = AnalysisSettings::resolve(Some(&file_with_key()), &overrides).unwrap();

        assert_eq!(settings.approach, Approach::Separate);
        assert_eq!(settings.prompts_path, "SeparateApproach/prompts");
        assert_eq!(settings.input_path, DEFAULT_INPUT_PATH);
        assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
        assert!(settings.api.timeout.is_none());
        assert_eq!(settings.log_dir, DEFAULT_LOG_DIR);
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let overrides = SettingsOverrides {
            model: Some("cli-model".to_string()),
            timeout_seconds: Some(45),
            monitor: true,
            ..Default::default()
        };
        let settings = AnalysisSettings::resolve(Some(&file_with_key()), &overrides).unwrap();

        assert_eq!(settings.api.model, "cli-model");
        assert_eq!(settings.output_path, "./file-output");
        assert_eq!(settings.api.api_key, "file-key");
        assert_eq!(settings.api.timeout, Some(Duration::from_secs(45)));
        assert!(settings.monitor);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_timeout_is_rejected() {
        let overrides = SettingsOverrides {
            timeout_seconds: Some(0),
            ..Default::default()
        };
        assert!(AnalysisSettings::resolve(Some(&file_with_key()), &overrides).is_err());
    }

    #[test]
    fn test_missing_api_key_names_the_variable() {
        let file = TomlConfig::from_toml_str(
            r#"
[api]
api_key_env = "EMOTION_TEST_KEY_THAT_IS_NEVER_SET"
"#,
        )
        .unwrap();
        let settings = AnalysisSettings::resolve(Some(&file), &SettingsOverrides::default()).unwrap();

        match settings.validate() {
            Err(AnalysisError::MissingConfigError { field }) => {
                assert_eq!(field, "EMOTION_TEST_KEY_THAT_IS_NEVER_SET");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_api_key_read_from_named_env_var() {
        std::env::set_var("EMOTION_TEST_SETTINGS_KEY", "  env-key  ");
        let file = TomlConfig::from_toml_str(
            r#"
[api]
api_key_env = "EMOTION_TEST_SETTINGS_KEY"
"#,
        )
        .unwrap();

        let settings = AnalysisSettings::resolve(Some(&file), &SettingsOverrides::default()).unwrap();
        assert_eq!(settings.api.api_key, "env-key");

        std::env::remove_var("EMOTION_TEST_SETTINGS_KEY");
    }

    #[test]
    fn test_invalid_base_url_fails_validation() {
        let overrides = SettingsOverrides {
            base_url: Some("ftp://example.com".to_string()),
            ..Default::default()
        };
        let settings = AnalysisSettings::resolve(Some(&file_with_key()), &overrides).unwrap();
        assert!(settings.validate().is_err());
    }
}

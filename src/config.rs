use std::path::Path;
use std::str::FromStr;

use tracing::warn;

use crate::error::{AppError, AppResult, ConfigError};

/// 程序配置
///
/// 显式传入各组件的构造函数，不使用全局状态
#[derive(Clone, Debug)]
pub struct Config {
    /// 待评分的提交目录（已提取好的 .txt 文本）
    pub submissions_folder: String,
    /// 结果输出目录
    pub results_folder: String,
    /// 评分任务 TOML 文件
    pub job_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 单次调用超时（秒）
    pub llm_timeout_secs: u64,
    pub llm_max_output_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            submissions_folder: "submissions".to_string(),
            results_folder: "results".to_string(),
            job_file: "grading_job.toml".to_string(),
            verbose_logging: false,
            output_log_file: "logs/grading.log".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.5-flash".to_string(),
            llm_timeout_secs: 30,
            llm_max_output_tokens: 8192,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            submissions_folder: std::env::var("SUBMISSIONS_FOLDER").unwrap_or(default.submissions_folder),
            results_folder: std::env::var("RESULTS_FOLDER").unwrap_or(default.results_folder),
            job_file: std::env::var("JOB_FILE").unwrap_or(default.job_file),
            verbose_logging: env_or("VERBOSE_LOGGING", default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", default.llm_timeout_secs),
            llm_max_output_tokens: env_or("LLM_MAX_OUTPUT_TOKENS", default.llm_max_output_tokens),
        }
    }

    /// 创建结果目录和日志目录
    ///
    /// 幂等，可重复调用
    pub fn ensure_dirs(&self) -> AppResult<()> {
        let log_dir = Path::new(&self.output_log_file)
            .parent()
            .filter(|p| !p.as_os_str().is_empty());

        for dir in std::iter::once(Path::new(&self.results_folder)).chain(log_dir) {
            std::fs::create_dir_all(dir)
                .map_err(|e| AppError::file_write_failed(dir.display().to_string(), e))?;
        }

        Ok(())
    }
}

/// 读取环境变量并解析，缺失或解析失败时使用默认值
fn env_or<T: FromStr>(var_name: &str, default: T) -> T {
    match std::env::var(var_name) {
        Ok(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                let err = ConfigError::EnvVarParseFailed {
                    var_name: var_name.to_string(),
                    value,
                    expected_type: std::any::type_name::<T>().to_string(),
                };
                warn!("{}，使用默认值", err);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_on_bad_value() {
        std::env::set_var("AI_GRADING_TEST_BAD_NUMBER", "not-a-number");
        assert_eq!(env_or("AI_GRADING_TEST_BAD_NUMBER", 42u64), 42);
        std::env::remove_var("AI_GRADING_TEST_BAD_NUMBER");
    }

    #[test]
    fn test_env_or_parses_value() {
        std::env::set_var("AI_GRADING_TEST_GOOD_NUMBER", "7");
        assert_eq!(env_or("AI_GRADING_TEST_GOOD_NUMBER", 42u64), 7);
        std::env::remove_var("AI_GRADING_TEST_GOOD_NUMBER");
    }

    #[test]
    fn test_ensure_dirs_is_idempotent() {
        let base = std::env::temp_dir().join(format!("ai_grading_cfg_{}", std::process::id()));
        let config = Config {
            results_folder: base.join("results").display().to_string(),
            output_log_file: base.join("logs").join("run.log").display().to_string(),
            ..Default::default()
        };

        config.ensure_dirs().unwrap();
        config.ensure_dirs().unwrap();

        assert!(base.join("results").is_dir());
        assert!(base.join("logs").is_dir());
        let _ = std::fs::remove_dir_all(base);
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AppError, AppResult, ConfigError};

/// 评分任务配置（来自 TOML 文件）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingJob {
    /// 作业总分
    pub total_marks: u32,
    /// 自定义评分标准：名称 -> 分值
    #[serde(default)]
    pub criteria: BTreeMap<String, u32>,
    /// 附加评分说明
    #[serde(default)]
    pub additional_instructions: String,
    /// 是否识别多道题
    #[serde(default = "default_detect_multiple_questions")]
    pub detect_multiple_questions: bool,
}

fn default_detect_multiple_questions() -> bool {
    true
}

impl Default for GradingJob {
    fn default() -> Self {
        Self {
            total_marks: 100,
            criteria: BTreeMap::new(),
            additional_instructions: String::new(),
            detect_multiple_questions: true,
        }
    }
}

impl GradingJob {
    /// 校验总分和评分标准
    ///
    /// 评分标准的分值之和不能超过总分
    pub fn validate(&self) -> AppResult<()> {
        if self.total_marks == 0 {
            return Err(AppError::Config(ConfigError::InvalidTotalMarks));
        }

        // u64 累加，单项最大为 u32::MAX，不会溢出
        let criteria_sum: u64 = self.criteria.values().map(|m| u64::from(*m)).sum();
        if criteria_sum > u64::from(self.total_marks) {
            return Err(AppError::Config(ConfigError::CriteriaExceedTotal {
                criteria_sum,
                total_marks: self.total_marks,
            }));
        }

        Ok(())
    }
}

/// 一份已提取文本的提交
#[derive(Debug, Clone)]
pub struct Submission {
    pub filename: String,
    pub text: String,
}

impl Submission {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_criteria_over_total() {
        let mut job = GradingJob {
            total_marks: 10,
            ..Default::default()
        };
        job.criteria.insert("Code".to_string(), 6);
        job.criteria.insert("Report".to_string(), 5);

        let err = job.validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::CriteriaExceedTotal {
                criteria_sum: 11,
                total_marks: 10
            })
        ));
    }

    #[test]
    fn test_validate_huge_criteria_do_not_wrap() {
        let mut job = GradingJob {
            total_marks: 10,
            ..Default::default()
        };
        job.criteria.insert("A".to_string(), u32::MAX);
        job.criteria.insert("B".to_string(), 1);

        let err = job.validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::CriteriaExceedTotal {
                criteria_sum,
                total_marks: 10
            }) if criteria_sum == u64::from(u32::MAX) + 1
        ));
    }

    #[test]
    fn test_validate_rejects_zero_total() {
        let job = GradingJob {
            total_marks: 0,
            ..Default::default()
        };
        assert!(job.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_default() {
        assert!(GradingJob::default().validate().is_ok());
    }
}

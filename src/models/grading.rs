//! 评分结果模型
//!
//! 一份提交经过规范化之后得到的 `GradingRecord`，以及每道题的 `QuestionResult`

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 评分失败的类型
///
/// 失败永远以数据的形式返回，不会作为错误抛出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// AI 服务没有返回任何内容（调用失败、超时、未配置密钥）
    ServiceUnavailable,
    /// 结构化解析、修复、正则兜底全部失败
    UnparseableResponse,
    /// 提交内容为空，没有调用 AI 服务
    EmptySubmission,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::ServiceUnavailable => write!(f, "service_unavailable"),
            FailureKind::UnparseableResponse => write!(f, "unparseable_response"),
            FailureKind::EmptySubmission => write!(f, "empty_submission"),
        }
    }
}

/// 记录的来源标记
///
/// 下游可以据此区分干净解析、修复后解析、正则兜底和失败的记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "failure", rename_all = "snake_case")]
pub enum Provenance {
    /// 直接解析成功
    Parsed,
    /// 括号/引号修复后解析成功
    Repaired,
    /// 从文本中用正则提取分数
    Fallback,
    /// 评分失败
    Failed(FailureKind),
}

impl Provenance {
    /// 是否为降级结果（修复、兜底或失败）
    pub fn is_degraded(&self) -> bool {
        !matches!(self, Provenance::Parsed)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Provenance::Failed(_))
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Parsed => write!(f, "parsed"),
            Provenance::Repaired => write!(f, "repaired"),
            Provenance::Fallback => write!(f, "fallback"),
            Provenance::Failed(kind) => write!(f, "failed:{}", kind),
        }
    }
}

/// 单道题的评分结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    /// 题号（从 1 开始）
    pub question_number: usize,
    /// 题目简述
    #[serde(default)]
    pub question_text: String,
    pub attempted: bool,
    pub score: f64,
    pub max_score: f64,
    #[serde(default)]
    pub feedback: String,
}

impl QuestionResult {
    /// 得分率，`max_score` 为 0 时返回 0
    pub fn percentage(&self) -> f64 {
        if self.max_score > 0.0 {
            self.score / self.max_score * 100.0
        } else {
            0.0
        }
    }
}

/// 一份提交的规范化评分记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingRecord {
    pub filename: String,
    pub total_marks: u32,
    /// 始终位于 [0, total_marks]
    pub awarded_marks: f64,
    pub percentage: f64,
    pub feedback: String,
    pub criteria_scores: BTreeMap<String, f64>,
    pub questions: Vec<QuestionResult>,
    pub provenance: Provenance,
}

impl GradingRecord {
    /// 创建一条零分的失败记录
    pub fn failed(
        filename: impl Into<String>,
        total_marks: u32,
        kind: FailureKind,
        feedback: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            total_marks,
            awarded_marks: 0.0,
            percentage: 0.0,
            feedback: feedback.into(),
            criteria_scores: BTreeMap::new(),
            questions: Vec::new(),
            provenance: Provenance::Failed(kind),
        }
    }

    /// 设置文件名（规范化器不知道文件名，由流程层补上）
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

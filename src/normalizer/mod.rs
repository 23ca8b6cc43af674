//! 响应规范化 - 把 AI 评分回复转换成 `GradingRecord`
//!
//! ## 处理顺序
//!
//! 1. 截取第一个 `{` 到最后一个 `}`（`extract`）
//! 2. 严格 JSON 解析
//! 3. 失败则配平引号和括号后重试（`repair`）
//! 4. 仍失败或根本没有 `{`：正则提取分数（`fallback`）
//! 5. 全部失败：返回 `UnparseableResponse` 零分记录
//!
//! 任何输入都返回一条记录，不会返回错误；相同输入总是得到相同输出

pub mod extract;
pub mod fallback;
pub mod feedback;
pub mod repair;

use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::models::{FailureKind, GradingRecord, Provenance, QuestionResult};
use crate::utils::logging::truncate_text;

pub use extract::candidate_region;
pub use fallback::extract_score;
pub use feedback::combine_feedback;
pub use repair::repair_json;

/// 响应规范化器
///
/// 持有本次评分的总分和评分标准上下文
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    total_marks: u32,
    criteria: BTreeMap<String, u32>,
}

impl ResponseNormalizer {
    pub fn new(total_marks: u32, criteria: BTreeMap<String, u32>) -> Self {
        Self {
            total_marks,
            criteria,
        }
    }

    /// 规范化一条 AI 回复
    ///
    /// `raw_text` 为 `None` 或空白表示 AI 调用本身失败
    pub fn normalize(&self, raw_text: Option<&str>) -> GradingRecord {
        let raw_text = match raw_text {
            Some(text) if !text.trim().is_empty() => text,
            _ => return self.service_unavailable("Failed to get response from AI grading service"),
        };

        let Some(region) = candidate_region(raw_text) else {
            debug!("回复中没有 JSON 对象，使用正则兜底");
            return self.fallback(raw_text);
        };

        if let Some(data) = parse_object(region) {
            debug!("JSON 解析成功");
            return self.from_structured(&data, Provenance::Parsed);
        }

        let repaired = repair_json(region);
        match parse_object(&repaired) {
            Some(data) => {
                warn!("JSON 修复后解析成功: {}", truncate_text(&repaired, 80));
                self.from_structured(&data, Provenance::Repaired)
            }
            None => {
                warn!("JSON 修复失败，使用正则兜底");
                self.fallback(raw_text)
            }
        }
    }

    /// AI 服务不可用时的零分记录
    pub fn service_unavailable(&self, reason: &str) -> GradingRecord {
        GradingRecord::failed(
            String::new(),
            self.total_marks,
            FailureKind::ServiceUnavailable,
            format!("Error during grading: {}", reason),
        )
    }

    /// 正则兜底；没有匹配时返回 `UnparseableResponse`，原文保留为评语
    fn fallback(&self, raw_text: &str) -> GradingRecord {
        let Some(score) = extract_score(raw_text, self.total_marks) else {
            warn!("无法从回复中提取分数: {}", truncate_text(raw_text, 80));
            return GradingRecord::failed(
                String::new(),
                self.total_marks,
                FailureKind::UnparseableResponse,
                raw_text,
            );
        };

        debug!("正则兜底得分: {}", score);
        GradingRecord {
            filename: String::new(),
            total_marks: self.total_marks,
            awarded_marks: score,
            percentage: self.percentage_of(score),
            feedback: raw_text.to_string(),
            criteria_scores: BTreeMap::new(),
            questions: Vec::new(),
            provenance: Provenance::Fallback,
        }
    }

    fn from_structured(&self, data: &JsonValue, provenance: Provenance) -> GradingRecord {
        let total = f64::from(self.total_marks);

        let reported = data.get("total_score").and_then(as_number).unwrap_or(0.0);
        let awarded_marks = reported.clamp(0.0, total);
        if awarded_marks != reported {
            debug!("分数 {} 超出 [0, {}]，已截断为 {}", reported, total, awarded_marks);
        }

        let percentage = if awarded_marks > 0.0 {
            self.percentage_of(awarded_marks)
        } else {
            data.get("percentage").and_then(as_number).unwrap_or(0.0)
        };

        GradingRecord {
            filename: String::new(),
            total_marks: self.total_marks,
            awarded_marks,
            percentage,
            feedback: combine_feedback(data),
            criteria_scores: self.criteria_scores(data.get("criteria_scores")),
            questions: parse_questions(data.get("questions")),
            provenance,
        }
    }

    /// 评分标准得分；上下文中有的标准截断到 [0, 分值]
    fn criteria_scores(&self, value: Option<&JsonValue>) -> BTreeMap<String, f64> {
        let Some(JsonValue::Object(scores)) = value else {
            return BTreeMap::new();
        };

        scores
            .iter()
            .filter_map(|(name, v)| {
                let score = as_number(v)?.max(0.0);
                let score = match self.criteria.get(name) {
                    Some(marks) => score.min(f64::from(*marks)),
                    None => score,
                };
                Some((name.clone(), score))
            })
            .collect()
    }

    fn percentage_of(&self, score: f64) -> f64 {
        if self.total_marks > 0 {
            score / f64::from(self.total_marks) * 100.0
        } else {
            0.0
        }
    }
}

/// 严格解析，结果必须是 JSON 对象
fn parse_object(text: &str) -> Option<JsonValue> {
    match serde_json::from_str::<JsonValue>(text) {
        Ok(value) if value.is_object() => Some(value),
        Ok(_) => None,
        Err(e) => {
            debug!("JSON 解析失败: {}", e);
            None
        }
    }
}

/// 数字或数字字符串（允许末尾的 `%`）
fn as_number(value: &JsonValue) -> Option<f64> {
    let n = match value {
        JsonValue::Number(n) => n.as_f64()?,
        JsonValue::String(s) => s.trim().trim_end_matches('%').trim().parse().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn as_flag(value: &JsonValue) -> Option<bool> {
    match value {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn parse_questions(value: Option<&JsonValue>) -> Vec<QuestionResult> {
    let Some(JsonValue::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            let q = item.as_object()?;

            let question_number = q
                .get("question_number")
                .and_then(as_number)
                .filter(|n| *n >= 1.0)
                .map(|n| n as usize)
                .unwrap_or(idx + 1);

            let max_score = q.get("max_score").and_then(as_number).unwrap_or(0.0).max(0.0);
            let mut score = q.get("score").and_then(as_number).unwrap_or(0.0).max(0.0);
            if max_score > 0.0 {
                score = score.min(max_score);
            }

            Some(QuestionResult {
                question_number,
                question_text: string_field(q, "question_text"),
                // AI 列出了这道题就视为作答，除非明确标记为未作答
                attempted: q.get("attempted").and_then(as_flag).unwrap_or(true),
                score,
                max_score,
                feedback: string_field(q, "feedback"),
            })
        })
        .collect()
}

fn string_field(object: &Map<String, JsonValue>, key: &str) -> String {
    object
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

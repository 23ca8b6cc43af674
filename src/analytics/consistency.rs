//! 表现稳定性分析
//!
//! 只使用记录中实际存在的题目槽位；少于 2 道题的记录不参与

use serde::Serialize;
use std::cmp::Ordering;

use super::dataset::{Dataset, DatasetRow};
use super::stats::{mean, population_std_dev};
use crate::utils::logging::truncate_text;

/// 稳定：标准差低于该值
pub const CONSISTENT_MAX_STD_DEV: f64 = 15.0;
/// 稳定：平均得分率高于该值
pub const CONSISTENT_MIN_AVERAGE: f64 = 50.0;
/// 不稳定：标准差高于该值
pub const INCONSISTENT_MIN_STD_DEV: f64 = 25.0;
/// 不稳定：最高与最低得分率之差高于该值
pub const INCONSISTENT_MIN_RANGE: f64 = 40.0;

/// 散点图标签的最大长度
const LABEL_MAX_CHARS: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistentPerformer {
    pub filename: String,
    pub average_score: f64,
    pub std_deviation: f64,
    pub question_scores: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InconsistentPerformer {
    pub filename: String,
    pub std_deviation: f64,
    pub score_range: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub question_scores: Vec<f64>,
}

/// 散点图中的一个点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyPoint {
    pub label: String,
    pub std_deviation: f64,
    pub average_score: f64,
}

/// 单条记录的题目得分率统计
struct RowSpread<'a> {
    row: &'a DatasetRow,
    scores: Vec<f64>,
    average: f64,
    std_dev: f64,
}

impl RowSpread<'_> {
    fn min(&self) -> f64 {
        self.scores.iter().copied().fold(f64::INFINITY, f64::min)
    }

    fn max(&self) -> f64 {
        self.scores.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

fn spreads(dataset: &Dataset) -> impl Iterator<Item = RowSpread<'_>> {
    dataset.rows().iter().filter_map(|row| {
        let scores = row.question_percentages();
        if scores.len() < 2 {
            return None;
        }
        Some(RowSpread {
            row,
            average: mean(&scores),
            std_dev: population_std_dev(&scores),
            scores,
        })
    })
}

pub fn consistent_performers(dataset: &Dataset) -> Vec<ConsistentPerformer> {
    let mut performers: Vec<ConsistentPerformer> = spreads(dataset)
        .filter(|s| s.std_dev < CONSISTENT_MAX_STD_DEV && s.average > CONSISTENT_MIN_AVERAGE)
        .map(|s| ConsistentPerformer {
            filename: s.row.filename.clone(),
            average_score: s.average,
            std_deviation: s.std_dev,
            question_scores: s.scores,
        })
        .collect();

    performers.sort_by(|a, b| {
        a.std_deviation
            .partial_cmp(&b.std_deviation)
            .unwrap_or(Ordering::Equal)
    });
    performers
}

pub fn inconsistent_performers(dataset: &Dataset) -> Vec<InconsistentPerformer> {
    let mut performers: Vec<InconsistentPerformer> = spreads(dataset)
        .filter_map(|s| {
            let (min_score, max_score) = (s.min(), s.max());
            let score_range = max_score - min_score;
            if s.std_dev > INCONSISTENT_MIN_STD_DEV || score_range > INCONSISTENT_MIN_RANGE {
                Some(InconsistentPerformer {
                    filename: s.row.filename.clone(),
                    std_deviation: s.std_dev,
                    score_range,
                    min_score,
                    max_score,
                    question_scores: s.scores,
                })
            } else {
                None
            }
        })
        .collect();

    performers.sort_by(|a, b| {
        b.std_deviation
            .partial_cmp(&a.std_deviation)
            .unwrap_or(Ordering::Equal)
    });
    performers
}

pub fn consistency_points(dataset: &Dataset) -> Vec<ConsistencyPoint> {
    spreads(dataset)
        .map(|s| ConsistencyPoint {
            label: truncate_text(&s.row.filename, LABEL_MAX_CHARS),
            std_deviation: s.std_dev,
            average_score: s.average,
        })
        .collect()
}

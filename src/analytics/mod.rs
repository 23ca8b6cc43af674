//! 分析引擎 - 对一批评分记录做只读统计
//!
//! ## 模块划分
//!
//! - `dataset` - 把记录展开成按题号分列的数据集
//! - `attempts` - 作答 / 跳过统计
//! - `distribution` - 等级分布、高于平均分
//! - `consistency` - 各题得分率的稳定性
//! - `stats` - 平均值、中位数、总体标准差
//!
//! 所有查询都是数据集的纯函数；数据集为空时返回零值而不是报错

pub mod attempts;
pub mod consistency;
pub mod dataset;
pub mod distribution;
pub mod stats;

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::models::GradingRecord;

pub use attempts::{AttemptBar, MostAttempted, MostSkipped, QuestionAttempts};
pub use consistency::{ConsistencyPoint, ConsistentPerformer, InconsistentPerformer};
pub use dataset::{CellValue, Dataset, DatasetRow, QuestionSlot};
pub use distribution::{AboveAverage, GradeBand, GradeCount, GradeDistribution};

/// 班级概况
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassSummary {
    pub total_submissions: usize,
    pub average_percentage: f64,
    /// 修复、兜底或失败的记录数
    pub degraded_records: usize,
}

/// 汇总所有统计结果，供报告导出
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub summary: ClassSummary,
    pub max_questions: usize,
    pub question_attempts: Vec<AttemptBar>,
    pub most_attempted: MostAttempted,
    pub most_skipped: MostSkipped,
    pub average_questions_attempted: f64,
    pub grade_distribution: GradeDistribution,
    pub consistent_performers: Vec<ConsistentPerformer>,
    pub inconsistent_performers: Vec<InconsistentPerformer>,
    pub consistency_points: Vec<ConsistencyPoint>,
    pub above_average: AboveAverage,
}

/// 分析服务
///
/// 持有当前数据集的快照；重新加载时整体替换，读者拿到的快照不会被部分更新
#[derive(Debug, Default)]
pub struct AnalyticsService {
    dataset: Arc<Dataset>,
    degraded_records: usize,
}

impl AnalyticsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从记录列表构建新数据集并替换旧的
    pub fn load_results(&mut self, records: &[GradingRecord]) {
        let dataset = Dataset::build(records);
        debug!(
            "数据集已构建: {} 条记录, 最多 {} 道题",
            dataset.len(),
            dataset.max_questions()
        );
        self.degraded_records = records
            .iter()
            .filter(|r| r.provenance.is_degraded())
            .count();
        self.dataset = Arc::new(dataset);
    }

    /// 当前数据集快照
    pub fn snapshot(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }

    pub fn max_questions(&self) -> usize {
        self.dataset.max_questions()
    }

    pub fn attempts(&self, question_number: usize) -> QuestionAttempts {
        attempts::attempts(&self.dataset, question_number)
    }

    pub fn most_attempted(&self) -> MostAttempted {
        attempts::most_attempted(&self.dataset)
    }

    pub fn most_skipped(&self) -> MostSkipped {
        attempts::most_skipped(&self.dataset)
    }

    pub fn average_questions_attempted(&self) -> f64 {
        attempts::average_questions_attempted(&self.dataset)
    }

    pub fn question_attempt_series(&self) -> Vec<AttemptBar> {
        attempts::attempt_series(&self.dataset)
    }

    pub fn grade_distribution(&self) -> GradeDistribution {
        distribution::grade_distribution(&self.dataset)
    }

    pub fn consistent_performers(&self) -> Vec<ConsistentPerformer> {
        consistency::consistent_performers(&self.dataset)
    }

    pub fn inconsistent_performers(&self) -> Vec<InconsistentPerformer> {
        consistency::inconsistent_performers(&self.dataset)
    }

    pub fn consistency_points(&self) -> Vec<ConsistencyPoint> {
        consistency::consistency_points(&self.dataset)
    }

    pub fn above_average(&self) -> AboveAverage {
        distribution::above_average(&self.dataset)
    }

    pub fn class_summary(&self) -> ClassSummary {
        ClassSummary {
            total_submissions: self.dataset.len(),
            average_percentage: stats::mean(&self.dataset.percentages()),
            degraded_records: self.degraded_records,
        }
    }

    pub fn report(&self) -> AnalyticsReport {
        AnalyticsReport {
            summary: self.class_summary(),
            max_questions: self.max_questions(),
            question_attempts: self.question_attempt_series(),
            most_attempted: self.most_attempted(),
            most_skipped: self.most_skipped(),
            average_questions_attempted: self.average_questions_attempted(),
            grade_distribution: self.grade_distribution(),
            consistent_performers: self.consistent_performers(),
            inconsistent_performers: self.inconsistent_performers(),
            consistency_points: self.consistency_points(),
            above_average: self.above_average(),
        }
    }
}

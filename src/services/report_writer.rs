//! 报告写入服务 - 业务能力层
//!
//! 只负责"写结果报告"能力，不关心流程

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::analytics::AnalyticsReport;
use crate::error::{AppError, AppResult};
use crate::models::{export_rows, ExportRows, GradingRecord};

/// 写入磁盘的完整报告
#[derive(Debug, Serialize)]
pub struct GradingReport<'a> {
    pub generated_at: String,
    pub rows: ExportRows,
    pub analytics: &'a AnalyticsReport,
}

/// 报告写入服务
///
/// 职责：
/// - 把评分记录展平成导出行
/// - 和分析结果一起写成一个 JSON 文件
pub struct ReportWriter {
    results_folder: PathBuf,
}

impl ReportWriter {
    pub fn new(results_folder: impl AsRef<Path>) -> Self {
        Self {
            results_folder: results_folder.as_ref().to_path_buf(),
        }
    }

    /// 写入报告
    ///
    /// # 返回
    /// 返回报告文件路径，文件名带时间戳
    pub async fn write(
        &self,
        records: &[GradingRecord],
        analytics: &AnalyticsReport,
    ) -> AppResult<PathBuf> {
        let now = chrono::Local::now();
        let report = GradingReport {
            generated_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            rows: export_rows(records),
            analytics,
        };

        let path = self
            .results_folder
            .join(format!("grading_report_{}.json", now.format("%Y%m%d_%H%M%S")));

        debug!(
            "写入报告: {} ({} 份提交, {} 道题目)",
            path.display(),
            report.rows.submissions.len(),
            report.rows.questions.len()
        );

        let json = serde_json::to_string_pretty(&report)?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        Ok(path)
    }
}

//! 批量评分处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一批提交的评分和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：准备目录、日志文件、加载评分任务、检测 API
//! 2. **批量加载**：扫描并加载所有待评分的提交（`Vec<Submission>`）
//! 3. **顺序评分**：逐份交给 GradingFlow，单份失败不影响其他提交
//! 4. **分析与导出**：构建数据集、计算统计、写出 JSON 报告
//! 5. **全局统计**：汇总正常 / 降级 / 失败数量

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analytics::AnalyticsService;
use crate::config::Config;
use crate::models::{load_grading_job, load_submissions, GradingRecord, Submission};
use crate::services::ReportWriter;
use crate::utils::logging;
use crate::workflow::{GradeOutcome, GradingFlow, SubmissionCtx};

/// 应用主结构
pub struct App {
    config: Config,
    flow: GradingFlow,
    analytics: AnalyticsService,
    writer: ReportWriter,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.ensure_dirs()?;
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config.llm_model_name, config.llm_timeout_secs);

        let job = load_grading_job(Path::new(&config.job_file))
            .await
            .with_context(|| format!("加载评分任务失败: {}", config.job_file))?;
        let flow = GradingFlow::new(&config, job);

        if flow.llm_service().ping().await {
            info!("✓ AI 评分服务可用");
        } else {
            warn!("⚠️ AI 评分服务不可用，所有提交都会记为 service_unavailable");
        }

        let writer = ReportWriter::new(&config.results_folder);

        Ok(Self {
            config,
            flow,
            analytics: AnalyticsService::new(),
            writer,
        })
    }

    /// 运行应用主逻辑
    ///
    /// # 返回
    /// 写出的报告路径；没有提交时返回 `None`
    pub async fn run(&mut self) -> Result<Option<PathBuf>> {
        let submissions = self.load_submissions().await?;

        if submissions.is_empty() {
            warn!("⚠️ 没有找到待评分的 .txt 文件，程序结束");
            return Ok(None);
        }

        logging::log_submissions_loaded(submissions.len(), self.flow.total_marks());

        let (records, stats) = self.grade_all(&submissions).await;

        self.analytics.load_results(&records);
        let report = self.analytics.report();
        logging::log_analytics_summary(&report);

        let path = self
            .writer
            .write(&records, &report)
            .await
            .context("写入评分报告失败")?;
        info!("💾 报告已写入: {}", path.display());

        logging::print_final_stats(
            stats.success,
            stats.degraded,
            stats.failed,
            &self.config.output_log_file,
        );

        Ok(Some(path))
    }

    /// 当前分析服务，供运行结束后继续查询
    pub fn analytics(&self) -> &AnalyticsService {
        &self.analytics
    }

    /// 加载提交
    async fn load_submissions(&self) -> Result<Vec<Submission>> {
        info!("\n📁 正在扫描待评分的提交...");
        Ok(load_submissions(&self.config.submissions_folder).await?)
    }

    /// 逐份评分
    ///
    /// 不会提前返回，每份提交都有一条记录
    async fn grade_all(&self, submissions: &[Submission]) -> (Vec<GradingRecord>, ProcessingStats) {
        let total = submissions.len();
        let mut records = Vec::with_capacity(total);
        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };

        for (idx, submission) in submissions.iter().enumerate() {
            logging::log_submission_start(idx + 1, total, &submission.filename);
            let ctx = SubmissionCtx::new(&submission.filename, idx + 1, total);

            let record = self.flow.run(submission, &ctx).await;
            stats.count(GradeOutcome::of(&record));
            records.push(record);
        }

        (records, stats)
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub degraded: usize,
    pub failed: usize,
    pub total: usize,
}

impl ProcessingStats {
    fn count(&mut self, outcome: GradeOutcome) {
        match outcome {
            GradeOutcome::Success => self.success += 1,
            GradeOutcome::Degraded => self.degraded += 1,
            GradeOutcome::Failed => self.failed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_count() {
        let mut stats = ProcessingStats::default();
        stats.count(GradeOutcome::Success);
        stats.count(GradeOutcome::Degraded);
        stats.count(GradeOutcome::Failed);
        stats.count(GradeOutcome::Failed);
        assert_eq!(stats.success, 1);
        assert_eq!(stats.degraded, 1);
        assert_eq!(stats.failed, 2);
    }
}

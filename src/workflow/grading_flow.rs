//! 评分流程 - 流程层
//!
//! 核心职责：定义"一份提交"的完整处理流程
//!
//! 流程顺序：
//! 1. 空文本 → 直接返回零分记录，不调用 AI
//! 2. 构建提示词 → 调用 LLM（有超时）
//! 3. 规范化回复 → GradingRecord
//!
//! 任何失败都变成一条零分记录，不会中断整批处理

use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::{FailureKind, GradingJob, GradingRecord, Submission};
use crate::normalizer::ResponseNormalizer;
use crate::services::{build_grading_prompt, LlmService};
use crate::workflow::submission_ctx::SubmissionCtx;

/// 单份提交的处理结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeOutcome {
    /// 直接解析成功
    Success,
    /// 修复或正则兜底得到的结果
    Degraded,
    /// 零分失败记录
    Failed,
}

impl GradeOutcome {
    pub fn of(record: &GradingRecord) -> Self {
        if record.provenance.is_failure() {
            GradeOutcome::Failed
        } else if record.provenance.is_degraded() {
            GradeOutcome::Degraded
        } else {
            GradeOutcome::Success
        }
    }
}

/// 评分流程
///
/// - 编排一份提交的处理
/// - 只依赖业务能力（services）和规范化器
pub struct GradingFlow {
    llm_service: LlmService,
    normalizer: ResponseNormalizer,
    job: GradingJob,
}

impl GradingFlow {
    /// 创建新的评分流程
    pub fn new(config: &Config, job: GradingJob) -> Self {
        Self {
            llm_service: LlmService::new(config),
            normalizer: ResponseNormalizer::new(job.total_marks, job.criteria.clone()),
            job,
        }
    }

    pub fn llm_service(&self) -> &LlmService {
        &self.llm_service
    }

    pub fn total_marks(&self) -> u32 {
        self.job.total_marks
    }

    pub async fn run(&self, submission: &Submission, ctx: &SubmissionCtx) -> GradingRecord {
        if submission.is_blank() {
            warn!("{} ⚠️ 没有可评分的文本内容", ctx);
            return GradingRecord::failed(
                &submission.filename,
                self.job.total_marks,
                FailureKind::EmptySubmission,
                "No text content could be extracted from this file.",
            );
        }

        let prompt = build_grading_prompt(&submission.text, &self.job);

        let record = match self.llm_service.request_grading(&prompt).await {
            Ok(response) => self.normalizer.normalize(Some(&response)),
            Err(e) => {
                warn!("{} ⚠️ AI 评分调用失败: {}", ctx, e);
                self.normalizer.service_unavailable(&e.to_string())
            }
        }
        .with_filename(&submission.filename);

        self.log_outcome(ctx, &record);
        record
    }

    fn log_outcome(&self, ctx: &SubmissionCtx, record: &GradingRecord) {
        match GradeOutcome::of(record) {
            GradeOutcome::Success => info!(
                "{} ✓ 得分 {:.1}/{} ({:.1}%)",
                ctx, record.awarded_marks, record.total_marks, record.percentage
            ),
            GradeOutcome::Degraded => warn!(
                "{} ⚠️ 得分 {:.1}/{} ({:.1}%)，结果来源: {}",
                ctx, record.awarded_marks, record.total_marks, record.percentage, record.provenance
            ),
            GradeOutcome::Failed => error!("{} ❌ 评分失败: {}", ctx, record.provenance),
        }
    }
}

//! # AI Grading
//!
//! 批量 AI 评分：把学生提交交给大模型评分，把不可靠的回复规范化成结构化记录，再做班级统计
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 模型层（Models）
//! - `models/` - 评分任务、提交、评分记录、导出行
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单份提交
//! - `LlmService` - 调用 AI 评分能力（有超时，不重试）
//! - `ReportWriter` - 写 JSON 报告能力
//!
//! ### ③ 规范化（Normalizer）
//! - `normalizer/` - 任意文本 → GradingRecord，永不失败
//! - 严格解析 → 修复后解析 → 正则兜底 → 零分记录
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 定义"一份提交"的完整处理流程
//! - `SubmissionCtx` - 上下文封装（文件名 + 序号）
//! - `GradingFlow` - 流程编排（prompt → LLM → normalize）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量评分处理器，管理生命周期和统计
//!
//! ### ⑥ 分析（Analytics）
//! - `analytics/` - 对记录集合做只读统计，数据集为空时返回零值
//!
//! ## 模块结构

pub mod analytics;
pub mod config;
pub mod error;

pub mod models;
pub mod normalizer;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use analytics::{AnalyticsReport, AnalyticsService, Dataset};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{FailureKind, GradingJob, GradingRecord, Provenance, QuestionResult, Submission};
pub use normalizer::ResponseNormalizer;
pub use orchestrator::App;
pub use workflow::{GradeOutcome, GradingFlow, SubmissionCtx};

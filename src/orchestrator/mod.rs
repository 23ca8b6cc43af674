//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ### `batch_processor` - 批量评分处理器
//! - 管理应用生命周期（初始化、运行）
//! - 加载评分任务和全部提交（Vec<Submission>）
//! - 逐份调用 GradingFlow，收集 GradingRecord
//! - 把记录交给分析引擎，写出报告
//! - 输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Submission>)
//!     ↓
//! workflow::GradingFlow (处理单份 Submission)
//!     ↓
//! services (能力层：llm / prompt / report)   normalizer (回复规范化)
//!     ↓
//! analytics (只读统计)
//! ```
//!
//! ## 设计原则
//!
//! 1. **顺序处理**：一次只有一个评分请求在途
//! 2. **向下依赖**：编排层 → workflow → services
//! 3. **无业务逻辑**：只做调度和统计，不做具体评分判断

pub mod batch_processor;

pub use batch_processor::{App, ProcessingStats};

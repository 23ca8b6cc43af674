//! 提交处理上下文
//!
//! 封装"我正在处理第几份提交"这一信息

use std::fmt::Display;

/// 提交处理上下文
#[derive(Debug, Clone)]
pub struct SubmissionCtx {
    /// 文件名
    pub filename: String,

    /// 提交序号（从1开始，仅用于日志显示）
    pub index: usize,

    /// 本批提交总数
    pub total: usize,
}

impl SubmissionCtx {
    pub fn new(filename: impl Into<String>, index: usize, total: usize) -> Self {
        Self {
            filename: filename.into(),
            index,
            total,
        }
    }
}

impl Display for SubmissionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[提交 {}/{} {}]", self.index, self.total, self.filename)
    }
}

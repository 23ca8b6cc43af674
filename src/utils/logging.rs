/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use anyhow::Result;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::analytics::AnalyticsReport;

/// 初始化 tracing 订阅者
///
/// `RUST_LOG` 优先；未设置时 `verbose` 决定 debug 还是 info。
/// 给出 `log_file_path` 时日志同时追加写入该文件。重复调用无副作用
pub fn init(verbose: bool, log_file_path: Option<&str>) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(log_file_path.and_then(file_layer))
        .try_init();
}

type FileLayer<S> = fmt::Layer<S, fmt::format::DefaultFields, fmt::format::Format, Mutex<File>>;

/// 追加写入日志文件的输出层，文件打不开时返回 `None`
fn file_layer<S>(log_file_path: &str) -> Option<FileLayer<S>> {
    if let Some(parent) = Path::new(log_file_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).ok()?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .ok()?;

    Some(
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false),
    )
}

/// 初始化日志文件
///
/// 截断并写入标题；`init` 的文件层以追加方式打开，之后的日志接在标题后面
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    if let Some(parent) = Path::new(log_file_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let log_header = format!(
        "{}\n评分处理日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(model_name: &str, timeout_secs: u64) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 顺序评分模式");
    info!("🤖 模型: {} (超时 {} 秒)", model_name, timeout_secs);
    info!("{}", "=".repeat(60));
}

/// 记录提交加载信息
pub fn log_submissions_loaded(total: usize, total_marks: u32) {
    info!("✓ 找到 {} 份待评分的提交", total);
    info!("📋 总分: {}\n", total_marks);
}

/// 记录单份提交开始
pub fn log_submission_start(index: usize, total: usize, filename: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📄 [{}/{}] 正在评分: {}", index, total, filename);
}

/// 打印分析摘要
pub fn log_analytics_summary(report: &AnalyticsReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 班级分析");
    info!("{}", "=".repeat(60));
    info!(
        "提交数: {}, 平均得分率: {:.1}%, 降级记录: {}",
        report.summary.total_submissions,
        report.summary.average_percentage,
        report.summary.degraded_records
    );
    for grade in &report.grade_distribution.grades {
        info!("  {}: {}", grade.label, grade.count);
    }
    info!(
        "中位数: {:.1}%, 标准差: {:.1}",
        report.grade_distribution.median, report.grade_distribution.std_dev
    );
    if report.max_questions > 0 {
        info!(
            "作答最多: 第 {} 题 ({} 人), 跳过最多: 第 {} 题 ({} 人)",
            report.most_attempted.question_number,
            report.most_attempted.attempts,
            report.most_skipped.question_number,
            report.most_skipped.skipped_count
        );
        info!("平均作答题数: {:.2}", report.average_questions_attempted);
    }
    info!(
        "高于平均分: {}/{} ({:.1}%)",
        report.above_average.count, report.above_average.total, report.above_average.percentage
    );
    info!(
        "表现稳定: {} 人, 表现不稳定: {} 人",
        report.consistent_performers.len(),
        report.inconsistent_performers.len()
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 正常评分数量
/// - `degraded`: 修复或兜底数量
/// - `failed`: 失败数量
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(success: usize, degraded: usize, failed: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 正常: {}", success);
    info!("⚠️ 降级: {}", degraded);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short.txt", 15), "short.txt");
        assert_eq!(truncate_text("a_very_long_filename.txt", 15), "a_very_long_fil...");
        assert_eq!(truncate_text("评分结果很好", 2), "评分...");
    }

    #[test]
    fn test_file_layer_appends_after_header() {
        let path = std::env::temp_dir()
            .join(format!("ai_grading_file_layer_{}", std::process::id()))
            .join("run.log");
        let path_str = path.display().to_string();
        init_log_file(&path_str).unwrap();

        let subscriber = tracing_subscriber::registry().with(file_layer(&path_str));
        tracing::subscriber::with_default(subscriber, || {
            info!("第 1 份提交评分完成");
        });

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("评分处理日志"));
        assert!(content.contains("第 1 份提交评分完成"));

        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn test_init_log_file_writes_header() {
        let path = std::env::temp_dir()
            .join(format!("ai_grading_log_{}", std::process::id()))
            .join("run.log");
        init_log_file(&path.display().to_string()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(&"=".repeat(60)));
        assert!(content.contains("评分处理日志"));

        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir_all(parent);
        }
    }
}

//! 正则兜底：结构化解析失败时从纯文本里找分数

use regex::Regex;
use std::sync::OnceLock;

/// 匹配 "score: 7"、"Marks 18/20" 之类的文本
fn score_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)(?:score|marks?)[:\s]*(\d+)(?:/(\d+))?").ok())
        .as_ref()
}

/// 从文本中提取分数并换算到 `total_marks`
///
/// 检测到不同且非零的分母时按比例换算，结果截断到 [0, total_marks]；
/// 找不到匹配时返回 `None`
pub fn extract_score(raw_text: &str, total_marks: u32) -> Option<f64> {
    let caps = score_pattern()?.captures(raw_text)?;
    let mut score: f64 = caps.get(1)?.as_str().parse().ok()?;
    let total = f64::from(total_marks);

    let denominator = caps
        .get(2)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|d| *d > 0.0);

    if let Some(max_score) = denominator {
        if max_score != total {
            score = score / max_score * total;
        }
    }

    Some(score.clamp(0.0, total))
}

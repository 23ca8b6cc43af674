//! 从 AI 回复中截取 JSON 候选区域

/// 截取第一个 `{` 到最后一个 `}` 之间的文本（含两端）
///
/// 没有 `{` 时返回 `None`；最后一个 `}` 缺失或位于第一个 `{` 之前时
/// （通常是回复被截断），返回从 `{` 到结尾的全部文本
pub fn candidate_region(raw_text: &str) -> Option<&str> {
    let text = raw_text.trim();
    let start = text.find('{')?;

    match text.rfind('}') {
        Some(end) if end > start => Some(&text[start..=end]),
        _ => Some(&text[start..]),
    }
}

//! 合并 AI 回复中的各段评语

use serde_json::Value as JsonValue;

/// 把总体评语、优点、待改进项和评分理由合并为一段文本
///
/// 字段缺失或为空的部分直接省略，各部分之间空一行
pub fn combine_feedback(data: &JsonValue) -> String {
    let mut parts = Vec::new();

    if let Some(overall) = non_empty_str(data, "overall_feedback") {
        parts.push(overall.to_string());
    }

    let strengths = string_list(data, "strengths");
    if !strengths.is_empty() {
        parts.push(bullet_section("**Strengths:**", &strengths));
    }

    let improvements = string_list(data, "areas_for_improvement");
    if !improvements.is_empty() {
        parts.push(bullet_section("**Areas for Improvement:**", &improvements));
    }

    if let Some(justification) = non_empty_str(data, "grade_justification") {
        parts.push(format!("**Grade Justification:**\n{}", justification));
    }

    parts.join("\n\n")
}

fn bullet_section(label: &str, items: &[String]) -> String {
    let bullets: Vec<String> = items.iter().map(|item| format!("• {}", item)).collect();
    format!("{}\n{}", label, bullets.join("\n"))
}

fn non_empty_str<'a>(data: &'a JsonValue, key: &str) -> Option<&'a str> {
    data.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
}

/// 读取字符串数组；单个字符串视为只有一项，非字符串元素转成文本
fn string_list(data: &JsonValue, key: &str) -> Vec<String> {
    match data.get(key) {
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                JsonValue::String(s) if !s.trim().is_empty() => Some(s.clone()),
                JsonValue::String(_) | JsonValue::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Some(JsonValue::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_sections() {
        let data = json!({
            "overall_feedback": "Solid work.",
            "strengths": ["Clear structure", "Good examples"],
            "areas_for_improvement": ["Cite sources"],
            "grade_justification": "Met most criteria."
        });

        assert_eq!(
            combine_feedback(&data),
            "Solid work.\n\n\
             **Strengths:**\n• Clear structure\n• Good examples\n\n\
             **Areas for Improvement:**\n• Cite sources\n\n\
             **Grade Justification:**\nMet most criteria."
        );
    }

    #[test]
    fn test_empty_sections_omitted() {
        let data = json!({
            "overall_feedback": "",
            "strengths": [],
            "grade_justification": "Only this."
        });
        assert_eq!(combine_feedback(&data), "**Grade Justification:**\nOnly this.");
    }

    #[test]
    fn test_nothing_present() {
        assert_eq!(combine_feedback(&json!({"total_score": 3})), "");
    }
}

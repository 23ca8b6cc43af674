//! 截断 JSON 的语法修复
//!
//! 只做括号和引号的配平，不保证语义正确：
//! 例如本应继续的字符串会被提前闭合

/// 配平引号和括号
///
/// 1. 引号数量为奇数时追加一个 `"`
/// 2. 从左到右扫描，用栈记录未闭合的 `{` / `[`，不匹配的闭合符号忽略
/// 3. 按后开先闭的顺序追加剩余的闭合符号
pub fn repair_json(json_str: &str) -> String {
    let mut repaired = json_str.trim().to_string();

    if repaired.matches('"').count() % 2 != 0 {
        repaired.push('"');
    }

    let mut stack: Vec<char> = Vec::new();
    for c in repaired.chars() {
        match c {
            '{' | '[' => stack.push(c),
            '}' if stack.last() == Some(&'{') => {
                stack.pop();
            }
            ']' if stack.last() == Some(&'[') => {
                stack.pop();
            }
            _ => {}
        }
    }

    while let Some(opener) = stack.pop() {
        repaired.push(if opener == '{' { '}' } else { ']' });
    }

    repaired
}

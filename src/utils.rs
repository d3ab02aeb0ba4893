use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ClientError;
use crate::structs::quiz_type::QuestionId;
use crate::structs::respond::{AdminQuestion, Attempt};

// 按整数前缀解析，"5abc" 得到5，没有数字时返回None
pub fn parse_leading_int(token: &str) -> Option<QuestionId> {
    let token = token.trim();
    let (negative, rest) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    // 0x前缀按十六进制处理
    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -value } else { value })
}

/// 把逗号分隔的ID列表解析出来，无法解析的位置保留为None
pub fn parse_question_ids(raw: &str) -> Vec<Option<QuestionId>> {
    raw.split(',').map(parse_leading_int).collect()
}

pub fn question_label(index: usize, text: &str) -> String {
    format!("Q{}. {}", index + 1, text)
}

pub fn question_count_text(count: usize) -> String {
    format!("Answer {} question(s)", count)
}

pub fn format_attempt(attempt: &Attempt) -> String {
    format!(
        "Score: {}/{}\nPercentage: {:.2}%\n",
        attempt.score, attempt.total_questions, attempt.percentage
    )
}

pub fn format_question_list(questions: &BTreeMap<QuestionId, AdminQuestion>) -> Vec<String> {
    questions
        .iter()
        .map(|(id, question)| format!("{}. {} (Ans: {})", id, question.q, question.a))
        .collect()
}

// 整数值的浮点数按整数输出，40.0 显示为 40
fn integral_floats_as_ints(value: &mut Value) {
    if value.is_f64() {
        // 超出2^53的整数无法精确表示，保持原样
        let whole = value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0);
        if let Some(f) = whole {
            *value = Value::from(f as i64);
        }
        return;
    }
    match value {
        Value::Array(items) => items.iter_mut().for_each(integral_floats_as_ints),
        Value::Object(map) => map.values_mut().for_each(integral_floats_as_ints),
        _ => {}
    }
}

// 两个空格缩进，数字格式与JSON.stringify一致
pub fn format_marks(marks: &Value) -> Result<String, ClientError> {
    let mut marks = marks.clone();
    integral_floats_as_ints(&mut marks);
    Ok(serde_json::to_string_pretty(&marks)?)
}

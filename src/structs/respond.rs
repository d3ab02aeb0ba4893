use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::structs::quiz_type::QuestionId;

// 各接口响应体，`ok: false` 已经在JsonRequester中处理

/// 缺少 `ok` 字段按未通过处理
#[derive(Deserialize, Debug)]
pub struct CheckRegRespond {
    #[serde(default)]
    pub ok: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub admin: bool,
}

/// 学号校验结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationCheck {
    Student,
    Admin,
    Rejected(String),
}

impl From<CheckRegRespond> for RegistrationCheck {
    fn from(respond: CheckRegRespond) -> Self {
        if !respond.ok {
            RegistrationCheck::Rejected(
                respond.error.unwrap_or_else(|| "registration check failed".to_string()),
            )
        } else if respond.admin {
            RegistrationCheck::Admin
        } else {
            RegistrationCheck::Student
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub q: String,
}

#[derive(Deserialize, Debug)]
pub struct QuestionsRespond {
    pub questions: Vec<Question>,
}

/// 服务器评分后的结果，其余字段忽略
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Attempt {
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
}

#[derive(Deserialize, Debug)]
pub struct SubmitAttemptRespond {
    pub attempt: Attempt,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AdminQuestion {
    pub q: String,
    pub a: String,
}

/// 键为字符串形式的ID，按数值排序
#[derive(Deserialize, Debug)]
pub struct AdminQuestionsRespond {
    pub questions: BTreeMap<QuestionId, AdminQuestion>,
}

#[derive(Deserialize, Debug)]
pub struct MarksRespond {
    pub marks: Value,
}

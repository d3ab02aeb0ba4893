use serde::Serialize;

use crate::structs::quiz_type::{QuestionId, Registration};

// 各接口请求体

#[derive(Serialize, Debug)]
pub struct CheckRegRequest<'a> {
    pub reg: &'a Registration,
}

#[derive(Serialize, Debug)]
pub struct SubmitAttemptRequest<'a> {
    pub reg: &'a Registration,
    pub name: &'a str,
    pub answers: Vec<String>,
    pub qids: Vec<QuestionId>,
}

#[derive(Serialize, Debug)]
pub struct AddQuestionRequest {
    pub q: String,
    pub a: String,
}

/// 无法解析的ID以 `null` 发送
#[derive(Serialize, Debug)]
pub struct DeleteQuestionsRequest {
    pub ids: Vec<Option<QuestionId>>,
}

use crate::error::ClientError;
use crate::structs::quiz_type::QuestionId;

/// 一道题对应的输入框
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionField {
    pub qid: QuestionId,
    pub label: String,
}

/// 用户在输入框中填写的内容，未动过的为 `None`
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerInput {
    pub qid: QuestionId,
    pub value: Option<String>,
}

/// 学生端界面
pub trait StudentView: Send + Sync {
    /// 学号输入框的原始内容
    fn registration(&self) -> String;
    /// 姓名输入框的原始内容
    fn name(&self) -> String;
    fn show_error(&self, error: &ClientError);
    fn navigate(&self, path: &str);
    /// 按顺序为每道题渲染一个输入框
    fn render_questions(&self, fields: &[QuestionField]);
    fn set_question_count(&self, text: &str);
    /// 按渲染顺序读取所有输入框
    fn answer_inputs(&self) -> Vec<AnswerInput>;
    fn show_result(&self, text: &str);
}

/// 管理端界面
pub trait AdminView: Send + Sync {
    fn render_question_list(&self, lines: &[String]);
    fn render_marks(&self, text: &str);
    fn show_error(&self, error: &ClientError);
}

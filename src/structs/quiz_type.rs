use std::fmt;

use serde::Serialize;

use crate::error::ClientError;

// 题目ID，由服务器分配
pub type QuestionId = i64;
// 学生姓名
pub type StudentName = String;
// 接口路径
pub type ApiPath = &'static str;

pub const CHECK_REG: ApiPath = "/api/check_reg";
pub const GET_QUESTIONS: ApiPath = "/api/get_questions";
pub const SUBMIT_ATTEMPT: ApiPath = "/api/submit_attempt";
pub const ADMIN_QUESTIONS: ApiPath = "/api/admin/questions";
pub const ADMIN_MARKS: ApiPath = "/api/admin/marks";
// 识别为管理员后跳转的页面
pub const ADMIN_PAGE: ApiPath = "/admin";

pub const REGISTRATION_LEN: usize = 8;

/// 学号，只能通过 [`Registration::parse`] 构造，保证恰好8位ASCII数字
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Registration(String);

impl Registration {
    /// 去掉首尾空白后校验学号格式
    pub fn parse(raw: &str) -> Result<Registration, ClientError> {
        let reg = raw.trim();
        if reg.len() == REGISTRATION_LEN && reg.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Registration(reg.to_string()))
        } else {
            Err(ClientError::Validation("Registration must be 8 digits".to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

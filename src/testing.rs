//! 单元测试用的假传输层和记录型界面

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::error::ClientError;
use crate::traits::transport::{RawResponse, Transport};
use crate::traits::view::{AdminView, AnswerInput, QuestionField, StudentView};

pub fn network_error() -> ClientError {
    let err = reqwest::Client::new()
        .get("http://[::1")
        .build()
        .expect_err("url should be rejected");
    ClientError::Network(err)
}

enum Scripted {
    Respond(RawResponse, Option<Duration>),
    Fail(fn() -> ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// 按(method, path)预设响应，最后一条会被重复使用
#[derive(Default)]
pub struct FakeTransport {
    scripts: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.scripts
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    pub fn respond(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.respond_text(method, path, status, &body.to_string());
    }

    pub fn respond_text(&self, method: Method, path: &str, status: StatusCode, body: &str) {
        let raw = RawResponse { status, body: body.to_string() };
        self.push(method, path, Scripted::Respond(raw, None));
    }

    pub fn respond_after(&self, method: Method, path: &str, delay: Duration, body: Value) {
        let raw = RawResponse { status: StatusCode::OK, body: body.to_string() };
        self.push(method, path, Scripted::Respond(raw, Some(delay)));
    }

    pub fn fail(&self, method: Method, path: &str, error: fn() -> ClientError) {
        self.push(method, path, Scripted::Fail(error));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| format!("{} {}", call.method, call.path))
            .collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<RawResponse, ClientError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.clone(),
            path: path.to_string(),
            body,
        });
        let next = {
            let mut scripts = self.scripts.lock().unwrap();
            match scripts.get_mut(&(method, path.to_string())) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().map(|scripted| match scripted {
                    Scripted::Respond(raw, delay) => Scripted::Respond(raw.clone(), *delay),
                    Scripted::Fail(error) => Scripted::Fail(*error),
                }),
                None => None,
            }
        };
        match next {
            Some(Scripted::Respond(raw, delay)) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                Ok(raw)
            }
            Some(Scripted::Fail(error)) => Err(error()),
            None => Ok(RawResponse { status: StatusCode::NOT_FOUND, body: String::new() }),
        }
    }
}

/// 学生端界面的内存实现，记录所有输出
#[derive(Default)]
pub struct RecordingStudentView {
    pub registration: Mutex<String>,
    pub name: Mutex<String>,
    pub answers: Mutex<HashMap<i64, String>>,
    pub fields: Mutex<Vec<QuestionField>>,
    pub errors: Mutex<Vec<String>>,
    pub navigated: Mutex<Option<String>>,
    pub count_text: Mutex<Option<String>>,
    pub result: Mutex<Option<String>>,
}

impl RecordingStudentView {
    pub fn with_input(registration: &str, name: &str) -> RecordingStudentView {
        let view = RecordingStudentView::default();
        *view.registration.lock().unwrap() = registration.to_string();
        *view.name.lock().unwrap() = name.to_string();
        view
    }

    pub fn type_answer(&self, qid: i64, answer: &str) {
        self.answers.lock().unwrap().insert(qid, answer.to_string());
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl StudentView for RecordingStudentView {
    fn registration(&self) -> String {
        self.registration.lock().unwrap().clone()
    }

    fn name(&self) -> String {
        self.name.lock().unwrap().clone()
    }

    fn show_error(&self, error: &ClientError) {
        self.errors.lock().unwrap().push(error.to_string());
    }

    fn navigate(&self, path: &str) {
        *self.navigated.lock().unwrap() = Some(path.to_string());
    }

    fn render_questions(&self, fields: &[QuestionField]) {
        *self.fields.lock().unwrap() = fields.to_vec();
    }

    fn set_question_count(&self, text: &str) {
        *self.count_text.lock().unwrap() = Some(text.to_string());
    }

    fn answer_inputs(&self) -> Vec<AnswerInput> {
        let answers = self.answers.lock().unwrap();
        self.fields
            .lock()
            .unwrap()
            .iter()
            .map(|field| AnswerInput {
                qid: field.qid,
                value: answers.get(&field.qid).cloned(),
            })
            .collect()
    }

    fn show_result(&self, text: &str) {
        *self.result.lock().unwrap() = Some(text.to_string());
    }
}

/// 管理端界面的内存实现
#[derive(Default)]
pub struct RecordingAdminView {
    pub lists: Mutex<Vec<Vec<String>>>,
    pub marks: Mutex<Option<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingAdminView {
    pub fn last_list(&self) -> Option<Vec<String>> {
        self.lists.lock().unwrap().last().cloned()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl AdminView for RecordingAdminView {
    fn render_question_list(&self, lines: &[String]) {
        self.lists.lock().unwrap().push(lines.to_vec());
    }

    fn render_marks(&self, text: &str) {
        *self.marks.lock().unwrap() = Some(text.to_string());
    }

    fn show_error(&self, error: &ClientError) {
        self.errors.lock().unwrap().push(error.to_string());
    }
}

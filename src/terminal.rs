//! 终端下的界面实现，输入通过 [`Prompt`] 读取后写入界面，控制器再从界面读取

use std::io;
use std::sync::{Mutex, MutexGuard};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use crate::error::ClientError;
use crate::structs::quiz_type::QuestionId;
use crate::traits::view::{AdminView, AnswerInput, QuestionField, StudentView};

/// 逐行读取标准输入
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn stdin() -> Prompt {
        Prompt {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// 输入结束时返回None
    pub async fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(label.as_bytes()).await?;
        stdout.flush().await?;
        self.lines.next_line().await
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
struct StudentInputs {
    registration: String,
    name: String,
    fields: Vec<QuestionField>,
    answers: Vec<Option<String>>,
    navigated: Option<String>,
}

#[derive(Default)]
pub struct TerminalStudentView {
    inputs: Mutex<StudentInputs>,
}

impl TerminalStudentView {
    pub fn new() -> TerminalStudentView {
        TerminalStudentView::default()
    }

    pub fn set_registration(&self, registration: String) {
        lock(&self.inputs).registration = registration;
    }

    pub fn set_name(&self, name: String) {
        lock(&self.inputs).name = name;
    }

    pub fn fields(&self) -> Vec<QuestionField> {
        lock(&self.inputs).fields.clone()
    }

    /// 空输入视为未作答
    pub fn set_answer(&self, qid: QuestionId, answer: String) {
        let mut inputs = lock(&self.inputs);
        if let Some(index) = inputs.fields.iter().position(|field| field.qid == qid) {
            inputs.answers[index] = if answer.is_empty() { None } else { Some(answer) };
        }
    }

    pub fn navigated(&self) -> Option<String> {
        lock(&self.inputs).navigated.clone()
    }
}

impl StudentView for TerminalStudentView {
    fn registration(&self) -> String {
        lock(&self.inputs).registration.clone()
    }

    fn name(&self) -> String {
        lock(&self.inputs).name.clone()
    }

    fn show_error(&self, error: &ClientError) {
        eprintln!("Error: {}", error);
    }

    fn navigate(&self, path: &str) {
        println!("Redirecting to {}", path);
        lock(&self.inputs).navigated = Some(path.to_string());
    }

    fn render_questions(&self, fields: &[QuestionField]) {
        let mut inputs = lock(&self.inputs);
        inputs.fields = fields.to_vec();
        inputs.answers = vec![None; fields.len()];
    }

    fn set_question_count(&self, text: &str) {
        println!("{}", text);
    }

    fn answer_inputs(&self) -> Vec<AnswerInput> {
        let inputs = lock(&self.inputs);
        inputs
            .fields
            .iter()
            .zip(&inputs.answers)
            .map(|(field, value)| AnswerInput {
                qid: field.qid,
                value: value.clone(),
            })
            .collect()
    }

    fn show_result(&self, text: &str) {
        print!("{}", text);
    }
}

pub struct TerminalAdminView;

impl AdminView for TerminalAdminView {
    fn render_question_list(&self, lines: &[String]) {
        println!("Questions:");
        for line in lines {
            println!("{}", line);
        }
    }

    fn render_marks(&self, text: &str) {
        println!("{}", text);
    }

    fn show_error(&self, error: &ClientError) {
        eprintln!("Error: {}", error);
    }
}

use std::sync::Arc;

use crate::error::ClientError;
use crate::requester::JsonRequester;
use crate::structs::quiz_type::{
    Registration, StudentName, ADMIN_PAGE, CHECK_REG, GET_QUESTIONS, SUBMIT_ATTEMPT,
};
use crate::structs::request::{CheckRegRequest, SubmitAttemptRequest};
use crate::structs::respond::{
    Attempt, CheckRegRespond, Question, QuestionsRespond, RegistrationCheck, SubmitAttemptRespond,
};
use crate::traits::view::{QuestionField, StudentView};
use crate::utils::{format_attempt, question_count_text, question_label};

/// 已通过学号校验并拿到题目的一次答题
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    pub reg: Registration,
    pub name: StudentName,
    pub questions: Vec<Question>,
}

/// 学生端流程，只能向前推进
#[derive(Debug, Clone, PartialEq)]
pub enum StudentState {
    Idle,
    Validating,
    CheckingRegistration,
    LoadingQuestions,
    AwaitingAnswers(QuizSession),
    Submitting,
    Graded(Attempt),
    /// 管理员学号，已跳转到管理页面
    Redirected(String),
}

pub struct StudentController {
    requester: JsonRequester,
    view: Arc<dyn StudentView>,
    state: StudentState,
}

impl StudentController {
    pub fn new(requester: JsonRequester, view: Arc<dyn StudentView>) -> StudentController {
        StudentController {
            requester,
            view,
            state: StudentState::Idle,
        }
    }

    pub fn state(&self) -> &StudentState {
        &self.state
    }

    fn transition(&mut self, state: StudentState) {
        log::debug!("学生端状态: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    // 出错时通知界面并回到指定状态
    fn fail(&mut self, error: ClientError, back_to: StudentState) -> ClientError {
        self.view.show_error(&error);
        self.transition(back_to);
        error
    }

    /// 点击开始：校验学号、确认身份、加载题目
    ///
    /// 只能在Idle状态下调用，否则返回 [`ClientError::InvalidState`]
    pub async fn start(&mut self) -> Result<(), ClientError> {
        if self.state != StudentState::Idle {
            log::warn!("答题已经开始，忽略重复的开始请求");
            return Err(ClientError::InvalidState("quiz has already started".to_string()));
        }

        self.transition(StudentState::Validating);
        let reg = match Registration::parse(&self.view.registration()) {
            Ok(reg) => reg,
            Err(e) => return Err(self.fail(e, StudentState::Idle)),
        };
        let name = self.view.name().trim().to_string();

        self.transition(StudentState::CheckingRegistration);
        let check = self
            .requester
            .post::<_, CheckRegRespond>(CHECK_REG, &CheckRegRequest { reg: &reg })
            .await
            .map(RegistrationCheck::from);
        match check {
            Ok(RegistrationCheck::Student) => {}
            Ok(RegistrationCheck::Rejected(message)) => {
                return Err(self.fail(ClientError::ServerRejected(message), StudentState::Idle));
            }
            Ok(RegistrationCheck::Admin) => {
                log::info!("学号{}为管理员，跳转到管理页面", reg);
                self.view.navigate(ADMIN_PAGE);
                self.transition(StudentState::Redirected(ADMIN_PAGE.to_string()));
                return Ok(());
            }
            Err(e) => return Err(self.fail(e, StudentState::Idle)),
        }

        self.transition(StudentState::LoadingQuestions);
        let questions = match self.requester.get::<QuestionsRespond>(GET_QUESTIONS).await {
            Ok(respond) => respond.questions,
            Err(e) => return Err(self.fail(e, StudentState::Idle)),
        };

        let fields: Vec<QuestionField> = questions
            .iter()
            .enumerate()
            .map(|(i, question)| QuestionField {
                qid: question.id,
                label: question_label(i, &question.q),
            })
            .collect();
        self.view.render_questions(&fields);
        self.view.set_question_count(&question_count_text(questions.len()));
        log::info!("学生{}({})开始答题，共{}题", name, reg, questions.len());

        self.transition(StudentState::AwaitingAnswers(QuizSession { reg, name, questions }));
        Ok(())
    }

    /// 点击提交：按题目顺序收集答案并交给服务器评分
    ///
    /// 只能在AwaitingAnswers状态下调用，否则返回 [`ClientError::InvalidState`]
    pub async fn submit(&mut self) -> Result<(), ClientError> {
        let session = match &self.state {
            StudentState::AwaitingAnswers(session) => session.clone(),
            other => {
                log::warn!("当前状态{:?}下无法提交", other);
                return Err(ClientError::InvalidState("no quiz is awaiting answers".to_string()));
            }
        };
        self.transition(StudentState::Submitting);

        let inputs = self.view.answer_inputs();
        let mut answers = Vec::with_capacity(session.questions.len());
        let mut qids = Vec::with_capacity(session.questions.len());
        for question in &session.questions {
            // 答案不做trim，未填写的按空字符串提交
            let answer = inputs
                .iter()
                .find(|input| input.qid == question.id)
                .and_then(|input| input.value.clone())
                .unwrap_or_default();
            answers.push(answer);
            qids.push(question.id);
        }

        let request = SubmitAttemptRequest {
            reg: &session.reg,
            name: &session.name,
            answers,
            qids,
        };
        let result = self
            .requester
            .post::<_, SubmitAttemptRespond>(SUBMIT_ATTEMPT, &request)
            .await;
        match result {
            Ok(respond) => {
                let attempt = respond.attempt;
                log::info!(
                    "学生{}得分{}/{}",
                    session.reg, attempt.score, attempt.total_questions
                );
                self.view.show_result(&format_attempt(&attempt));
                self.transition(StudentState::Graded(attempt));
                Ok(())
            }
            // 提交失败可以重新提交
            Err(e) => Err(self.fail(e, StudentState::AwaitingAnswers(session))),
        }
    }
}

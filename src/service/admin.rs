use std::sync::Arc;

use serde::de::IgnoredAny;
use tokio::sync::{mpsc, oneshot};

use crate::error::ClientError;
use crate::requester::JsonRequester;
use crate::structs::quiz_type::{ADMIN_MARKS, ADMIN_QUESTIONS};
use crate::structs::request::{AddQuestionRequest, DeleteQuestionsRequest};
use crate::structs::respond::{AdminQuestionsRespond, MarksRespond};
use crate::traits::view::AdminView;
use crate::utils::{format_marks, format_question_list, parse_question_ids};

type Reply = oneshot::Sender<Result<(), ClientError>>;

#[derive(Debug)]
enum Command {
    List {
        res_tx: Reply,
    },

    Add {
        q: String,
        a: String,
        res_tx: Reply,
    },

    Delete {
        raw_ids: String,
        res_tx: Reply,
    },

    Marks {
        res_tx: Reply,
    },
}

/// 管理端控制器，命令逐条执行，同一时间只有一个请求在进行
pub struct AdminController {
    requester: JsonRequester,

    view: Arc<dyn AdminView>,

    /// 接收命令的管道
    cmd_rx: mpsc::UnboundedReceiver<Command>,
}

impl AdminController {
    pub fn new(requester: JsonRequester, view: Arc<dyn AdminView>) -> (AdminController, AdminHandle) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        (
            AdminController {
                requester,
                view,
                cmd_rx,
            },
            AdminHandle { cmd_tx },
        )
    }

    // 失败时通知界面
    fn report(&self, result: Result<(), ClientError>) -> Result<(), ClientError> {
        if let Err(e) = &result {
            self.view.show_error(e);
        }
        result
    }

    async fn load_questions(&self) -> Result<(), ClientError> {
        let respond: AdminQuestionsRespond = self.requester.get(ADMIN_QUESTIONS).await?;
        let lines = format_question_list(&respond.questions);
        log::debug!("题库共{}题", lines.len());
        self.view.render_question_list(&lines);
        Ok(())
    }

    async fn add_question(&self, q: String, a: String) -> Result<(), ClientError> {
        let request = AddQuestionRequest {
            q: q.trim().to_string(),
            a: a.trim().to_string(),
        };
        let added = self
            .requester
            .post::<_, IgnoredAny>(ADMIN_QUESTIONS, &request)
            .await
            .map(|_| log::info!("已添加题目: {}", request.q));
        let added = self.report(added);
        // 无论添加是否成功都刷新列表
        let listed = self.report(self.load_questions().await);
        added.and(listed)
    }

    async fn delete_questions(&self, raw_ids: String) -> Result<(), ClientError> {
        let request = DeleteQuestionsRequest {
            ids: parse_question_ids(&raw_ids),
        };
        if request.ids.iter().any(Option::is_none) {
            log::warn!("删除列表中存在无法解析的ID: {:?}", raw_ids);
        }
        let deleted = self
            .requester
            .delete::<_, IgnoredAny>(ADMIN_QUESTIONS, &request)
            .await
            .map(|_| log::info!("已删除题目: {:?}", request.ids));
        let deleted = self.report(deleted);
        let listed = self.report(self.load_questions().await);
        deleted.and(listed)
    }

    async fn refresh_marks(&self) -> Result<(), ClientError> {
        let respond: MarksRespond = self.requester.get(ADMIN_MARKS).await?;
        self.view.render_marks(&format_marks(&respond.marks)?);
        Ok(())
    }

    /// 启动时先加载一次题目列表，之后按顺序处理命令，所有handle都被丢弃后退出
    pub async fn run(mut self) {
        let _ = self.report(self.load_questions().await);

        while let Some(cmd) = self.cmd_rx.recv().await {
            match cmd {
                Command::List { res_tx } => {
                    let result = self.report(self.load_questions().await);
                    let _ = res_tx.send(result);
                }

                Command::Add { q, a, res_tx } => {
                    let result = self.add_question(q, a).await;
                    let _ = res_tx.send(result);
                }

                Command::Delete { raw_ids, res_tx } => {
                    let result = self.delete_questions(raw_ids).await;
                    let _ = res_tx.send(result);
                }

                Command::Marks { res_tx } => {
                    let result = self.report(self.refresh_marks().await);
                    let _ = res_tx.send(result);
                }
            }
        }
        log::debug!("管理端控制器退出");
    }
}

#[derive(Debug, Clone)]
pub struct AdminHandle {
    cmd_tx: mpsc::UnboundedSender<Command>,
}

impl AdminHandle {
    async fn call(&self, cmd: impl FnOnce(Reply) -> Command) -> Result<(), ClientError> {
        let (res_tx, res_rx) = oneshot::channel();
        self.cmd_tx.send(cmd(res_tx)).map_err(|_| ClientError::Closed)?;
        res_rx.await.map_err(|_| ClientError::Closed)?
    }

    /// 重新拉取题目列表
    pub async fn load_questions(&self) -> Result<(), ClientError> {
        self.call(|res_tx| Command::List { res_tx }).await
    }

    /// 添加题目，完成后刷新列表
    pub async fn add_question(&self, q: impl Into<String>, a: impl Into<String>) -> Result<(), ClientError> {
        let (q, a) = (q.into(), a.into());
        self.call(|res_tx| Command::Add { q, a, res_tx }).await
    }

    /// 按逗号分隔的ID删除题目，完成后刷新列表
    pub async fn delete_questions(&self, raw_ids: impl Into<String>) -> Result<(), ClientError> {
        let raw_ids = raw_ids.into();
        self.call(|res_tx| Command::Delete { raw_ids, res_tx }).await
    }

    pub async fn refresh_marks(&self) -> Result<(), ClientError> {
        self.call(|res_tx| Command::Marks { res_tx }).await
    }
}

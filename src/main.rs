use std::env;
use std::error::Error;
use std::sync::Arc;

use lazy_static::lazy_static;

use quiz_client::terminal::{Prompt, TerminalAdminView, TerminalStudentView};
use quiz_client::{AdminController, Config, JsonRequester, StudentController, StudentState};

const CONFIG_FILE: &str = "config.toml";

lazy_static! {
    static ref CONFIG: Config = match Config::load(CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            log::error!("读取配置失败: {}", e);
            std::process::exit(1);
        }
    };
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let requester = JsonRequester::http(CONFIG.base_url.clone(), CONFIG.timeout)?;
    let mut prompt = Prompt::stdin();

    match env::args().nth(1).as_deref() {
        None | Some("student") => {
            // 管理员学号会被重定向到管理端
            if run_student(requester.clone(), &mut prompt).await? {
                run_admin(requester, &mut prompt).await?;
            }
        }
        Some("admin") => run_admin(requester, &mut prompt).await?,
        Some(other) => {
            eprintln!("unknown mode {:?}, usage: quiz-client [student|admin]", other);
            std::process::exit(2);
        }
    }
    Ok(())
}

// 返回true表示需要切换到管理端
async fn run_student(requester: JsonRequester, prompt: &mut Prompt) -> Result<bool, Box<dyn Error>> {
    let view = Arc::new(TerminalStudentView::new());
    let mut controller = StudentController::new(requester, view.clone());

    while *controller.state() == StudentState::Idle {
        let Some(registration) = prompt.ask("Registration number: ").await? else {
            return Ok(false);
        };
        let Some(name) = prompt.ask("Name: ").await? else {
            return Ok(false);
        };
        view.set_registration(registration);
        view.set_name(name);
        // 错误已经由界面展示
        let _ = controller.start().await;
    }

    if let Some(path) = view.navigated() {
        log::info!("切换到{}", path);
        return Ok(true);
    }

    for field in view.fields() {
        let Some(answer) = prompt.ask(&format!("{}\n> ", field.label)).await? else {
            return Ok(false);
        };
        view.set_answer(field.qid, answer);
    }

    while controller.submit().await.is_err() {
        if prompt.ask("Press enter to submit again: ").await?.is_none() {
            break;
        }
    }
    Ok(false)
}

async fn run_admin(requester: JsonRequester, prompt: &mut Prompt) -> Result<(), Box<dyn Error>> {
    let (controller, handle) = AdminController::new(requester, Arc::new(TerminalAdminView));
    let server = tokio::spawn(controller.run());

    println!("Commands: list, add, delete, marks, quit");
    while let Some(line) = prompt.ask("admin> ").await? {
        let result = match line.trim() {
            "" => continue,
            "list" => handle.load_questions().await,
            "add" => {
                let Some(q) = prompt.ask("Question: ").await? else { break };
                let Some(a) = prompt.ask("Answer: ").await? else { break };
                handle.add_question(q, a).await
            }
            "delete" => {
                let Some(ids) = prompt.ask("Question ids (comma separated): ").await? else { break };
                handle.delete_questions(ids).await
            }
            "marks" => handle.refresh_marks().await,
            "quit" | "exit" => break,
            other => {
                println!("Unknown command {:?}", other);
                continue;
            }
        };
        if let Err(e) = result {
            log::debug!("管理端命令失败: {}", e);
        }
    }

    // 丢弃handle后控制器自行退出
    drop(handle);
    server.await?;
    Ok(())
}

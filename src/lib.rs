//! 在线答题系统的客户端：学生答题流程与管理端题库维护

pub mod config;
pub mod error;
pub mod requester;
pub mod service;
pub mod structs;
pub mod terminal;
pub mod traits;
pub mod utils;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::ClientError;
pub use requester::{HttpTransport, JsonRequester};
pub use service::admin::{AdminController, AdminHandle};
pub use service::student::{QuizSession, StudentController, StudentState};

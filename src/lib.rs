//! 在线代码执行服务的客户端编排器
//!
//! 面向一个远端编译执行服务，提供编辑器会话所需的全部流程：
//! 单次执行、批量评测、语义高亮、题目示例导入和 AI 提示。
//!
//! # 架构分层
//!
//! ```text
//! orchestrator  业务编排（单次执行 / 批量评测 / 导入 / 提示 / 门面）
//!      |
//! services      可复用能力（轮询驱动 / 防抖管线 / 缓存 / 检测）
//!      |
//! clients       HTTP 客户端（编译服务的全部端点）
//!      |
//! api / models  报文类型与领域模型
//! ```
//!
//! 上层只通过 trait 依赖下层的网络能力，测试时用本地假实现替换。

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use models::{Language, TestCase, TestCaseSet};
pub use orchestrator::{App, Dispatch, ImportOutcome, RunState, TestRunState};

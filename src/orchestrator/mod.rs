//! 业务编排层
//!
//! 职责：把服务层的能力组装成面向用户操作的完整流程
//!
//! 核心模块：
//! - [`single_run`]：单次执行（含输入需求确认）
//! - [`batch_test`]：批量评测与结果对应
//! - [`problem_import`]：题目示例导入
//! - [`ai_hint`]：AI 提示（含缓存与题目上下文）
//! - [`app`]：面向调用方的顶层门面

pub mod ai_hint;
pub mod app;
pub mod batch_test;
pub mod problem_import;
pub mod single_run;

pub use ai_hint::AiHintCoordinator;
pub use app::{App, ImportOutcome};
pub use batch_test::{BatchTestOrchestrator, TestRunState};
pub use problem_import::{ProblemImportCoordinator, ProblemImportResult};
pub use single_run::{Dispatch, RunState, SingleRunOrchestrator};

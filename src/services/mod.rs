//! 服务层
//!
//! 职责：与具体业务流程无关的可复用能力
//!
//! 核心模块：
//! - [`hasher`]：源代码的短指纹
//! - [`cache_key`]：AI 提示的缓存键构造
//! - [`hint_cache`]：AI 提示的会话级缓存
//! - [`input_detector`]：检测代码是否读取标准输入
//! - [`job_poller`]：作业提交与轮询驱动
//! - [`token_pipeline`]：语义令牌的防抖分析管线

pub mod cache_key;
pub mod hasher;
pub mod hint_cache;
pub mod input_detector;
pub mod job_poller;
pub mod token_pipeline;

pub use hint_cache::{HintCache, HintEntry};
pub use input_detector::InputRequirementDetector;
pub use job_poller::{JobBackend, JobOutcome, JobPoller, JobProgress, PollReport, SubmittedJob};
pub use token_pipeline::{Decoration, DecorationState, SemanticTokenPipeline, TokenAnalyzer};

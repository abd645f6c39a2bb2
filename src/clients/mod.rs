//! HTTP 客户端层
//!
//! 所有与编译服务的网络交互都集中在 [`compiler_client`]，
//! 上层通过 trait 依赖它，测试时可以替换为本地假实现。

pub mod compiler_client;

pub use compiler_client::{BatchJob, CompileJob, CompilerClient};

//! 日志初始化
//!
//! 过滤级别优先取 `RUST_LOG` 环境变量，未设置时根据配置的
//! 详细日志开关落到 `debug` 或 `info`

use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器（重复调用是安全的）
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 编译服务 API 根路径
    pub api_base_url: String,
    /// 单次 HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 作业状态轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 编辑防抖窗口（毫秒）
    pub debounce_ms: u64,
    /// 语言切换 / 初次加载时的安定延迟（毫秒）
    pub settle_delay_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/compiler/api".to_string(),
            request_timeout_secs: 30,
            poll_interval_ms: 1000,
            debounce_ms: 500,
            settle_delay_ms: 150,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("COMPILER_API_BASE_URL").unwrap_or(default.api_base_url),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_ms),
            debounce_ms: std::env::var("DEBOUNCE_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.debounce_ms),
            settle_delay_ms: std::env::var("SETTLE_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.settle_delay_ms),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}

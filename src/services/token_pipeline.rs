//! 语义令牌的防抖分析管线
//!
//! 职责：编辑事件到达后延迟一个防抖窗口再请求分析，窗口内的
//! 连续编辑只保留最后一次；结果回来时如果已有更新的编辑在排队，
//! 过期结果整批丢弃，保证装饰集合永远反映最新一次成功分析
//!
//! 失败策略：分析失败不保留旧装饰，直接清空，宁可无高亮也不要
//! 错位的高亮。

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::SemanticToken;
use crate::error::Result;
use crate::models::Language;

/// 一条编辑器装饰（行列均为 1 起始）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub class_name: String,
}

impl Decoration {
    /// 由 0 起始的语义令牌换算为 1 起始的装饰区间
    pub fn from_token(token: &SemanticToken) -> Self {
        Decoration {
            start_line: token.line + 1,
            start_column: token.start + 1,
            end_line: token.line + 1,
            end_column: token.start + token.length + 1,
            class_name: format!("token-{}", token.token_type),
        }
    }
}

/// 当前生效的装饰集合，供渲染侧共享读取
pub type DecorationState = Arc<Mutex<Vec<Decoration>>>;

/// 语义令牌分析器
pub trait TokenAnalyzer {
    fn analyze(
        &self,
        language: Language,
        code: &str,
    ) -> impl Future<Output = Result<Vec<SemanticToken>>> + Send;
}

/// 防抖分析管线
pub struct SemanticTokenPipeline<A> {
    analyzer: Arc<A>,
    decorations: DecorationState,
    generation: Arc<AtomicU64>,
    debounce: Duration,
    settle: Duration,
}

impl<A> SemanticTokenPipeline<A>
where
    A: TokenAnalyzer + Send + Sync + 'static,
{
    pub fn new(analyzer: Arc<A>, debounce: Duration, settle: Duration) -> Self {
        SemanticTokenPipeline {
            analyzer,
            decorations: Arc::new(Mutex::new(Vec::new())),
            generation: Arc::new(AtomicU64::new(0)),
            debounce,
            settle,
        }
    }

    /// 当前生效的装饰集合
    pub fn decorations(&self) -> DecorationState {
        Arc::clone(&self.decorations)
    }

    /// 编辑事件：延迟一个防抖窗口后分析
    pub fn on_edit(&self, language: Language, text: &str) -> JoinHandle<()> {
        self.schedule(language, text.to_string(), self.debounce)
    }

    /// 立即刷新（语言切换、初次装载），只等一个短暂的安定延迟
    pub fn refresh_now(&self, language: Language, text: &str) -> JoinHandle<()> {
        self.schedule(language, text.to_string(), self.settle)
    }

    fn schedule(&self, language: Language, text: String, delay: Duration) -> JoinHandle<()> {
        // 领取新一代编号，之前排队的任务在醒来时发现过期即放弃
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let analyzer = Arc::clone(&self.analyzer);
        let decorations = Arc::clone(&self.decorations);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if generation.load(Ordering::SeqCst) != token {
                return;
            }

            let tokens = match analyzer.analyze(language, &text).await {
                Ok(tokens) => tokens,
                Err(e) => {
                    warn!("⚠️ 语义分析失败，清空高亮: {}", e);
                    Vec::new()
                }
            };

            // 结果回来时可能已有更新的编辑在排队，过期结果整批丢弃
            if generation.load(Ordering::SeqCst) != token {
                debug!("丢弃过期的语义分析结果");
                return;
            }

            let fresh: Vec<Decoration> = tokens.iter().map(Decoration::from_token).collect();
            let mut current = decorations.lock().unwrap_or_else(|e| e.into_inner());
            current.clear();
            current.extend(fresh);
        })
    }
}
